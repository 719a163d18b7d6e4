use super::maturity::{maturity_for_sum, percentage_of, MaturityLevel};
use crate::assessments::domain::{Category, Question, Submission};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreTotals {
    pub total_score: u64,
    pub max_score: u64,
    pub percentage: f64,
}

impl ScoreTotals {
    pub fn new(total_score: u64, max_score: u64) -> Self {
        Self {
            total_score,
            max_score,
            percentage: percentage_of(total_score, max_score),
        }
    }

    pub fn maturity(&self) -> MaturityLevel {
        maturity_for_sum(self.total_score, self.max_score)
    }
}

/// Sums scores across every submission. Sums are widened to `u64` so any
/// number of `u32` submission scores adds up without overflow.
pub fn aggregate_overall(submissions: &[Submission]) -> ScoreTotals {
    let total_score = submissions
        .iter()
        .map(|submission| u64::from(submission.total_score))
        .sum();
    let max_score = submissions
        .iter()
        .map(|submission| u64::from(submission.max_score))
        .sum();
    ScoreTotals::new(total_score, max_score)
}

/// Totals keyed by category id.
///
/// A category without a submission reports `0` out of the best score its
/// question bank allows, so unanswered categories still show their potential.
pub fn aggregate_by_category(
    submissions: &[Submission],
    categories: &[Category],
) -> BTreeMap<String, ScoreTotals> {
    categories
        .iter()
        .map(|category| (category.id.clone(), category_totals(submissions, category)))
        .collect()
}

fn category_totals(submissions: &[Submission], category: &Category) -> ScoreTotals {
    match find_submission(submissions, &category.id) {
        Some(submission) => ScoreTotals::new(
            u64::from(submission.total_score),
            u64::from(submission.max_score),
        ),
        None => ScoreTotals::new(0, max_score_for_questions(&category.questions)),
    }
}

pub(crate) fn find_submission<'a>(
    submissions: &'a [Submission],
    category_id: &str,
) -> Option<&'a Submission> {
    submissions
        .iter()
        .find(|submission| submission.category_id == category_id)
}

/// Best achievable score for a question bank: each question's top option.
pub fn max_score_for_questions<'a, I>(questions: I) -> u64
where
    I: IntoIterator<Item = &'a Question>,
{
    questions
        .into_iter()
        .map(|question| u64::from(question.max_answer_score()))
        .sum()
}
