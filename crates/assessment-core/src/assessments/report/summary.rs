use super::super::answers::{match_answers, parse_detailed_answers, AnswerMatch};
use super::super::domain::{Category, Question, Submission, TargetRole};
use super::super::scoring::{
    compare_many, find_submission, maturity_distribution, max_score_for_questions,
    ComparisonEntry, EntitySubmissions, ScoreTotals,
};
use super::views::{
    CategoryResultView, ComparisonEntryView, ComparisonSummary, MaturityBucketView,
    RespondentReportSummary,
};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct CategoryResult {
    pub category_id: String,
    pub category_name: String,
    pub totals: ScoreTotals,
    pub submitted: bool,
    pub submitted_at: Option<DateTime<Utc>>,
    pub answers: Vec<AnswerMatch>,
}

impl CategoryResult {
    fn build(category: &Category, submissions: &[Submission], role: TargetRole) -> Self {
        let questions: Vec<Question> = category
            .questions_for(role)
            .into_iter()
            .cloned()
            .collect();
        let submission = find_submission(submissions, &category.id);

        let totals = match submission {
            Some(submission) => ScoreTotals::new(
                u64::from(submission.total_score),
                u64::from(submission.max_score),
            ),
            None => ScoreTotals::new(0, max_score_for_questions(&questions)),
        };
        let answers = submission
            .map(|submission| {
                let parsed = parse_detailed_answers(&submission.detailed_answers, &questions);
                match_answers(&parsed, &questions)
            })
            .unwrap_or_default();

        Self {
            category_id: category.id.clone(),
            category_name: category.name.clone(),
            totals,
            submitted: submission.is_some(),
            submitted_at: submission.and_then(|submission| submission.submitted_at),
            answers,
        }
    }

    pub fn to_view(&self) -> CategoryResultView {
        CategoryResultView {
            category_id: self.category_id.clone(),
            category_name: self.category_name.clone(),
            submitted: self.submitted,
            submitted_at: self.submitted_at,
            result: self.totals.into(),
            answers: self.answers.clone(),
        }
    }
}

/// Everything a single respondent's results page shows.
#[derive(Debug, Clone, Default)]
pub struct RespondentReport {
    pub categories: Vec<CategoryResult>,
    pub overall: ScoreTotals,
}

impl RespondentReport {
    /// Report over every question of every category.
    pub fn build(categories: &[Category], submissions: &[Submission]) -> Self {
        Self::build_for_role(categories, submissions, TargetRole::Both)
    }

    /// One result per category, in the order given. Questions aimed at
    /// another population neither name parsed answers nor count toward a
    /// pending category's maximum.
    ///
    /// The overall score sums the same submission each row shows (the first
    /// one per category), so pending categories and duplicate submissions
    /// leave it untouched.
    pub fn build_for_role(
        categories: &[Category],
        submissions: &[Submission],
        role: TargetRole,
    ) -> Self {
        let categories: Vec<CategoryResult> = categories
            .iter()
            .map(|category| CategoryResult::build(category, submissions, role))
            .collect();
        let (total_score, max_score) = categories
            .iter()
            .filter(|result| result.submitted)
            .fold((0, 0), |(total, max), result| {
                (total + result.totals.total_score, max + result.totals.max_score)
            });

        Self {
            categories,
            overall: ScoreTotals::new(total_score, max_score),
        }
    }

    pub fn pending_categories(&self) -> impl Iterator<Item = &CategoryResult> {
        self.categories.iter().filter(|result| !result.submitted)
    }

    pub fn strongest_category(&self) -> Option<&CategoryResult> {
        self.scored_categories().reduce(|best, candidate| {
            if candidate.totals.percentage > best.totals.percentage {
                candidate
            } else {
                best
            }
        })
    }

    pub fn weakest_category(&self) -> Option<&CategoryResult> {
        self.scored_categories().reduce(|worst, candidate| {
            if candidate.totals.percentage < worst.totals.percentage {
                candidate
            } else {
                worst
            }
        })
    }

    fn scored_categories(&self) -> impl Iterator<Item = &CategoryResult> {
        self.categories
            .iter()
            .filter(|result| result.submitted && result.totals.max_score > 0)
    }

    pub fn summary(&self, generated_at: DateTime<Utc>) -> RespondentReportSummary {
        RespondentReportSummary {
            generated_at,
            overall: self.overall.into(),
            categories: self.categories.iter().map(CategoryResult::to_view).collect(),
            pending_categories: self.pending_categories().count(),
            strongest_category: self
                .strongest_category()
                .map(|result| result.category_name.clone()),
            weakest_category: self
                .weakest_category()
                .map(|result| result.category_name.clone()),
        }
    }
}

/// Side-by-side standing of several employees, companies or groups.
#[derive(Debug, Clone, Default)]
pub struct ComparisonReport {
    pub entries: Vec<ComparisonEntry>,
}

impl ComparisonReport {
    pub fn build(entities: &[EntitySubmissions]) -> Self {
        Self {
            entries: compare_many(entities),
        }
    }

    pub fn average_percentage(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.entries.iter().map(ComparisonEntry::percentage).sum();
        sum / self.entries.len() as f64
    }

    pub fn summary(&self, generated_at: DateTime<Utc>) -> ComparisonSummary {
        let entries = self
            .entries
            .iter()
            .map(|entry| ComparisonEntryView {
                name: entry.name.clone(),
                result: entry.totals.into(),
            })
            .collect();

        let distribution = maturity_distribution(&self.entries)
            .into_iter()
            .map(|(level, count)| MaturityBucketView {
                maturity: level.into(),
                count,
            })
            .collect();

        ComparisonSummary {
            generated_at,
            entries,
            distribution,
            average_percentage: self.average_percentage(),
        }
    }
}
