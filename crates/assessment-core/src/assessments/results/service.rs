use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use super::repository::{AssessmentRepository, RepositoryError};
use crate::assessments::domain::{Category, Submission, TargetRole};
use crate::assessments::report::{ComparisonReport, RespondentReport};
use crate::assessments::scoring::EntitySubmissions;

/// Builds results views from whatever the repository has stored.
pub struct ResultsService<R>
where
    R: AssessmentRepository,
{
    repository: Arc<R>,
}

impl<R> ResultsService<R>
where
    R: AssessmentRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn register_category(&self, category: Category) -> Result<Category, ResultsServiceError> {
        if category.id.trim().is_empty() {
            return Err(ResultsServiceError::InvalidInput(
                "category id must not be empty".to_string(),
            ));
        }

        let category = self.repository.insert_category(category)?;
        info!(
            category_id = %category.id,
            questions = category.questions.len(),
            "category registered"
        );
        Ok(category)
    }

    pub fn record_submission(
        &self,
        submission: Submission,
    ) -> Result<Submission, ResultsServiceError> {
        let known = self
            .repository
            .categories()?
            .iter()
            .any(|category| category.id == submission.category_id);
        if !known {
            return Err(ResultsServiceError::UnknownCategory(submission.category_id));
        }

        let submission = self.repository.insert_submission(submission)?;
        info!(
            submission_id = %submission.id,
            category_id = %submission.category_id,
            user_id = %submission.user_id,
            "submission recorded"
        );
        Ok(submission)
    }

    /// Results for one respondent across every category visible to `role`.
    pub fn respondent_report(
        &self,
        user_id: &str,
        role: Option<TargetRole>,
    ) -> Result<RespondentReport, ResultsServiceError> {
        let categories: Vec<Category> = self
            .repository
            .categories()?
            .into_iter()
            .filter(|category| role.map_or(true, |role| category.target_role.applies_to(role)))
            .collect();
        let submissions: Vec<Submission> = self
            .repository
            .submissions_for_user(user_id)?
            .into_iter()
            .filter(|submission| {
                categories
                    .iter()
                    .any(|category| category.id == submission.category_id)
            })
            .collect();

        debug!(
            user_id,
            categories = categories.len(),
            submissions = submissions.len(),
            "building respondent report"
        );
        Ok(RespondentReport::build_for_role(
            &categories,
            &submissions,
            role.unwrap_or_default(),
        ))
    }

    /// One entry per employee of `company_name`.
    pub fn compare_employees(
        &self,
        company_name: &str,
    ) -> Result<ComparisonReport, ResultsServiceError> {
        let submissions = self.repository.submissions_for_company(company_name)?;
        if submissions.is_empty() {
            return Err(ResultsServiceError::UnknownCompany(company_name.to_string()));
        }

        let entities = group_entities(submissions, |submission| {
            (submission.user_id.clone(), display_name(&submission.user_name, &submission.user_id))
        });
        Ok(ComparisonReport::build(&entities))
    }

    /// One entry per company with at least one submission.
    pub fn compare_companies(&self) -> Result<ComparisonReport, ResultsServiceError> {
        let submissions = self.repository.submissions()?;
        let entities = group_entities(submissions, |submission| {
            (
                submission.company_name.clone(),
                submission.company_name.clone(),
            )
        });
        Ok(ComparisonReport::build(&entities))
    }
}

fn display_name(name: &str, fallback: &str) -> String {
    if name.trim().is_empty() {
        fallback.to_string()
    } else {
        name.to_string()
    }
}

/// Groups submissions by key, keeping first-seen order so equal display
/// names stay stable through the comparison sort.
fn group_entities<F>(submissions: Vec<Submission>, key_for: F) -> Vec<EntitySubmissions>
where
    F: Fn(&Submission) -> (String, String),
{
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut entities: Vec<EntitySubmissions> = Vec::new();

    for submission in submissions {
        let (key, name) = key_for(&submission);
        match positions.get(&key) {
            Some(&index) => entities[index].submissions.push(submission),
            None => {
                positions.insert(key, entities.len());
                entities.push(EntitySubmissions::new(name, vec![submission]));
            }
        }
    }

    entities
}

#[derive(Debug, thiserror::Error)]
pub enum ResultsServiceError {
    #[error("unknown category {0}")]
    UnknownCategory(String),
    #[error("no submissions recorded for company {0}")]
    UnknownCompany(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}
