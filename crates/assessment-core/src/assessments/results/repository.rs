use crate::assessments::domain::{Category, Submission};

/// Storage abstraction so the results service can be exercised in isolation.
pub trait AssessmentRepository: Send + Sync {
    fn insert_category(&self, category: Category) -> Result<Category, RepositoryError>;
    fn categories(&self) -> Result<Vec<Category>, RepositoryError>;
    fn insert_submission(&self, submission: Submission) -> Result<Submission, RepositoryError>;
    fn submissions(&self) -> Result<Vec<Submission>, RepositoryError>;

    fn submissions_for_user(&self, user_id: &str) -> Result<Vec<Submission>, RepositoryError> {
        let mut submissions = self.submissions()?;
        submissions.retain(|submission| submission.user_id == user_id);
        Ok(submissions)
    }

    fn submissions_for_company(
        &self,
        company_name: &str,
    ) -> Result<Vec<Submission>, RepositoryError> {
        let mut submissions = self.submissions()?;
        submissions.retain(|submission| submission.company_name == company_name);
        Ok(submissions)
    }
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
