use assessment_core::assessments::results::{AssessmentRepository, RepositoryError, ResultsServiceError};
use assessment_core::assessments::{AssessmentBundle, Category, Submission};
use assessment_core::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAssessmentRepository {
    categories: Arc<Mutex<Vec<Category>>>,
    submissions: Arc<Mutex<Vec<Submission>>>,
}

impl AssessmentRepository for InMemoryAssessmentRepository {
    fn insert_category(&self, category: Category) -> Result<Category, RepositoryError> {
        let mut guard = self.categories.lock().expect("category mutex poisoned");
        if guard.iter().any(|existing| existing.id == category.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(category.clone());
        Ok(category)
    }

    fn categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let guard = self.categories.lock().expect("category mutex poisoned");
        Ok(guard.clone())
    }

    fn insert_submission(&self, submission: Submission) -> Result<Submission, RepositoryError> {
        let mut guard = self.submissions.lock().expect("submission mutex poisoned");
        if guard.iter().any(|existing| existing.id == submission.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(submission.clone());
        Ok(submission)
    }

    fn submissions(&self) -> Result<Vec<Submission>, RepositoryError> {
        let guard = self.submissions.lock().expect("submission mutex poisoned");
        Ok(guard.clone())
    }
}

pub(crate) fn load_bundle(path: &Path) -> Result<AssessmentBundle, AppError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Loads a bundle as-is; submissions for categories outside the bundle are kept.
pub(crate) fn seeded_repository(
    bundle: AssessmentBundle,
) -> Result<InMemoryAssessmentRepository, AppError> {
    let repository = InMemoryAssessmentRepository::default();
    for category in bundle.categories {
        repository
            .insert_category(category)
            .map_err(ResultsServiceError::from)?;
    }
    for submission in bundle.submissions {
        repository
            .insert_submission(submission)
            .map_err(ResultsServiceError::from)?;
    }
    Ok(repository)
}
