mod repository;
mod router;
mod service;

pub use repository::{AssessmentRepository, RepositoryError};
pub use router::results_router;
pub use service::{ResultsService, ResultsServiceError};
