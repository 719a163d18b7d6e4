mod aggregate;
mod comparison;
mod maturity;

pub use aggregate::{aggregate_by_category, aggregate_overall, max_score_for_questions, ScoreTotals};
pub use comparison::{compare_many, maturity_distribution, ComparisonEntry, EntitySubmissions};
pub use maturity::{maturity_for, maturity_for_percentage, MaturityLevel};

pub(crate) use aggregate::find_submission;
