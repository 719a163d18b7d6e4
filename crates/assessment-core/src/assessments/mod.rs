pub mod answers;
pub mod domain;
pub mod report;
pub mod results;
pub mod scoring;

pub use answers::{match_answers, parse_detailed_answers, parse_detailed_text, AnswerMatch};
pub use domain::{
    AnswerOption, AssessmentBundle, Category, DetailedAnswers, ParsedAnswer, Question, Submission,
    TargetRole,
};
pub use report::{ComparisonReport, RespondentReport};
pub use scoring::{
    aggregate_by_category, aggregate_overall, compare_many, maturity_for, ComparisonEntry,
    EntitySubmissions, MaturityLevel, ScoreTotals,
};
