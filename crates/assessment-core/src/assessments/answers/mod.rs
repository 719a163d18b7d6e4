mod matcher;
mod normalizer;
mod parser;

pub use matcher::{match_answers, AnswerMatch};
pub use parser::{parse_detailed_answers, parse_detailed_text};
