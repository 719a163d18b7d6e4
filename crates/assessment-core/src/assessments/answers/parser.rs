use super::normalizer::{clean_selected_answer, strip_leading_markers};
use crate::assessments::domain::{DetailedAnswers, ParsedAnswer, Question};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

static SEGMENT_MARKER: OnceLock<Regex> = OnceLock::new();
static QUESTION_TEXT: OnceLock<Regex> = OnceLock::new();
static ANSWER_TEXT: OnceLock<Regex> = OnceLock::new();

const QUESTION_TOKEN: &str = "Pergunta:";
const ANSWER_TOKEN: &str = "Resposta:";

fn segment_marker() -> &'static Regex {
    SEGMENT_MARKER.get_or_init(|| {
        Regex::new(r"-\s*\d+\.\s*Pergunta:").expect("segment marker pattern")
    })
}

fn question_text() -> &'static Regex {
    QUESTION_TEXT.get_or_init(|| {
        Regex::new(r"(?s)Pergunta:\s*(.*?)\s*Resposta:").expect("question text pattern")
    })
}

fn answer_text() -> &'static Regex {
    ANSWER_TEXT.get_or_init(|| Regex::new(r"(?s)Resposta:\s*(.*)").expect("answer text pattern"))
}

/// Recovers the ordered `(question, answer)` pairs recorded in a submission.
///
/// Never fails: payloads that match none of the known conventions produce an
/// empty or partial list. `questions_in_category` is only consulted to name
/// the leading segment of numbered free text, which historically omitted its
/// own question header.
pub fn parse_detailed_answers(
    raw: &DetailedAnswers,
    questions_in_category: &[Question],
) -> Vec<ParsedAnswer> {
    match raw {
        DetailedAnswers::Absent => Vec::new(),
        DetailedAnswers::PreParsed(answers) => answers.clone(),
        DetailedAnswers::JsonEncoded(text) => parse_json_text(text)
            .unwrap_or_else(|| parse_free_text(text, questions_in_category)),
        DetailedAnswers::FreeText(text) => parse_free_text(text, questions_in_category),
    }
}

/// Convenience entry point for callers holding the raw string.
pub fn parse_detailed_text(raw: &str, questions_in_category: &[Question]) -> Vec<ParsedAnswer> {
    parse_detailed_answers(&DetailedAnswers::from_text(raw), questions_in_category)
}

fn parse_json_text(text: &str) -> Option<Vec<ParsedAnswer>> {
    match serde_json::from_str::<Vec<ParsedAnswer>>(text) {
        Ok(answers) if !answers.is_empty() => {
            debug!(pairs = answers.len(), "parsed JSON-encoded detailed answers");
            Some(answers)
        }
        Ok(_) => None,
        Err(err) => {
            debug!(error = %err, "detailed answers string is not a structured answer list");
            None
        }
    }
}

fn parse_free_text(text: &str, questions_in_category: &[Question]) -> Vec<ParsedAnswer> {
    if text.is_empty() {
        return Vec::new();
    }

    let segments = split_numbered_segments(text);
    if segments.len() > 1 {
        let answers = parse_numbered_segments(&segments, questions_in_category);
        debug!(
            segments = segments.len(),
            pairs = answers.len(),
            "parsed numbered detailed answers"
        );
        return answers;
    }

    let answers = parse_loose_pairs(text);
    debug!(pairs = answers.len(), "parsed loose detailed answers");
    answers
}

/// Splits before every position where `- <N>. Pergunta:` (with optional
/// leading whitespace) begins, keeping the marker in the following segment.
///
/// A marker preceded by whitespace counts as starting at every whitespace
/// position, so each extra whitespace character becomes its own segment.
/// Those segments never parse and are skipped downstream; a whitespace-only
/// prefix still counts as the leading segment. Markers are located in one
/// pass and each whitespace run is walked once, keeping the split linear.
fn split_numbered_segments(text: &str) -> Vec<&str> {
    let mut boundaries = Vec::new();
    for marker in segment_marker().find_iter(text) {
        let dash = marker.start();
        let run_start = text[..dash]
            .char_indices()
            .rev()
            .take_while(|(_, character)| character.is_whitespace())
            .last()
            .map_or(dash, |(position, _)| position);
        boundaries.extend(
            text[run_start..dash]
                .char_indices()
                .map(|(offset, _)| run_start + offset),
        );
        boundaries.push(dash);
    }

    let mut segments = Vec::with_capacity(boundaries.len() + 1);
    let mut start = 0;
    for boundary in boundaries.into_iter().filter(|&boundary| boundary > 0) {
        segments.push(&text[start..boundary]);
        start = boundary;
    }
    segments.push(&text[start..]);
    segments
}

fn parse_numbered_segments(
    segments: &[&str],
    questions_in_category: &[Question],
) -> Vec<ParsedAnswer> {
    let mut answers = Vec::with_capacity(segments.len());

    if let (Some(first_segment), Some(first_question)) =
        (segments.first(), questions_in_category.first())
    {
        answers.push(ParsedAnswer::new(
            first_question.text.clone(),
            clean_selected_answer(first_segment),
        ));
    }

    for segment in segments.iter().skip(1) {
        let question = question_text()
            .captures(segment)
            .and_then(|captures| captures.get(1));
        let answer = answer_text()
            .captures(segment)
            .and_then(|captures| captures.get(1));

        if let (Some(question), Some(answer)) = (question, answer) {
            answers.push(ParsedAnswer::new(
                question.as_str().trim(),
                clean_selected_answer(answer.as_str()),
            ));
        }
    }

    answers
}

fn parse_loose_pairs(text: &str) -> Vec<ParsedAnswer> {
    text.split(QUESTION_TOKEN)
        .filter(|fragment| !fragment.trim().is_empty())
        .filter_map(|fragment| {
            let parts: Vec<&str> = fragment.split(ANSWER_TOKEN).collect();
            match parts.as_slice() {
                [question, answer] => Some(ParsedAnswer::new(
                    question.trim(),
                    strip_leading_markers(answer),
                )),
                _ => None,
            }
        })
        .collect()
}

#[cfg(test)]
pub(crate) fn split_for_tests(text: &str) -> Vec<&str> {
    split_numbered_segments(text)
}
