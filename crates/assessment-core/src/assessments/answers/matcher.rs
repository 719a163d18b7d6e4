use super::normalizer::normalize_text;
use crate::assessments::domain::{ParsedAnswer, Question};
use serde::Serialize;
use std::collections::HashMap;

/// A parsed answer resolved against the category's question bank.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerMatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_id: Option<String>,
    pub question_text: String,
    pub selected_answer_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}

impl AnswerMatch {
    pub fn is_scored(&self) -> bool {
        self.score.is_some()
    }
}

/// Pairs each parsed answer with its question and, for closed-ended
/// questions, the chosen option. Open-ended answers keep `None` ids.
pub fn match_answers(parsed: &[ParsedAnswer], questions: &[Question]) -> Vec<AnswerMatch> {
    let mut by_text: HashMap<String, &Question> = HashMap::with_capacity(questions.len());
    for question in questions {
        by_text.entry(normalize_text(&question.text)).or_insert(question);
    }

    parsed
        .iter()
        .map(|answer| {
            let question = by_text.get(&normalize_text(&answer.question_text)).copied();
            let selected_key = normalize_text(&answer.selected_answer_text);
            let option = question.and_then(|question| {
                question
                    .answers
                    .iter()
                    .find(|option| normalize_text(&option.text) == selected_key)
            });

            AnswerMatch {
                question_id: question.map(|question| question.id.clone()),
                question_text: answer.question_text.clone(),
                selected_answer_text: answer.selected_answer_text.clone(),
                answer_id: option.map(|option| option.id.clone()),
                score: option.map(|option| option.score),
            }
        })
        .collect()
}
