use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

/// Respondent population a question or category applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TargetRole {
    Company,
    Employee,
    #[default]
    Both,
}

impl TargetRole {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Company => "Empresa",
            Self::Employee => "Colaborador",
            Self::Both => "Empresa e Colaborador",
        }
    }

    /// Whether content targeted at `self` should be shown to `respondent`.
    pub fn applies_to(self, respondent: TargetRole) -> bool {
        matches!(self, Self::Both) || respondent == Self::Both || self == respondent
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub category_id: String,
    pub text: String,
    /// Closed-ended options; empty for open-ended questions.
    #[serde(default)]
    pub answers: Vec<AnswerOption>,
    #[serde(default)]
    pub target_role: TargetRole,
}

impl Question {
    /// Highest score any single option can award, `0` for open-ended questions.
    pub fn max_answer_score(&self) -> u32 {
        self.answers
            .iter()
            .map(|answer| answer.score)
            .max()
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub target_role: TargetRole,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Category {
    pub fn questions_for(&self, role: TargetRole) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|question| question.target_role.applies_to(role))
            .collect()
    }
}

/// One respondent's completed answer set for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub category_id: String,
    #[serde(default)]
    pub category_name: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub total_score: u32,
    #[serde(default)]
    pub max_score: u32,
    #[serde(default)]
    pub detailed_answers: DetailedAnswers,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
}

/// A `(question, selected answer)` pair recovered from a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedAnswer {
    pub question_text: String,
    #[serde(default)]
    pub selected_answer_text: String,
}

impl ParsedAnswer {
    pub fn new(question_text: impl Into<String>, selected_answer_text: impl Into<String>) -> Self {
        Self {
            question_text: question_text.into(),
            selected_answer_text: selected_answer_text.into(),
        }
    }
}

/// Shapes the upstream webhooks have used for the `detailedAnswers` field.
///
/// The shape is decided once when the payload is deserialized so the parser
/// dispatches on the variant instead of probing the value again.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailedAnswers {
    #[default]
    Absent,
    PreParsed(Vec<ParsedAnswer>),
    JsonEncoded(String),
    FreeText(String),
}

impl DetailedAnswers {
    pub fn from_text(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let trimmed = raw.trim_start();
        if trimmed.starts_with('[') || trimmed.starts_with('{') {
            Self::JsonEncoded(raw)
        } else {
            Self::FreeText(raw)
        }
    }

    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Null => Self::Absent,
            Value::String(raw) => Self::from_text(raw),
            Value::Array(items) => {
                match serde_json::from_value::<Vec<ParsedAnswer>>(Value::Array(items)) {
                    Ok(answers) => Self::PreParsed(answers),
                    Err(err) => {
                        debug!(error = %err, "detailed answers array has an unexpected shape");
                        Self::Absent
                    }
                }
            }
            other => {
                debug!(kind = value_kind(&other), "ignoring unsupported detailed answers payload");
                Self::Absent
            }
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl<'de> Deserialize<'de> for DetailedAnswers {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(value))
    }
}

impl Serialize for DetailedAnswers {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Absent => serializer.serialize_none(),
            Self::PreParsed(answers) => answers.serialize(serializer),
            Self::JsonEncoded(raw) | Self::FreeText(raw) => serializer.serialize_str(raw),
        }
    }
}

/// Categories plus submissions, the unit the report and comparison commands load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentBundle {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub submissions: Vec<Submission>,
}

/// Webhook payloads mix numeric and string identifiers.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or numeric identifier, found {}",
            value_kind(&other)
        ))),
    }
}
