use super::super::answers::AnswerMatch;
use super::super::scoring::{MaturityLevel, ScoreTotals};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaturityView {
    pub level: MaturityLevel,
    pub label: &'static str,
    pub range: &'static str,
    pub chart_color: &'static str,
}

impl From<MaturityLevel> for MaturityView {
    fn from(level: MaturityLevel) -> Self {
        Self {
            level,
            label: level.label(),
            range: level.range(),
            chart_color: level.chart_color(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsView {
    #[serde(flatten)]
    pub totals: ScoreTotals,
    pub maturity: MaturityView,
}

impl From<ScoreTotals> for TotalsView {
    fn from(totals: ScoreTotals) -> Self {
        Self {
            totals,
            maturity: totals.maturity().into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResultView {
    pub category_id: String,
    pub category_name: String,
    pub submitted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub result: TotalsView,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<AnswerMatch>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondentReportSummary {
    pub generated_at: DateTime<Utc>,
    pub overall: TotalsView,
    pub categories: Vec<CategoryResultView>,
    pub pending_categories: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strongest_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weakest_category: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonEntryView {
    pub name: String,
    #[serde(flatten)]
    pub result: TotalsView,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaturityBucketView {
    #[serde(flatten)]
    pub maturity: MaturityView,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSummary {
    pub generated_at: DateTime<Utc>,
    pub entries: Vec<ComparisonEntryView>,
    pub distribution: Vec<MaturityBucketView>,
    pub average_percentage: f64,
}
