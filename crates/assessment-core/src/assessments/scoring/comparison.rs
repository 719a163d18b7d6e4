use super::aggregate::{aggregate_overall, ScoreTotals};
use super::maturity::MaturityLevel;
use crate::assessments::domain::Submission;
use serde::{Deserialize, Serialize};

/// A named respondent (employee, company, group) and the submissions it owns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySubmissions {
    pub name: String,
    #[serde(default)]
    pub submissions: Vec<Submission>,
}

impl EntitySubmissions {
    pub fn new(name: impl Into<String>, submissions: Vec<Submission>) -> Self {
        Self {
            name: name.into(),
            submissions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonEntry {
    pub name: String,
    #[serde(flatten)]
    pub totals: ScoreTotals,
    pub maturity: MaturityLevel,
}

impl ComparisonEntry {
    pub fn percentage(&self) -> f64 {
        self.totals.percentage
    }
}

/// Overall score per entity, ordered by name. Equal names keep input order.
pub fn compare_many(entities: &[EntitySubmissions]) -> Vec<ComparisonEntry> {
    let mut entries: Vec<ComparisonEntry> = entities
        .iter()
        .map(|entity| {
            let totals = aggregate_overall(&entity.submissions);
            ComparisonEntry {
                name: entity.name.clone(),
                totals,
                maturity: totals.maturity(),
            }
        })
        .collect();
    entries.sort_by(|left, right| left.name.cmp(&right.name));
    entries
}

/// How many entries fall in each tier, in tier order.
pub fn maturity_distribution(entries: &[ComparisonEntry]) -> [(MaturityLevel, usize); 4] {
    MaturityLevel::ordered().map(|level| {
        let count = entries.iter().filter(|entry| entry.maturity == level).count();
        (level, count)
    })
}
