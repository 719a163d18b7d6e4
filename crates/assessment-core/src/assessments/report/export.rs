use super::summary::ComparisonReport;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct ComparisonRow<'a> {
    name: &'a str,
    total_score: u64,
    max_score: u64,
    percentage: String,
    maturity: &'static str,
}

/// Writes one CSV row per comparison entry, in report order.
pub fn write_comparison_csv<W: Write>(
    writer: W,
    report: &ComparisonReport,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for entry in &report.entries {
        csv_writer.serialize(ComparisonRow {
            name: &entry.name,
            total_score: entry.totals.total_score,
            max_score: entry.totals.max_score,
            percentage: format!("{:.1}", entry.totals.percentage),
            maturity: entry.maturity.label(),
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}
