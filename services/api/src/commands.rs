use crate::infra::{load_bundle, seeded_repository};
use assessment_core::assessments::report::views::{ComparisonSummary, RespondentReportSummary};
use assessment_core::assessments::report::write_comparison_csv;
use assessment_core::assessments::results::ResultsService;
use assessment_core::assessments::{
    parse_detailed_text, ComparisonReport, Question, RespondentReport, TargetRole,
};
use assessment_core::error::AppError;
use chrono::Utc;
use clap::{Args, ValueEnum};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum RoleArg {
    Company,
    Employee,
}

impl From<RoleArg> for TargetRole {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::Company => TargetRole::Company,
            RoleArg::Employee => TargetRole::Employee,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub(crate) enum CompareBy {
    #[default]
    Company,
    Employee,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// JSON bundle with `categories` and `submissions`
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Restrict the report to one respondent's submissions
    #[arg(long)]
    pub(crate) user: Option<String>,
    /// Only show categories aimed at this population
    #[arg(long, value_enum)]
    pub(crate) role: Option<RoleArg>,
    /// Print the summary as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    /// JSON bundle with `categories` and `submissions`
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Group submissions by company or by employee
    #[arg(long, value_enum, default_value_t = CompareBy::Company)]
    pub(crate) by: CompareBy,
    /// Company whose employees are compared
    #[arg(long, required_if_eq("by", "employee"))]
    pub(crate) company: Option<String>,
    /// Also write the comparison rows to this CSV file
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Print the summary as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ParseArgs {
    /// File holding the raw detailed-answers text
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// JSON array of the category's questions, used to name the first answer
    #[arg(long)]
    pub(crate) questions: Option<PathBuf>,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let bundle = load_bundle(&args.input)?;
    let role = args.role.map(TargetRole::from);

    let report = match args.user.as_deref() {
        Some(user_id) => {
            let service = ResultsService::new(Arc::new(seeded_repository(bundle)?));
            service.respondent_report(user_id, role)?
        }
        None => {
            let categories: Vec<_> = bundle
                .categories
                .into_iter()
                .filter(|category| role.map_or(true, |role| category.target_role.applies_to(role)))
                .collect();
            RespondentReport::build_for_role(
                &categories,
                &bundle.submissions,
                role.unwrap_or_default(),
            )
        }
    };

    let summary = report.summary(Utc::now());
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        render_respondent_summary(&summary);
    }
    Ok(())
}

pub(crate) fn run_compare(args: CompareArgs) -> Result<(), AppError> {
    let bundle = load_bundle(&args.input)?;
    let service = ResultsService::new(Arc::new(seeded_repository(bundle)?));

    let report = match (args.by, args.company.as_deref()) {
        (CompareBy::Employee, company) => service.compare_employees(company.unwrap_or_default())?,
        (CompareBy::Company, _) => service.compare_companies()?,
    };

    if let Some(path) = args.csv.as_ref() {
        write_comparison_csv(File::create(path)?, &report)?;
    }

    let summary = report.summary(Utc::now());
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        render_comparison_summary(&summary, &report);
    }
    Ok(())
}

pub(crate) fn run_parse(args: ParseArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.input)?;
    let questions: Vec<Question> = match args.questions.as_ref() {
        Some(path) => serde_json::from_reader(File::open(path)?)?,
        None => Vec::new(),
    };

    let parsed = parse_detailed_text(&raw, &questions);
    println!("{}", serde_json::to_string_pretty(&parsed)?);
    Ok(())
}

fn render_respondent_summary(summary: &RespondentReportSummary) {
    println!("Assessment results");
    println!(
        "Overall: {} / {} ({:.1}%) | {} ({})",
        summary.overall.totals.total_score,
        summary.overall.totals.max_score,
        summary.overall.totals.percentage,
        summary.overall.maturity.label,
        summary.overall.maturity.range
    );
    if let Some(strongest) = &summary.strongest_category {
        println!("Strongest category: {strongest}");
    }
    if let Some(weakest) = &summary.weakest_category {
        println!("Weakest category: {weakest}");
    }

    println!("\nCategories ({} pending)", summary.pending_categories);
    for category in &summary.categories {
        let status = if category.submitted { "" } else { " [pending]" };
        println!(
            "- {}: {} / {} ({:.1}%) | {}{}",
            category.category_name,
            category.result.totals.total_score,
            category.result.totals.max_score,
            category.result.totals.percentage,
            category.result.maturity.label,
            status
        );
        for answer in &category.answers {
            let score = answer
                .score
                .map(|score| format!(" [{score} pts]"))
                .unwrap_or_default();
            println!(
                "    {} -> {}{}",
                answer.question_text, answer.selected_answer_text, score
            );
        }
    }
}

fn render_comparison_summary(summary: &ComparisonSummary, report: &ComparisonReport) {
    println!("Comparison ({} entries)", report.entries.len());
    for entry in &summary.entries {
        println!(
            "- {}: {} / {} ({:.1}%) | {}",
            entry.name,
            entry.result.totals.total_score,
            entry.result.totals.max_score,
            entry.result.totals.percentage,
            entry.result.maturity.label
        );
    }
    println!("Average: {:.1}%", summary.average_percentage);
    println!("Maturity distribution:");
    for bucket in &summary.distribution {
        println!(
            "  - {} ({}): {}",
            bucket.maturity.label, bucket.maturity.range, bucket.count
        );
    }
}
