mod export;
mod summary;
pub mod views;

pub use export::write_comparison_csv;
pub use summary::{CategoryResult, ComparisonReport, RespondentReport};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessments::domain::{
        AnswerOption, Category, DetailedAnswers, ParsedAnswer, Question, Submission, TargetRole,
    };
    use crate::assessments::scoring::{EntitySubmissions, MaturityLevel};
    use chrono::{TimeZone, Utc};

    fn question(id: &str, category_id: &str, text: &str) -> Question {
        Question {
            id: id.to_string(),
            category_id: category_id.to_string(),
            text: text.to_string(),
            answers: vec![
                AnswerOption {
                    id: format!("{id}-low"),
                    text: "Discordo".to_string(),
                    score: 0,
                },
                AnswerOption {
                    id: format!("{id}-high"),
                    text: "Concordo".to_string(),
                    score: 5,
                },
            ],
            target_role: TargetRole::Employee,
        }
    }

    fn categories() -> Vec<Category> {
        vec![
            Category {
                id: "cultura".to_string(),
                name: "Cultura".to_string(),
                target_role: TargetRole::Employee,
                questions: vec![
                    question("c1", "cultura", "Sinto-me valorizado"),
                    question("c2", "cultura", "Confio na liderança"),
                ],
            },
            Category {
                id: "processos".to_string(),
                name: "Processos".to_string(),
                target_role: TargetRole::Employee,
                questions: vec![question("p1", "processos", "Os processos são claros")],
            },
            Category {
                id: "saude".to_string(),
                name: "Saúde".to_string(),
                target_role: TargetRole::Employee,
                questions: vec![
                    question("s1", "saude", "Durmo bem"),
                    question("s2", "saude", "Tenho energia"),
                ],
            },
        ]
    }

    fn submission(id: &str, category_id: &str, total: u32, max: u32) -> Submission {
        Submission {
            id: id.to_string(),
            category_id: category_id.to_string(),
            category_name: String::new(),
            user_id: "u-1".to_string(),
            user_name: "Ana".to_string(),
            company_name: "Acme".to_string(),
            total_score: total,
            max_score: max,
            detailed_answers: DetailedAnswers::Absent,
            submitted_at: None,
        }
    }

    fn generated_at() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn respondent_report_covers_every_category_in_order() {
        let mut cultura = submission("s1", "cultura", 5, 10);
        cultura.detailed_answers = DetailedAnswers::FreeText(
            "✅ b) Concordo - 2. Pergunta: Confio na liderança Resposta: a) Discordo".to_string(),
        );
        cultura.submitted_at = Some(Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap());
        let submissions = vec![cultura, submission("s2", "processos", 5, 5)];

        let report = RespondentReport::build(&categories(), &submissions);

        let ids: Vec<_> = report
            .categories
            .iter()
            .map(|result| result.category_id.as_str())
            .collect();
        assert_eq!(ids, vec!["cultura", "processos", "saude"]);

        let cultura = &report.categories[0];
        assert!(cultura.submitted);
        assert!(cultura.submitted_at.is_some());
        assert_eq!(cultura.answers.len(), 2);
        assert_eq!(cultura.answers[0].question_id.as_deref(), Some("c1"));
        assert_eq!(cultura.answers[0].score, Some(5));
        assert_eq!(cultura.answers[1].question_id.as_deref(), Some("c2"));
        assert_eq!(cultura.answers[1].score, Some(0));

        let saude = &report.categories[2];
        assert!(!saude.submitted);
        assert_eq!(saude.totals.total_score, 0);
        assert_eq!(saude.totals.max_score, 10);
        assert!(saude.answers.is_empty());

        assert_eq!(report.overall.total_score, 10);
        assert_eq!(report.overall.max_score, 15);
        assert_eq!(report.overall.maturity(), MaturityLevel::Mediano);
        assert_eq!(report.pending_categories().count(), 1);
    }

    #[test]
    fn respondent_summary_names_strongest_and_weakest_submitted_categories() {
        let submissions = vec![
            submission("s1", "cultura", 1, 10),
            submission("s2", "processos", 5, 5),
        ];
        let summary = RespondentReport::build(&categories(), &submissions).summary(generated_at());

        assert_eq!(summary.strongest_category.as_deref(), Some("Processos"));
        assert_eq!(summary.weakest_category.as_deref(), Some("Cultura"));
        assert_eq!(summary.pending_categories, 1);
        assert_eq!(summary.overall.maturity.label, "Precário");
        assert_eq!(summary.categories[2].result.maturity.label, "Crítico");
    }

    #[test]
    fn respondent_summary_serializes_flattened_totals() {
        let submissions = vec![submission("s1", "cultura", 8, 10)];
        let summary = RespondentReport::build(&categories(), &submissions).summary(generated_at());
        let payload = serde_json::to_value(&summary).expect("summary serializes");

        let first = &payload["categories"][0];
        assert_eq!(first["categoryId"], "cultura");
        assert_eq!(first["totalScore"], 8);
        assert_eq!(first["maxScore"], 10);
        assert_eq!(first["maturity"]["label"], "Avançado");
        assert_eq!(first["maturity"]["chartColor"], "#22c55e");
        assert!(first.get("answers").is_none());
    }

    #[test]
    fn respondent_without_submissions_has_no_extremes() {
        let report = RespondentReport::build(&categories(), &[]);
        assert!(report.strongest_category().is_none());
        assert!(report.weakest_category().is_none());
        assert_eq!(report.overall.percentage, 0.0);
        assert_eq!(report.pending_categories().count(), 3);
    }

    #[test]
    fn pre_parsed_answers_flow_into_category_results() {
        let mut processos = submission("s1", "processos", 5, 5);
        processos.detailed_answers = DetailedAnswers::PreParsed(vec![ParsedAnswer::new(
            "Os processos são claros",
            "Concordo",
        )]);
        let report = RespondentReport::build(&categories(), &[processos]);

        let answers = &report.categories[1].answers;
        assert_eq!(answers.len(), 1);
        assert_eq!(answers[0].answer_id.as_deref(), Some("p1-high"));
    }

    #[test]
    fn comparison_summary_reports_distribution_and_average() {
        let entities = vec![
            EntitySubmissions::new("Zeta", vec![submission("s1", "cultura", 9, 10)]),
            EntitySubmissions::new("Alfa", vec![submission("s2", "cultura", 2, 10)]),
        ];
        let report = ComparisonReport::build(&entities);
        let summary = report.summary(generated_at());

        assert_eq!(summary.entries[0].name, "Alfa");
        assert_eq!(summary.entries[1].name, "Zeta");
        assert!((summary.average_percentage - 55.0).abs() < f64::EPSILON);
        assert_eq!(summary.distribution.len(), 4);
        assert_eq!(summary.distribution[0].count, 1);
        assert_eq!(summary.distribution[3].count, 1);
        assert_eq!(summary.distribution[3].maturity.label, "Avançado");
    }

    #[test]
    fn empty_comparison_has_zero_average() {
        let report = ComparisonReport::build(&[]);
        assert_eq!(report.average_percentage(), 0.0);
        assert!(report.summary(generated_at()).entries.is_empty());
    }

    #[test]
    fn comparison_exports_to_csv() {
        let entities = vec![
            EntitySubmissions::new("Beta", vec![submission("s1", "cultura", 11, 15)]),
            EntitySubmissions::new("Alfa", vec![submission("s2", "cultura", 0, 0)]),
        ];
        let report = ComparisonReport::build(&entities);

        let mut buffer = Vec::new();
        write_comparison_csv(&mut buffer, &report).expect("csv export succeeds");
        let output = String::from_utf8(buffer).expect("utf8 output");

        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[0], "name,total_score,max_score,percentage,maturity");
        assert_eq!(lines[1], "Alfa,0,0,0.0,Crítico");
        assert_eq!(lines[2], "Beta,11,15,73.3,Avançado");
    }
}
