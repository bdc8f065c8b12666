use clap::Args;
use gradecast::config::AppConfig;
use gradecast::error::AppError;
use gradecast::predictions::{ApiResponse, ScoringRequest};
use gradecast::scoring::{PredictionEngine, PredictionResult};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Prediction request JSON file, or `-` to read standard input
    #[arg(long, short)]
    pub(crate) input: PathBuf,
    /// Print the JSON response envelope instead of a readable report
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = PredictionEngine::new(config.scoring)?;

    let raw = read_input(&args.input)?;
    let request: ScoringRequest = serde_json::from_str(&raw)?;
    let result = request.score(&engine)?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&ApiResponse::ok(result.view()))?
        );
    } else {
        println!("{}", render_prediction(&result));
    }
    Ok(())
}

fn read_input(path: &Path) -> std::io::Result<String> {
    if path == Path::new("-") {
        let mut raw = String::new();
        std::io::stdin().read_to_string(&mut raw)?;
        Ok(raw)
    } else {
        std::fs::read_to_string(path)
    }
}

pub(crate) fn render_prediction(result: &PredictionResult) -> String {
    let mut lines = vec![
        format!("Grade prediction for {}", result.subject_id()),
        format!(
            "Score {} | Grade {} | Confidence {:.1}%",
            result.score(),
            result.letter_grade(),
            result.confidence()
        ),
        String::new(),
        "Factors".to_string(),
    ];

    for factor in result.factors() {
        lines.push(format!(
            "- {} (weight {:.0}%): {:.1}% normalized",
            factor.name(),
            factor.weight() * 100.0,
            factor.normalized_score() * 100.0
        ));
        for metric in factor.raw_metrics() {
            let sub_weight = metric
                .weight()
                .map(|weight| format!(", sub-weight {:.0}%", weight * 100.0))
                .unwrap_or_default();
            lines.push(format!(
                "    - {}: {} / {}{}",
                metric.name(),
                metric.value(),
                metric.scale(),
                sub_weight
            ));
        }
    }

    lines.push(String::new());
    lines.push("Summary".to_string());
    lines.extend(result.summary().iter().map(|line| format!("- {line}")));
    lines.join("\n")
}
