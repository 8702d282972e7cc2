//! churn-eval - Score one employee profile from the command line
//!
//! ```text
//! churn-eval [--artifact PATH] <profile.json | ->
//! ```
//!
//! The artifact path falls back to `CHURN_ARTIFACT_PATH`, then to the
//! platform data directory.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use churn_core::constants::{self, APP_VERSION, ARTIFACT_PATH_ENV};
use churn_core::logic::pipeline;
use churn_core::{Evaluation, RawProfile};

#[derive(Debug, Parser)]
#[command(
    name = "churn-eval",
    version,
    about = "Score one employee profile against the churn model artifact",
    after_help = "Pass '-' as the profile to read it from stdin."
)]
struct Cli {
    /// Model artifact bundle (JSON)
    #[arg(long, value_name = "PATH", env = ARTIFACT_PATH_ENV)]
    artifact: Option<PathBuf>,

    /// Profile JSON file, or '-' for stdin
    #[arg(value_name = "PROFILE")]
    profile: PathBuf,
}

impl Cli {
    fn artifact_path(&self) -> PathBuf {
        self.artifact
            .clone()
            .unwrap_or_else(constants::get_default_artifact_path)
    }
}

fn read_profile(source: &Path, mut stdin: impl Read) -> anyhow::Result<RawProfile> {
    let text = if source == Path::new("-") {
        let mut buf = String::new();
        stdin
            .read_to_string(&mut buf)
            .context("Failed to read profile from stdin")?;
        buf
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("Failed to read {}", source.display()))?
    };

    serde_json::from_str(&text).context("Invalid profile JSON")
}

fn render(evaluation: &Evaluation) -> serde_json::Value {
    serde_json::json!({
        "probability": evaluation.score,
        "probability_label": evaluation.probability_label(),
        "decision": evaluation.decision,
        "headline": evaluation.headline(),
        "threshold": evaluation.threshold,
    })
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let artifact = cli.artifact_path();
    if !pipeline::is_loaded() {
        pipeline::init(&artifact)
            .with_context(|| format!("Failed to load artifact {}", artifact.display()))?;
    }

    let raw = read_profile(&cli.profile, io::stdin())?;
    let evaluation = pipeline::evaluate_raw(raw).context("Evaluation failed")?;

    println!("{}", serde_json::to_string_pretty(&render(&evaluation))?);

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("churn-eval v{}", APP_VERSION);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use churn_core::logic::model::load_artifact;
    use churn_core::{Decision, Evaluator, FeatureSchema};

    fn demo(file: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("demos").join(file)
    }

    #[test]
    fn test_parse_artifact_and_profile() {
        let cli = Cli::try_parse_from(["churn-eval", "--artifact", "model.json", "profile.json"]).unwrap();
        assert_eq!(cli.artifact, Some(PathBuf::from("model.json")));
        assert_eq!(cli.profile, PathBuf::from("profile.json"));
        assert_eq!(cli.artifact_path(), PathBuf::from("model.json"));
    }

    #[test]
    fn test_parse_stdin_marker() {
        let cli = Cli::try_parse_from(["churn-eval", "-"]).unwrap();
        assert_eq!(cli.profile, PathBuf::from("-"));
    }

    #[test]
    fn test_parse_rejects_bad_usage() {
        assert!(Cli::try_parse_from(["churn-eval"]).is_err());
        assert!(Cli::try_parse_from(["churn-eval", "a.json", "b.json"]).is_err());
        assert!(Cli::try_parse_from(["churn-eval", "a.json", "--artifact"]).is_err());
    }

    #[test]
    fn test_read_profile_from_stdin() {
        let json = std::fs::read_to_string(demo("profile.json")).unwrap();
        let raw = read_profile(Path::new("-"), json.as_bytes()).unwrap();
        assert_eq!(raw.len(), FeatureSchema::churn_v1().len());
    }

    #[test]
    fn test_invalid_json() {
        let err = read_profile(Path::new("-"), "{ not json".as_bytes()).unwrap_err();
        assert!(format!("{:#}", err).starts_with("Invalid profile JSON"));
    }

    #[test]
    fn test_missing_profile_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_profile(&dir.path().join("absent.json"), io::empty()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));
    }

    #[test]
    fn test_demo_profile_output() {
        let schema = FeatureSchema::churn_v1();
        let artifact = load_artifact(&demo("churn_model.json"), &schema).unwrap();
        let evaluator = Evaluator::new(schema, artifact).unwrap();

        let raw = read_profile(&demo("profile.json"), io::empty()).unwrap();
        let evaluation = evaluator.evaluate_raw(raw).unwrap();
        assert_eq!(evaluation.decision, Decision::HighRisk);

        let output = render(&evaluation);
        let probability = output["probability"].as_f64().unwrap();
        assert!(probability >= 0.35 && probability <= 1.0);
        assert_eq!(output["decision"], "high_risk");
        assert_eq!(output["threshold"], 0.35);
        assert!(output["probability_label"].as_str().unwrap().ends_with('%'));
        assert!(output["headline"].as_str().unwrap().starts_with("High Risk"));
    }
}
