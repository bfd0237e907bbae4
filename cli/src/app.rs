use cypress_rerun_core::api::{
    parse_run_arguments, AppConfig, CliError, FeatureTagger, Orchestrator, OrchestratorSettings,
};
use cypress_rerun_plugins::factory;

use crate::commands::cli::Args;

/// Runs every attempt against `cfg` with the command-line values layered on top.
pub async fn run_app(args: Args, mut cfg: AppConfig) -> Result<i32, CliError> {
    args.apply(&mut cfg);
    tracing::debug!(?cfg, "effective configuration");

    let settings = OrchestratorSettings::from_config(&cfg.rerun)?;
    let base = parse_run_arguments(&args.cypress_args)?;
    tracing::debug!(?base, "parsed CLI options");

    let runner = factory::build_runner(&cfg);
    let tagger = FeatureTagger::new(
        &cfg.tagger.feature_files,
        cfg.tagger.extension.clone(),
        settings.retry_tag.clone(),
    );

    let report = Orchestrator::new(runner, tagger, settings).run(base).await?;

    let ran = report.attempts.len();
    if report.succeeded() {
        tracing::info!("***** finished {} run(s) successfully *****", ran);
    } else {
        tracing::error!(
            "***** {} of {} run(s) done, exiting with {} failure(s) *****",
            ran,
            report.total,
            report.failures
        );
    }
    Ok(report.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cypress_rerun_core::api::{ConfigError, ReplayRunnerConfig, RunnerConfig};
    use pretty_assertions::assert_eq;
    use std::path::Path;

    const FEATURE: &str = "Feature: Checkout\n\n  Scenario: Pay by card\n    Given a cart\n";

    fn failing_attempt(total_failed: u32) -> String {
        format!(
            r#"{{"status":"finished","totalFailed":{total_failed},"runs":[{{"spec":{{"relative":"cypress/e2e/checkout.feature"}},"stats":{{"failures":1}},"tests":[{{"title":["Checkout","Pay by card"],"state":"failed"}}]}}]}}"#
        )
    }

    fn replay_config(recorded: &Path, features: &Path) -> AppConfig {
        let mut cfg = AppConfig::default();
        cfg.tagger.feature_files = features.display().to_string();
        cfg.runner = RunnerConfig::Replay(ReplayRunnerConfig {
            results_dir: recorded.display().to_string(),
        });
        cfg
    }

    fn fixture() -> (tempfile::TempDir, AppConfig) {
        let dir = tempfile::TempDir::new().unwrap();
        let recorded = dir.path().join("recorded");
        let features = dir.path().join("features");
        std::fs::create_dir_all(&recorded).unwrap();
        std::fs::create_dir_all(&features).unwrap();
        std::fs::write(features.join("checkout.feature"), FEATURE).unwrap();
        let cfg = replay_config(&recorded, &features);
        (dir, cfg)
    }

    #[tokio::test]
    async fn exhausted_run_exits_with_clamped_total_failed() {
        let (dir, cfg) = fixture();
        let recorded = dir.path().join("recorded");
        std::fs::write(recorded.join("attempt-1.json"), failing_attempt(3)).unwrap();
        std::fs::write(recorded.join("attempt-2.json"), failing_attempt(300)).unwrap();

        let args = Args::parse_wrapper(["--spec", "cypress/e2e/**/*.feature"]).unwrap();
        let code = run_app(args, cfg).await.unwrap();
        assert_eq!(code, 255);

        let tagged = std::fs::read_to_string(dir.path().join("features/checkout.feature")).unwrap();
        assert!(tagged.contains("  @failed\n  Scenario: Pay by card"));
    }

    #[tokio::test]
    async fn passing_retry_exits_zero() {
        let (dir, cfg) = fixture();
        let recorded = dir.path().join("recorded");
        std::fs::write(recorded.join("attempt-1.json"), failing_attempt(1)).unwrap();
        std::fs::write(
            recorded.join("attempt-2.json"),
            r#"{"status":"finished","totalFailed":0,"runs":[{"spec":{"relative":"cypress/e2e/checkout.feature"},"stats":{"failures":0},"tests":[{"title":["Checkout","Pay by card"],"state":"passed"}]}]}"#,
        )
        .unwrap();

        let args = Args::parse_wrapper(["-n", "3"]).unwrap();
        assert_eq!(run_app(args, cfg).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn bad_forwarded_args_fail_before_any_attempt() {
        // No recorded attempts: reaching the runner would surface a runner error instead.
        let (_dir, cfg) = fixture();
        let args = Args::parse_wrapper(["--definitely-not-cypress"]).unwrap();
        let err = run_app(args, cfg).await.unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::RunnerArgs(_))));
    }

    #[tokio::test]
    async fn zero_repeat_is_a_configuration_error() {
        let (_dir, cfg) = fixture();
        let args = Args::parse_wrapper(["--repeat", "0"]).unwrap();
        let err = run_app(args, cfg).await.unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::Validation(_))));
    }
}
