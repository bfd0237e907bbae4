use clap::{Args as ClapArgs, Parser, Subcommand};

use crate::errors::ConfigError;

use super::options::{RunConfiguration, TestingType};

#[derive(Parser, Debug, Clone)]
#[command(name = "cypress", disable_help_subcommand = true)]
struct CypressCli {
    #[command(subcommand)]
    command: CypressCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum CypressCommand {
    Run(CypressRunArgs),
}

/// The subset of `cypress run` options the wrapper understands and hands to `cypress.run()`.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct CypressRunArgs {
    #[arg(long, short = 'b')]
    pub browser: Option<String>,

    #[arg(long)]
    pub ci_build_id: Option<String>,

    #[arg(long, conflicts_with = "e2e")]
    pub component: bool,

    #[arg(long)]
    pub e2e: bool,

    #[arg(long, short = 'c')]
    pub config: Option<String>,

    #[arg(long, short = 'C')]
    pub config_file: Option<String>,

    #[arg(long, short = 'e')]
    pub env: Option<String>,

    #[arg(long)]
    pub group: Option<String>,

    #[arg(long, conflicts_with = "headless")]
    pub headed: bool,

    #[arg(long)]
    pub headless: bool,

    #[arg(long, short = 'k')]
    pub key: Option<String>,

    #[arg(long)]
    pub no_exit: bool,

    #[arg(long)]
    pub parallel: bool,

    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    #[arg(long, short = 'P')]
    pub project: Option<String>,

    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// `--record` alone means true; `--record false` is accepted as well.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub record: Option<bool>,

    #[arg(long, short = 'r')]
    pub reporter: Option<String>,

    #[arg(long, short = 'o')]
    pub reporter_options: Option<String>,

    #[arg(long, short = 's')]
    pub spec: Option<String>,

    #[arg(long, short = 't')]
    pub tag: Option<String>,

    #[arg(long)]
    pub auto_cancel_after_failures: Option<String>,

    #[arg(long, overrides_with = "no_runner_ui")]
    pub runner_ui: bool,

    #[arg(long, overrides_with = "runner_ui")]
    pub no_runner_ui: bool,
}

/// Makes sure the forwarded arguments read `cypress run ...`.
pub fn normalize_forwarded(forwarded: &[String]) -> Vec<String> {
    let mut argv: Vec<String> = forwarded.to_vec();
    if argv.first().map(String::as_str) != Some("cypress") {
        argv.insert(0, "cypress".to_string());
    }
    if argv.get(1).map(String::as_str) != Some("run") {
        argv.insert(1, "run".to_string());
    }
    argv
}

/// Parses forwarded runner arguments into the base configuration for the first attempt.
pub fn parse_run_arguments(forwarded: &[String]) -> Result<RunConfiguration, ConfigError> {
    let argv = normalize_forwarded(forwarded);
    tracing::debug!(?argv, "parsing Cypress CLI");

    let cli = CypressCli::try_parse_from(&argv).map_err(ConfigError::RunnerArgs)?;
    let CypressCommand::Run(args) = cli.command;
    Ok(args.into())
}

impl From<CypressRunArgs> for RunConfiguration {
    fn from(a: CypressRunArgs) -> Self {
        let testing_type = if a.component {
            Some(TestingType::Component)
        } else if a.e2e {
            Some(TestingType::E2e)
        } else {
            None
        };

        RunConfiguration {
            spec: a.spec,
            env: a.env,
            group: a.group,
            record: a.record,
            browser: a.browser,
            ci_build_id: a.ci_build_id,
            config: a.config,
            config_file: a.config_file,
            headed: a.headed.then_some(true),
            headless: a.headless.then_some(true),
            key: a.key,
            exit: a.no_exit.then_some(false),
            parallel: a.parallel.then_some(true),
            port: a.port,
            project: a.project,
            quiet: a.quiet.then_some(true),
            reporter: a.reporter,
            reporter_options: a.reporter_options,
            tag: a.tag,
            testing_type,
            auto_cancel_after_failures: a.auto_cancel_after_failures,
            runner_ui: match (a.runner_ui, a.no_runner_ui) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            },
        }
    }
}
