use clap::Parser;

use cypress_rerun_core::api::AppConfig;

const BIN: &str = "cucumber-cypress-rerun";

/// Wrapper options taking a value.
const VALUE_FLAGS: [&str; 4] = ["--feature-files", "--delay", "--repeat", "-n"];
/// Wrapper switches; `--help`/`--version` belong to the wrapper too.
const SWITCHES: [&str; 6] = [
    "--until-passes",
    "--rerun-failed-only",
    "--help",
    "-h",
    "--version",
    "-V",
];

/// Reruns failed Cucumber scenarios in Cypress.
///
/// Every argument not listed here is handed to `cypress run` unchanged.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = BIN, version)]
pub struct Args {
    /// Folder holding the feature files to tag [default: cypress/e2e/]
    #[arg(long)]
    pub feature_files: Option<String>,

    /// Seconds to wait before the last attempt [default: 0]
    #[arg(long)]
    pub delay: Option<u64>,

    /// Maximum number of attempts [default: 2]
    #[arg(long, short = 'n')]
    pub repeat: Option<usize>,

    /// Stop at the first attempt that passes. On by default; only needed when
    /// cypress-rerun.toml sets `until_passes = false`
    #[arg(long)]
    pub until_passes: bool,

    /// Retry only the failed specs and scenarios. On by default; only needed
    /// when cypress-rerun.toml sets `rerun_failed_only = false`
    #[arg(long)]
    pub rerun_failed_only: bool,

    #[arg(skip)]
    pub cypress_args: Vec<String>,
}

impl Args {
    /// Splits `argv` (without the program name) into wrapper options and
    /// forwarded Cypress arguments, then parses the wrapper part.
    pub fn parse_wrapper<I, S>(argv: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (wrapper, forwarded) = split_args(argv.into_iter().map(Into::into).collect());
        let mut args = Args::try_parse_from(std::iter::once(BIN.to_string()).chain(wrapper))?;
        args.cypress_args = forwarded;
        Ok(args)
    }

    /// Command-line values win over the config file and the environment.
    pub fn apply(&self, cfg: &mut AppConfig) {
        if let Some(dir) = &self.feature_files {
            cfg.tagger.feature_files = dir.clone();
        }
        if let Some(delay) = self.delay {
            cfg.rerun.delay_secs = delay;
        }
        if let Some(repeat) = self.repeat {
            cfg.rerun.repeat = repeat;
        }
        if self.until_passes {
            cfg.rerun.until_passes = true;
        }
        if self.rerun_failed_only {
            cfg.rerun.rerun_failed_only = true;
        }
    }
}

/// Returns `(wrapper, forwarded)`, both in their original order.
pub fn split_args(argv: Vec<String>) -> (Vec<String>, Vec<String>) {
    let mut wrapper = Vec::new();
    let mut forwarded = Vec::new();
    let mut it = argv.into_iter();

    while let Some(arg) = it.next() {
        let name = arg.split_once('=').map(|(n, _)| n).unwrap_or(arg.as_str());
        if VALUE_FLAGS.contains(&name) {
            let inline = arg.contains('=');
            wrapper.push(arg);
            if !inline {
                if let Some(value) = it.next() {
                    wrapper.push(value);
                }
            }
        } else if SWITCHES.contains(&arg.as_str()) {
            wrapper.push(arg);
        } else {
            forwarded.push(arg);
        }
    }
    (wrapper, forwarded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn v(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn splits_wrapper_flags_from_cypress_args() {
        let (wrapper, forwarded) = split_args(v(&[
            "cypress",
            "run",
            "--repeat",
            "3",
            "--spec",
            "a.feature",
            "--feature-files=features/",
            "-n",
            "4",
            "--until-passes",
            "--env",
            "TAGS=@smoke",
        ]));
        assert_eq!(
            wrapper,
            v(&["--repeat", "3", "--feature-files=features/", "-n", "4", "--until-passes"])
        );
        assert_eq!(
            forwarded,
            v(&["cypress", "run", "--spec", "a.feature", "--env", "TAGS=@smoke"])
        );
    }

    #[test]
    fn parses_wrapper_and_keeps_forwarded() {
        let args = Args::parse_wrapper([
            "--delay",
            "5",
            "--rerun-failed-only",
            "-n",
            "3",
            "--record",
            "--group",
            "nightly",
        ])
        .unwrap();
        assert_eq!(args.delay, Some(5));
        assert_eq!(args.repeat, Some(3));
        assert!(args.rerun_failed_only);
        assert!(!args.until_passes);
        assert_eq!(args.feature_files, None);
        assert_eq!(args.cypress_args, v(&["--record", "--group", "nightly"]));
    }

    #[test]
    fn bad_wrapper_value_is_an_error() {
        assert!(Args::parse_wrapper(["--repeat", "many"]).is_err());
    }

    #[test]
    fn missing_value_is_an_error() {
        assert!(Args::parse_wrapper(["--delay"]).is_err());
    }

    #[test]
    fn help_says_switches_are_on_by_default() {
        use clap::CommandFactory;

        let help = Args::command().render_help().to_string();
        assert_eq!(help.matches("On by default").count(), 2);
        assert!(help.contains("`until_passes"));
        assert!(help.contains("`rerun_failed_only"));
    }

    #[test]
    fn apply_overrides_config() {
        let mut cfg = AppConfig::default();
        cfg.rerun.until_passes = false;
        let args = Args {
            feature_files: Some("features/".into()),
            repeat: Some(5),
            until_passes: true,
            ..Default::default()
        };
        args.apply(&mut cfg);
        assert_eq!(cfg.tagger.feature_files, "features/");
        assert_eq!(cfg.rerun.repeat, 5);
        assert_eq!(cfg.rerun.delay_secs, 0);
        assert!(cfg.rerun.until_passes);
    }
}
