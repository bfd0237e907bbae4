use std::sync::Arc;

use crate::cypress::RunConfiguration;
use crate::errors::RunnerError;
use crate::interpreter::{interpret, Verdict};
use crate::runner::RunnerPlugin;
use crate::tagger::FeatureTagger;

use super::state::AttemptState;
use super::types::{AttemptSummary, OrchestratorSettings, RunReport};

const NAME: &str = "cucumber-cypress-rerun:";

/// Runs attempts one after another, feeding each attempt's failures into the next.
pub struct Orchestrator {
    runner: Arc<dyn RunnerPlugin>,
    tagger: FeatureTagger,
    settings: OrchestratorSettings,
    states: Vec<AttemptState>,
}

enum Step {
    Continue(RunConfiguration),
    Stop { state: AttemptState, failures: u32 },
}

impl Orchestrator {
    pub fn new(
        runner: Arc<dyn RunnerPlugin>,
        tagger: FeatureTagger,
        settings: OrchestratorSettings,
    ) -> Self {
        Self {
            runner,
            tagger,
            settings,
            states: vec![AttemptState::Pending],
        }
    }

    pub fn state(&self) -> AttemptState {
        self.states.last().copied().unwrap_or(AttemptState::Pending)
    }

    fn transition(&mut self, next: AttemptState) {
        tracing::debug!(from = %self.state(), to = %next, "state transition");
        self.states.push(next);
    }

    /// Drives the session to a terminal state.
    ///
    /// Runner errors abort the session: no further attempt starts after one.
    pub async fn run(mut self, base: RunConfiguration) -> Result<RunReport, RunnerError> {
        let total = self.settings.repeat;
        tracing::info!(
            "{} will repeat Cypress command {} time(s), runner={}",
            NAME,
            total,
            self.runner.name()
        );
        tracing::info!(
            "{} will look for feature files in {} folder",
            NAME,
            self.tagger.dir().display()
        );

        let mut template = base;
        let mut attempts = Vec::with_capacity(total);
        let mut end = (AttemptState::Completed, 0u32);

        for attempt in 1..=total {
            if attempt == total && attempt > 1 && !self.settings.delay.is_zero() {
                self.transition(AttemptState::AwaitingDelay { attempt });
                tracing::info!(
                    "{} waiting {}s before the last attempt",
                    NAME,
                    self.settings.delay.as_secs_f64()
                );
                tokio::time::sleep(self.settings.delay).await;
            }

            self.transition(AttemptState::Running { attempt });
            let config = template.for_attempt(attempt, total, &self.settings.attempt_env);
            tracing::info!("***** {} {} of {} *****", NAME, attempt, total);
            tracing::debug!(?config, "run options");

            let result = match self.runner.run_attempt(&config).await {
                Ok(r) => r,
                Err(e) => {
                    self.transition(AttemptState::Failed);
                    return Err(e);
                }
            };

            let verdict = interpret(&result, attempt, total);
            let tagging = self.tag_if_needed(&verdict).await;

            let step = self.next_step(&template, &verdict, attempt, total);
            attempts.push(AttemptSummary {
                attempt,
                spec: config.spec.clone(),
                env: config.env.clone(),
                verdict,
                tagging,
            });

            match step {
                Step::Continue(next) => template = next,
                Step::Stop { state, failures } => {
                    end = (state, failures);
                    break;
                }
            }
        }

        self.transition(end.0);
        Ok(RunReport {
            total,
            attempts,
            states: self.states,
            failures: end.1,
        })
    }

    async fn tag_if_needed(&self, verdict: &Verdict) -> Option<crate::tagger::TagReport> {
        let failures = verdict.failures()?;
        tracing::info!("{} failed specs: {}", NAME, failures.specs.join(","));
        tracing::debug!(scenarios = ?failures.scenario_names(), "failed scenarios");

        if !(self.settings.until_passes && self.settings.rerun_failed_only) {
            return None;
        }
        let report = self.tagger.tag_failures(failures).await;
        tracing::debug!(
            files = report.files_tagged.len(),
            scenarios = report.scenarios_tagged,
            "feature files tagged for the rerun"
        );
        Some(report)
    }

    fn next_step(
        &self,
        template: &RunConfiguration,
        verdict: &Verdict,
        attempt: usize,
        total: usize,
    ) -> Step {
        match verdict {
            Verdict::NothingToRerun | Verdict::Passed => {
                if self.settings.until_passes || attempt >= total {
                    if matches!(verdict, Verdict::NothingToRerun) {
                        tracing::info!("{} there were no failed specs", NAME);
                    }
                    tracing::info!("{} successfully passed on run {} of {}", NAME, attempt, total);
                    Step::Stop {
                        state: AttemptState::Completed,
                        failures: 0,
                    }
                } else {
                    Step::Continue(template.clone())
                }
            }
            Verdict::RunnerFailed { failures, message } => {
                tracing::error!(
                    "{} Cypress could not run: {}",
                    NAME,
                    message.as_deref().unwrap_or("no message")
                );
                Step::Stop {
                    state: AttemptState::Failed,
                    failures: *failures,
                }
            }
            Verdict::Exhausted { total_failed, .. } => {
                tracing::error!("{} run {} of {} failed", NAME, attempt, total);
                tracing::error!("{} no more attempts left", NAME);
                Step::Stop {
                    state: AttemptState::Failed,
                    failures: *total_failed,
                }
            }
            Verdict::Retry { failures, total_failed } => {
                tracing::warn!("{} run {} of {} failed", NAME, attempt, total);
                if !self.settings.until_passes {
                    return Step::Stop {
                        state: AttemptState::Failed,
                        failures: *total_failed,
                    };
                }
                if self.settings.rerun_failed_only {
                    Step::Continue(template.narrowed_to(&failures.specs, &self.settings.retry_tag))
                } else {
                    Step::Continue(template.clone())
                }
            }
        }
    }
}
