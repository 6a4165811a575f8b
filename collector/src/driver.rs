use core::fmt;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};
use types::Symbol;

use crate::{
    fetcher::Fetcher,
    loader::{LoadError, Loader},
    resource::Resource,
    transform::transform,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    /// Pause after a healthy cycle.
    pub poll_interval: Duration,
    /// Pause after a cycle that failed as a whole.
    pub error_cooldown: Duration,
}

impl Default for Schedule {
    fn default() -> Self {
        return Self {
            poll_interval: Duration::from_secs(60),
            error_cooldown: Duration::from_secs(300),
        };
    }
}

#[async_trait]
pub trait Sleeper {
    async fn sleep(&self, duration: Duration);
}

pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetching,
    Transforming,
    Loading,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Stage::Fetching => "fetching",
            Stage::Transforming => "transforming",
            Stage::Loading => "loading",
        };
        return write!(f, "{value}");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceOutcome {
    Loaded { rows: usize },
    Failed { stage: Stage, detail: String },
}

#[derive(Debug, Default)]
pub struct CycleReport {
    pub outcomes: Vec<(Resource, ResourceOutcome)>,
}

impl CycleReport {
    pub fn loaded(&self) -> usize {
        return self
            .outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, ResourceOutcome::Loaded { .. }))
            .count();
    }

    pub fn failed(&self) -> usize {
        return self.outcomes.len() - self.loaded();
    }

    pub fn rows(&self) -> usize {
        return self
            .outcomes
            .iter()
            .map(|(_, outcome)| match outcome {
                ResourceOutcome::Loaded { rows } => *rows,
                ResourceOutcome::Failed { .. } => 0,
            })
            .sum();
    }

    pub fn outcome(&self, resource: Resource) -> Option<&ResourceOutcome> {
        return self
            .outcomes
            .iter()
            .find(|(r, _)| *r == resource)
            .map(|(_, outcome)| outcome);
    }
}

/// Failures that end a cycle early or leave it empty. Both lead to the
/// cooldown instead of the regular poll interval.
#[derive(Debug, thiserror::Error)]
pub enum CycleError {
    #[error("Database unavailable while loading {resource}: {detail}")]
    StoreUnavailable { resource: Resource, detail: String },

    /// Nothing was loaded, usually because the exchange is unreachable.
    #[error("All {} resources failed", .0.outcomes.len())]
    AllResourcesFailed(CycleReport),
}

impl CycleError {
    pub fn kind(&self) -> &'static str {
        return match self {
            CycleError::StoreUnavailable { .. } => "store_unavailable",
            CycleError::AllResourcesFailed(_) => "all_resources_failed",
        };
    }
}

/// Runs fetch, transform and load for every resource, then sleeps.
pub struct Driver<F, L, S> {
    fetcher: F,
    loader: L,
    sleeper: S,
    symbol: Symbol,
    schedule: Schedule,
}

impl<F, L, S> Driver<F, L, S>
where
    F: Fetcher + Sync,
    L: Loader + Sync,
    S: Sleeper + Sync,
{
    pub fn new(fetcher: F, loader: L, sleeper: S, symbol: Symbol, schedule: Schedule) -> Self {
        return Self {
            fetcher,
            loader,
            sleeper,
            symbol,
            schedule,
        };
    }

    fn failed(&self, resource: Resource, stage: Stage, detail: String) -> ResourceOutcome {
        match stage {
            // The fetcher already logged the transport error.
            Stage::Fetching => warn!(%resource, %stage, "Skipping {resource} this cycle"),
            _ => error!(%resource, %stage, "Error {stage} {resource}: {detail}"),
        }
        return ResourceOutcome::Failed { stage, detail };
    }

    /// `Err` only when the failure is not confined to `resource`.
    pub async fn run_resource(&self, resource: Resource) -> Result<ResourceOutcome, CycleError> {
        debug!(%resource, stage = %Stage::Fetching, "Entering stage");
        let payload = match self.fetcher.fetch(resource).await {
            Ok(payload) => payload,
            Err(err) => return Ok(self.failed(resource, Stage::Fetching, format!("{err:#}"))),
        };

        debug!(%resource, stage = %Stage::Transforming, "Entering stage");
        let batch = match transform(resource, payload, &self.symbol) {
            Ok(batch) => batch,
            Err(err) => return Ok(self.failed(resource, Stage::Transforming, format!("{err:#}"))),
        };

        debug!(%resource, stage = %Stage::Loading, rows = batch.len(), "Entering stage");
        return match self.loader.load(&batch) {
            Ok(rows) => {
                let table = batch.table_name();
                info!(table, records = rows, "Successfully inserted {rows} records into {table}");
                Ok(ResourceOutcome::Loaded { rows })
            }
            Err(LoadError::Unavailable(detail)) => {
                Err(CycleError::StoreUnavailable { resource, detail })
            }
            Err(err) => Ok(self.failed(resource, Stage::Loading, err.to_string())),
        };
    }

    pub async fn run_cycle(&self) -> Result<CycleReport, CycleError> {
        let mut report = CycleReport::default();

        for resource in Resource::ALL {
            let outcome = self.run_resource(resource).await?;
            report.outcomes.push((resource, outcome));
        }
        if report.loaded() == 0 {
            return Err(CycleError::AllResourcesFailed(report));
        }
        info!(
            loaded = report.loaded(),
            failed = report.failed(),
            records = report.rows(),
            "Cycle complete"
        );
        return Ok(report);
    }

    /// Runs one cycle and sleeps for the delay its result calls for.
    pub async fn tick(&self) -> Duration {
        let delay = match self.run_cycle().await {
            Ok(_) => self.schedule.poll_interval,
            Err(err) => {
                error!(
                    kind = err.kind(),
                    "Error in main loop: {err}, retrying in {}s",
                    self.schedule.error_cooldown.as_secs()
                );
                self.schedule.error_cooldown
            }
        };
        self.sleeper.sleep(delay).await;
        return delay;
    }

    /// `None` runs until the process is stopped.
    pub async fn run_cycles(&self, max_cycles: Option<u64>) {
        let mut cycles = 0u64;

        while max_cycles.map_or(true, |max| cycles < max) {
            self.tick().await;
            cycles += 1;
        }
    }

    pub async fn run(&self) {
        self.run_cycles(None).await;
    }
}
