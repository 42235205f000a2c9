//! Periodic maintenance of project statuses and stored refresh tokens
//!
//! Both sweeps are idempotent bulk updates. They share nothing with the
//! request path except the store, so they can run at any time.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use fh_shared::config::MaintenanceConfig;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use crate::clock::{default_clock, Clock};
use crate::errors::DomainError;
use crate::repositories::{ProjectRepository, UserRepository};

/// Runs the project-expiry and refresh-token purge sweeps
pub struct MaintenanceScheduler<U, P>
where
    U: UserRepository + 'static,
    P: ProjectRepository + 'static,
{
    users: Arc<U>,
    projects: Arc<P>,
    config: MaintenanceConfig,
    clock: Arc<dyn Clock>,
}

impl<U, P> MaintenanceScheduler<U, P>
where
    U: UserRepository + 'static,
    P: ProjectRepository + 'static,
{
    pub fn new(users: Arc<U>, projects: Arc<P>, config: MaintenanceConfig) -> Self {
        Self::with_clock(users, projects, config, default_clock())
    }

    pub fn with_clock(
        users: Arc<U>,
        projects: Arc<P>,
        config: MaintenanceConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            projects,
            config,
            clock,
        }
    }

    /// Run both sweeps once
    ///
    /// Never fails: a sweep that errors is logged and recorded in the report,
    /// and the other sweep still runs.
    pub async fn run_sweeps(&self) -> SweepReport {
        let now = self.clock.now();
        let mut report = SweepReport::default();

        match self.close_ended_projects(now).await {
            Ok(count) => {
                report.projects_closed = count;
                info!("Closed {} projects past their funding end date", count);
            }
            Err(e) => {
                error!("Failed to close ended projects: {}", e);
                report.errors.push(format!("Project sweep error: {}", e));
            }
        }

        match self.purge_expired_refresh_tokens(now).await {
            Ok(count) => {
                report.refresh_tokens_purged = count;
                info!("Purged {} expired refresh tokens", count);
            }
            Err(e) => {
                error!("Failed to purge expired refresh tokens: {}", e);
                report
                    .errors
                    .push(format!("Refresh token sweep error: {}", e));
            }
        }

        report
    }

    async fn close_ended_projects(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        self.projects.close_ended_projects(now).await
    }

    async fn purge_expired_refresh_tokens(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        self.users.clear_expired_refresh_tokens(now).await
    }

    /// Start the sweeps as a background task
    ///
    /// The first run happens immediately, then once per configured interval.
    /// Returns `None` when the scheduler is disabled in configuration.
    /// Dropping the returned handle also stops the task.
    pub fn start(self: Arc<Self>) -> Option<MaintenanceHandle> {
        if !self.config.enabled {
            warn!("Maintenance scheduler is disabled");
            return None;
        }

        let period = Duration::from_secs(self.config.interval_seconds.max(1));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            info!(
                "Maintenance scheduler started - will run every {} seconds",
                period.as_secs()
            );

            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    _ = ticker.tick() => {
                        let report = self.run_sweeps().await;
                        if !report.is_success() {
                            warn!("Maintenance completed with errors: {:?}", report.errors);
                        }
                    }
                }
            }

            info!("Maintenance scheduler stopped");
        });

        Some(MaintenanceHandle {
            shutdown: Some(shutdown_tx),
            task,
        })
    }
}

/// Handle to a running maintenance task
pub struct MaintenanceHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl MaintenanceHandle {
    /// Signal the task to stop and wait for it
    ///
    /// A sweep already in progress is allowed to finish.
    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Err(e) = (&mut self.task).await {
            error!("Maintenance task ended abnormally: {}", e);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Result of one maintenance run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepReport {
    /// Number of projects switched to closed
    pub projects_closed: usize,
    /// Number of users whose refresh token was cleared
    pub refresh_tokens_purged: usize,
    /// Any errors encountered during the run
    pub errors: Vec<String>,
}

impl SweepReport {
    /// Check if both sweeps succeeded
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get total number of records changed
    pub fn total_changed(&self) -> usize {
        self.projects_closed + self.refresh_tokens_purged
    }
}
