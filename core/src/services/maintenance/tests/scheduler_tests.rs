use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use fh_shared::config::MaintenanceConfig;
use uuid::Uuid;

use crate::clock::{Clock, ManualClock};
use crate::domain::entities::project::{Project, ProjectStatus};
use crate::domain::entities::user::User;
use crate::errors::DomainError;
use crate::repositories::{
    InMemoryProjectRepository, InMemoryUserRepository, ProjectRepository, UserRepository,
};
use crate::services::maintenance::{MaintenanceScheduler, SweepReport};

/// Project store that is down
struct FailingProjectRepository;

#[async_trait]
impl ProjectRepository for FailingProjectRepository {
    async fn find_by_id(&self, _id: i64) -> Result<Option<Project>, DomainError> {
        Err(DomainError::store("connection reset"))
    }

    async fn save(&self, _project: Project) -> Result<Project, DomainError> {
        Err(DomainError::store("connection reset"))
    }

    async fn close_ended_projects(&self, _now: DateTime<Utc>) -> Result<usize, DomainError> {
        Err(DomainError::store("connection reset"))
    }
}

async fn user_with_refresh(
    repo: &InMemoryUserRepository,
    expires_at: Option<DateTime<Utc>>,
) -> Uuid {
    let mut user = User::new();
    if let Some(expires_at) = expires_at {
        user.set_refresh_token(format!("digest-{}", user.id), expires_at);
    }
    let id = user.id;
    repo.insert(user).await;
    id
}

async fn status_of(repo: &InMemoryProjectRepository, id: i64) -> ProjectStatus {
    repo.find_by_id(id).await.unwrap().unwrap().status
}

#[tokio::test]
async fn test_purge_clears_only_past_expiry() {
    let users = Arc::new(InMemoryUserRepository::new());
    let projects = Arc::new(InMemoryProjectRepository::new());
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let now = clock.now();

    let expired = user_with_refresh(&users, Some(now - Duration::minutes(1))).await;
    let at_boundary = user_with_refresh(&users, Some(now)).await;
    let current = user_with_refresh(&users, Some(now + Duration::minutes(30))).await;
    let never_issued = user_with_refresh(&users, None).await;

    let scheduler = MaintenanceScheduler::with_clock(
        users.clone(),
        projects,
        MaintenanceConfig::default(),
        clock,
    );
    let report = scheduler.run_sweeps().await;

    assert!(report.is_success());
    assert_eq!(report.refresh_tokens_purged, 2);

    for id in [expired, at_boundary] {
        let user = users.find_by_id(id).await.unwrap().unwrap();
        assert!(user.refresh_token_hash.is_none());
        assert!(user.refresh_token_expires_at.is_none());
    }
    let user = users.find_by_id(current).await.unwrap().unwrap();
    assert!(user.refresh_token_hash.is_some());
    let user = users.find_by_id(never_issued).await.unwrap().unwrap();
    assert!(user.refresh_token_hash.is_none());
    assert_eq!(users.len().await, 4);
}

#[tokio::test]
async fn test_project_sweep_is_idempotent() {
    let users = Arc::new(InMemoryUserRepository::new());
    let projects = Arc::new(InMemoryProjectRepository::new());
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let now = clock.now();

    projects
        .save(Project::new(1, "ended", Some(now - Duration::days(1))))
        .await
        .unwrap();
    projects
        .save(Project::new(2, "running", Some(now + Duration::days(1))))
        .await
        .unwrap();
    projects.save(Project::new(3, "unscheduled", None)).await.unwrap();

    let scheduler = MaintenanceScheduler::with_clock(
        users,
        projects.clone(),
        MaintenanceConfig::default(),
        clock.clone(),
    );

    let first = scheduler.run_sweeps().await;
    assert_eq!(first.projects_closed, 1);
    assert_eq!(status_of(&projects, 1).await, ProjectStatus::Closed);
    assert_eq!(status_of(&projects, 2).await, ProjectStatus::Open);
    assert_eq!(status_of(&projects, 3).await, ProjectStatus::Open);

    let second = scheduler.run_sweeps().await;
    assert_eq!(second, SweepReport::default());

    clock.advance(Duration::days(2));
    let third = scheduler.run_sweeps().await;
    assert_eq!(third.projects_closed, 1);
    assert_eq!(status_of(&projects, 2).await, ProjectStatus::Closed);
    assert_eq!(status_of(&projects, 3).await, ProjectStatus::Open);
}

#[tokio::test]
async fn test_failing_project_sweep_does_not_block_purge() {
    let users = Arc::new(InMemoryUserRepository::new());
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let id = user_with_refresh(&users, Some(clock.now() - Duration::seconds(1))).await;

    let scheduler = MaintenanceScheduler::with_clock(
        users.clone(),
        Arc::new(FailingProjectRepository),
        MaintenanceConfig::default(),
        clock,
    );
    let report = scheduler.run_sweeps().await;

    assert!(!report.is_success());
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.projects_closed, 0);
    assert_eq!(report.refresh_tokens_purged, 1);
    assert_eq!(report.total_changed(), 1);

    let user = users.find_by_id(id).await.unwrap().unwrap();
    assert!(user.refresh_token_hash.is_none());
}

#[tokio::test]
async fn test_disabled_scheduler_does_not_start() {
    let scheduler = Arc::new(MaintenanceScheduler::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryProjectRepository::new()),
        MaintenanceConfig::default(),
    ));

    assert!(scheduler.start().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_periodic_trigger_runs_until_stopped() {
    let users = Arc::new(InMemoryUserRepository::new());
    let projects = Arc::new(InMemoryProjectRepository::new());
    let t0 = Utc::now();
    let clock = Arc::new(ManualClock::new(t0));

    let user_id = user_with_refresh(&users, Some(t0 + Duration::minutes(60))).await;
    projects
        .save(Project::new(1, "campaign", Some(t0 + Duration::minutes(30))))
        .await
        .unwrap();

    let scheduler = Arc::new(MaintenanceScheduler::with_clock(
        users.clone(),
        projects.clone(),
        MaintenanceConfig::every(600),
        clock.clone(),
    ));
    let handle = scheduler.start().expect("enabled scheduler starts");

    // First tick fires immediately; nothing is due yet.
    tokio::time::sleep(std::time::Duration::from_secs(1)).await;
    assert_eq!(status_of(&projects, 1).await, ProjectStatus::Open);

    clock.set(t0 + Duration::minutes(61));
    tokio::time::sleep(std::time::Duration::from_secs(600)).await;

    assert_eq!(status_of(&projects, 1).await, ProjectStatus::Closed);
    let user = users.find_by_id(user_id).await.unwrap().unwrap();
    assert!(user.refresh_token_hash.is_none());

    assert!(!handle.is_finished());
    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_dropping_handle_stops_sweeps() {
    let users = Arc::new(InMemoryUserRepository::new());
    let projects = Arc::new(InMemoryProjectRepository::new());
    let t0 = Utc::now();
    let clock = Arc::new(ManualClock::new(t0));

    projects
        .save(Project::new(1, "campaign", Some(t0 + Duration::minutes(30))))
        .await
        .unwrap();

    let scheduler = Arc::new(MaintenanceScheduler::with_clock(
        users,
        projects.clone(),
        MaintenanceConfig::every(600),
        clock.clone(),
    ));
    let handle = scheduler.clone().start().expect("enabled scheduler starts");

    tokio::time::sleep(std::time::Duration::from_secs(1)).await;
    drop(handle);

    // Several intervals pass after the project has ended, with no sweep to close it.
    clock.set(t0 + Duration::minutes(61));
    tokio::time::sleep(std::time::Duration::from_secs(1800)).await;

    assert_eq!(status_of(&projects, 1).await, ProjectStatus::Open);
    assert_eq!(Arc::strong_count(&scheduler), 1);
}
