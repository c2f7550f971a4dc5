//! Use case tests over real repositories

use application::dtos::*;
use application::use_cases::*;
use application::{ApplicationError, RequestContext};
use domain::config::{AppConfig, SearchConfig, StorageBackend};
use domain::search::RawSearchParams;
use domain::{DomainError, Identifier, Repository};
use infrastructure::RepositoryContainer;
use rstest::rstest;
use std::path::PathBuf;

fn ctx() -> RequestContext {
    RequestContext::default()
}

fn in_memory() -> RepositoryContainer {
    RepositoryContainer::in_memory()
}

fn sqlite() -> RepositoryContainer {
    let mut config = AppConfig::default();
    config.storage.backend = StorageBackend::Sqlite;
    config.storage.sqlite_path = PathBuf::from(":memory:");
    RepositoryContainer::from_config(&config).expect("in-memory SQLite should open")
}

async fn create_schedule(repos: &RepositoryContainer, start: &str, end: &str) -> ScheduleOutput {
    CreateScheduleUseCase::new(repos.schedules.clone())
        .execute(
            CreateScheduleInput {
                account_id: Some(Identifier::new().as_string()),
                agent_id: None,
                start_time: Some(start.to_string()),
                end_time: Some(end.to_string()),
            },
            ctx(),
        )
        .await
        .expect("schedule should be created")
}

async fn create_tasks(repos: &RepositoryContainer, schedule_id: &str, tasks_type: &str, duration: i32) -> TasksOutput {
    CreateTasksUseCase::new(repos.tasks.clone(), repos.schedules.clone())
        .execute(
            CreateTasksInput {
                account_id: Some(Identifier::new().as_string()),
                schedule_id: Some(schedule_id.to_string()),
                tasks_type: Some(tasks_type.to_string()),
                start_time: None,
                duration: Some(duration),
            },
            ctx(),
        )
        .await
        .expect("tasks should be created")
}

#[tokio::test]
async fn test_create_schedule_with_only_account() {
    let repos = in_memory();
    let account = Identifier::new().as_string();

    let output = CreateScheduleUseCase::new(repos.schedules.clone())
        .execute(
            CreateScheduleInput {
                account_id: Some(account.clone()),
                ..Default::default()
            },
            RequestContext::new().with_correlation_id("import-7"),
        )
        .await
        .unwrap();

    assert_eq!(output.account_id, account);
    assert!(output.agent_id.is_none());
    assert!(output.start_time.is_none());
    assert!(output.end_time.is_none());
    assert!(Identifier::parse(&output.schedule_id).is_ok());
}

#[tokio::test]
async fn test_create_schedule_reports_missing_fields() {
    let repos = in_memory();
    let err = CreateScheduleUseCase::new(repos.schedules.clone())
        .execute(CreateScheduleInput::default(), ctx())
        .await
        .unwrap_err();

    match err {
        ApplicationError::Validation { errors } => {
            assert_eq!(errors.errors_for("accountId"), ["accountId is required"]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_schedule_rejects_inverted_window() {
    let repos = in_memory();
    let err = CreateScheduleUseCase::new(repos.schedules.clone())
        .execute(
            CreateScheduleInput {
                account_id: Some(Identifier::new().as_string()),
                agent_id: None,
                start_time: Some("2024-01-01T10:00:00Z".to_string()),
                end_time: Some("2024-01-01T09:00:00Z".to_string()),
            },
            ctx(),
        )
        .await
        .unwrap_err();

    let errors = err.validation_errors().expect("validation errors");
    assert_eq!(errors.errors_for("endTime"), ["endTime must not be before startTime"]);
    assert_eq!(errors.error_count(), 1);
    assert!(repos.schedules.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_schedule_errors() {
    let repos = in_memory();
    let get = GetScheduleUseCase::new(repos.schedules.clone());

    let err = get.execute("not-a-uuid".to_string(), ctx()).await.unwrap_err();
    assert!(matches!(err, ApplicationError::Domain(DomainError::InvalidIdentifierFormat(_))));
    assert!(err.is_client_error());

    let err = get.execute(Identifier::new().as_string(), ctx()).await.unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound { .. }));
}

#[tokio::test]
async fn test_update_schedule_applies_only_provided_fields() {
    let repos = in_memory();
    let created = create_schedule(&repos, "2024-01-01T09:00:00Z", "2024-01-01T10:00:00Z").await;
    let update = UpdateScheduleUseCase::new(repos.schedules.clone());

    let agent = Identifier::new().as_string();
    let updated = update
        .execute(
            UpdateScheduleInput {
                schedule_id: Some(created.schedule_id.clone()),
                agent_id: Some(agent.clone()),
                ..Default::default()
            },
            ctx(),
        )
        .await
        .unwrap();
    assert_eq!(updated.agent_id, Some(agent));
    assert_eq!(updated.start_time, created.start_time);
    assert_eq!(updated.end_time, created.end_time);

    // Moving the start past the stored end is rejected and nothing is saved
    let err = update
        .execute(
            UpdateScheduleInput {
                schedule_id: Some(created.schedule_id.clone()),
                start_time: Some("2024-01-01T11:00:00Z".to_string()),
                ..Default::default()
            },
            ctx(),
        )
        .await
        .unwrap_err();
    assert!(err.validation_errors().is_some());

    let stored = GetScheduleUseCase::new(repos.schedules.clone())
        .execute(created.schedule_id.clone(), ctx())
        .await
        .unwrap();
    assert_eq!(stored.start_time.as_deref(), Some("2024-01-01T09:00:00.000Z"));

    // Shifting the whole window at once is fine
    let moved = update
        .execute(
            UpdateScheduleInput {
                schedule_id: Some(created.schedule_id),
                start_time: Some("2024-01-01T11:00:00Z".to_string()),
                end_time: Some("2024-01-01T12:30:00Z".to_string()),
                ..Default::default()
            },
            ctx(),
        )
        .await
        .unwrap();
    assert_eq!(moved.end_time.as_deref(), Some("2024-01-01T12:30:00.000Z"));
}

#[rstest]
#[case::in_memory(in_memory())]
#[case::sqlite(sqlite())]
#[tokio::test]
async fn test_delete_schedule_removes_its_tasks(#[case] repos: RepositoryContainer) {
    let schedule = create_schedule(&repos, "2024-02-01T08:00:00Z", "2024-02-01T09:00:00Z").await;
    let other = create_schedule(&repos, "2024-02-02T08:00:00Z", "2024-02-02T09:00:00Z").await;
    create_tasks(&repos, &schedule.schedule_id, "call", 10).await;
    create_tasks(&repos, &schedule.schedule_id, "email", 5).await;
    let kept = create_tasks(&repos, &other.schedule_id, "visit", 30).await;

    DeleteScheduleUseCase::new(repos.schedules.clone(), repos.tasks.clone())
        .execute(schedule.schedule_id.clone(), ctx())
        .await
        .unwrap();

    let remaining = repos.tasks.find_all().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].tasks_id().as_string(), kept.tasks_id);

    let err = DeleteScheduleUseCase::new(repos.schedules.clone(), repos.tasks.clone())
        .execute(schedule.schedule_id, ctx())
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound { .. }));
}

#[rstest]
#[case::in_memory(in_memory())]
#[case::sqlite(sqlite())]
#[tokio::test]
async fn test_create_tasks_requires_schedule(#[case] repos: RepositoryContainer) {
    let err = CreateTasksUseCase::new(repos.tasks.clone(), repos.schedules.clone())
        .execute(
            CreateTasksInput {
                account_id: Some(Identifier::new().as_string()),
                schedule_id: Some(Identifier::new().as_string()),
                tasks_type: Some("meeting".to_string()),
                ..Default::default()
            },
            ctx(),
        )
        .await
        .unwrap_err();

    match err {
        ApplicationError::NotFound { resource_type, .. } => assert_eq!(resource_type, "Schedule"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_tasks_duration_rules() {
    let repos = in_memory();
    let schedule = create_schedule(&repos, "2024-03-01T08:00:00Z", "2024-03-01T09:00:00Z").await;
    let create = CreateTasksUseCase::new(repos.tasks.clone(), repos.schedules.clone());

    let input = |duration| CreateTasksInput {
        account_id: Some(Identifier::new().as_string()),
        schedule_id: Some(schedule.schedule_id.clone()),
        tasks_type: Some("follow_up".to_string()),
        start_time: None,
        duration: Some(duration),
    };

    let err = create.execute(input(-5), ctx()).await.unwrap_err();
    assert_eq!(
        err.validation_errors().unwrap().errors_for("duration"),
        ["duration must not be negative"]
    );

    let err = create.execute(input(1441), ctx()).await.unwrap_err();
    assert_eq!(
        err.validation_errors().unwrap().errors_for("duration"),
        ["duration must not exceed 1440 minutes"]
    );

    let created = create.execute(input(1440), ctx()).await.unwrap();
    assert_eq!(created.duration, Some(1440));
    assert_eq!(created.tasks_type, "follow_up");
}

#[tokio::test]
async fn test_update_and_delete_tasks() {
    let repos = in_memory();
    let schedule = create_schedule(&repos, "2024-03-01T08:00:00Z", "2024-03-01T09:00:00Z").await;
    let tasks = create_tasks(&repos, &schedule.schedule_id, "call", 15).await;

    let updated = UpdateTasksUseCase::new(repos.tasks.clone())
        .execute(
            UpdateTasksInput {
                tasks_id: Some(tasks.tasks_id.clone()),
                tasks_type: Some("visit".to_string()),
                start_time: Some("2024-03-01T08:15:00Z".to_string()),
                duration: None,
            },
            ctx(),
        )
        .await
        .unwrap();
    assert_eq!(updated.tasks_type, "visit");
    assert_eq!(updated.duration, Some(15));
    assert_eq!(updated.start_time.as_deref(), Some("2024-03-01T08:15:00.000Z"));

    let err = UpdateTasksUseCase::new(repos.tasks.clone())
        .execute(
            UpdateTasksInput {
                tasks_id: Some(tasks.tasks_id.clone()),
                duration: Some(-1),
                ..Default::default()
            },
            ctx(),
        )
        .await
        .unwrap_err();
    assert!(err.validation_errors().is_some());

    let delete = DeleteTasksUseCase::new(repos.tasks.clone());
    delete.execute(tasks.tasks_id.clone(), ctx()).await.unwrap();
    let err = delete.execute(tasks.tasks_id, ctx()).await.unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound { .. }));
}

#[rstest]
#[case::in_memory(in_memory())]
#[case::sqlite(sqlite())]
#[tokio::test]
async fn test_list_schedules_paginates(#[case] repos: RepositoryContainer) {
    let mut created = Vec::new();
    for hour in 0..5 {
        let start = format!("2024-04-01T{:02}:00:00Z", 8 + hour);
        let end = format!("2024-04-01T{:02}:30:00Z", 8 + hour);
        created.push(create_schedule(&repos, &start, &end).await);
    }

    let list = ListSchedulesUseCase::new(repos.schedules.clone(), SearchConfig::default());
    let page = list
        .execute(
            ListSchedulesInput {
                params: RawSearchParams {
                    page: Some("2".to_string()),
                    per_page: Some("2".to_string()),
                    sort: Some("startTime".to_string()),
                    sort_dir: Some("asc".to_string()),
                },
                ..Default::default()
            },
            ctx(),
        )
        .await
        .unwrap();

    assert_eq!(page.total, 5);
    assert_eq!(page.current_page, 2);
    assert_eq!(page.per_page, 2);
    assert_eq!(page.last_page, 3);
    let ids: Vec<&str> = page.items.iter().map(|s| s.schedule_id.as_str()).collect();
    assert_eq!(ids, [created[2].schedule_id.as_str(), created[3].schedule_id.as_str()]);

    let presenter = CollectionPresenter::from(page);
    let json = presenter.to_json().unwrap();
    assert_eq!(json["meta"]["lastPage"], 3);
    assert_eq!(json["data"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_list_schedules_window_and_bad_params() {
    let repos = in_memory();
    create_schedule(&repos, "2024-05-01T08:00:00Z", "2024-05-01T09:00:00Z").await;
    let inside = create_schedule(&repos, "2024-05-02T08:00:00Z", "2024-05-02T09:00:00Z").await;

    let list = ListSchedulesUseCase::new(repos.schedules.clone(), SearchConfig::default());
    let page = list
        .execute(
            ListSchedulesInput {
                from: Some("2024-05-02T00:00:00Z".to_string()),
                to: Some("2024-05-03T00:00:00Z".to_string()),
                ..Default::default()
            },
            ctx(),
        )
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].schedule_id, inside.schedule_id);

    for params in [
        RawSearchParams {
            per_page: Some("0".to_string()),
            ..Default::default()
        },
        RawSearchParams {
            per_page: Some("101".to_string()),
            ..Default::default()
        },
        RawSearchParams {
            page: Some("two".to_string()),
            ..Default::default()
        },
        RawSearchParams {
            sort_dir: Some("sideways".to_string()),
            ..Default::default()
        },
    ] {
        let err = list
            .execute(
                ListSchedulesInput {
                    params,
                    ..Default::default()
                },
                ctx(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Domain(DomainError::InvalidSearchParams(_))));
    }

    // Unknown sort fields fall back to the default order
    let page = list
        .execute(
            ListSchedulesInput {
                params: RawSearchParams {
                    sort: Some("color".to_string()),
                    ..Default::default()
                },
                ..Default::default()
            },
            ctx(),
        )
        .await
        .unwrap();
    assert_eq!(page.total, 2);
}

#[tokio::test]
async fn test_list_tasks_filters() {
    let repos = in_memory();
    let schedule = create_schedule(&repos, "2024-06-01T08:00:00Z", "2024-06-01T09:00:00Z").await;
    create_tasks(&repos, &schedule.schedule_id, "call", 10).await;
    create_tasks(&repos, &schedule.schedule_id, "follow_up", 20).await;
    create_tasks(&repos, &schedule.schedule_id, "email", 30).await;

    let list = ListTasksUseCase::new(repos.tasks.clone(), SearchConfig::default());

    let page = list
        .execute(
            ListTasksInput {
                type_contains: Some("L".to_string()),
                params: RawSearchParams {
                    sort: Some("duration".to_string()),
                    sort_dir: Some("DESC".to_string()),
                    ..Default::default()
                },
                ..Default::default()
            },
            ctx(),
        )
        .await
        .unwrap();
    let types: Vec<&str> = page.items.iter().map(|t| t.tasks_type.as_str()).collect();
    assert_eq!(types, ["email", "follow_up", "call"]);

    let page = list
        .execute(
            ListTasksInput {
                schedule_id: Some(schedule.schedule_id.clone()),
                tasks_type: Some("email".to_string()),
                ..Default::default()
            },
            ctx(),
        )
        .await
        .unwrap();
    assert_eq!(page.total, 1);

    let err = list
        .execute(
            ListTasksInput {
                started_from: Some("2024-06-02T00:00:00Z".to_string()),
                started_to: Some("2024-06-01T00:00:00Z".to_string()),
                ..Default::default()
            },
            ctx(),
        )
        .await
        .unwrap_err();
    assert!(err.is_client_error());
}
