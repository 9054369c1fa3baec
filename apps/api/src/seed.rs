use chrono::{Duration, Utc};
use domain_tasks::{NewTask, TaskRepository, TaskResult, TaskStatus};
use tracing::info;

/// Demo tasks inserted on first start: title, description, status, and a
/// due-date offset in days from now (negative = overdue, None = no due date).
const DEMO_TASKS: &[(&str, &str, TaskStatus, Option<i64>)] = &[
    (
        "Complete project documentation",
        "Write README and API docs for the backend.",
        TaskStatus::New,
        Some(7),
    ),
    (
        "Review pull requests",
        "Check open PRs and provide feedback.",
        TaskStatus::InProgress,
        Some(2),
    ),
    (
        "Deploy to staging",
        "Run deployment pipeline and smoke tests.",
        TaskStatus::Completed,
        Some(-1),
    ),
    (
        "Setup CI/CD",
        "Configure GitHub Actions for build and test.",
        TaskStatus::New,
        None,
    ),
    (
        "Add integration tests",
        "Cover main API endpoints with handler tests.",
        TaskStatus::InProgress,
        Some(5),
    ),
    (
        "Update dependencies",
        "Bump crate versions and fix deprecations.",
        TaskStatus::Completed,
        Some(-3),
    ),
    (
        "Design database schema",
        "Create ER diagram and migration plan.",
        TaskStatus::New,
        Some(10),
    ),
    (
        "Fix memory leak in cache",
        "Profile and fix cache eviction.",
        TaskStatus::InProgress,
        Some(1),
    ),
    (
        "Write deployment runbook",
        "Step-by-step guide for production release.",
        TaskStatus::Completed,
        Some(-7),
    ),
    (
        "Add request logging",
        "Structured logs for all incoming requests.",
        TaskStatus::New,
        Some(3),
    ),
    (
        "Setup monitoring",
        "Prometheus metrics and Grafana dashboards.",
        TaskStatus::InProgress,
        Some(4),
    ),
    (
        "Document error codes",
        "List all API error codes and meanings.",
        TaskStatus::Completed,
        Some(-2),
    ),
];

/// Insert demo tasks when the store is empty.
///
/// Writes go straight through the repository: seeded rows may start in any
/// status, which the public API never allows.
pub async fn seed_demo_data<R: TaskRepository>(repository: &R) -> TaskResult<()> {
    if repository.count().await? > 0 {
        return Ok(());
    }

    let now = Utc::now();
    for (i, (title, description, status, due_offset_days)) in DEMO_TASKS.iter().enumerate() {
        repository
            .insert(NewTask {
                title: (*title).to_string(),
                description: (*description).to_string(),
                status: *status,
                created_at: now - Duration::days((i % 5) as i64),
                due_date: due_offset_days.map(|days| now + Duration::days(days)),
            })
            .await?;
    }

    info!("Seeded {} demo tasks", DEMO_TASKS.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_tasks::InMemoryTaskRepository;

    #[tokio::test]
    async fn test_seeds_empty_store() {
        let repository = InMemoryTaskRepository::new();

        seed_demo_data(&repository).await.unwrap();

        assert_eq!(repository.count().await.unwrap(), DEMO_TASKS.len() as u64);
    }

    #[tokio::test]
    async fn test_skips_non_empty_store() {
        let repository = InMemoryTaskRepository::new();
        repository
            .insert(NewTask {
                title: "Existing".to_string(),
                description: String::new(),
                status: TaskStatus::New,
                created_at: Utc::now(),
                due_date: None,
            })
            .await
            .unwrap();

        seed_demo_data(&repository).await.unwrap();

        assert_eq!(repository.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_seeding_twice_is_idempotent() {
        let repository = InMemoryTaskRepository::new();

        seed_demo_data(&repository).await.unwrap();
        seed_demo_data(&repository).await.unwrap();

        assert_eq!(repository.count().await.unwrap(), DEMO_TASKS.len() as u64);
    }
}
