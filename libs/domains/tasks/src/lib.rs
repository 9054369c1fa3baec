//! Tasks Domain
//!
//! This module provides a complete domain implementation for managing tasks
//! with a constrained status lifecycle (`NEW -> IN_PROGRESS -> COMPLETED`).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP boundary, DTOs
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, transition policy
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + implementations)
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_tasks::{PgTaskRepository, TaskService};
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://...").await?;
//!
//! let repository = PgTaskRepository::new(db);
//! let service = TaskService::new(repository);
//! let router = domain_tasks::handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod transitions;

// Re-export commonly used types
pub use error::{TaskError, TaskResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateTask, NewTask, PageQuery, StatusRequest, Task, TaskPage, TaskPageResponse, TaskStatus,
    UpdateTask,
};
pub use postgres::PgTaskRepository;
pub use repository::{InMemoryTaskRepository, MutationOutcome, TaskMutation, TaskRepository};
pub use service::TaskService;
pub use transitions::is_transition_allowed;
