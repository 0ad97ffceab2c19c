//! Domain model for task management.
//!
//! The task domain models creation, partial update, and completion of to-do
//! items while keeping all infrastructure concerns outside of the domain
//! boundary.

mod due_date;
mod error;
mod ids;
mod task;

pub use due_date::{DUE_DATE_FORMAT, DueDate};
pub use error::TaskDomainError;
pub use ids::{TaskId, TaskTitle};
pub use task::{NewTask, PersistedTaskData, Task, TaskPatch};
