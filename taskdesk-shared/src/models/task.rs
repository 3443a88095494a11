/// Task model and database operations
///
/// Tasks are created from the add-task page and read by the dashboard.
/// There are no update or delete paths: status changes, edits and deletion
/// are not persisted anywhere.
///
/// # Status
///
/// ```text
/// pending → in_progress → completed
/// ```
///
/// New tasks start as `pending` or `in_progress`; `completed` only exists
/// for rows written outside the application.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('pending', 'in_progress', 'completed');
/// CREATE TYPE task_priority AS ENUM ('low', 'medium', 'high');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     category_id UUID REFERENCES categories(id) ON DELETE SET NULL,
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     status task_status NOT NULL DEFAULT 'pending',
///     priority task_priority NOT NULL DEFAULT 'medium',
///     due_date DATE NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Dashboard order
///
/// 1. Overdue tasks that are not completed
/// 2. Other open tasks
/// 3. Completed tasks, regardless of date
///
/// Within each group: due date ascending, then priority high → low.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Task progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started
    Pending,

    /// Being worked on
    InProgress,

    /// Done
    Completed,
}

impl TaskStatus {
    /// Value stored in the database and submitted by forms
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }

    /// Label shown on the dashboard
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Selesai",
        }
    }

    /// Statuses a new task may be created with
    pub fn is_initial(&self) -> bool {
        matches!(self, TaskStatus::Pending | TaskStatus::InProgress)
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            other => Err(format!("unknown task status '{}'", other)),
        }
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    /// Value stored in the database and submitted by forms
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }

    /// Badge text shown on the dashboard
    pub fn label(&self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
        }
    }

    /// Higher is more urgent
    pub fn rank(&self) -> u8 {
        match self {
            TaskPriority::Low => 0,
            TaskPriority::Medium => 1,
            TaskPriority::High => 2,
        }
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            other => Err(format!("unknown task priority '{}'", other)),
        }
    }
}

/// Task row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: Uuid,

    /// Owner
    pub user_id: Uuid,

    /// Optional category; cleared if the category is deleted
    pub category_id: Option<Uuid>,

    pub title: String,

    pub description: Option<String>,

    pub status: TaskStatus,

    pub priority: TaskPriority,

    /// Calendar day the task is due
    pub due_date: NaiveDate,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// A task is overdue from the start of its due day until it is completed
    ///
    /// The due date carries no time, so it falls due at 00:00 and any later
    /// moment of `today` is already past it.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due_date <= today && self.status != TaskStatus::Completed
    }

    fn dashboard_group(&self, today: NaiveDate) -> u8 {
        if self.status == TaskStatus::Completed {
            2
        } else if self.is_overdue(today) {
            0
        } else {
            1
        }
    }
}

/// Input for creating a task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    pub user_id: Uuid,
    pub category_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: NaiveDate,
}

/// Dashboard row: a task plus its category's display fields
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskListItem {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub task: Task,

    pub category_name: Option<String>,

    pub category_color: Option<String>,
}

/// Per-user task counts shown in the dashboard sidebar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskStats {
    pub total: i64,
    pub pending: i64,
    pub in_progress: i64,
    pub completed: i64,
    pub overdue: i64,
}

impl TaskStats {
    /// Counts computed from an already-fetched list
    ///
    /// Must agree with [`Task::stats_for_user`] for the same rows and day.
    pub fn tally<'a, I>(tasks: I, today: NaiveDate) -> Self
    where
        I: IntoIterator<Item = &'a Task>,
    {
        tasks.into_iter().fold(TaskStats::default(), |mut stats, task| {
            stats.total += 1;
            match task.status {
                TaskStatus::Pending => stats.pending += 1,
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::Completed => stats.completed += 1,
            }
            if task.is_overdue(today) {
                stats.overdue += 1;
            }
            stats
        })
    }
}

/// Sorts dashboard rows into display order
///
/// Ties after group, due date and priority fall back to creation time so
/// the order is stable across reloads.
pub fn sort_for_dashboard(items: &mut [TaskListItem], today: NaiveDate) {
    items.sort_by_key(|item| {
        let task = &item.task;
        (
            task.dashboard_group(today),
            task.due_date,
            Reverse(task.priority.rank()),
            task.created_at,
        )
    });
}

const TASK_COLUMNS: &str = "id, user_id, category_id, title, description, status, priority, \
                            due_date, created_at, updated_at";

impl Task {
    /// Inserts a task owned by `data.user_id`
    ///
    /// No duplicate detection: submitting the same form twice creates two rows.
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO tasks (user_id, category_id, title, description, status, priority, due_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            TASK_COLUMNS
        );

        sqlx::query_as::<_, Task>(&query)
            .bind(data.user_id)
            .bind(data.category_id)
            .bind(data.title)
            .bind(data.description)
            .bind(data.status)
            .bind(data.priority)
            .bind(data.due_date)
            .fetch_one(pool)
            .await
    }

    /// All of a user's tasks joined with their category, in dashboard order
    pub async fn list_for_dashboard(
        pool: &PgPool,
        user_id: Uuid,
        today: NaiveDate,
    ) -> Result<Vec<TaskListItem>, sqlx::Error> {
        let mut items = sqlx::query_as::<_, TaskListItem>(
            r#"
            SELECT t.id, t.user_id, t.category_id, t.title, t.description, t.status,
                   t.priority, t.due_date, t.created_at, t.updated_at,
                   c.name AS category_name, c.color AS category_color
            FROM tasks t
            LEFT JOIN categories c ON t.category_id = c.id
            WHERE t.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        sort_for_dashboard(&mut items, today);
        Ok(items)
    }

    /// Aggregate counts for one user in a single query
    pub async fn stats_for_user(
        pool: &PgPool,
        user_id: Uuid,
        today: NaiveDate,
    ) -> Result<TaskStats, sqlx::Error> {
        sqlx::query_as::<_, TaskStats>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                COUNT(*) FILTER (WHERE status = 'in_progress') AS in_progress,
                COUNT(*) FILTER (WHERE status = 'completed') AS completed,
                COUNT(*) FILTER (WHERE due_date <= $2 AND status <> 'completed') AS overdue
            FROM tasks
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .bind(today)
        .fetch_one(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn task(title: &str, status: TaskStatus, priority: TaskPriority, due_offset: i64) -> Task {
        let created = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        Task {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            category_id: None,
            title: title.to_string(),
            description: None,
            status,
            priority,
            due_date: today() + Duration::days(due_offset),
            created_at: created,
            updated_at: created,
        }
    }

    fn item(task: Task) -> TaskListItem {
        TaskListItem {
            task,
            category_name: None,
            category_color: None,
        }
    }

    fn titles(items: &[TaskListItem]) -> Vec<&str> {
        items.iter().map(|i| i.task.title.as_str()).collect()
    }

    #[test]
    fn test_status_round_trip_strings() {
        for status in [TaskStatus::Pending, TaskStatus::InProgress, TaskStatus::Completed] {
            assert_eq!(status.as_str().parse::<TaskStatus>().unwrap(), status);
        }
        assert!("done".parse::<TaskStatus>().is_err());
        assert!("In_Progress".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_priority_parse_and_rank() {
        assert_eq!("high".parse::<TaskPriority>().unwrap(), TaskPriority::High);
        assert!("urgent".parse::<TaskPriority>().is_err());
        assert!(TaskPriority::High.rank() > TaskPriority::Medium.rank());
        assert!(TaskPriority::Medium.rank() > TaskPriority::Low.rank());
    }

    #[test]
    fn test_defaults_and_labels() {
        assert_eq!(TaskStatus::default(), TaskStatus::Pending);
        assert_eq!(TaskPriority::default(), TaskPriority::Medium);
        assert_eq!(TaskStatus::InProgress.label(), "In Progress");
        assert_eq!(TaskStatus::Completed.label(), "Selesai");
        assert_eq!(TaskPriority::High.label(), "High");
        assert!(TaskStatus::Pending.is_initial());
        assert!(TaskStatus::InProgress.is_initial());
        assert!(!TaskStatus::Completed.is_initial());
    }

    #[test]
    fn test_is_overdue() {
        assert!(task("late", TaskStatus::Pending, TaskPriority::Low, -1).is_overdue(today()));
        assert!(task("late", TaskStatus::InProgress, TaskPriority::Low, -7).is_overdue(today()));
        assert!(task("today", TaskStatus::Pending, TaskPriority::Low, 0).is_overdue(today()));
        assert!(!task("soon", TaskStatus::Pending, TaskPriority::Low, 1).is_overdue(today()));
        assert!(!task("done", TaskStatus::Completed, TaskPriority::Low, -3).is_overdue(today()));
    }

    #[test]
    fn test_due_today_is_overdue_once_the_day_started() {
        let evening = Utc.with_ymd_and_hms(2025, 3, 10, 18, 0, 0).unwrap();
        let due_today = task("today", TaskStatus::Pending, TaskPriority::High, 0);

        assert!(due_today.is_overdue(evening.date_naive()));
        assert!(!due_today.is_overdue(evening.date_naive() - Duration::days(1)));

        let mut items = vec![
            item(task("tomorrow", TaskStatus::Pending, TaskPriority::High, 1)),
            item(due_today),
        ];
        sort_for_dashboard(&mut items, evening.date_naive());
        assert_eq!(titles(&items), vec!["today", "tomorrow"]);

        let stats = TaskStats::tally(items.iter().map(|i| &i.task), evening.date_naive());
        assert_eq!(stats.overdue, 1);
    }

    #[test]
    fn test_dashboard_order_overdue_open_completed() {
        let mut items = vec![
            item(task("C", TaskStatus::Completed, TaskPriority::Medium, -1)),
            item(task("B", TaskStatus::Pending, TaskPriority::High, 1)),
            item(task("A", TaskStatus::Pending, TaskPriority::Low, -2)),
        ];

        sort_for_dashboard(&mut items, today());
        assert_eq!(titles(&items), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_dashboard_order_within_group() {
        let mut items = vec![
            item(task("later-high", TaskStatus::Pending, TaskPriority::High, 5)),
            item(task("soon-low", TaskStatus::Pending, TaskPriority::Low, 1)),
            item(task("soon-high", TaskStatus::InProgress, TaskPriority::High, 1)),
            item(task("soon-medium", TaskStatus::Pending, TaskPriority::Medium, 1)),
        ];

        sort_for_dashboard(&mut items, today());
        assert_eq!(
            titles(&items),
            vec!["soon-high", "soon-medium", "soon-low", "later-high"]
        );
    }

    #[test]
    fn test_completed_sorts_last_even_if_earliest() {
        let mut items = vec![
            item(task("old-done", TaskStatus::Completed, TaskPriority::High, -30)),
            item(task("far-future", TaskStatus::Pending, TaskPriority::Low, 365)),
        ];

        sort_for_dashboard(&mut items, today());
        assert_eq!(titles(&items), vec!["far-future", "old-done"]);
    }

    #[test]
    fn test_tally_matches_independent_filters() {
        let tasks = vec![
            task("a", TaskStatus::Pending, TaskPriority::Low, -2),
            task("b", TaskStatus::Pending, TaskPriority::High, 3),
            task("c", TaskStatus::InProgress, TaskPriority::Medium, -1),
            task("d", TaskStatus::InProgress, TaskPriority::Medium, 0),
            task("e", TaskStatus::Completed, TaskPriority::High, -5),
            task("f", TaskStatus::Completed, TaskPriority::Low, 2),
        ];

        let stats = TaskStats::tally(&tasks, today());
        let count = |pred: &dyn Fn(&Task) -> bool| tasks.iter().filter(|t| pred(t)).count() as i64;

        assert_eq!(stats.total, tasks.len() as i64);
        assert_eq!(stats.pending, count(&|t| t.status == TaskStatus::Pending));
        assert_eq!(stats.in_progress, count(&|t| t.status == TaskStatus::InProgress));
        assert_eq!(stats.completed, count(&|t| t.status == TaskStatus::Completed));
        assert_eq!(stats.overdue, count(&|t| t.is_overdue(today())));
        // a, c and the in-progress task due today
        assert_eq!(stats.overdue, 3);
    }

    #[test]
    fn test_tally_empty() {
        let stats = TaskStats::tally(std::iter::empty::<&Task>(), today());
        assert_eq!(stats, TaskStats::default());
    }
}
