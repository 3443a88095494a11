//! Dashboard page: statistics sidebar and the ordered task list.

use chrono::NaiveDate;
use taskdesk_shared::models::{
    category::DEFAULT_COLOR,
    session::Session,
    task::{TaskListItem, TaskStats, TaskStatus},
};

use super::{app_page, format_date, html_escape, notice_html, render, NavItem, Notice};

pub const DASHBOARD_TEMPLATE: &str = include_str!("templates/dashboard.html");

const EMPTY_STATE: &str = r#"<div class="empty-state">
                        <h3>Belum ada tugas</h3>
                        <p>Mulai dengan menambahkan tugas pertama Anda!</p>
                        <a href="/add_task" class="btn btn-primary">+ Tambah Tugas Pertama</a>
                    </div>"#;

/// Colors are stored as `#rrggbb`; anything else falls back to the default.
fn safe_color(color: Option<&str>) -> &str {
    match color {
        Some(c) if c.len() == 7 && c.starts_with('#') && c[1..].chars().all(|ch| ch.is_ascii_hexdigit()) => c,
        _ => DEFAULT_COLOR,
    }
}

fn summary_html(stats: &TaskStats) -> String {
    let mut html = format!(
        "Anda memiliki <strong>{} tugas</strong> yang belum diselesaikan.",
        stats.pending
    );
    if stats.overdue > 0 {
        html.push_str(&format!(
            r#" <span class="overdue-note"><strong>{} tugas</strong> sudah melewati batas waktu.</span>"#,
            stats.overdue
        ));
    }
    html
}

fn action_buttons(item: &TaskListItem) -> String {
    let id = item.task.id;
    let mut html = String::new();

    if item.task.status != TaskStatus::Completed {
        html.push_str(&format!(
            r#"<button type="button" class="btn btn-success btn-sm" data-action="status" data-task-id="{}" data-status="completed">Selesai</button>"#,
            id
        ));
        if item.task.status == TaskStatus::Pending {
            html.push_str(&format!(
                r#"<button type="button" class="btn btn-warning btn-sm" data-action="status" data-task-id="{}" data-status="in_progress">Start</button>"#,
                id
            ));
        }
    }
    html.push_str(&format!(
        r#"<button type="button" class="btn btn-primary btn-sm" data-action="edit" data-task-id="{}">Edit</button>"#,
        id
    ));
    html.push_str(&format!(
        r#"<button type="button" class="btn btn-error btn-sm" data-action="delete" data-task-id="{}">Hapus</button>"#,
        id
    ));
    html
}

/// One task row.
pub fn task_item_html(item: &TaskListItem, today: NaiveDate) -> String {
    let task = &item.task;
    let overdue = task.is_overdue(today);
    let state_class = if task.status == TaskStatus::Completed {
        " completed"
    } else if overdue {
        " overdue"
    } else {
        ""
    };

    let category = item
        .category_name
        .as_deref()
        .map(|name| {
            format!(
                r#"<span class="task-category" style="background: {}">{}</span> "#,
                safe_color(item.category_color.as_deref()),
                html_escape(name)
            )
        })
        .unwrap_or_default();

    let overdue_badge = if overdue {
        r#" <span class="overdue-badge">Terlambat</span>"#
    } else {
        ""
    };

    let description = task
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .map(|d| format!(r#"<p class="task-description">{}</p>"#, html_escape(d)))
        .unwrap_or_default();

    format!(
        r#"<div class="task-item{state}" data-status="{status}" data-priority="{priority}">
    <div class="task-header">
        <div class="task-body">
            <div class="task-title">{title}</div>
            <div class="task-meta">{category}<span class="priority-badge priority-{priority}">{priority_label}</span> <span class="due-date">{due}</span>{overdue_badge}</div>
            {description}
        </div>
        <div class="task-status">{status_label}</div>
    </div>
    <div class="task-actions">{actions}</div>
</div>"#,
        state = state_class,
        status = task.status.as_str(),
        priority = task.priority.as_str(),
        title = html_escape(&task.title),
        category = category,
        priority_label = task.priority.label(),
        due = format_date(task.due_date),
        overdue_badge = overdue_badge,
        description = description,
        status_label = task.status.label(),
        actions = action_buttons(item),
    )
}

/// Full dashboard. `items` must already be in dashboard order.
pub fn dashboard_page(
    notice: Option<&Notice>,
    session: &Session,
    stats: &TaskStats,
    items: &[TaskListItem],
    today: NaiveDate,
) -> String {
    let tasks = if items.is_empty() {
        EMPTY_STATE.to_string()
    } else {
        items
            .iter()
            .map(|item| task_item_html(item, today))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let initial = session
        .full_name
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default();

    let content = render(
        DASHBOARD_TEMPLATE,
        &[
            ("notice", &notice_html(notice)),
            ("initial", &html_escape(&initial)),
            ("full_name", &html_escape(&session.full_name)),
            ("username", &html_escape(&session.username)),
            ("stat_total", &stats.total.to_string()),
            ("stat_pending", &stats.pending.to_string()),
            ("stat_in_progress", &stats.in_progress.to_string()),
            ("stat_completed", &stats.completed.to_string()),
            ("stat_overdue", &stats.overdue.to_string()),
            ("summary", &summary_html(stats)),
            ("tasks", &tasks),
        ],
    );

    app_page("Dashboard", NavItem::Dashboard, "", &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use taskdesk_shared::models::task::{Task, TaskPriority};
    use uuid::Uuid;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn session() -> Session {
        let now = Utc::now();
        Session {
            id: Uuid::new_v4(),
            token_hash: String::new(),
            user_id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            full_name: "Alice <Liddell>".to_string(),
            created_at: now,
            expires_at: now + Duration::hours(1),
        }
    }

    fn item(title: &str, status: TaskStatus, priority: TaskPriority, due: NaiveDate) -> TaskListItem {
        let now = Utc::now();
        TaskListItem {
            task: Task {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                category_id: None,
                title: title.to_string(),
                description: None,
                status,
                priority,
                due_date: due,
                created_at: now,
                updated_at: now,
            },
            category_name: None,
            category_color: None,
        }
    }

    #[test]
    fn test_task_item_labels() {
        let html = task_item_html(
            &item("Buy milk", TaskStatus::Pending, TaskPriority::High, today() + Duration::days(1)),
            today(),
        );
        assert!(html.contains(r#"<div class="task-title">Buy milk</div>"#));
        assert!(html.contains(r#"<span class="priority-badge priority-high">High</span>"#));
        assert!(html.contains("16 Jun 2025"));
        assert!(html.contains(r#"data-status="pending""#));
        assert!(!html.contains("Terlambat"));
        assert!(html.contains(r#"data-action="delete""#));
        assert!(html.contains(r#"data-status="in_progress""#));
    }

    #[test]
    fn test_overdue_and_completed_classes() {
        let overdue = task_item_html(
            &item("Late", TaskStatus::InProgress, TaskPriority::Low, today() - Duration::days(1)),
            today(),
        );
        assert!(overdue.contains(r#"class="task-item overdue""#));
        assert!(overdue.contains("Terlambat"));
        assert!(overdue.contains("In Progress"));

        let done = task_item_html(
            &item("Done", TaskStatus::Completed, TaskPriority::Low, today() - Duration::days(1)),
            today(),
        );
        assert!(done.contains(r#"class="task-item completed""#));
        assert!(done.contains("Selesai"));
        assert!(!done.contains(r#"data-status="completed">Selesai"#));
    }

    #[test]
    fn test_category_badge_uses_safe_color() {
        let mut with_category = item("Report", TaskStatus::Pending, TaskPriority::Medium, today());
        with_category.category_name = Some("Pekerjaan".to_string());
        with_category.category_color = Some("red;position:fixed".to_string());

        let html = task_item_html(&with_category, today());
        assert!(html.contains("Pekerjaan"));
        assert!(html.contains("background: #6c757d"));
        assert!(!html.contains("position:fixed"));
    }

    #[test]
    fn test_dashboard_page_empty_state() {
        let html = dashboard_page(None, &session(), &TaskStats::default(), &[], today());
        assert!(html.contains("Belum ada tugas"));
        assert!(html.contains("Selamat datang, Alice &lt;Liddell&gt;!"));
        assert!(!html.contains("melewati batas waktu"));
    }

    #[test]
    fn test_dashboard_page_lists_tasks_in_given_order() {
        let items = vec![
            item("First", TaskStatus::Pending, TaskPriority::High, today()),
            item("Second", TaskStatus::Completed, TaskPriority::Low, today()),
        ];
        let stats = TaskStats::tally(items.iter().map(|i| &i.task), today());
        let html = dashboard_page(None, &session(), &stats, &items, today());

        let first = html.find("First").unwrap();
        let second = html.find("Second").unwrap();
        assert!(first < second);
        assert_eq!(html.matches(r#"<div class="task-item"#).count(), 2);
        assert!(html.contains(r#"<span class="stat-number total">2</span>"#));
    }

    #[test]
    fn test_summary_mentions_overdue() {
        let stats = TaskStats {
            total: 3,
            pending: 2,
            in_progress: 0,
            completed: 1,
            overdue: 1,
        };
        let html = summary_html(&stats);
        assert!(html.contains("<strong>2 tugas</strong> yang belum diselesaikan"));
        assert!(html.contains("<strong>1 tugas</strong> sudah melewati batas waktu"));
    }
}
