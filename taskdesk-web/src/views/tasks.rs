//! Add-task page.

use chrono::NaiveDate;
use taskdesk_shared::{
    models::{
        category::Category,
        task::{TaskPriority, TaskStatus},
    },
    validation::TaskForm,
};

use super::{app_page, html_escape, mark_if, meta_refresh, notice_html, render, NavItem, Notice};

pub const ADD_TASK_TEMPLATE: &str = include_str!("templates/add_task.html");

/// Seconds before a successful submission returns to the dashboard.
pub const ADD_TASK_REDIRECT_SECONDS: u32 = 3;

const PRIORITY_CHOICES: [(TaskPriority, &str); 3] = [
    (TaskPriority::Low, "Rendah"),
    (TaskPriority::Medium, "Sedang"),
    (TaskPriority::High, "Tinggi"),
];

const STATUS_CHOICES: [TaskStatus; 2] = [TaskStatus::Pending, TaskStatus::InProgress];

fn category_options(categories: &[Category], selected: &str) -> String {
    categories
        .iter()
        .map(|category| {
            let id = category.id.to_string();
            format!(
                r#"                            <option value="{}"{}>{}</option>"#,
                id,
                mark_if(id == selected.trim(), " selected"),
                html_escape(&category.name)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn priority_options(selected: &str) -> String {
    let selected = match selected.trim() {
        "" => TaskPriority::default().as_str(),
        other => other,
    };
    PRIORITY_CHOICES
        .iter()
        .map(|(priority, label)| {
            format!(
                r#"                            <label class="priority-option priority-{value}"><input type="radio" name="priority" value="{value}"{checked}> {label}</label>"#,
                value = priority.as_str(),
                checked = mark_if(priority.as_str() == selected, " checked"),
                label = label,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn status_options(selected: &str) -> String {
    let selected = match selected.trim() {
        "" => TaskStatus::default().as_str(),
        other => other,
    };
    STATUS_CHOICES
        .iter()
        .map(|status| {
            format!(
                r#"                            <label class="radio-option"><input type="radio" name="status" value="{value}"{checked}> {label}</label>"#,
                value = status.as_str(),
                checked = mark_if(status.as_str() == selected, " checked"),
                label = status.label(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Add-task form.
///
/// `values` is what the form shows: the rejected submission after an
/// error, an empty form otherwise. A success notice schedules the return
/// to the dashboard and tells the script to drop the saved draft.
pub fn add_task_page(
    notice: Option<&Notice>,
    categories: &[Category],
    values: &TaskForm,
    today: NaiveDate,
) -> String {
    let succeeded = matches!(notice, Some(Notice::Success(_)));

    let notice = match notice {
        Some(Notice::Success(text)) => format!(
            r#"<div class="alert alert-success" role="alert">&#10004; {}<br><small>Anda akan diarahkan ke dashboard dalam {} detik...</small></div>"#,
            html_escape(text),
            ADD_TASK_REDIRECT_SECONDS
        ),
        other => notice_html(other),
    };

    let content = render(
        ADD_TASK_TEMPLATE,
        &[
            ("notice", &notice),
            ("draft", if succeeded { "clear" } else { "keep" }),
            ("title", &html_escape(&values.title)),
            ("description", &html_escape(&values.description)),
            ("category_options", &category_options(categories, &values.category_id)),
            ("due_date", &html_escape(&values.due_date)),
            ("today", &today.format("%Y-%m-%d").to_string()),
            ("priority_options", &priority_options(&values.priority)),
            ("status_options", &status_options(&values.status)),
        ],
    );

    let head_extra = if succeeded {
        meta_refresh(ADD_TASK_REDIRECT_SECONDS, "/dashboard")
    } else {
        String::new()
    };

    app_page("Tambah Tugas", NavItem::AddTask, &head_extra, &content)
}
