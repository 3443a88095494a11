/// Add-task page
///
/// # Endpoints
///
/// - `GET /add_task` - Empty form (login required)
/// - `POST /add_task` - Create a task for the logged-in user

use crate::{
    app::AppState,
    error::{PageError, PageResult},
    views::{tasks::add_task_page, Notice},
};
use axum::{extract::State, response::Html, Extension, Form};
use taskdesk_shared::{
    models::{
        category::Category,
        session::Session,
        task::{CreateTask, Task},
    },
    validation::{FormError, TaskForm},
};

use super::today;

/// Shown after a task is created
pub const TASK_ADDED_MESSAGE: &str = "Tugas berhasil ditambahkan!";

/// Category dropdown entries; a failure leaves the dropdown empty
async fn dropdown_categories(state: &AppState, session: &Session) -> Vec<Category> {
    match Category::list_by_user(&state.db, session.user_id).await {
        Ok(categories) => categories,
        Err(e) => {
            tracing::error!(user_id = %session.user_id, error = %e, "Could not load categories");
            Vec::new()
        }
    }
}

/// Empty add-task form
pub async fn add_task_form(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> PageResult<Html<String>> {
    let categories = dropdown_categories(&state, &session).await;
    Ok(Html(add_task_page(None, &categories, &TaskForm::default(), today())))
}

/// Add-task submission
///
/// On success the form is emptied and the page returns to the dashboard
/// after a short delay. On failure the submitted values are shown again.
pub async fn add_task(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Form(form): Form<TaskForm>,
) -> PageResult<Html<String>> {
    let today = today();

    let (notice, values) = match create_task(&state, &session, &form, today).await {
        Ok(task) => {
            tracing::info!(user_id = %session.user_id, task_id = %task.id, "Task created");
            (Notice::Success(TASK_ADDED_MESSAGE.to_string()), TaskForm::default())
        }
        Err(err) => {
            err.log("add_task");
            let notice = Notice::Error(err.notice_message(state.config.app.expose_error_details));
            (notice, form)
        }
    };

    let categories = dropdown_categories(&state, &session).await;
    Ok(Html(add_task_page(Some(&notice), &categories, &values, today)))
}

async fn create_task(
    state: &AppState,
    session: &Session,
    form: &TaskForm,
    today: chrono::NaiveDate,
) -> PageResult<Task> {
    let valid = form.validate(today)?;

    if let Some(category_id) = valid.category_id {
        let owned = Category::find_owned(&state.db, category_id, session.user_id).await?;
        if owned.is_none() {
            return Err(PageError::from(FormError::InvalidCategory));
        }
    }

    let task = Task::create(
        &state.db,
        CreateTask {
            user_id: session.user_id,
            category_id: valid.category_id,
            title: valid.title,
            description: valid.description,
            status: valid.status,
            priority: valid.priority,
            due_date: valid.due_date,
        },
    )
    .await?;

    Ok(task)
}
