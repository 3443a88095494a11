/// Dashboard page
///
/// # Endpoint
///
/// - `GET /dashboard` (login required)

use crate::{
    app::AppState,
    error::PageResult,
    views::{dashboard::dashboard_page, Notice},
};
use axum::{extract::State, response::Html, Extension};
use taskdesk_shared::models::{
    session::Session,
    task::{Task, TaskListItem, TaskStats},
};

use super::today;

/// Lists the user's tasks in dashboard order with their statistics
///
/// A database failure still renders the page, with empty data and the
/// system-error notice.
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> PageResult<Html<String>> {
    let today = today();

    let (items, stats, notice) = match load(&state, &session, today).await {
        Ok((items, stats)) => (items, stats, None),
        Err(err) => {
            err.log("dashboard");
            let notice = Notice::Error(err.notice_message(state.config.app.expose_error_details));
            (Vec::new(), TaskStats::default(), Some(notice))
        }
    };

    Ok(Html(dashboard_page(notice.as_ref(), &session, &stats, &items, today)))
}

async fn load(
    state: &AppState,
    session: &Session,
    today: chrono::NaiveDate,
) -> PageResult<(Vec<TaskListItem>, TaskStats)> {
    let items = Task::list_for_dashboard(&state.db, session.user_id, today).await?;
    let stats = Task::stats_for_user(&state.db, session.user_id, today).await?;

    tracing::debug!(
        user_id = %session.user_id,
        tasks = items.len(),
        overdue = stats.overdue,
        "Loaded dashboard"
    );

    Ok((items, stats))
}
