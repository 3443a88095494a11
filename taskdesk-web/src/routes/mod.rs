/// Page route handlers
///
/// Every page answers GET with its HTML and POST with the same page after
/// processing its form:
///
/// - `health`: JSON health check
/// - `auth`: Login, registration, logout
/// - `dashboard`: Task list and statistics
/// - `tasks`: Add-task form
/// - `profile`: Profile and password forms
/// - `assets`: Embedded script and stylesheet

pub mod assets;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod profile;
pub mod tasks;

use crate::error::{PageError, PageResult};
use taskdesk_shared::auth::password::{self, PasswordError};

/// Current calendar date (UTC) used for due-date checks
pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

/// Runs an Argon2 operation on the blocking pool
///
/// Hashing costs tens of milliseconds of CPU and 64 MiB of memory, which
/// would stall every request sharing the async worker.
async fn run_password_task<T, F>(op: F) -> PageResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, PasswordError> + Send + 'static,
{
    tokio::task::spawn_blocking(op)
        .await
        .map_err(|e| PageError::Internal(format!("password task join failed: {}", e)))?
        .map_err(PageError::from)
}

pub(crate) async fn hash_password(password: &str) -> PageResult<String> {
    let password = password.to_string();
    run_password_task(move || password::hash_password(&password)).await
}

pub(crate) async fn verify_password(password: &str, hash: &str) -> PageResult<bool> {
    let password = password.to_string();
    let hash = hash.to_string();
    run_password_task(move || password::verify_password(&password, &hash)).await
}
