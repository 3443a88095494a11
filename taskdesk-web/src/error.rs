/// Error handling for page handlers
///
/// Handlers return `PageResult<T>`. Most failures never leave the handler:
/// a form page catches the error and re-renders itself with
/// [`PageError::notice_message`]. Errors that do escape (from the session
/// guard, or a page with nothing to re-render) become a response through
/// `IntoResponse`.
///
/// # Example
///
/// ```
/// use taskdesk_shared::validation::FormError;
/// use taskdesk_web::error::PageError;
///
/// let err = PageError::from(FormError::MissingTitle);
/// assert_eq!(err.notice_message(false), "Judul tugas harus diisi!");
///
/// let err = PageError::Internal("disk full".to_string());
/// assert_eq!(err.notice_message(true), "Terjadi kesalahan sistem: disk full");
/// ```

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use taskdesk_shared::{auth::password::PasswordError, validation::FormError};

use crate::views;

/// Page result type alias
pub type PageResult<T> = Result<T, PageError>;

/// Prefix of every system-error message shown to users
pub const SYSTEM_ERROR_PREFIX: &str = "Terjadi kesalahan sistem: ";

/// Shown in place of error details when they are hidden
pub const HIDDEN_DETAIL: &str = "silakan coba lagi nanti.";

/// Unified page error type
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// No valid login session; redirects to the login page
    #[error("not logged in")]
    Unauthenticated,

    /// Input the user can fix
    #[error(transparent)]
    Form(#[from] FormError),

    /// Unknown page or a row that vanished
    #[error("not found")]
    NotFound,

    /// Database failure
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    /// Hashing failure
    #[error("{0}")]
    Password(#[from] PasswordError),

    /// Anything else
    #[error("{0}")]
    Internal(String),
}

impl PageError {
    /// Whether this is a user-correctable form problem
    pub fn is_form_error(&self) -> bool {
        matches!(self, PageError::Form(_))
    }

    /// Message for the inline notice on a form page
    ///
    /// Form errors show their own text. Everything else becomes the
    /// system-error message, with the raw detail only when `expose_details`.
    pub fn notice_message(&self, expose_details: bool) -> String {
        match self {
            PageError::Form(err) => err.to_string(),
            other if expose_details => format!("{}{}", SYSTEM_ERROR_PREFIX, other),
            _ => format!("{}{}", SYSTEM_ERROR_PREFIX, HIDDEN_DETAIL),
        }
    }

    /// Logs the error at the level it deserves
    ///
    /// Form errors are expected and stay at debug.
    pub fn log(&self, page: &'static str) {
        match self {
            PageError::Form(err) => tracing::debug!(page, reason = %err, "Form rejected"),
            PageError::Unauthenticated => tracing::debug!(page, "Not logged in"),
            other => tracing::error!(page, error = %other, "Page request failed"),
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            PageError::Unauthenticated => return Redirect::to("/auth/login").into_response(),
            PageError::Form(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
            PageError::NotFound => (
                StatusCode::NOT_FOUND,
                "Halaman tidak ditemukan.".to_string(),
            ),
            _ => {
                // Escaping errors have no page to expose details on
                self.log("error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    self.notice_message(false),
                )
            }
        };

        (status, Html(views::error_page(status, &message))).into_response()
    }
}
