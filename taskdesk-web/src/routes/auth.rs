/// Authentication pages
///
/// # Endpoints
///
/// - `GET/POST /auth/login` - Sign in with username or email
/// - `GET/POST /auth/register` - Create an account
/// - `GET /logout` - End the session
///
/// Visitors who already hold a valid session are sent to the dashboard
/// instead of seeing the login or registration form.

use crate::{
    app::AppState,
    error::{PageError, PageResult},
    session::{current_session, expired_session_cookie, session_cookie, session_token},
    views::{
        auth::{login_page, register_page, RegisterValues},
        Notice,
    },
};
use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use taskdesk_shared::{
    models::{
        category::Category,
        session::Session,
        unique_violation,
        user::{CreateUser, User, EMAIL_CONSTRAINT, USERNAME_CONSTRAINT},
    },
    validation::{FormError, LoginForm, RegistrationForm},
};

use super::{hash_password, verify_password};

/// Shown after a successful registration
pub const REGISTERED_MESSAGE: &str = "Pendaftaran berhasil! Silakan login.";

fn to_dashboard() -> Response {
    Redirect::to("/dashboard").into_response()
}

/// Login form
pub async fn login_form(State(state): State<AppState>, headers: HeaderMap) -> PageResult<Response> {
    if current_session(&state, &headers).await?.is_some() {
        return Ok(to_dashboard());
    }

    Ok(Html(login_page(None, "")).into_response())
}

/// Login submission
///
/// Succeeds only when exactly one active account matches the username or
/// email and the password verifies against it. On success a session row is
/// created, the token is set as cookie, and the browser goes to the dashboard.
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> PageResult<Response> {
    match sign_in(&state, &form).await {
        Ok((session, token)) => {
            tracing::info!(user_id = %session.user_id, "User logged in");
            let cookie = session_cookie(&state.config.session, &token)?;
            Ok(([(header::SET_COOKIE, cookie)], to_dashboard()).into_response())
        }
        Err(err) => {
            err.log("login");
            let notice = Notice::Error(err.notice_message(state.config.app.expose_error_details));
            Ok(Html(login_page(Some(&notice), &form.username)).into_response())
        }
    }
}

async fn sign_in(state: &AppState, form: &LoginForm) -> PageResult<(Session, String)> {
    form.validate()?;

    let mut matches = User::find_active_by_login(&state.db, &form.username).await?;
    if matches.len() != 1 {
        return Err(FormError::UserNotFound.into());
    }
    let user = matches.remove(0);

    if !verify_password(&form.password, &user.password_hash).await? {
        return Err(FormError::WrongPassword.into());
    }

    let purged = Session::purge_expired_for_user(&state.db, user.id).await?;
    if purged > 0 {
        tracing::debug!(user_id = %user.id, purged, "Removed expired sessions");
    }

    Ok(Session::start(&state.db, &user, state.config.session.ttl()).await?)
}

/// Registration form
pub async fn register_form(State(state): State<AppState>, headers: HeaderMap) -> PageResult<Response> {
    if current_session(&state, &headers).await?.is_some() {
        return Ok(to_dashboard());
    }

    Ok(Html(register_page(None, &RegisterValues::default())).into_response())
}

/// Registration submission
///
/// Text fields are trimmed before validation; passwords are used as typed.
/// On success the form is cleared, otherwise it keeps everything but the
/// passwords.
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<RegistrationForm>,
) -> PageResult<Response> {
    if current_session(&state, &headers).await?.is_some() {
        return Ok(to_dashboard());
    }

    let form = form.normalized();
    match create_account(&state, &form).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, username = %user.username, "User registered");
            let notice = Notice::Success(REGISTERED_MESSAGE.to_string());
            Ok(Html(register_page(Some(&notice), &RegisterValues::default())).into_response())
        }
        Err(err) => {
            err.log("register");
            let notice = Notice::Error(err.notice_message(state.config.app.expose_error_details));
            let values = RegisterValues {
                full_name: &form.full_name,
                username: &form.username,
                email: &form.email,
            };
            Ok(Html(register_page(Some(&notice), &values)).into_response())
        }
    }
}

async fn create_account(state: &AppState, form: &RegistrationForm) -> PageResult<User> {
    form.validate()?;

    if User::username_exists(&state.db, &form.username).await? {
        return Err(FormError::UsernameTaken.into());
    }
    if User::email_exists(&state.db, &form.email).await? {
        return Err(FormError::EmailTaken.into());
    }

    let password_hash = hash_password(&form.password).await?;

    let user = User::create(
        &state.db,
        CreateUser {
            username: form.username.clone(),
            email: form.email.clone(),
            password_hash,
            full_name: form.full_name.clone(),
        },
    )
    .await
    .map_err(registration_conflict)?;

    // The account is usable without categories, so a failure here only warns
    match Category::create_starter_set(&state.db, user.id).await {
        Ok(categories) => {
            tracing::debug!(user_id = %user.id, count = categories.len(), "Seeded starter categories")
        }
        Err(e) => tracing::warn!(user_id = %user.id, error = %e, "Could not seed starter categories"),
    }

    Ok(user)
}

/// Maps a lost uniqueness race to the same message as the pre-check
fn registration_conflict(err: sqlx::Error) -> PageError {
    let conflict = match unique_violation(&err) {
        Some(USERNAME_CONSTRAINT) => Some(FormError::UsernameTaken),
        Some(EMAIL_CONSTRAINT) => Some(FormError::EmailTaken),
        _ => None,
    };

    match conflict {
        Some(form_error) => form_error.into(),
        None => err.into(),
    }
}

/// Logout
///
/// Deletes the session row and expires the cookie. The browser always ends
/// up on the login page, even if the row could not be deleted.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> PageResult<Response> {
    if let Some(token) = session_token(&state, &headers) {
        match Session::end(&state.db, &token).await {
            Ok(true) => tracing::info!("User logged out"),
            Ok(false) => tracing::debug!("Logout for unknown or expired session"),
            Err(e) => tracing::error!(error = %e, "Could not delete session on logout"),
        }
    }

    let cookie = expired_session_cookie(&state.config.session)?;
    Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/auth/login")).into_response())
}
