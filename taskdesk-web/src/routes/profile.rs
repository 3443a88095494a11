/// Profile page
///
/// # Endpoints
///
/// - `GET /profile` - Account details (login required)
/// - `POST /profile` - Either form, told apart by a hidden marker field:
///   `update_profile` (name and email) or `change_password`

use crate::{
    app::AppState,
    error::{PageError, PageResult},
    views::{profile::profile_page, Notice},
};
use axum::{extract::State, response::Html, Extension, Form};
use serde::Deserialize;
use taskdesk_shared::{
    models::{session::Session, unique_violation, user::User},
    validation::{FormError, PasswordChangeForm, ProfileForm},
};

use super::{hash_password, verify_password};

pub const PROFILE_UPDATED_MESSAGE: &str = "Profile berhasil diperbarui!";
pub const PASSWORD_CHANGED_MESSAGE: &str = "Password berhasil diubah!";

/// Either profile form as posted
#[derive(Debug, Default, Deserialize)]
pub struct ProfileSubmission {
    pub update_profile: Option<String>,
    pub change_password: Option<String>,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// Which form was submitted
#[derive(Debug)]
pub enum ProfileAction {
    UpdateProfile(ProfileForm),
    ChangePassword(PasswordChangeForm),
}

impl ProfileSubmission {
    /// The profile marker wins if a client sends both
    pub fn action(self) -> Option<ProfileAction> {
        if self.update_profile.is_some() {
            Some(ProfileAction::UpdateProfile(
                ProfileForm {
                    full_name: self.full_name,
                    email: self.email,
                }
                .normalized(),
            ))
        } else if self.change_password.is_some() {
            Some(ProfileAction::ChangePassword(PasswordChangeForm {
                current_password: self.current_password,
                new_password: self.new_password,
                confirm_password: self.confirm_password,
            }))
        } else {
            None
        }
    }
}

async fn load_user(state: &AppState, session: &Session) -> PageResult<User> {
    User::find_by_id(&state.db, session.user_id)
        .await?
        .ok_or(PageError::NotFound)
}

/// Profile page
pub async fn profile(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> PageResult<Html<String>> {
    let user = load_user(&state, &session).await?;
    Ok(Html(profile_page(None, &user, None)))
}

/// Profile or password form submission
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Form(submission): Form<ProfileSubmission>,
) -> PageResult<Html<String>> {
    let expose = state.config.app.expose_error_details;

    match submission.action() {
        Some(ProfileAction::UpdateProfile(form)) => {
            match change_profile(&state, &session, &form).await {
                Ok(user) => {
                    tracing::info!(user_id = %user.id, "Profile updated");
                    let notice = Notice::Success(PROFILE_UPDATED_MESSAGE.to_string());
                    Ok(Html(profile_page(Some(&notice), &user, None)))
                }
                Err(err) => {
                    err.log("profile");
                    let notice = Notice::Error(err.notice_message(expose));
                    let user = load_user(&state, &session).await?;
                    let values = Some((form.full_name.as_str(), form.email.as_str()));
                    Ok(Html(profile_page(Some(&notice), &user, values)))
                }
            }
        }
        Some(ProfileAction::ChangePassword(form)) => {
            let notice = match change_password(&state, &session, &form).await {
                Ok(()) => {
                    tracing::info!(user_id = %session.user_id, "Password changed");
                    Notice::Success(PASSWORD_CHANGED_MESSAGE.to_string())
                }
                Err(err) => {
                    err.log("profile");
                    Notice::Error(err.notice_message(expose))
                }
            };
            let user = load_user(&state, &session).await?;
            Ok(Html(profile_page(Some(&notice), &user, None)))
        }
        None => {
            tracing::debug!(user_id = %session.user_id, "Profile post without a form marker");
            let user = load_user(&state, &session).await?;
            Ok(Html(profile_page(None, &user, None)))
        }
    }
}

async fn change_profile(state: &AppState, session: &Session, form: &ProfileForm) -> PageResult<User> {
    form.validate()?;

    if User::email_taken_by_other(&state.db, &form.email, session.user_id).await? {
        return Err(FormError::EmailUsedByOther.into());
    }

    let user = User::update_profile(&state.db, session.user_id, &form.full_name, &form.email)
        .await
        .map_err(|e| {
            if unique_violation(&e).is_some() {
                PageError::from(FormError::EmailUsedByOther)
            } else {
                PageError::from(e)
            }
        })?
        .ok_or(PageError::NotFound)?;

    Session::refresh_identity(&state.db, user.id, &user.full_name, &user.email).await?;

    Ok(user)
}

async fn change_password(
    state: &AppState,
    session: &Session,
    form: &PasswordChangeForm,
) -> PageResult<()> {
    form.validate()?;

    let user = load_user(state, session).await?;
    if !verify_password(&form.current_password, &user.password_hash).await? {
        return Err(FormError::WrongCurrentPassword.into());
    }

    let password_hash = hash_password(&form.new_password).await?;
    if !User::update_password(&state.db, user.id, &password_hash).await? {
        return Err(PageError::NotFound);
    }

    Ok(())
}
