/// Form validation rules
///
/// Each form is checked in a fixed order and the first failing rule wins;
/// the page shows exactly one message. Messages are the Indonesian strings
/// the UI displays.
///
/// Uniqueness and credential checks need the database, so they are listed
/// here as [`FormError`] variants but performed by the page handlers.
///
/// # Example
///
/// ```
/// use taskdesk_shared::validation::{FormError, RegistrationForm};
///
/// let form = RegistrationForm {
///     full_name: "Alice".into(),
///     username: "al".into(),
///     email: "alice@example.com".into(),
///     password: "secret1".into(),
///     confirm_password: "secret1".into(),
/// };
///
/// assert_eq!(form.validate(), Err(FormError::UsernameTooShort));
/// ```

use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;
use validator::{ValidateEmail, ValidateLength};

use crate::models::task::{TaskPriority, TaskStatus};

/// Minimum password length for registration and password change
pub const MIN_PASSWORD_LENGTH: u64 = 6;

/// Minimum username length
pub const MIN_USERNAME_LENGTH: u64 = 3;

/// Maximum task title length
pub const MAX_TITLE_LENGTH: u64 = 255;

/// Maximum task description length
pub const MAX_DESCRIPTION_LENGTH: u64 = 1000;

/// Date format submitted by `<input type="date">`
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// A user-correctable form problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    // Registration
    #[error("Semua field harus diisi!")]
    MissingRegistrationFields,
    #[error("Format email tidak valid!")]
    InvalidEmail,
    #[error("Password harus minimal 6 karakter!")]
    PasswordTooShort,
    #[error("Password dan konfirmasi password tidak cocok!")]
    PasswordMismatch,
    #[error("Username harus minimal 3 karakter!")]
    UsernameTooShort,
    #[error("Username sudah digunakan!")]
    UsernameTaken,
    #[error("Email sudah terdaftar!")]
    EmailTaken,

    // Login
    #[error("Username/email dan password harus diisi!")]
    MissingCredentials,
    #[error("Username/email tidak ditemukan!")]
    UserNotFound,
    #[error("Password yang Anda masukkan salah!")]
    WrongPassword,

    // Add task
    #[error("Judul tugas harus diisi!")]
    MissingTitle,
    #[error("Judul tugas maksimal 255 karakter!")]
    TitleTooLong,
    #[error("Deskripsi maksimal 1000 karakter!")]
    DescriptionTooLong,
    #[error("Tanggal jatuh tempo harus diisi!")]
    MissingDueDate,
    #[error("Format tanggal tidak valid!")]
    InvalidDueDate,
    #[error("Tanggal jatuh tempo tidak boleh di masa lalu!")]
    DueDateInPast,
    #[error("Kategori tidak valid!")]
    InvalidCategory,
    #[error("Prioritas tidak valid!")]
    InvalidPriority,
    #[error("Status tidak valid!")]
    InvalidStatus,

    // Profile
    #[error("Nama lengkap dan email harus diisi!")]
    MissingProfileFields,
    #[error("Email sudah digunakan oleh user lain!")]
    EmailUsedByOther,
    #[error("Semua field password harus diisi!")]
    MissingPasswordFields,
    #[error("Password baru dan konfirmasi password tidak cocok!")]
    NewPasswordMismatch,
    #[error("Password baru harus minimal 6 karakter!")]
    NewPasswordTooShort,
    #[error("Password saat ini salah!")]
    WrongCurrentPassword,
}

/// Result of a validation pass
pub type FormResult<T> = Result<T, FormError>;

fn is_valid_email(email: &str) -> bool {
    email.validate_email()
}

fn at_least(value: &str, min: u64) -> bool {
    value.validate_length(Some(min), None, None)
}

fn at_most(value: &str, max: u64) -> bool {
    value.validate_length(None, Some(max), None)
}

/// Registration form as submitted
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

impl RegistrationForm {
    /// Trims the text fields; passwords are taken verbatim
    pub fn normalized(self) -> Self {
        Self {
            full_name: self.full_name.trim().to_string(),
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            ..self
        }
    }

    /// Field checks that need no database, in display order
    pub fn validate(&self) -> FormResult<()> {
        let fields = [
            &self.full_name,
            &self.username,
            &self.email,
            &self.password,
            &self.confirm_password,
        ];
        if fields.iter().any(|f| f.is_empty()) {
            return Err(FormError::MissingRegistrationFields);
        }
        if !is_valid_email(&self.email) {
            return Err(FormError::InvalidEmail);
        }
        if !at_least(&self.password, MIN_PASSWORD_LENGTH) {
            return Err(FormError::PasswordTooShort);
        }
        if self.password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }
        if !at_least(&self.username, MIN_USERNAME_LENGTH) {
            return Err(FormError::UsernameTooShort);
        }
        Ok(())
    }
}

/// Login form as submitted
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    /// Username or email
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> FormResult<()> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(FormError::MissingCredentials);
        }
        Ok(())
    }
}

/// Add-task form as submitted
///
/// Every field is kept as text so the page can redisplay exactly what the
/// user typed when validation fails.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub status: String,
}

/// A task form that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidTask {
    pub title: String,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub due_date: NaiveDate,
}

impl TaskForm {
    /// Checks the form against `today` and converts it
    ///
    /// Empty priority/status fall back to medium/pending. A task may be due
    /// today but not earlier. Category ownership is checked separately.
    pub fn validate(&self, today: NaiveDate) -> FormResult<ValidTask> {
        let title = self.title.trim();
        let description = self.description.trim();

        if title.is_empty() {
            return Err(FormError::MissingTitle);
        }
        if !at_most(title, MAX_TITLE_LENGTH) {
            return Err(FormError::TitleTooLong);
        }
        if !at_most(description, MAX_DESCRIPTION_LENGTH) {
            return Err(FormError::DescriptionTooLong);
        }

        let due_raw = self.due_date.trim();
        if due_raw.is_empty() {
            return Err(FormError::MissingDueDate);
        }
        let due_date = NaiveDate::parse_from_str(due_raw, DATE_INPUT_FORMAT)
            .map_err(|_| FormError::InvalidDueDate)?;
        if due_date < today {
            return Err(FormError::DueDateInPast);
        }

        let priority = match self.priority.trim() {
            "" => TaskPriority::default(),
            raw => raw.parse().map_err(|_| FormError::InvalidPriority)?,
        };

        let status = match self.status.trim() {
            "" => TaskStatus::default(),
            raw => raw
                .parse::<TaskStatus>()
                .ok()
                .filter(TaskStatus::is_initial)
                .ok_or(FormError::InvalidStatus)?,
        };

        let category_id = match self.category_id.trim() {
            "" => None,
            raw => Some(Uuid::parse_str(raw).map_err(|_| FormError::InvalidCategory)?),
        };

        Ok(ValidTask {
            title: title.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            category_id,
            priority,
            status,
            due_date,
        })
    }
}

/// Profile form (name and email)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
}

impl ProfileForm {
    pub fn normalized(self) -> Self {
        Self {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
        }
    }

    pub fn validate(&self) -> FormResult<()> {
        if self.full_name.is_empty() || self.email.is_empty() {
            return Err(FormError::MissingProfileFields);
        }
        if !is_valid_email(&self.email) {
            return Err(FormError::InvalidEmail);
        }
        Ok(())
    }
}

/// Password change form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PasswordChangeForm {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_password: String,
}

impl PasswordChangeForm {
    /// Checks everything except the current password, which needs the stored hash
    pub fn validate(&self) -> FormResult<()> {
        if self.current_password.is_empty()
            || self.new_password.is_empty()
            || self.confirm_password.is_empty()
        {
            return Err(FormError::MissingPasswordFields);
        }
        if self.new_password != self.confirm_password {
            return Err(FormError::NewPasswordMismatch);
        }
        if !at_least(&self.new_password, MIN_PASSWORD_LENGTH) {
            return Err(FormError::NewPasswordTooShort);
        }
        Ok(())
    }
}
