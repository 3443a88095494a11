//! Login and registration pages.

use super::{auth_page, html_escape, meta_refresh, notice_html, render, Notice};

pub const LOGIN_TEMPLATE: &str = include_str!("templates/login.html");
pub const REGISTER_TEMPLATE: &str = include_str!("templates/register.html");

/// Seconds before a successful registration moves on to the login page.
pub const REGISTER_REDIRECT_SECONDS: u32 = 5;

/// Login page; `username` is the value to keep in the field.
pub fn login_page(notice: Option<&Notice>, username: &str) -> String {
    let content = render(
        LOGIN_TEMPLATE,
        &[
            ("notice", &notice_html(notice)),
            ("username", &html_escape(username)),
        ],
    );
    auth_page("Login", "", &content)
}

/// Values redisplayed on the registration form. Passwords are never echoed.
#[derive(Debug, Clone, Default)]
pub struct RegisterValues<'a> {
    pub full_name: &'a str,
    pub username: &'a str,
    pub email: &'a str,
}

pub fn register_page(notice: Option<&Notice>, values: &RegisterValues<'_>) -> String {
    let content = render(
        REGISTER_TEMPLATE,
        &[
            ("notice", &notice_html(notice)),
            ("full_name", &html_escape(values.full_name)),
            ("username", &html_escape(values.username)),
            ("email", &html_escape(values.email)),
        ],
    );

    let head_extra = match notice {
        Some(Notice::Success(_)) => meta_refresh(REGISTER_REDIRECT_SECONDS, "/auth/login"),
        _ => String::new(),
    };
    auth_page("Daftar", &head_extra, &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_page_keeps_username_escaped() {
        let html = login_page(
            Some(&Notice::Error("Password yang Anda masukkan salah!".to_string())),
            "al\"ice",
        );
        assert!(html.contains(r#"value="al&quot;ice""#));
        assert!(html.contains("Password yang Anda masukkan salah!"));
        assert!(html.contains(r#"action="/auth/login""#));
    }

    #[test]
    fn test_register_page_success_redirects_to_login() {
        let html = register_page(
            Some(&Notice::Success("Pendaftaran berhasil! Silakan login.".to_string())),
            &RegisterValues::default(),
        );
        assert!(html.contains("Pendaftaran berhasil! Silakan login."));
        assert!(html.contains(r#"content="5;url=/auth/login""#));
    }

    #[test]
    fn test_register_page_error_keeps_values() {
        let html = register_page(
            Some(&Notice::Error("Username sudah digunakan!".to_string())),
            &RegisterValues {
                full_name: "Alice",
                username: "alice",
                email: "alice@example.com",
            },
        );
        assert!(html.contains(r#"value="alice@example.com""#));
        assert!(!html.contains("http-equiv"));
    }
}
