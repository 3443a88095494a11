//! Server-rendered HTML pages.
//!
//! Page templates are embedded at compile time with `include_str!` and
//! filled by [`render`]. Every value coming from users or the database goes
//! through [`html_escape`] before it is substituted.

pub mod auth;
pub mod dashboard;
pub mod profile;
pub mod tasks;

use axum::http::StatusCode;
use chrono::NaiveDate;

/// Shell for pages behind the login: header, navigation, footer.
pub const APP_LAYOUT: &str = include_str!("templates/app_layout.html");

/// Shell for the login and registration cards.
pub const AUTH_LAYOUT: &str = include_str!("templates/auth_layout.html");

/// Standalone error page.
pub const ERROR_TEMPLATE: &str = include_str!("templates/error.html");

/// Client script served at `/assets/app.js`.
pub const APP_JS: &str = include_str!("../../assets/app.js");

/// Stylesheet served at `/assets/app.css`.
pub const APP_CSS: &str = include_str!("../../assets/app.css");

/// Escapes text for use in HTML content and quoted attributes.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Fills `{{name}}` placeholders in one pass.
///
/// Values are inserted as given, so substituted text is never scanned for
/// further placeholders. Unknown placeholders are left untouched.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = &after[..end];
                match vars.iter().find(|(name, _)| *name == key) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push_str("{{");
                        out.push_str(key);
                        out.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

/// Inline message shown above a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn to_html(&self) -> String {
        let (class, icon, text) = match self {
            Notice::Success(text) => ("alert-success", "&#10004;", text),
            Notice::Error(text) => ("alert-error", "&#9888;", text),
        };
        format!(
            r#"<div class="alert {}" role="alert">{} {}</div>"#,
            class,
            icon,
            html_escape(text)
        )
    }
}

/// Renders an optional notice, empty when there is none.
pub fn notice_html(notice: Option<&Notice>) -> String {
    notice.map(Notice::to_html).unwrap_or_default()
}

/// Formats a date like `16 Oct 2026`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

/// Navigation entries of the logged-in layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Dashboard,
    AddTask,
    Profile,
}

fn nav_html(active: NavItem) -> String {
    let links = [
        (NavItem::Dashboard, "/dashboard", "Dashboard"),
        (NavItem::AddTask, "/add_task", "Tambah Tugas"),
        (NavItem::Profile, "/profile", "Profile"),
    ];

    let mut html: String = links
        .iter()
        .map(|(item, href, label)| {
            let class = if *item == active { r#" class="active""# } else { "" };
            format!(r#"<a href="{}"{}>{}</a>"#, href, class, label)
        })
        .collect();
    html.push_str(r#"<a href="/logout">Logout</a>"#);
    html
}

/// Wraps page content in the logged-in layout.
///
/// `head_extra` is trusted markup placed in `<head>` (used for the
/// redirect after adding a task).
pub fn app_page(title: &str, active: NavItem, head_extra: &str, content: &str) -> String {
    render(
        APP_LAYOUT,
        &[
            ("title", &html_escape(title)),
            ("head_extra", head_extra),
            ("nav", &nav_html(active)),
            ("content", content),
        ],
    )
}

/// Wraps a login or registration card.
pub fn auth_page(title: &str, head_extra: &str, content: &str) -> String {
    render(
        AUTH_LAYOUT,
        &[
            ("title", &html_escape(title)),
            ("head_extra", head_extra),
            ("content", content),
        ],
    )
}

/// Page shown for errors that escape a handler.
pub fn error_page(status: StatusCode, message: &str) -> String {
    render(
        ERROR_TEMPLATE,
        &[
            ("status", status.as_str()),
            ("message", &html_escape(message)),
        ],
    )
}

/// `<meta>` tag that navigates to `url` after `seconds`.
pub fn meta_refresh(seconds: u32, url: &str) -> String {
    format!(
        r#"<meta http-equiv="refresh" content="{};url={}">"#,
        seconds,
        html_escape(url)
    )
}

/// `checked` / `selected` attribute helper.
pub fn mark_if(condition: bool, attribute: &'static str) -> &'static str {
    if condition {
        attribute
    } else {
        ""
    }
}
