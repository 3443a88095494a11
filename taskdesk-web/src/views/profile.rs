//! Profile page: account details, profile form and password form.

use taskdesk_shared::models::user::User;

use super::{app_page, format_date, html_escape, notice_html, render, NavItem, Notice};

pub const PROFILE_TEMPLATE: &str = include_str!("templates/profile.html");

/// Renders the profile page.
///
/// The info grid always shows the stored account. The profile form shows
/// `form_values` (name, email) so a rejected edit is not lost.
pub fn profile_page(notice: Option<&Notice>, user: &User, form_values: Option<(&str, &str)>) -> String {
    let (form_full_name, form_email) =
        form_values.unwrap_or((user.full_name.as_str(), user.email.as_str()));

    let content = render(
        PROFILE_TEMPLATE,
        &[
            ("notice", &notice_html(notice)),
            ("username", &html_escape(&user.username)),
            ("email", &html_escape(&user.email)),
            ("full_name", &html_escape(&user.full_name)),
            ("joined", &format_date(user.created_at.date_naive())),
            ("form_full_name", &html_escape(form_full_name)),
            ("form_email", &html_escape(form_email)),
        ],
    );

    app_page("Profile", NavItem::Profile, "", &content)
}
