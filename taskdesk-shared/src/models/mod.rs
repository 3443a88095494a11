/// Database models for TaskDesk
///
/// - `user`: Accounts and credentials
/// - `category`: Per-user task labels
/// - `task`: To-do items, dashboard ordering and statistics
/// - `session`: Server-side login sessions

pub mod category;
pub mod session;
pub mod task;
pub mod user;

/// Name of the unique constraint a statement violated, if that is why it failed
///
/// Registration and profile updates check uniqueness before writing, but two
/// concurrent submissions can both pass the check; the constraint then decides.
pub fn unique_violation(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => db_err.constraint(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_ignores_other_errors() {
        assert_eq!(unique_violation(&sqlx::Error::RowNotFound), None);
        assert_eq!(unique_violation(&sqlx::Error::PoolTimedOut), None);
    }
}
