//! Shared helpers for Diesel repository implementations.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Extract a readable message from a pool error.
pub fn map_pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Extract a readable message from a Diesel error and emit debug context.
pub fn map_diesel_error_message(error: &DieselError, operation: &str) -> String {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), %operation, "diesel operation failed");
        }
        _ => debug!(%error, %operation, "diesel operation failed"),
    }
    error.to_string()
}

/// Whether the connection dropped underneath the query.
pub fn is_closed_connection(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
    )
}

/// Whether `error` is a unique violation on `constraint`.
pub fn is_unique_violation_on(error: &DieselError, constraint: &str) -> bool {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            info.constraint_name() == Some(constraint)
        }
        _ => false,
    }
}

/// Collect row conversion results, mapping the first error through `map_err`.
pub fn collect_rows<T, E>(
    results: impl Iterator<Item = Result<T, String>>,
    map_err: impl FnOnce(String) -> E,
) -> Result<Vec<T>, E> {
    results.collect::<Result<Vec<_>, _>>().map_err(map_err)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use diesel::result::DatabaseErrorInformation;
    use rstest::rstest;

    use super::*;

    struct ConstraintInfo(Option<&'static str>);

    impl DatabaseErrorInformation for ConstraintInfo {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            Some("products")
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.0
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind, constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(ConstraintInfo(constraint)))
    }

    #[rstest]
    #[case(
        database_error(DatabaseErrorKind::UniqueViolation, Some("products_slug_key")),
        true
    )]
    #[case(
        database_error(DatabaseErrorKind::UniqueViolation, Some("products_pkey")),
        false
    )]
    #[case(database_error(DatabaseErrorKind::UniqueViolation, None), false)]
    #[case(
        database_error(DatabaseErrorKind::CheckViolation, Some("products_slug_key")),
        false
    )]
    #[case(DieselError::NotFound, false)]
    fn unique_violations_match_by_constraint(#[case] error: DieselError, #[case] expected: bool) {
        assert_eq!(is_unique_violation_on(&error, "products_slug_key"), expected);
    }

    #[rstest]
    fn closed_connections_are_detected() {
        assert!(is_closed_connection(&database_error(
            DatabaseErrorKind::ClosedConnection,
            None
        )));
        assert!(!is_closed_connection(&DieselError::NotFound));
    }

    #[rstest]
    fn collect_rows_stops_at_first_error() {
        let rows = vec![Ok(1), Err("bad row".to_owned()), Err("worse".to_owned())];
        let result: Result<Vec<i32>, String> =
            collect_rows(rows.into_iter(), |message| format!("converted: {message}"));
        assert_eq!(result, Err("converted: bad row".to_owned()));
    }

    #[rstest]
    fn pool_messages_are_unwrapped() {
        assert_eq!(map_pool_error_message(PoolError::build("bad url")), "bad url");
    }
}
