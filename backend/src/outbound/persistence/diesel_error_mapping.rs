//! Shared classification of pool and Diesel failures.
//!
//! Repositories turn a [`StoreFailure`] into their own port error so the
//! unique-violation, connection, and query cases are decided in one place.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Storage failure reduced to what the domain distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreFailure {
    /// A unique constraint rejected the write; carries the constraint name.
    UniqueViolation { constraint: Option<String> },
    /// The connection was lost or never established.
    Connection(String),
    /// Any other database or query-builder failure.
    Query(String),
}

/// Classify a pool error. Every pool failure is a connection failure.
pub(crate) fn classify_pool_error(error: PoolError) -> StoreFailure {
    StoreFailure::Connection(error.into_message())
}

/// Classify a Diesel error, logging the driver detail at debug level.
///
/// Messages handed back are generic so driver text never reaches callers.
pub(crate) fn classify_diesel_error(error: DieselError) -> StoreFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            StoreFailure::UniqueViolation {
                constraint: info.constraint_name().map(str::to_owned),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StoreFailure::Connection("database connection error".to_owned())
        }
        DieselError::BrokenTransactionManager => {
            StoreFailure::Connection("transaction manager broken".to_owned())
        }
        DieselError::NotFound => StoreFailure::Query("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => StoreFailure::Query("database query error".to_owned()),
        DieselError::DeserializationError(_) => {
            StoreFailure::Query("failed to decode database row".to_owned())
        }
        _ => StoreFailure::Query("database error".to_owned()),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for failure classification.
    use super::*;
    use rstest::rstest;

    #[derive(Debug)]
    struct Info {
        constraint: Option<&'static str>,
    }

    impl diesel::result::DatabaseErrorInformation for Info {
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
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.constraint
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind, constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(Info { constraint }))
    }

    #[rstest]
    fn unique_violation_keeps_constraint_name() {
        let failure = classify_diesel_error(database_error(
            DatabaseErrorKind::UniqueViolation,
            Some("items_code_key"),
        ));

        assert_eq!(
            failure,
            StoreFailure::UniqueViolation {
                constraint: Some("items_code_key".to_owned())
            }
        );
    }

    #[rstest]
    #[case(database_error(DatabaseErrorKind::ClosedConnection, None), true)]
    #[case(DieselError::BrokenTransactionManager, true)]
    #[case(database_error(DatabaseErrorKind::ForeignKeyViolation, None), false)]
    #[case(DieselError::NotFound, false)]
    fn connection_and_query_failures_are_split(
        #[case] error: DieselError,
        #[case] is_connection: bool,
    ) {
        let failure = classify_diesel_error(error);

        assert_eq!(matches!(failure, StoreFailure::Connection(_)), is_connection);
        assert_eq!(matches!(failure, StoreFailure::Query(_)), !is_connection);
    }

    #[rstest]
    fn pool_failures_are_connection_failures() {
        let failure = classify_pool_error(PoolError::checkout("timed out"));

        assert_eq!(failure, StoreFailure::Connection("timed out".to_owned()));
    }
}
