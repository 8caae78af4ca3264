//! Shared error mapping for sqlx persistence layer

use application::error::ApplicationError;

/// Map a sqlx error to an application-layer error
pub fn map_sqlx_error(e: sqlx::Error) -> ApplicationError {
    match e {
        sqlx::Error::RowNotFound => {
            ApplicationError::NotFound("Database record not found".to_string())
        },
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            ApplicationError::InvalidOperation(format!("Duplicate record: {db_err}"))
        },
        sqlx::Error::Database(db_err) => {
            ApplicationError::Internal(format!("Database error: {db_err}"))
        },
        other => ApplicationError::Internal(format!("Database error: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err = map_sqlx_error(sqlx::Error::RowNotFound);
        assert!(matches!(err, ApplicationError::NotFound(_)));
    }

    #[test]
    fn pool_timeout_maps_to_internal() {
        let err = map_sqlx_error(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, ApplicationError::Internal(_)));
    }
}
