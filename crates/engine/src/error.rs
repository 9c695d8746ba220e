//! The module contains the errors the engine can return.
//!
//! The errors are:
//!
//! - [`Validation`] thrown when input is malformed or breaks a business rule.
//! - [`KeyNotFound`] thrown when no row has the requested id.
//! - [`Conflict`] thrown on uniqueness violations, blocked deletes, or when a
//!   bulk replace is not supported by the configured store.
//! - [`Database`] for everything else coming from the store.
//!
//!  [`Validation`]: EngineError::Validation
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`Conflict`]: EngineError::Conflict
//!  [`Database`]: EngineError::Database
use sea_orm::{DbErr, RuntimeErr, SqlErr, sqlx};
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    /// Translate a failed insert/update.
    ///
    /// A foreign-key violation means the caller pointed at a category that
    /// does not exist, so it is reported as a validation failure.
    pub(crate) fn on_write(err: DbErr, entity: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                Self::Conflict(format!("{entity} already exists"))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                Self::Validation(format!("{entity} references an unknown category"))
            }
            _ => match err {
                DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => {
                    Self::KeyNotFound(entity.to_string())
                }
                other => Self::Database(other),
            },
        }
    }

    /// Translate a failed delete. A foreign-key violation means the row is
    /// still referenced.
    ///
    /// SQLite reports a blocked `ON DELETE RESTRICT` as extended code 1811,
    /// which `sql_err` does not classify, so the raw code is checked too.
    pub(crate) fn on_delete(err: DbErr, entity: &str) -> Self {
        let referenced = matches!(
            err.sql_err(),
            Some(SqlErr::ForeignKeyConstraintViolation(_))
        ) || matches!(
            sqlite_code(&err).as_deref(),
            Some(SQLITE_CONSTRAINT_FOREIGNKEY | SQLITE_CONSTRAINT_TRIGGER)
        );
        if referenced {
            return Self::Conflict(format!("{entity} is still referenced"));
        }
        match err {
            DbErr::RecordNotFound(_) => Self::KeyNotFound(entity.to_string()),
            other => Self::Database(other),
        }
    }
}

const SQLITE_CONSTRAINT_FOREIGNKEY: &str = "787";
const SQLITE_CONSTRAINT_TRIGGER: &str = "1811";

/// Extended result code of a database error raised by the driver, if any.
fn sqlite_code(err: &DbErr) -> Option<String> {
    match err {
        DbErr::Exec(RuntimeErr::SqlxError(sqlx::Error::Database(e)))
        | DbErr::Query(RuntimeErr::SqlxError(sqlx::Error::Database(e))) => {
            e.code().map(|code| code.into_owned())
        }
        _ => None,
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::Conflict(a), Self::Conflict(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrelated_db_errors_stay_internal() {
        let err = EngineError::on_write(DbErr::Custom("boom".to_string()), "budget");
        assert!(matches!(err, EngineError::Database(_)));
    }

    #[test]
    fn unrelated_db_errors_on_delete_stay_internal() {
        let err = EngineError::on_delete(DbErr::Custom("boom".to_string()), "category");
        assert!(matches!(err, EngineError::Database(_)));
    }

    #[test]
    fn missing_record_on_delete_is_not_found() {
        let err = EngineError::on_delete(DbErr::RecordNotFound("x".to_string()), "budget");
        assert_eq!(err, EngineError::KeyNotFound("budget".to_string()));
    }
}
