use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23503")
        )
    }

    /// Store failures and aborted transactions, as opposed to caller errors.
    pub fn is_internal(&self) -> bool {
        matches!(self, StorageError::Database(_) | StorageError::Migration(_))
    }

    /// Map a failed insert: a dangling reference means the referenced row
    /// is absent, a duplicate key means the row already exists.
    pub fn on_insert(self, what: &str) -> Self {
        if self.is_foreign_key_violation() {
            StorageError::NotFound
        } else if self.is_unique_violation() {
            StorageError::Conflict(format!("{what} already exists"))
        } else {
            self
        }
    }

    /// Map a failed delete: rows still referencing the target block it.
    pub fn on_delete(self, what: &str) -> Self {
        if self.is_foreign_key_violation() {
            StorageError::Conflict(format!("{what} is still referenced"))
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_are_not_internal() {
        assert!(!StorageError::NotFound.is_internal());
        assert!(!StorageError::Validation("x".into()).is_internal());
        assert!(!StorageError::InvalidTransition("x".into()).is_internal());
        assert!(!StorageError::Conflict("x".into()).is_internal());
        assert!(!StorageError::Forbidden("x".into()).is_internal());
    }

    #[test]
    fn test_store_errors_are_internal() {
        assert!(StorageError::Database(sqlx::Error::RowNotFound).is_internal());
        assert!(StorageError::Database(sqlx::Error::PoolTimedOut).is_internal());
    }

    #[test]
    fn test_insert_mapping_leaves_other_errors_untouched() {
        let err = StorageError::Database(sqlx::Error::PoolTimedOut).on_insert("athlete");
        assert!(matches!(err, StorageError::Database(sqlx::Error::PoolTimedOut)));

        let err = StorageError::NotFound.on_delete("athlete");
        assert!(matches!(err, StorageError::NotFound));
    }
}
