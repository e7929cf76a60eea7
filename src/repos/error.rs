/**
 * Responsibility
 * - repo が上位に伝える意味の定義
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(sqlx::Error),
    // unique_violation (duplicate review / endorsement / UTR)
    #[error("conflict")]
    Conflict,
    // foreign_key_violation (e.g. inserting against a user row that does not
    // exist yet; the profile row is only created by the first PUT /me)
    #[error("missing reference")]
    MissingReference,
}

impl RepoError {
    pub fn from_sqlx(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(dbe) = &e {
            match dbe.kind() {
                sqlx::error::ErrorKind::UniqueViolation => return RepoError::Conflict,
                sqlx::error::ErrorKind::ForeignKeyViolation => return RepoError::MissingReference,
                _ => {}
            }
        }
        RepoError::Db(e)
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(e: sqlx::Error) -> Self {
        RepoError::from_sqlx(e)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as StdError;
    use std::fmt;

    use sqlx::error::{DatabaseError, ErrorKind};

    use super::*;

    enum Violation {
        Unique,
        ForeignKey,
        None,
    }

    struct FakeDbError(Violation);

    impl fmt::Debug for FakeDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("FakeDbError")
        }
    }

    impl fmt::Display for FakeDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("fake database error")
        }
    }

    impl StdError for FakeDbError {}

    impl DatabaseError for FakeDbError {
        fn message(&self) -> &str {
            "fake database error"
        }

        fn kind(&self) -> ErrorKind {
            match self.0 {
                Violation::Unique => ErrorKind::UniqueViolation,
                Violation::ForeignKey => ErrorKind::ForeignKeyViolation,
                Violation::None => ErrorKind::Other,
            }
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }
    }

    fn db_error(violation: Violation) -> sqlx::Error {
        sqlx::Error::Database(Box::new(FakeDbError(violation)))
    }

    #[test]
    fn unique_violation_maps_to_conflict() {
        assert!(matches!(
            RepoError::from_sqlx(db_error(Violation::Unique)),
            RepoError::Conflict
        ));
    }

    #[test]
    fn foreign_key_violation_maps_to_missing_reference() {
        assert!(matches!(
            RepoError::from_sqlx(db_error(Violation::ForeignKey)),
            RepoError::MissingReference
        ));
    }

    #[test]
    fn other_database_errors_stay_opaque() {
        assert!(matches!(
            RepoError::from_sqlx(db_error(Violation::None)),
            RepoError::Db(_)
        ));
    }
}
