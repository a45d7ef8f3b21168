//! Repository implementations for all SnipVault entities.

use snipvault_core::error::{AppError, ErrorKind};

pub mod category;
pub mod folder;
pub mod media_file;
pub mod media_folder;
pub mod security;
pub mod session;
pub mod snippet;
pub mod user;

pub use category::CategoryRepository;
pub use folder::FolderRepository;
pub use media_file::MediaFileRepository;
pub use media_folder::MediaFolderRepository;
pub use security::SecurityRepository;
pub use session::SessionRepository;
pub use snippet::SnippetRepository;
pub use user::UserRepository;

/// Maps a unique violation on the given per-owner live-name index to a
/// Conflict, leaving every other failure as a Database error. Used by the
/// folder and category create, update, and restore paths so a name reused
/// while the row sat in the recycle bin surfaces as 409, not 500.
pub(crate) fn map_name_conflict(
    e: sqlx::Error,
    index: &str,
    conflict_message: impl Into<String>,
    context: &'static str,
) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(index) => {
            AppError::conflict(conflict_message)
        }
        _ => AppError::with_source(ErrorKind::Database, context, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct UniqueViolation(&'static str);

    impl std::fmt::Display for UniqueViolation {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "duplicate key value violates unique constraint \"{}\"", self.0)
        }
    }

    impl std::error::Error for UniqueViolation {}

    impl sqlx::error::DatabaseError for UniqueViolation {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            sqlx::error::ErrorKind::UniqueViolation
        }

        fn constraint(&self) -> Option<&str> {
            Some(self.0)
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }
    }

    #[test]
    fn test_live_name_violation_maps_to_conflict() {
        let e = sqlx::Error::Database(Box::new(UniqueViolation("folders_owner_name_live_idx")));
        let err = map_name_conflict(e, "folders_owner_name_live_idx", "taken", "restore");
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[test]
    fn test_other_constraints_stay_database_errors() {
        let e = sqlx::Error::Database(Box::new(UniqueViolation("snippets_pkey")));
        let err = map_name_conflict(e, "folders_owner_name_live_idx", "taken", "restore");
        assert_eq!(err.kind, ErrorKind::Database);

        let err = map_name_conflict(sqlx::Error::RowNotFound, "folders_owner_name_live_idx", "taken", "restore");
        assert_eq!(err.kind, ErrorKind::Database);
    }
}
