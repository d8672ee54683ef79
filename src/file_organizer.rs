/// Placement of directory entries into category subdirectories.
///
/// This module moves a single entry of a base directory into the category
/// subdirectory chosen for it, creating that subdirectory on demand. Name
/// collisions at the destination are reported as an outcome and leave the
/// entry untouched; everything else that goes wrong is an error.
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A completed move of one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// The entry's file name.
    pub name: String,
    /// The category the entry was moved to.
    pub category: String,
    /// The original path of the entry.
    pub original_path: PathBuf,
    /// The path of the entry after the move.
    pub new_path: PathBuf,
}

/// Result of placing one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The entry was renamed into its category folder.
    Moved(Placement),
    /// Something already occupies the destination; the entry was left in place.
    Collision {
        /// The occupied destination path.
        destination: PathBuf,
    },
}

/// Errors that stop a run while placing an entry.
#[derive(Debug, thiserror::Error)]
pub enum PlaceError {
    /// Creating the category folder or moving the entry was not permitted.
    #[error("Permission denied for {}: {source}", path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Failed to create a category directory.
    #[error("Failed to create directory {}: {source}", path.display())]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Failed to move an entry to its category directory.
    #[error("Failed to move {} to {}: {source}", from.display(), to.display())]
    MoveFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PlaceError {
    /// Returns true if the failure was caused by missing permissions.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, PlaceError::PermissionDenied { .. })
    }

    fn directory_creation(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::PermissionDenied {
            PlaceError::PermissionDenied { path, source }
        } else {
            PlaceError::DirectoryCreationFailed { path, source }
        }
    }

    fn rename(from: PathBuf, to: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::PermissionDenied {
            PlaceError::PermissionDenied { path: from, source }
        } else {
            PlaceError::MoveFailed { from, to, source }
        }
    }
}

/// Result type for placement operations.
pub type PlaceResult<T> = Result<T, PlaceError>;

/// Moves entries of a base directory into category subdirectories.
pub struct FileOrganizer;

impl FileOrganizer {
    /// Moves `entry_name` from `base_path` into `base_path/category`.
    ///
    /// The category directory is created if it does not exist yet, so this
    /// can be called for many entries sharing a category. If the destination
    /// path is already taken the move is not attempted and
    /// `Outcome::Collision` is returned.
    ///
    /// # Errors
    ///
    /// Returns `PlaceError::PermissionDenied` when the filesystem refuses the
    /// directory creation or the rename, and `DirectoryCreationFailed` or
    /// `MoveFailed` for any other failure.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dirsort::file_organizer::{FileOrganizer, Outcome};
    /// use std::path::Path;
    ///
    /// match FileOrganizer::place(Path::new("/path/to/base"), "image.png", "Images") {
    ///     Ok(Outcome::Moved(p)) => println!("Moved to {}", p.new_path.display()),
    ///     Ok(Outcome::Collision { destination }) => {
    ///         println!("{} already exists", destination.display())
    ///     }
    ///     Err(e) => eprintln!("Organization failed: {}", e),
    /// }
    /// ```
    pub fn place(base_path: &Path, entry_name: &str, category: &str) -> PlaceResult<Outcome> {
        let source_path = base_path.join(entry_name);
        let category_path = base_path.join(category);

        // The entry itself occupies the category path
        if entry_name == category {
            return Ok(Outcome::Collision {
                destination: category_path,
            });
        }

        fs::create_dir_all(&category_path)
            .map_err(|e| PlaceError::directory_creation(category_path.clone(), e))?;

        let destination_path = category_path.join(entry_name);

        // symlink_metadata so a dangling link still counts as occupied
        if fs::symlink_metadata(&destination_path).is_ok() {
            tracing::debug!(destination = %destination_path.display(), "destination taken");
            return Ok(Outcome::Collision {
                destination: destination_path,
            });
        }

        fs::rename(&source_path, &destination_path)
            .map_err(|e| PlaceError::rename(source_path.clone(), destination_path.clone(), e))?;

        tracing::debug!(
            from = %source_path.display(),
            to = %destination_path.display(),
            "moved entry"
        );

        Ok(Outcome::Moved(Placement {
            name: entry_name.to_string(),
            category: category.to_string(),
            original_path: source_path,
            new_path: destination_path,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_place_creates_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        let file_path = base_path.join("test.txt");
        fs::write(&file_path, "test content").expect("Failed to write test file");

        let outcome =
            FileOrganizer::place(base_path, "test.txt", "Documents").expect("Failed to move file");

        let category_dir = base_path.join("Documents");
        assert!(category_dir.is_dir());
        assert!(!file_path.exists());
        assert!(category_dir.join("test.txt").exists());

        match outcome {
            Outcome::Moved(placement) => {
                assert_eq!(placement.name, "test.txt");
                assert_eq!(placement.category, "Documents");
                assert_eq!(placement.original_path, file_path);
                assert_eq!(placement.new_path, category_dir.join("test.txt"));
            }
            other => panic!("expected a move, got {:?}", other),
        }
    }

    #[test]
    fn test_place_uses_existing_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        let category_dir = base_path.join("Images");
        fs::create_dir(&category_dir).expect("Failed to create category directory");
        fs::write(category_dir.join("old.png"), "old").expect("Failed to write file");
        fs::write(base_path.join("test.png"), "test content").expect("Failed to write test file");

        FileOrganizer::place(base_path, "test.png", "Images").expect("Failed to move file");

        assert!(!base_path.join("test.png").exists());
        assert!(category_dir.join("test.png").exists());
        assert!(category_dir.join("old.png").exists());
    }

    #[test]
    fn test_place_moves_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        fs::create_dir(base_path.join("project")).expect("Failed to create directory");
        fs::write(base_path.join("project").join("main.rs"), "fn main() {}")
            .expect("Failed to write file");

        FileOrganizer::place(base_path, "project", "Folders").expect("Failed to move directory");

        assert!(!base_path.join("project").exists());
        assert!(base_path.join("Folders/project/main.rs").is_file());
    }

    #[test]
    fn test_place_collision_leaves_source() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        fs::create_dir(base_path.join("Other")).expect("Failed to create directory");
        fs::write(base_path.join("Other").join("notes"), "existing").expect("Failed to write");
        fs::write(base_path.join("notes"), "new").expect("Failed to write");

        let outcome = FileOrganizer::place(base_path, "notes", "Other").expect("Collision is not an error");

        assert_eq!(
            outcome,
            Outcome::Collision {
                destination: base_path.join("Other").join("notes"),
            }
        );
        assert_eq!(fs::read_to_string(base_path.join("notes")).unwrap(), "new");
        assert_eq!(
            fs::read_to_string(base_path.join("Other").join("notes")).unwrap(),
            "existing"
        );
    }

    #[test]
    fn test_place_directory_into_itself_is_collision() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        fs::create_dir(base_path.join("Folders")).expect("Failed to create directory");

        let outcome = FileOrganizer::place(base_path, "Folders", "Folders").unwrap();
        assert!(matches!(outcome, Outcome::Collision { .. }));
        assert!(base_path.join("Folders").is_dir());
        assert!(!base_path.join("Folders").join("Folders").exists());
    }

    #[test]
    fn test_place_file_named_like_its_category_is_collision() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        fs::write(base_path.join("Other"), "plain file").expect("Failed to write");

        let outcome = FileOrganizer::place(base_path, "Other", "Other").unwrap();
        assert!(matches!(outcome, Outcome::Collision { .. }));
        assert!(base_path.join("Other").is_file());
    }

    #[test]
    fn test_place_category_path_is_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        fs::write(base_path.join("Images"), "not a directory").expect("Failed to write");
        fs::write(base_path.join("a.png"), "png").expect("Failed to write");

        let result = FileOrganizer::place(base_path, "a.png", "Images");
        assert!(matches!(result, Err(PlaceError::DirectoryCreationFailed { .. })));
        assert!(base_path.join("a.png").exists());
    }

    #[test]
    fn test_place_missing_source_is_move_failure() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        let result = FileOrganizer::place(temp_dir.path(), "ghost.txt", "Other");
        match result {
            Err(err @ PlaceError::MoveFailed { .. }) => assert!(!err.is_permission_denied()),
            other => panic!("expected a move failure, got {:?}", other),
        }
    }

    #[test]
    fn test_permission_errors_are_classified() {
        let err = PlaceError::rename(
            PathBuf::from("a"),
            PathBuf::from("b/a"),
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(err.is_permission_denied());

        let err = PlaceError::directory_creation(
            PathBuf::from("b"),
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(err.is_permission_denied());

        let err = PlaceError::rename(
            PathBuf::from("a"),
            PathBuf::from("b/a"),
            io::Error::from(io::ErrorKind::NotFound),
        );
        assert!(!err.is_permission_denied());
    }
}
