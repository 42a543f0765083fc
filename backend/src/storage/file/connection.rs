use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Name of the file that moves the data directory somewhere else
pub const REDIRECT_FILE_NAME: &str = ".talking_animals_redirect";

/// FileConnection owns the data directory and maps keys to file paths
#[derive(Clone)]
pub struct FileConnection {
    base_directory: Arc<PathBuf>,
}

impl FileConnection {
    /// Create a new connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: Arc::new(base_path),
        })
    }

    /// The unredirected default location
    pub fn default_data_directory() -> Result<PathBuf> {
        let documents_dir = dirs::document_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;

        Ok(documents_dir.join("My Talking Animals"))
    }

    /// Follow a redirect file in `directory` if it points to an existing directory
    pub fn resolve_data_directory(directory: PathBuf) -> PathBuf {
        let redirect_file = directory.join(REDIRECT_FILE_NAME);

        if !redirect_file.exists() {
            return directory;
        }

        match fs::read_to_string(&redirect_file) {
            Ok(redirected_path) => {
                let redirected_path = redirected_path.trim();
                let path = PathBuf::from(redirected_path);

                if path.is_dir() {
                    info!("Found redirect file, using data directory: {}", path.display());
                    path
                } else {
                    warn!(
                        "Redirect file points to non-existent directory: {}. Using default.",
                        redirected_path
                    );
                    directory
                }
            }
            Err(e) => {
                error!("Failed to read redirect file: {}. Using default directory.", e);
                directory
            }
        }
    }

    /// Get the base directory path
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Get the file that holds the value for `key`
    pub fn path_for_key(&self, key: &str) -> PathBuf {
        self.base_directory.join(format!("{}.kv", encode_key(key)))
    }
}

/// Turn an arbitrary key into a portable file name.
///
/// ASCII letters, digits, `-` and `_` pass through; every other byte becomes
/// `%XX`, so "progression_level_profile::1" maps to
/// "progression_level_profile%3A%3A1". The mapping is injective.
pub fn encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_encode_key() {
        assert_eq!(encode_key("profiles"), "profiles");
        assert_eq!(encode_key("currentProfile"), "currentProfile");
        assert_eq!(
            encode_key("progression_level_profile::1702516122000"),
            "progression_level_profile%3A%3A1702516122000"
        );
        assert_eq!(encode_key("../etc"), "%2E%2E%2Fetc");
        assert_eq!(encode_key("a%b"), "a%25b");
    }

    #[test]
    fn test_new_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");

        let connection = FileConnection::new(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(connection.base_directory(), nested.as_path());
        assert_eq!(connection.path_for_key("profiles"), nested.join("profiles.kv"));
    }

    #[test]
    fn test_resolve_follows_redirect() {
        let temp_dir = TempDir::new().unwrap();
        let default_dir = temp_dir.path().join("default");
        let moved_dir = temp_dir.path().join("moved");
        fs::create_dir_all(&default_dir).unwrap();
        fs::create_dir_all(&moved_dir).unwrap();

        // No redirect yet
        assert_eq!(FileConnection::resolve_data_directory(default_dir.clone()), default_dir);

        fs::write(
            default_dir.join(REDIRECT_FILE_NAME),
            format!("{}\n", moved_dir.display()),
        )
        .unwrap();
        assert_eq!(FileConnection::resolve_data_directory(default_dir.clone()), moved_dir);
    }

    #[test]
    fn test_resolve_ignores_dangling_redirect() {
        let temp_dir = TempDir::new().unwrap();
        let default_dir = temp_dir.path().to_path_buf();
        fs::write(default_dir.join(REDIRECT_FILE_NAME), "/does/not/exist/anywhere").unwrap();

        assert_eq!(FileConnection::resolve_data_directory(default_dir.clone()), default_dir);
    }
}
