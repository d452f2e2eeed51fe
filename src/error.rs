use std::path::PathBuf;
use thiserror::Error;

/// Failures talking to the key-value store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize value for key '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("stored value for key '{key}' is not valid: {source}")]
    Deserialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    /// Whether this error came from the write path
    pub fn is_write_failure(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Serialize { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_the_path() {
        let err = StorageError::Io {
            path: PathBuf::from("/data/shopping-list.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            err.to_string(),
            "failed to access /data/shopping-list.json: denied"
        );
        assert!(err.is_write_failure());
    }

    #[test]
    fn test_deserialize_is_not_a_write_failure() {
        let source = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = StorageError::Deserialize {
            key: "taskly-countdown".to_string(),
            source,
        };
        assert!(err.to_string().contains("taskly-countdown"));
        assert!(!err.is_write_failure());
    }
}
