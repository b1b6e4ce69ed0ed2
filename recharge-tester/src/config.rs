use recharge_core::ClientConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("could not read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Client config for the logic checks: the file at `path` when given,
/// otherwise the built-in defaults, with `api_url` taking precedence.
pub fn load_client_config(
    path: Option<&Path>,
    api_url: Option<&str>,
) -> Result<ClientConfig, ConfigLoadError> {
    let config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            ClientConfig::from_json(&text).map_err(|source| ConfigLoadError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        }
        None => ClientConfig::default_config(),
    };
    Ok(match api_url {
        Some(url) => config.with_base_url(url),
        None => config,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(label: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "recharge-tester-config-{label}-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn defaults_without_a_file() {
        let config = load_client_config(None, None).unwrap();
        assert!(!config.operators.is_empty());
    }

    #[test]
    fn file_values_and_override() {
        let path = temp_file("ok", r#"{"api_base_url":"http://api.test/","operators":["Jio"]}"#);
        let config = load_client_config(Some(&path), None).unwrap();
        assert_eq!(config.api_base_url, "http://api.test");
        assert_eq!(config.operators, vec!["Jio".to_string()]);

        let config = load_client_config(Some(&path), Some("http://other.test")).unwrap();
        assert_eq!(config.api_base_url, "http://other.test");
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn reports_missing_and_malformed_files() {
        let missing = std::env::temp_dir().join("recharge-tester-config-missing.json");
        let err = load_client_config(Some(&missing), None).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Read { .. }));

        let path = temp_file("bad", "{ not json");
        let err = load_client_config(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Parse { .. }));
        assert!(err.to_string().starts_with("invalid config"));
        let _ = std::fs::remove_file(path);
    }
}
