use std::path::{Path, PathBuf};

use anyhow::Context;

pub const DEFAULT_DB_FILE: &str = "home_service.db";
pub const DEFAULT_USERS_FILE: &str = "inputDataUsers.csv";
pub const DEFAULT_REQUESTS_FILE: &str = "inputDataRequests.csv";
pub const DEFAULT_COMMENTS_FILE: &str = "inputDataComments.csv";

/// Locations of every input source and the target store for one pipeline run.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub database_path: PathBuf,
    pub users_csv: PathBuf,
    pub requests_csv: PathBuf,
    pub comments_csv: PathBuf,
    pub delimiter: char,
    pub enforce_foreign_keys: bool,
}

impl ImportConfig {
    /// Default file layout rooted at `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            database_path: dir.join(DEFAULT_DB_FILE),
            users_csv: dir.join(DEFAULT_USERS_FILE),
            requests_csv: dir.join(DEFAULT_REQUESTS_FILE),
            comments_csv: dir.join(DEFAULT_COMMENTS_FILE),
            delimiter: ';',
            enforce_foreign_keys: false,
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        let dir = PathBuf::from(std::env::var("DATA_DIR").unwrap_or_else(|_| ".".into()));
        let mut cfg = Self::in_dir(&dir);

        let path_var = |name: &str, fallback: PathBuf| {
            std::env::var(name).map(PathBuf::from).unwrap_or(fallback)
        };
        cfg.database_path = path_var("DATABASE_PATH", cfg.database_path);
        cfg.users_csv = path_var("USERS_CSV", cfg.users_csv);
        cfg.requests_csv = path_var("REQUESTS_CSV", cfg.requests_csv);
        cfg.comments_csv = path_var("COMMENTS_CSV", cfg.comments_csv);

        if let Ok(raw) = std::env::var("CSV_DELIMITER") {
            cfg.delimiter = parse_delimiter(&raw)?;
        }
        cfg.enforce_foreign_keys = std::env::var("ENFORCE_FOREIGN_KEYS")
            .ok()
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(cfg)
    }
}

fn parse_delimiter(raw: &str) -> anyhow::Result<char> {
    let mut chars = raw.chars();
    let delimiter = chars.next().context("CSV_DELIMITER is empty")?;
    anyhow::ensure!(
        chars.next().is_none(),
        "CSV_DELIMITER must be a single character, got {raw:?}"
    );
    anyhow::ensure!(
        delimiter != '"' && delimiter != '\n' && delimiter != '\r',
        "CSV_DELIMITER cannot be a quote or line break"
    );
    Ok(delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_dir_uses_default_file_names() {
        let cfg = ImportConfig::in_dir("/data");
        assert_eq!(cfg.database_path, PathBuf::from("/data/home_service.db"));
        assert_eq!(cfg.users_csv, PathBuf::from("/data/inputDataUsers.csv"));
        assert_eq!(cfg.requests_csv, PathBuf::from("/data/inputDataRequests.csv"));
        assert_eq!(cfg.comments_csv, PathBuf::from("/data/inputDataComments.csv"));
        assert_eq!(cfg.delimiter, ';');
        assert!(!cfg.enforce_foreign_keys);
    }

    #[test]
    fn delimiter_must_be_one_plain_char() {
        assert_eq!(parse_delimiter(",").unwrap(), ',');
        assert_eq!(parse_delimiter("\t").unwrap(), '\t');
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("\"").is_err());
    }
}
