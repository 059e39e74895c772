//! Centralized configuration and builder for the department store.
//!
//! - StoreConfig::from_env() reads the DEPTSTORE_* env vars on top of defaults.
//! - ManagerBuilder collects overrides and opens a DepartmentManager.
//!
//! Env:
//! - DEPTSTORE_PATH              — store file path (default "departments.json", relative to cwd)
//! - DEPTSTORE_FSYNC             — fsync tmp file + parent dir on save (default on)
//! - DEPTSTORE_TRIM_DESCRIPTION  — trim descriptions on add/update (default on)

use std::fmt;
use std::path::PathBuf;

use crate::manager::DepartmentManager;
use crate::store::FileStore;

pub const DEFAULT_STORE_FILE: &str = "departments.json";

pub const ENV_PATH: &str = "DEPTSTORE_PATH";
pub const ENV_FSYNC: &str = "DEPTSTORE_FSYNC";
pub const ENV_TRIM_DESCRIPTION: &str = "DEPTSTORE_TRIM_DESCRIPTION";

#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Path of the JSON store file.
    pub path: PathBuf,

    /// Whether save() fsyncs the temp file and the parent directory.
    pub fsync: bool,

    /// Whether add/update trim the description. Absent descriptions are
    /// always stored as "".
    pub trim_description: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STORE_FILE),
            fsync: true,
            trim_description: true,
        }
    }
}

fn parse_flag(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

impl StoreConfig {
    /// Defaults overridden by env vars. Unparsable values are ignored.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var(ENV_PATH) {
            let s = v.trim();
            if !s.is_empty() {
                cfg.path = PathBuf::from(s);
            }
        }

        if let Ok(v) = std::env::var(ENV_FSYNC) {
            if let Some(on) = parse_flag(&v) {
                cfg.fsync = on;
            }
        }

        if let Ok(v) = std::env::var(ENV_TRIM_DESCRIPTION) {
            if let Some(on) = parse_flag(&v) {
                cfg.trim_description = on;
            }
        }

        cfg
    }

    pub fn with_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_fsync(mut self, on: bool) -> Self {
        self.fsync = on;
        self
    }

    pub fn with_trim_description(mut self, on: bool) -> Self {
        self.trim_description = on;
        self
    }
}

impl fmt::Display for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StoreConfig {{ path: {}, fsync: {}, trim_description: {} }}",
            self.path.display(),
            self.fsync,
            self.trim_description,
        )
    }
}

/// Builder that produces a StoreConfig and opens a manager over a FileStore.
#[derive(Clone, Debug)]
pub struct ManagerBuilder {
    cfg: StoreConfig,
}

impl Default for ManagerBuilder {
    fn default() -> Self {
        // Start from env, then allow overrides.
        Self {
            cfg: StoreConfig::from_env(),
        }
    }
}

impl ManagerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a clean default (without reading env).
    pub fn from_default() -> Self {
        Self {
            cfg: StoreConfig::default(),
        }
    }

    pub fn path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.cfg.path = path.into();
        self
    }

    pub fn fsync(mut self, on: bool) -> Self {
        self.cfg.fsync = on;
        self
    }

    pub fn trim_description(mut self, on: bool) -> Self {
        self.cfg.trim_description = on;
        self
    }

    pub fn build(self) -> StoreConfig {
        self.cfg
    }

    /// Load the store and return a ready manager. Never fails: a missing or
    /// corrupt store file yields an empty manager.
    pub fn open(self) -> DepartmentManager<FileStore> {
        DepartmentManager::open(self.cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = StoreConfig::default();
        assert_eq!(cfg.path, PathBuf::from("departments.json"));
        assert!(cfg.fsync);
        assert!(cfg.trim_description);
    }

    #[test]
    fn flags() {
        assert_eq!(parse_flag(" YES "), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn builder_overrides() {
        let cfg = ManagerBuilder::from_default()
            .path("/tmp/x.json")
            .fsync(false)
            .trim_description(false)
            .build();
        assert_eq!(cfg.path, PathBuf::from("/tmp/x.json"));
        assert!(!cfg.fsync);
        assert!(!cfg.trim_description);
        assert!(cfg.to_string().contains("/tmp/x.json"));
    }
}
