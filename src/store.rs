//! store — durable storage of the whole department collection in one JSON file.
//!
//! Формат файла: JSON-массив объектов DepartmentRecord (serde_json, pretty).
//!
//! Политика:
//! - load(): нет файла -> пустой список; файл нечитаем/битый (включая одну
//!   плохую запись или timestamp) -> warn + пустой список (fail-soft).
//! - save(): атомарная запись целиком: <path>.tmp -> fsync -> rename -> fsync
//!   родительского каталога (fsync управляется конфигом).
//! - backup(): копия в <path>.backup_yyyyMMdd_HHmmss; существующий файл с тем
//!   же именем не перезаписывается.
//!
//! No handle is kept between calls: every operation opens, uses and drops
//! its files before returning.

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDateTime;
use log::{debug, info, warn};
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::StoreConfig;
use crate::model::{now_secs, Department, DepartmentRecord};

/// Backup file name tag format (appended after ".backup_").
pub const BACKUP_TAG_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Persistence boundary used by the record manager.
pub trait Storage {
    /// Read the collection in stored order. Never fails; unreadable data is
    /// reported through the log and yields an empty collection.
    fn load(&self) -> Vec<Department>;

    /// Replace the stored collection with `departments`.
    fn save(&self, departments: &[Department]) -> Result<()>;

    /// Copy the current store file next to itself; returns the copy's path.
    fn backup(&self) -> Result<PathBuf>;
}

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    fsync: bool,
}

/// `<path><suffix>` — appends to the file name instead of replacing the extension.
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut s: OsString = path.as_os_str().to_os_string();
    s.push(suffix);
    PathBuf::from(s)
}

/// `<path>.backup_yyyyMMdd_HHmmss`
pub fn backup_path_for(path: &Path, at: &NaiveDateTime) -> PathBuf {
    sibling_path(path, &format!(".backup_{}", at.format(BACKUP_TAG_FORMAT)))
}

#[cfg(unix)]
fn fsync_dir(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            let dir = File::open(parent)?;
            dir.sync_all()?;
        }
    }
    Ok(())
}
#[cfg(not(unix))]
fn fsync_dir(_path: &Path) -> io::Result<()> {
    Ok(())
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            fsync: true,
        }
    }

    pub fn from_config(cfg: &StoreConfig) -> Self {
        Self {
            path: cfg.path.clone(),
            fsync: cfg.fsync,
        }
    }

    pub fn with_fsync(mut self, on: bool) -> Self {
        self.fsync = on;
        self
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the store file is present.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Strict variant of load(): surfaces read/parse errors instead of
    /// degrading to empty. A missing or blank file is still Ok(empty).
    pub fn try_load(&self) -> Result<Vec<Department>> {
        if !self.path.exists() {
            debug!("store: {} not found, starting empty", self.path.display());
            return Ok(Vec::new());
        }

        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("read store {}", self.path.display()))?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<DepartmentRecord> = serde_json::from_str(&text)
            .with_context(|| format!("parse store {}", self.path.display()))?;

        let mut out = Vec::with_capacity(records.len());
        for (i, r) in records.iter().enumerate() {
            let d = r
                .to_department()
                .with_context(|| format!("record #{} (id={}) in {}", i, r.id, self.path.display()))?;
            out.push(d);
        }
        debug!("store: loaded {} record(s) from {}", out.len(), self.path.display());
        Ok(out)
    }

    /// Backup tagged with an explicit timestamp (backup() uses "now").
    pub fn backup_at(&self, at: &NaiveDateTime) -> Result<PathBuf> {
        if !self.path.is_file() {
            return Err(anyhow!(
                "cannot back up {}: store file does not exist",
                self.path.display()
            ));
        }

        let dst = backup_path_for(&self.path, at);
        let mut src = File::open(&self.path)
            .with_context(|| format!("open store {}", self.path.display()))?;
        // create_new: an existing backup with this name is an error, never overwritten.
        let mut out = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&dst)
            .with_context(|| format!("create backup {}", dst.display()))?;

        let copied = io::copy(&mut src, &mut out).and_then(|n| {
            if self.fsync {
                out.sync_all()?;
            }
            Ok(n)
        });
        match copied {
            Ok(n) => {
                info!("backup: {} -> {} ({} B)", self.path.display(), dst.display(), n);
                Ok(dst)
            }
            Err(e) => {
                drop(out);
                let _ = fs::remove_file(&dst); // best-effort
                Err(anyhow::Error::new(e)
                    .context(format!("copy {} -> {}", self.path.display(), dst.display())))
            }
        }
    }

    fn write_tmp(&self, tmp: &Path, bytes: &[u8]) -> Result<()> {
        let mut f = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(tmp)
            .with_context(|| format!("open store tmp {}", tmp.display()))?;
        f.write_all(bytes)
            .with_context(|| format!("write store tmp {}", tmp.display()))?;
        if self.fsync {
            f.sync_all()?;
        }
        Ok(())
    }
}

impl Storage for FileStore {
    fn load(&self) -> Vec<Department> {
        match self.try_load() {
            Ok(v) => v,
            Err(e) => {
                warn!("store: load failed, continuing with no data: {:#}", e);
                Vec::new()
            }
        }
    }

    fn save(&self, departments: &[Department]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create dir {}", parent.display()))?;
            }
        }

        let records: Vec<DepartmentRecord> = departments.iter().map(DepartmentRecord::from).collect();
        let mut bytes = serde_json::to_vec_pretty(&records).context("serialize departments")?;
        bytes.push(b'\n');

        let tmp = sibling_path(&self.path, ".tmp");
        let _ = fs::remove_file(&tmp); // best-effort

        if let Err(e) = self.write_tmp(&tmp, &bytes) {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(anyhow::Error::new(e)
                .context(format!("rename {} -> {}", tmp.display(), self.path.display())));
        }
        if self.fsync {
            let _ = fsync_dir(&self.path);
        }

        debug!(
            "store: saved {} record(s), {} B to {}",
            departments.len(),
            bytes.len(),
            self.path.display()
        );
        Ok(())
    }

    fn backup(&self) -> Result<PathBuf> {
        self.backup_at(&now_secs())
    }
}
