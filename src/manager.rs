//! manager — authoritative in-memory department collection.
//!
//! Каждый мутирующий вызов заканчивается одним из трёх исходов:
//! - rejected:  валидация не прошла — ни памяти, ни диска не касаемся (Err, kind=Validation);
//! - committed: изменение применено в памяти и store.save() успешен (Ok);
//! - reverted:  изменение применено, save() упал — память возвращается к состоянию
//!              до вызова (Err, kind=StorageWrite).
//!
//! Read-only operations (list/get/search/sort/statistics) never touch storage.
//! Human-readable reasons for rejected/reverted calls go to the log.

use log::{info, warn};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::{ManagerBuilder, StoreConfig};
use crate::error::{DeptError, DeptResult};
use crate::model::{department_key, name_key, now_secs, Department};
use crate::stats::Statistics;
use crate::store::{FileStore, Storage};

/// Sort criterion for `DepartmentManager::sort`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Case-insensitive name order.
    Name,
    EmployeeCount,
    CreatedDate,
    LastModifiedDate,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "employeecount" | "employee_count" | "employees" => Ok(SortKey::EmployeeCount),
            "createddate" | "created_date" | "created" => Ok(SortKey::CreatedDate),
            "lastmodifieddate" | "last_modified_date" | "modified" => Ok(SortKey::LastModifiedDate),
            other => Err(format!("unknown sort criterion '{}'", other)),
        }
    }
}

impl SortKey {
    fn compare(self, a: &Department, b: &Department) -> Ordering {
        match self {
            SortKey::Name => name_key(&a.name).cmp(&name_key(&b.name)),
            SortKey::EmployeeCount => a.employee_count.cmp(&b.employee_count),
            SortKey::CreatedDate => a.created_date.cmp(&b.created_date),
            SortKey::LastModifiedDate => a.last_modified_date.cmp(&b.last_modified_date),
        }
    }
}

pub struct DepartmentManager<S: Storage = FileStore> {
    departments: Vec<Department>,
    store: S,
    /// None once every u32 id has been handed out.
    next_id: Option<u32>,
    trim_description: bool,
}

impl DepartmentManager<FileStore> {
    /// Open over a FileStore described by `cfg`.
    pub fn open(cfg: StoreConfig) -> Self {
        let store = FileStore::from_config(&cfg);
        Self::with_storage(store).trim_description(cfg.trim_description)
    }

    pub fn builder() -> ManagerBuilder {
        ManagerBuilder::new()
    }
}

/// Log and pass through a rejection.
fn rejected(err: DeptError) -> DeptError {
    warn!("rejected: {}", err);
    err
}

/// Drop loaded records that would break the collection invariants.
fn sanitize(loaded: Vec<Department>) -> Vec<Department> {
    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    let mut out = Vec::with_capacity(loaded.len());
    for d in loaded {
        let valid = !d.name.trim().is_empty()
            && d.employee_count >= 0
            && d.last_modified_date >= d.created_date;
        if !valid {
            warn!("load: skipping invalid record id={} name='{}'", d.id, d.name);
            continue;
        }
        let (id, name) = (department_key(&d), name_key(&d.name));
        if ids.contains(&id) || names.contains(&name) {
            warn!("load: skipping duplicate record id={} name='{}'", d.id, d.name);
            continue;
        }
        ids.insert(id);
        names.insert(name);
        out.push(d);
    }
    out
}

impl<S: Storage> DepartmentManager<S> {
    /// Load the working set from `store`. Load failures yield an empty manager.
    pub fn with_storage(store: S) -> Self {
        let departments = sanitize(store.load());
        let next_id = departments
            .iter()
            .map(department_key)
            .max()
            .map_or(Some(1), |m| m.checked_add(1));
        match next_id {
            Some(n) => info!("manager: {} department(s) loaded, next id {}", departments.len(), n),
            None => warn!("manager: {} department(s) loaded, id space exhausted", departments.len()),
        }
        Self {
            departments,
            store,
            next_id,
            trim_description: true,
        }
    }

    /// Whether descriptions are trimmed on add/update (default on).
    pub fn trim_description(mut self, on: bool) -> Self {
        self.trim_description = on;
        self
    }

    pub fn storage(&self) -> &S {
        &self.store
    }

    /// Id the next successful add() will receive; None when ids are exhausted.
    #[inline]
    pub fn next_id(&self) -> Option<u32> {
        self.next_id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.departments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
    }

    /// Borrowed view of the live collection in stored order.
    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    /// Snapshot copy of the live collection.
    pub fn list_all(&self) -> Vec<Department> {
        self.departments.clone()
    }

    pub fn get(&self, id: u32) -> Option<&Department> {
        self.departments.iter().find(|d| department_key(d) == id)
    }

    fn position(&self, id: u32) -> Option<usize> {
        self.departments.iter().position(|d| department_key(d) == id)
    }

    fn name_taken(&self, name: &str, except: Option<u32>) -> bool {
        let key = name_key(name);
        self.departments
            .iter()
            .any(|d| Some(department_key(d)) != except && name_key(&d.name) == key)
    }

    fn normalize_description(&self, description: Option<&str>) -> String {
        match description {
            None => String::new(),
            Some(s) if self.trim_description => s.trim().to_string(),
            Some(s) => s.to_string(),
        }
    }

    fn validate(&self, name: &str, employee_count: i32, except: Option<u32>) -> DeptResult<()> {
        if name.trim().is_empty() {
            return Err(rejected(DeptError::EmptyName));
        }
        if employee_count < 0 {
            return Err(rejected(DeptError::NegativeEmployeeCount(employee_count)));
        }
        if self.name_taken(name, except) {
            return Err(rejected(DeptError::DuplicateName(name.trim().to_string())));
        }
        Ok(())
    }

    fn persist(&self) -> anyhow::Result<()> {
        self.store.save(&self.departments)
    }

    /// Create a department and persist the collection.
    pub fn add(
        &mut self,
        name: &str,
        description: Option<&str>,
        employee_count: i32,
    ) -> DeptResult<Department> {
        self.validate(name, employee_count, None)?;
        let id = self.next_id.ok_or_else(|| rejected(DeptError::IdExhausted))?;

        let dept = Department::new(
            id,
            name.trim(),
            self.normalize_description(description),
            employee_count,
        );
        self.departments.push(dept.clone());
        self.next_id = id.checked_add(1);

        if let Err(e) = self.persist() {
            self.departments.pop();
            self.next_id = Some(id);
            warn!("add '{}' reverted: {:#}", dept.name, e);
            return Err(DeptError::Storage(e));
        }

        info!("department '{}' added with id {}", dept.name, id);
        Ok(dept)
    }

    /// Replace name/description/count of department `id` and persist.
    /// `created_date` is never touched.
    pub fn update(
        &mut self,
        id: u32,
        name: &str,
        description: Option<&str>,
        employee_count: i32,
    ) -> DeptResult<Department> {
        let idx = self
            .position(id)
            .ok_or_else(|| rejected(DeptError::NotFound(id)))?;
        self.validate(name, employee_count, Some(id))?;

        let description = self.normalize_description(description);
        let previous = self.departments[idx].clone();
        {
            let d = &mut self.departments[idx];
            d.name = name.trim().to_string();
            d.description = description;
            d.employee_count = employee_count;
            d.last_modified_date = now_secs().max(previous.last_modified_date);
        }

        if let Err(e) = self.persist() {
            self.departments[idx] = previous;
            warn!("update of id {} reverted: {:#}", id, e);
            return Err(DeptError::Storage(e));
        }

        info!("department '{}' (id {}) updated", previous.name, id);
        Ok(self.departments[idx].clone())
    }

    /// Remove department `id` and persist. Ids are never reused afterwards.
    pub fn delete(&mut self, id: u32) -> DeptResult<Department> {
        let idx = self
            .position(id)
            .ok_or_else(|| rejected(DeptError::NotFound(id)))?;

        let removed = self.departments.remove(idx);

        if let Err(e) = self.persist() {
            self.departments.insert(idx, removed);
            warn!("delete of id {} reverted: {:#}", id, e);
            return Err(DeptError::Storage(e));
        }

        info!("department '{}' (id {}) deleted", removed.name, id);
        Ok(removed)
    }

    /// Case-insensitive substring match on name or description.
    /// A blank term returns every department.
    pub fn search(&self, term: &str) -> Vec<Department> {
        if term.trim().is_empty() {
            return self.list_all();
        }
        let term = term.to_lowercase();
        self.departments
            .iter()
            .filter(|d| {
                d.name.to_lowercase().contains(&term) || d.description.to_lowercase().contains(&term)
            })
            .cloned()
            .collect()
    }

    /// Stable sort of a snapshot; the live collection keeps its order.
    pub fn sort(&self, key: SortKey, ascending: bool) -> Vec<Department> {
        let mut out = self.list_all();
        out.sort_by(|a, b| {
            let o = key.compare(a, b);
            if ascending {
                o
            } else {
                o.reverse()
            }
        });
        out
    }

    /// String-criterion sort; an unknown criterion returns the unsorted snapshot.
    pub fn sort_by(&self, criterion: &str, ascending: bool) -> Vec<Department> {
        match criterion.parse::<SortKey>() {
            Ok(key) => self.sort(key, ascending),
            Err(_) => self.list_all(),
        }
    }

    /// None when there are no departments.
    pub fn statistics(&self) -> Option<Statistics> {
        Statistics::compute(&self.departments)
    }

    /// Copy the store file; no in-memory state changes.
    pub fn backup(&self) -> DeptResult<PathBuf> {
        match self.store.backup() {
            Ok(p) => Ok(p),
            Err(e) => {
                warn!("backup failed: {:#}", e);
                Err(DeptError::Storage(e))
            }
        }
    }
}
