// Базовые модули
pub mod config;
pub mod error;
pub mod model;

// Хранилище и менеджер записей
pub mod store;   // JSON-файл: load / save (tmp+rename) / backup
pub mod manager; // in-memory коллекция + инварианты + откат при ошибке save
pub mod stats;

// Удобные реэкспорты
pub use config::{ManagerBuilder, StoreConfig};
pub use error::{DeptError, DeptResult, ErrorKind, ParseError};
pub use manager::{DepartmentManager, SortKey};
pub use model::{department_key, Department, DepartmentRecord, TIMESTAMP_FORMAT};
pub use stats::Statistics;
pub use store::{FileStore, Storage};
