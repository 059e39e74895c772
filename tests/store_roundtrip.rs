// tests/store_roundtrip.rs
//
// Запуск только этого файла:
//   cargo test --test store_roundtrip -- --nocapture
//
// Покрываем:
// 1) save -> load (и свежий менеджер) воспроизводит коллекцию в том же порядке.
// 2) Отсутствующий файл -> пусто; битый документ (даже одна запись) -> пусто.
// 3) Формат файла: JSON-массив объектов с camelCase-полями.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;

use deptstore::{DepartmentManager, FileStore, ManagerBuilder, Storage};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn unique_root(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    let base = std::env::temp_dir();
    base.join(format!("depttest-store-{prefix}-{pid}-{t}-{id}"))
}

fn open(path: &PathBuf) -> DepartmentManager<FileStore> {
    ManagerBuilder::from_default().path(path).fsync(false).open()
}

#[test]
fn save_then_load_reproduces_collection_in_order() -> Result<()> {
    let root = unique_root("roundtrip");
    let path = root.join("departments.json");

    let expected = {
        let mut m = open(&path);
        m.add("Engineering", Some("builds \"things\" | fast"), 30)?;
        m.add("Marketing", None, 10)?;
        m.add("Отдел кадров", Some("кадры"), 20)?;
        m.update(2, "Marketing", Some("ads"), 12)?;
        m.list_all()
    };

    let loaded = FileStore::new(&path).try_load()?;
    assert_eq!(loaded, expected);

    let fresh = open(&path);
    assert_eq!(fresh.list_all(), expected);
    assert_eq!(fresh.next_id(), Some(4));
    Ok(())
}

#[test]
fn missing_file_loads_empty() -> Result<()> {
    let root = unique_root("missing");
    let store = FileStore::new(root.join("nope.json"));
    assert!(!store.exists());
    assert!(store.load().is_empty());
    assert!(store.try_load()?.is_empty());

    let m = open(&root.join("nope.json"));
    assert!(m.is_empty());
    assert_eq!(m.next_id(), Some(1));
    Ok(())
}

#[test]
fn corrupt_document_degrades_to_empty() -> Result<()> {
    let root = unique_root("corrupt");
    fs::create_dir_all(&root)?;
    let path = root.join("departments.json");
    fs::write(&path, "[{\"id\": 1, \"name\": ")?;

    let m = open(&path);
    assert!(m.is_empty());
    // Файл не трогаем до первой успешной мутации.
    assert_eq!(fs::read_to_string(&path)?, "[{\"id\": 1, \"name\": ");
    Ok(())
}

#[test]
fn one_bad_record_degrades_whole_load() -> Result<()> {
    let root = unique_root("bad-record");
    fs::create_dir_all(&root)?;
    let path = root.join("departments.json");
    fs::write(
        &path,
        r#"[
  {"id":1,"name":"A","description":"","employeeCount":1,
   "createdDate":"2024-01-01 10:00:00","lastModifiedDate":"2024-01-01 10:00:00"},
  {"id":2,"name":"B","description":"","employeeCount":2,
   "createdDate":"01/01/2024","lastModifiedDate":"2024-01-01 10:00:00"}
]"#,
    )?;

    let store = FileStore::new(&path);
    assert!(store.try_load().is_err());
    assert!(store.load().is_empty());

    // Нечисловое целое поле — тоже ошибка разбора документа.
    fs::write(
        &path,
        r#"[{"id":"one","name":"A","description":"","employeeCount":1,
            "createdDate":"2024-01-01 10:00:00","lastModifiedDate":"2024-01-01 10:00:00"}]"#,
    )?;
    assert!(store.load().is_empty());
    Ok(())
}

#[test]
fn file_is_json_array_with_canonical_fields() -> Result<()> {
    let root = unique_root("format");
    let path = root.join("departments.json");
    {
        let mut m = open(&path);
        m.add("Sales", Some("retail"), 5)?;
    }

    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
    let arr = v.as_array().expect("top-level array");
    assert_eq!(arr.len(), 1);
    let rec = &arr[0];
    assert_eq!(rec["id"], 1);
    assert_eq!(rec["name"], "Sales");
    assert_eq!(rec["description"], "retail");
    assert_eq!(rec["employeeCount"], 5);
    let created = rec["createdDate"].as_str().unwrap();
    assert_eq!(created.len(), "yyyy-MM-dd HH:mm:ss".len());
    assert!(chrono::NaiveDateTime::parse_from_str(created, "%Y-%m-%d %H:%M:%S").is_ok());
    Ok(())
}

#[test]
fn save_overwrites_previous_content() -> Result<()> {
    let root = unique_root("overwrite");
    let path = root.join("departments.json");
    let store = FileStore::new(&path).with_fsync(false);

    let mut m = open(&path);
    m.add("A", None, 1)?;
    m.add("B", None, 2)?;
    store.save(&m.list_all()[..1])?;

    let loaded = store.try_load()?;
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].name, "A");
    Ok(())
}
