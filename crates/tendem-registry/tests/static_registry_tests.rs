use std::fs;

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use tendem_manifest::ToolEntry;
use tendem_registry::{Error, StaticRegistry, ToolRegistry};

#[tokio::test]
async fn test_reads_tools_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tools.json");
    fs::write(
        &path,
        r#"{"tools": [{"name": "search_tasks", "description": "Search"}, {"name": "create_task", "description": "Create"}]}"#,
    )
    .unwrap();

    let registry = StaticRegistry::new(path.as_path());
    assert!(registry.source().starts_with("registry file "));
    assert_eq!(
        registry.list_tools().await.unwrap(),
        vec![
            ToolEntry::new("search_tasks", "Search"),
            ToolEntry::new("create_task", "Create"),
        ]
    );
}

#[tokio::test]
async fn test_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let registry = StaticRegistry::new(dir.path().join("absent.json"));

    let err = registry.list_tools().await.unwrap_err();
    assert!(matches!(err, Error::Fs(tendem_fs::Error::NotFound { .. })), "got {err:?}");
}
