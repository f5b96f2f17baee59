#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

/// Schema service response covering every column family the mapper handles.
pub const ORDERS_RESPONSE: &str = r#"{
    "keysType": "UNIQUE_KEYS",
    "status": 200,
    "properties": [
        {"name": "order_id", "type": "BIGINT", "comment": "", "aggregation_type": ""},
        {"name": "customer", "type": "VARCHAR", "comment": "buyer name"},
        {"name": "amount", "type": "DECIMAL64", "precision": "12", "scale": "2"},
        {"name": "created_at", "type": "DATETIMEV2"},
        {"name": "flags", "type": "TINYINT"},
        {"name": "payload", "type": "JSONB"}
    ]
}"#;

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        self.write_bytes(name, contents.as_bytes())
    }

    pub fn write_bytes(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents).expect("write temp file contents");
        path
    }
}
