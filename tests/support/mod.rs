use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn init() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    /// Command with the working directory and data directory pinned to this
    /// workspace, so tests never touch the real per-user data dir.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("nexusflow").expect("binary");
        cmd.current_dir(self.dir.path());
        cmd.env("NEXUSFLOW_DATA_DIR", self.data_dir());
        cmd
    }

    #[allow(dead_code)]
    pub fn write_config(&self, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join(".nexusflow.toml");
        fs::write(&path, contents)?;
        Ok(path)
    }

    #[allow(dead_code)]
    pub fn collection_path(&self, key: &str) -> PathBuf {
        self.data_dir().join(format!("{key}.json"))
    }

    #[allow(dead_code)]
    pub fn write_collection(&self, key: &str, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.collection_path(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    #[allow(dead_code)]
    pub fn read_collection(&self, key: &str) -> String {
        fs::read_to_string(self.collection_path(key)).expect("collection file")
    }
}
