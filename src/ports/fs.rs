use async_trait::async_trait;
use eyre::Result;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Filesystem abstraction for the completion builder
#[async_trait]
pub trait FileSystem: Send + Sync {
    async fn exists(&self, path: &Path) -> bool;
    async fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
    async fn create_dir_all(&self, path: &Path) -> Result<()>;
    /// Removes a directory tree; a missing directory is not an error
    async fn remove_dir_all(&self, path: &Path) -> Result<()>;
    async fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;
    async fn set_permissions(&self, path: &Path, mode: u32) -> Result<()>;
}

/// Real filesystem implementation using tokio::fs
#[derive(Debug, Clone, Default)]
pub struct RealFs;

#[async_trait]
impl FileSystem for RealFs {
    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    async fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        Ok(tokio::fs::write(path, contents).await?)
    }

    async fn create_dir_all(&self, path: &Path) -> Result<()> {
        Ok(tokio::fs::create_dir_all(path).await?)
    }

    async fn remove_dir_all(&self, path: &Path) -> Result<()> {
        match tokio::fs::remove_dir_all(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        let mut dir = tokio::fs::read_dir(path).await?;
        while let Some(entry) = dir.next_entry().await? {
            entries.push(entry.path());
        }
        entries.sort();
        Ok(entries)
    }

    async fn set_permissions(&self, path: &Path, mode: u32) -> Result<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(mode);
            Ok(tokio::fs::set_permissions(path, perms).await?)
        }
        #[cfg(not(unix))]
        {
            let _ = (path, mode);
            Ok(()) // No-op on non-Unix
        }
    }
}

/// In-memory filesystem for testing
#[derive(Debug, Clone, Default)]
pub struct MemFs {
    files: Arc<RwLock<HashMap<PathBuf, Vec<u8>>>>,
    dirs: Arc<RwLock<HashSet<PathBuf>>>,
    modes: Arc<RwLock<HashMap<PathBuf, u32>>>,
    failing_writes: Arc<RwLock<HashSet<PathBuf>>>,
}

impl MemFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with content for testing
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl AsRef<[u8]>) {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files.write().unwrap().insert(path, content.as_ref().to_vec());
    }

    /// Add a directory for testing
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        self.dirs.write().unwrap().insert(path.clone());

        if let Some(parent) = path.parent()
            && parent != Path::new("")
        {
            self.add_dir(parent);
        }
    }

    /// Make every write to `path` fail, like a read-only target would
    pub fn fail_writes_to(&self, path: impl AsRef<Path>) {
        self.failing_writes.write().unwrap().insert(path.as_ref().to_path_buf());
    }

    pub fn read(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.files.read().unwrap().get(path.as_ref()).cloned()
    }

    pub fn mode(&self, path: impl AsRef<Path>) -> Option<u32> {
        self.modes.read().unwrap().get(path.as_ref()).copied()
    }

    pub fn is_dir(&self, path: impl AsRef<Path>) -> bool {
        self.dirs.read().unwrap().contains(path.as_ref())
    }
}

#[async_trait]
impl FileSystem for MemFs {
    async fn exists(&self, path: &Path) -> bool {
        self.files.read().unwrap().contains_key(path) || self.dirs.read().unwrap().contains(path)
    }

    async fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if self.failing_writes.read().unwrap().contains(path) {
            return Err(eyre::eyre!("Permission denied (os error 13): {}", path.display()));
        }

        let parent_exists = path
            .parent()
            .map(|parent| self.dirs.read().unwrap().contains(parent))
            .unwrap_or(false);
        if !parent_exists {
            return Err(eyre::eyre!("No such file or directory (os error 2): {}", path.display()));
        }

        self.files.write().unwrap().insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }

    async fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.add_dir(path);
        Ok(())
    }

    async fn remove_dir_all(&self, path: &Path) -> Result<()> {
        let mut files = self.files.write().unwrap();
        let mut dirs = self.dirs.write().unwrap();

        files.retain(|k, _| !k.starts_with(path));
        dirs.retain(|k| !k.starts_with(path));
        self.modes.write().unwrap().retain(|k, _| !k.starts_with(path));

        Ok(())
    }

    async fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        if !self.dirs.read().unwrap().contains(path) {
            return Err(eyre::eyre!("Directory not found: {}", path.display()));
        }

        let files = self.files.read().unwrap();
        let dirs = self.dirs.read().unwrap();
        let mut entries: Vec<PathBuf> = files
            .keys()
            .chain(dirs.iter())
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect();
        entries.sort();
        entries.dedup();
        Ok(entries)
    }

    async fn set_permissions(&self, path: &Path, mode: u32) -> Result<()> {
        if !self.files.read().unwrap().contains_key(path) {
            return Err(eyre::eyre!("File not found: {}", path.display()));
        }
        self.modes.write().unwrap().insert(path.to_path_buf(), mode);
        Ok(())
    }
}
