//! File-backed store implementation.
//!
//! The whole keyspace is kept in memory and persisted as one JSON snapshot,
//! `index.json`, in the store directory. Snapshots are written to a
//! temporary file and renamed into place, so a crash mid-write leaves the
//! previous snapshot intact.
//!
//! A store holds `index.lock` for as long as it is open. Opening a
//! directory whose lock file exists fails, which keeps two indexers from
//! overwriting each other's snapshots.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::{Mutex, RwLock};

use crate::error::{ArgentError, Result};
use crate::store::keyspace::{KEYSPACE_VERSION, KeySpace};
use crate::store::traits::{CursorStore, IndexStore, InvertedIndexStore, ScoredMember};

/// Name of the snapshot file inside the store directory.
pub const SNAPSHOT_FILE: &str = "index.json";

/// Name of the lock file inside the store directory.
pub const LOCK_FILE: &str = "index.lock";

const SNAPSHOT_TEMP_FILE: &str = "index.json.tmp";

/// A file-based index store.
#[derive(Debug)]
pub struct FileStore {
    /// The directory holding the snapshot and lock files.
    directory: PathBuf,
    data: RwLock<KeySpace>,
    /// Held from open until close.
    lock: Mutex<Option<FileLock>>,
    /// Whether memory holds writes the snapshot does not.
    dirty: AtomicBool,
    /// Whether every write is persisted immediately.
    sync_writes: bool,
    closed: AtomicBool,
}

impl FileStore {
    /// Open the store in `directory`, creating the directory if needed.
    pub fn open<P: AsRef<Path>>(directory: P) -> Result<Self> {
        Self::open_with(directory, false)
    }

    /// Open the store, persisting after every write if `sync_writes` is set.
    pub fn open_with<P: AsRef<Path>>(directory: P, sync_writes: bool) -> Result<Self> {
        let directory = directory.as_ref().to_path_buf();

        // Create directory if it doesn't exist
        if !directory.exists() {
            fs::create_dir_all(&directory)
                .map_err(|e| ArgentError::storage(format!("Failed to create directory: {e}")))?;
        }

        if !directory.is_dir() {
            return Err(ArgentError::storage(format!(
                "Path is not a directory: {}",
                directory.display()
            )));
        }

        let lock = FileLock::acquire(directory.join(LOCK_FILE))?;

        // The lock is released by its own drop if loading fails.
        let data = Self::load(&directory.join(SNAPSHOT_FILE))?;

        log::debug!(
            "Opened file store at {} ({} buckets)",
            directory.display(),
            data.buckets.len()
        );

        Ok(FileStore {
            directory,
            data: RwLock::new(data),
            lock: Mutex::new(Some(lock)),
            dirty: AtomicBool::new(false),
            sync_writes,
            closed: AtomicBool::new(false),
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn load(path: &Path) -> Result<KeySpace> {
        if !path.exists() {
            return Ok(KeySpace::default());
        }

        let content = fs::read_to_string(path)?;
        let data: KeySpace = serde_json::from_str(&content).map_err(|e| {
            ArgentError::storage(format!("Corrupt snapshot {}: {e}", path.display()))
        })?;

        if data.version != KEYSPACE_VERSION {
            return Err(ArgentError::storage(format!(
                "Unsupported snapshot version {} in {}",
                data.version,
                path.display()
            )));
        }

        Ok(data)
    }

    /// Check if the store is closed.
    fn check_closed(&self) -> Result<()> {
        if self.is_closed() {
            Err(ArgentError::storage("Store is closed"))
        } else {
            Ok(())
        }
    }

    fn persist(&self) -> Result<()> {
        let temp_path = self.directory.join(SNAPSHOT_TEMP_FILE);
        let file = File::create(&temp_path)?;
        let mut writer = BufWriter::new(file);
        {
            let data = self.data.read();
            serde_json::to_writer(&mut writer, &*data)?;
        }
        writer.flush()?;
        writer.get_ref().sync_all()?;

        fs::rename(&temp_path, self.directory.join(SNAPSHOT_FILE))
            .map_err(|e| ArgentError::storage(format!("Failed to replace snapshot: {e}")))?;
        Ok(())
    }

    /// Write the snapshot if memory holds unsaved writes.
    fn flush(&self) -> Result<()> {
        if self.dirty.swap(false, Ordering::SeqCst) {
            if let Err(e) = self.persist() {
                self.dirty.store(true, Ordering::SeqCst);
                return Err(e);
            }
        }
        Ok(())
    }

    fn after_write(&self) -> Result<()> {
        self.dirty.store(true, Ordering::SeqCst);
        if self.sync_writes {
            self.flush()?;
        }
        Ok(())
    }
}

impl CursorStore for FileStore {
    fn get_cursor(&self, namespace: &str) -> Result<Option<String>> {
        self.check_closed()?;
        Ok(self.data.read().get_cursor(namespace))
    }

    fn set_cursor(&self, namespace: &str, value: &str) -> Result<()> {
        self.check_closed()?;
        self.data.write().set_cursor(namespace, value);
        self.after_write()
    }
}

impl InvertedIndexStore for FileStore {
    fn upsert(&self, namespace: &str, code: &str, member: &str, score: i64) -> Result<()> {
        self.check_closed()?;
        self.data.write().upsert(namespace, code, member, score);
        self.after_write()
    }

    fn top(&self, namespace: &str, code: &str, limit: usize) -> Result<Vec<ScoredMember>> {
        self.check_closed()?;
        Ok(self.data.read().top(namespace, code, limit))
    }

    fn score(&self, namespace: &str, code: &str, member: &str) -> Result<Option<i64>> {
        self.check_closed()?;
        Ok(self.data.read().score(namespace, code, member))
    }

    fn bucket_len(&self, namespace: &str, code: &str) -> Result<usize> {
        self.check_closed()?;
        Ok(self.data.read().bucket_len(namespace, code))
    }

    fn codes(&self, namespace: &str) -> Result<Vec<String>> {
        self.check_closed()?;
        Ok(self.data.read().codes(namespace))
    }
}

impl IndexStore for FileStore {
    fn sync(&self) -> Result<()> {
        self.check_closed()?;
        self.flush()
    }

    fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        let flushed = self.flush();
        if let Some(mut lock) = self.lock.lock().take() {
            lock.release()?;
        }
        log::debug!("Closed file store at {}", self.directory.display());
        flushed
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn store_type(&self) -> &'static str {
        "file"
    }
}

impl Drop for FileStore {
    fn drop(&mut self) {
        if !self.is_closed() {
            if let Err(e) = self.close() {
                log::warn!(
                    "Failed to close file store at {}: {e}",
                    self.directory.display()
                );
            }
        }
    }
}

/// An exclusive lock file, removed on release or drop.
#[derive(Debug)]
struct FileLock {
    path: PathBuf,
    _file: File,
    released: bool,
}

impl FileLock {
    fn acquire(path: PathBuf) -> Result<Self> {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::AlreadyExists {
                    ArgentError::storage(format!(
                        "Failed to acquire lock {}: store is already open",
                        path.display()
                    ))
                } else {
                    ArgentError::storage(format!("Failed to create lock file: {e}"))
                }
            })?;

        // The pid helps when cleaning up after a crashed indexer.
        writeln!(file, "{}", std::process::id())?;

        Ok(FileLock {
            path,
            _file: file,
            released: false,
        })
    }

    fn release(&mut self) -> Result<()> {
        if !self.released {
            fs::remove_file(&self.path)
                .map_err(|e| ArgentError::storage(format!("Failed to release lock: {e}")))?;
            self.released = true;
        }
        Ok(())
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = self.release();
    }
}
