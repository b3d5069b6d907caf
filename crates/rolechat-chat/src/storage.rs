use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use rolechat_types::ChatSession;

/// On-device key-value slot holding the serialized session list.
///
/// There is no transactionality: the last `save` wins.
pub trait SessionStorage: Send + Sync {
    /// Read the stored blob, `None` when nothing has been saved yet
    fn load(&self) -> io::Result<Option<String>>;

    /// Replace the stored blob
    fn save(&self, blob: &str) -> io::Result<()>;

    /// Human-readable location used in error messages
    fn location(&self) -> String;
}

/// Serialize the session list into the stored blob format (a JSON array)
pub fn encode_sessions(sessions: &[ChatSession]) -> serde_json::Result<String> {
    serde_json::to_string(sessions)
}

pub fn decode_sessions(blob: &str) -> serde_json::Result<Vec<ChatSession>> {
    serde_json::from_str(blob)
}

/// Session list stored as a JSON file
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.rolechat/chat_sessions.json`
    pub fn default_location() -> anyhow::Result<Self> {
        Ok(Self::new(rolechat_logging::get_rolechat_dir()?.join("chat_sessions.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileStorage {
    fn load(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(blob) if blob.trim().is_empty() => Ok(None),
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&self, blob: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write next to the target and rename so a crash never leaves half a file
        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);
        fs::write(&tmp_path, blob)?;
        fs::rename(&tmp_path, &self.path)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Session list kept in memory; nothing survives the process
#[derive(Default)]
pub struct MemoryStorage {
    blob: Mutex<Option<String>>,
    saves: AtomicUsize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a previously stored blob
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(blob.into())),
            saves: AtomicUsize::new(0),
        }
    }

    pub fn blob(&self) -> Option<String> {
        self.blob.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Number of times `save` has been called
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> io::Result<Option<String>> {
        Ok(self.blob())
    }

    fn save(&self, blob: &str) -> io::Result<()> {
        *self.blob.lock().unwrap_or_else(PoisonError::into_inner) = Some(blob.to_string());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
