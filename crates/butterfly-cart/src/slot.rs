//! # Durable Slot
//!
//! The storage the cart survives restarts in: one named cell holding the
//! whole serialized cart.
//!
//! ## Slot Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  key "cart" ──► [ bytes of the whole cart ]                             │
//! │                                                                         │
//! │  load()  : read once at hydration        → Ok(None) if never written   │
//! │  save()  : overwrite wholesale per write → no partial / delta writes   │
//! │                                                                         │
//! │  Several stores may share a slot (browser tabs, CLI runs). There is    │
//! │  no locking or merge: the last writer wins.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{SlotError, SlotResult};

/// Well-known key the storefront keeps its cart under.
pub const DEFAULT_CART_KEY: &str = "cart";

/// A single durable key-value cell.
///
/// Implementations report failures; deciding to ignore them is the
/// store's job, not the slot's.
pub trait DurableSlot {
    /// The key this slot is bound to.
    fn key(&self) -> &str;

    /// Reads the stored bytes. `Ok(None)` means nothing was ever saved.
    fn load(&self) -> SlotResult<Option<Vec<u8>>>;

    /// Replaces the stored bytes.
    fn save(&self, bytes: &[u8]) -> SlotResult<()>;
}

impl<S: DurableSlot + ?Sized> DurableSlot for Box<S> {
    fn key(&self) -> &str {
        (**self).key()
    }

    fn load(&self) -> SlotResult<Option<Vec<u8>>> {
        (**self).load()
    }

    fn save(&self, bytes: &[u8]) -> SlotResult<()> {
        (**self).save(bytes)
    }
}

// =============================================================================
// MemorySlot
// =============================================================================

/// In-process slot.
///
/// Clones share one cell, so two stores built from clones of the same
/// `MemorySlot` behave like two tabs over one `localStorage` key.
#[derive(Debug, Clone)]
pub struct MemorySlot {
    key: String,
    cell: Arc<Mutex<Option<Vec<u8>>>>,
}

impl MemorySlot {
    /// Creates an empty slot under [`DEFAULT_CART_KEY`].
    pub fn new() -> Self {
        Self::with_key(DEFAULT_CART_KEY)
    }

    pub fn with_key(key: impl Into<String>) -> Self {
        MemorySlot {
            key: key.into(),
            cell: Arc::new(Mutex::new(None)),
        }
    }

    /// Creates a slot that already holds `bytes`.
    pub fn with_contents(bytes: impl Into<Vec<u8>>) -> Self {
        let slot = Self::new();
        if let Ok(mut cell) = slot.cell.lock() {
            *cell = Some(bytes.into());
        }
        slot
    }

    /// Current contents, for inspection in tests and hosts.
    pub fn contents(&self) -> Option<Vec<u8>> {
        self.cell.lock().ok().and_then(|cell| cell.clone())
    }
}

impl Default for MemorySlot {
    fn default() -> Self {
        Self::new()
    }
}

impl DurableSlot for MemorySlot {
    fn key(&self) -> &str {
        &self.key
    }

    fn load(&self) -> SlotResult<Option<Vec<u8>>> {
        let cell = self.cell.lock().map_err(|_| SlotError::Poisoned {
            key: self.key.clone(),
        })?;
        Ok(cell.clone())
    }

    fn save(&self, bytes: &[u8]) -> SlotResult<()> {
        let mut cell = self.cell.lock().map_err(|_| SlotError::Poisoned {
            key: self.key.clone(),
        })?;
        *cell = Some(bytes.to_vec());
        Ok(())
    }
}

// =============================================================================
// FileSlot
// =============================================================================

/// Slot backed by one file per key: `<dir>/<key>.json`.
///
/// ## Write Strategy
/// ```text
/// save(bytes)
///    │
///    ├── create <dir> if missing
///    ├── write  <dir>/<key>.json.tmp
///    └── rename → <dir>/<key>.json   (readers never see a half-written cart)
/// ```
#[derive(Debug, Clone)]
pub struct FileSlot {
    key: String,
    path: PathBuf,
}

impl FileSlot {
    /// Binds `key` to `<dir>/<key>.json`.
    pub fn in_dir(dir: impl AsRef<Path>, key: impl Into<String>) -> Self {
        let key = key.into();
        let path = dir.as_ref().join(format!("{}.json", key));
        FileSlot { key, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }

    fn write_error(&self, source: std::io::Error) -> SlotError {
        SlotError::Write {
            key: self.key.clone(),
            path: self.path.clone(),
            source,
        }
    }
}

impl DurableSlot for FileSlot {
    fn key(&self) -> &str {
        &self.key
    }

    fn load(&self) -> SlotResult<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SlotError::Read {
                key: self.key.clone(),
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn save(&self, bytes: &[u8]) -> SlotResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }

        let tmp = self.temp_path();
        fs::write(&tmp, bytes).map_err(|e| self.write_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.write_error(e))?;
        Ok(())
    }
}
