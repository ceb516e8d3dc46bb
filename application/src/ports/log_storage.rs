//! Port for the raw bytes behind the interaction log.
//!
//! [`LogStorage`] knows nothing about records: it reads and replaces one
//! blob. Record validation and the in-memory mirror live in
//! [`LogStore`](crate::use_cases::log_store::LogStore).

use async_trait::async_trait;
use std::io;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Storage for the serialized log.
///
/// `replace` must be all-or-nothing: after an `Err` the previous contents
/// are still readable.
#[async_trait]
pub trait LogStorage: Send + Sync {
    /// Human-readable location, used in messages.
    fn location(&self) -> String;

    /// Full contents, or `None` if nothing has been stored yet.
    async fn read(&self) -> io::Result<Option<Vec<u8>>>;

    /// Replace the full contents.
    async fn replace(&self, contents: &[u8]) -> io::Result<()>;
}

/// In-memory storage for tests.
///
/// Reads and writes can be made to fail on demand to exercise error paths.
#[derive(Default)]
pub struct MemoryLogStorage {
    contents: Mutex<Option<Vec<u8>>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryLogStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that already holds `contents`.
    pub fn with_contents(contents: impl Into<Vec<u8>>) -> Self {
        Self {
            contents: Mutex::new(Some(contents.into())),
            ..Self::default()
        }
    }

    /// Make subsequent `replace` calls fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `read` calls fail (or succeed again).
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Current contents as text, if any.
    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Number of successful `replace` calls.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LogStorage for MemoryLogStorage {
    fn location(&self) -> String {
        "<memory>".to_string()
    }

    async fn read(&self) -> io::Result<Option<Vec<u8>>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "reads disabled",
            ));
        }
        let guard = self
            .contents
            .lock()
            .map_err(|_| io::Error::other("memory storage poisoned"))?;
        Ok(guard.clone())
    }

    async fn replace(&self, contents: &[u8]) -> io::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "writes disabled",
            ));
        }
        let mut guard = self
            .contents
            .lock()
            .map_err(|_| io::Error::other("memory storage poisoned"))?;
        *guard = Some(contents.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// Lets callers keep a handle on the storage after handing it to a LogStore.
#[async_trait]
impl<T: LogStorage + ?Sized> LogStorage for std::sync::Arc<T> {
    fn location(&self) -> String {
        (**self).location()
    }

    async fn read(&self) -> io::Result<Option<Vec<u8>>> {
        (**self).read().await
    }

    async fn replace(&self, contents: &[u8]) -> io::Result<()> {
        (**self).replace(contents).await
    }
}
