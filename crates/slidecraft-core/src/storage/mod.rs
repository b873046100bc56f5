//! Persistence of deck edit states behind an async key-value trait.
//!
//! Decks are keyed by an opaque id chosen by the host. Only the edit state is
//! stored; the baseline slides always come from the host.

mod autosave;
mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use autosave::{
    AutoSaveManager, DEFAULT_AUTOSAVE_DELAY_MS, PlatformAutoSaveManager, PlatformStorage,
    create_autosave_manager, create_default_storage,
};
pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use crate::deck::DeckEditState;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Deck not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future returned by [`Storage`] methods. Not `Send`, so wasm
/// backends can hold JS values across awaits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// `Send + Sync` on native targets, nothing on wasm (single-threaded).
#[cfg(not(target_arch = "wasm32"))]
pub trait MaybeSync: Send + Sync {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send + Sync> MaybeSync for T {}

#[cfg(target_arch = "wasm32")]
pub trait MaybeSync {}
#[cfg(target_arch = "wasm32")]
impl<T> MaybeSync for T {}

/// A deck storage backend.
pub trait Storage: MaybeSync {
    /// Write a deck's edit state, replacing any previous one.
    fn save(&self, id: &str, deck: &DeckEditState) -> BoxFuture<'_, StorageResult<()>>;

    /// Read a deck's edit state. [`StorageError::NotFound`] if it was never saved.
    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<DeckEditState>>;

    /// Remove a deck. Removing a missing deck succeeds.
    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>>;

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Busy-polling executor for tests. The in-crate backends never return `Pending`.
#[cfg(test)]
pub(crate) fn block_on<F: Future>(f: F) -> F::Output {
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);

    loop {
        if let Poll::Ready(result) = f.as_mut().poll(&mut cx) {
            return result;
        }
    }
}
