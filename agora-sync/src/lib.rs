//! Entity synchronization for the agora administration console.
//!
//! One authoritative remote store, one in-memory cache per collection,
//! and nothing optimistic: the cache only ever shows acknowledged remote
//! state.
//!
//! # Components
//!
//! - **Store**: the [`RemoteStore`]/[`AdminAuth`] traits and the HTTP
//!   implementation, [`RestStore`]
//! - **Synchronizer**: [`EntitySync`] — cache + CRUD with per-id write
//!   serialization
//! - **Session**: [`EditSession`] — the explicit Idle / Editing /
//!   Submitting form lifecycle
//! - **Console**: [`AdminConsole`] — every collection behind one
//!   authenticated session
//!
//! # Example
//!
//! ```no_run
//! use agora_sync::{AdminConsole, RestConfig, RestStore};
//! use std::sync::Arc;
//!
//! # async fn run() -> agora_sync::SyncResult<()> {
//! let store = Arc::new(RestStore::new(RestConfig::default()));
//! let console = AdminConsole::new(store.clone(), store);
//!
//! if console.login("secret").await? {
//!     console.load_all().await?;
//! }
//! # Ok(())
//! # }
//! ```

mod console;
mod error;
mod rest;
mod session;
mod store;
mod sync;

pub use console::AdminConsole;
pub use error::{SyncError, SyncResult};
pub use rest::{RestConfig, RestStore};
pub use session::{EditSession, EditState, SessionError};
pub use store::{AdminAuth, MediaUpload, RemoteStore};
pub use sync::EntitySync;
