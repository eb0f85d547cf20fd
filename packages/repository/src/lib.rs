//! # Pagecraft Page Repository
//!
//! Draft / publish / version lifecycle for page documents.
//!
//! ```text
//! createPage ──→ draft (v1) ──saveDraft──→ draft (v1)
//!                    │
//!                 publish ──→ published (v2) + history entry + snapshot
//!                    │
//!            restoreVersion(snapshot) ──→ draft (v3)
//! ```
//!
//! [`PageRepository`] enforces permissions and lifecycle rules; the bytes live
//! behind a [`PageStore`]. Two stores ship with the crate: [`MemoryPageStore`]
//! for tests and previews and [`FilePageStore`] which keeps JSON files on disk.

mod access;
mod errors;
mod file;
mod memory;
mod repository;
mod store;

pub use access::{Actor, Permission, Role};
pub use errors::{RepositoryError, RepositoryResult};
pub use file::FilePageStore;
pub use memory::MemoryPageStore;
pub use repository::{PageRepository, SaveReport};
pub use store::{PageStore, PageVersion};
