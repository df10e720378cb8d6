//! Filesystem primitives the engines are built on: listing snapshots,
//! no-clobber renames, and reversible deletion.

mod atomic;
mod duplicate;
mod helpers;
mod listing;
mod trash;

pub use atomic::rename_no_clobber;
pub use duplicate::unique_in;
pub use helpers::{describe_io, io_error_with_help};
pub use listing::{Snapshot, snapshot};
pub use trash::{StagingTrash, SystemTrash, Trash};
