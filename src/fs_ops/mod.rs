//! Filesystem operations: collision resolution and file transport.

mod atomic;
mod claim;
mod copy;
mod duplicate;
mod helpers;
mod meta;
mod transport;
mod util;

pub use claim::ClaimedPathSet;
pub use duplicate::{DiskProbe, FilesystemProbe, Target, resolve_target, unique_with_numeric_suffix};
pub use transport::{DryRunTransport, FileTransport, FsTransport};
