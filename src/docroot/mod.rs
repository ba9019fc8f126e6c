//! Document root access: resolving request paths to files and directories,
//! and rendering directory listings.

pub mod listing;
pub mod resolver;

pub use listing::DirectoryListing;
pub use resolver::{DirEntry, DocumentRoot, EntryKind, Resource};
