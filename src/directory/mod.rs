//! Country and university directory lookups

mod client;
mod supervisor;
mod traits;

pub use client::HttpDirectory;
pub use supervisor::{LookupKind, LookupOutcome, LookupRequest, LookupSupervisor, LookupTicket};
pub use traits::DirectoryLookup;

#[cfg(test)]
pub use traits::MockDirectoryLookup;
