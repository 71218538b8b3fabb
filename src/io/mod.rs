//! Process-level I/O: the instance lock, Unix signals, and session lookups.

pub mod lock; // Single-instance lock file
pub mod session; // Username and password marker
pub mod signals; // Unix signal handling
