//! Cross-cutting pieces shared by the core, the hosts, and the commands.

// Logger macros are exported at the crate root; keep this module first.
#[macro_use]
pub mod logger;

pub mod constants;
pub mod utils;
