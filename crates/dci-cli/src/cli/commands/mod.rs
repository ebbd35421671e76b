//! CLI command handlers, one per file.

mod inject;
mod locate;
mod status;

pub use inject::run_inject;
pub use locate::run_locate;
pub use status::run_status;
