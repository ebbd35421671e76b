pub mod config;
pub mod logging;

pub mod cache_slot;
pub mod checksum;
pub mod deno_dir;
pub mod error;
pub mod inject;
pub mod location;
pub mod sidecar;
pub mod status;
pub mod storage;
pub mod walk;

pub use error::{InjectError, Result};
