//! CLI command handlers

pub mod ask;
pub mod info;
pub mod init;
pub mod serve;

pub use ask::*;
pub use info::*;
pub use init::*;
pub use serve::*;
