//! Command implementations for the winlz CLI.

pub mod decode;
pub mod detect;
pub mod info;

pub use decode::{DecodeArgs, cmd_decode};
pub use detect::cmd_detect;
pub use info::cmd_info;
