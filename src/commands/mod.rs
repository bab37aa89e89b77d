//! CLI command handlers.
//!
//! Each submodule handles a specific CLI command:
//! - `build` - Run one build end to end
//! - `artifact` - Digest, archive, rename, backup, remove
//! - `config` - Show and persist default build options
//! - `preflight` - Check the packaging tool is installed

mod artifact;
mod build;
mod config;
mod preflight;

pub use artifact::{cmd_archive, cmd_backup, cmd_digest, cmd_remove, cmd_rename};
pub use build::{cmd_build, BuildArgs};
pub use config::{cmd_config_set, cmd_config_show};
pub use preflight::cmd_preflight;
