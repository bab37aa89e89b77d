//! Packwright - build orchestrator for script-to-executable packaging.
//!
//! Drives an external packaging tool to turn a submitted script into a
//! single standalone executable, and provides stateless companion
//! operations on the produced artifact (digest, archive, rename, backup,
//! remove, persisted options).

pub mod artifact;
pub mod audit;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod preflight;
pub mod process;
pub mod workspace;

pub use config::OrchestratorConfig;
pub use error::Error;
pub use orchestrator::{BuildOptions, BuildRequest, BuildResult, Orchestrator, OutputMode};
pub use workspace::Workspace;
