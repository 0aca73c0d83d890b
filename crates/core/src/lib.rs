//! Domain types and pure rules shared by the NexusTrack crates.
//!
//! Nothing in here performs I/O: persistence lives in `nexustrack-db`,
//! HTTP in `nexustrack-api`.

pub mod error;
pub mod password_strength;
pub mod project_color;
pub mod serde_util;
pub mod stats;
pub mod task_status;
pub mod types;
pub mod validation;
