pub mod artifact;
pub mod capability;
pub mod config;
pub mod constraint;
pub mod elapsed;
pub mod error;
pub mod snapshot;
pub mod state;
