//! CLI command implementations.

mod config;
mod doctor;
mod generate;
mod list;
mod videos;

pub use config::run_config;
pub use doctor::run_doctor;
pub use generate::{run_days, run_supplementary};
pub use list::run_list;
pub use videos::run_videos;
