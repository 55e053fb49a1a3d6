pub mod config;
pub mod explore;
pub mod query;
pub mod render;
pub mod utils;

pub use config::{handle_config_command, ConfigCommands};
pub use explore::run_explore;
pub use query::{parse_tx_hash, run_one_shot, OneShot};
