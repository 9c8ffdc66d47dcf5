mod config;
mod logging;

pub use config::{load_config, print_summary};
pub use logging::init_logging;
