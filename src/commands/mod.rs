pub mod config;
mod list;
mod paths;
mod uninstall;

pub use config::Config;
pub use list::list;
pub use uninstall::{UninstallArgs, uninstall};
