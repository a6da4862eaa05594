pub mod app;
pub mod batch;
pub mod command;
pub mod config;

pub use app::App;
pub use config::Config;
