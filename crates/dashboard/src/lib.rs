pub mod app;
pub mod cli;
pub mod config;
pub mod render;
pub mod repl;
pub mod state;

pub use app::App;
pub use config::AppConfig;
