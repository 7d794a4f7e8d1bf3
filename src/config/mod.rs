pub mod args;
#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

pub use args::ArgumentSet;
#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;
