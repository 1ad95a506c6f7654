// Configuration module
// Public interface for configuration loading

mod loader;
mod settings;

pub use loader::{config_dir, config_path, load_config, load_from_path, resolve_config};
pub use settings::{Config, GeneratorConfig, ProviderEntry, ServerConfig};
