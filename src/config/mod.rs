//! Editor configuration
//!
//! Three layers, later layers win:
//! 1. Built-in defaults
//! 2. Config file (.manifest-sync.toml)
//! 3. CLI overrides

mod defaults;
mod effective;
mod merge;
mod settings;

pub use defaults::BuiltinDefaults;
pub use effective::{ConfigError, ConfigOrigin, ConfigSource, EffectiveConfig};
pub use merge::{deep_merge, merge_layers};
pub use settings::{EditorSettings, OutputSettings, Placeholders, ResetSettings, ValidatorDefaults};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = ".manifest-sync.toml";
