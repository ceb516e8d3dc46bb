//! Configuration loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

/// Project-level config file names, checked in order.
const PROJECT_CONFIG_FILES: [&str; 2] = ["promptlog.toml", ".promptlog.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `OPENAI_URL`, `OPENAI_API_KEY`, `PROMPTLOG_*`
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./promptlog.toml` or `./.promptlog.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/promptlog/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(&global_path));
            }
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        Self::extract(Self::with_env(figment))
    }

    /// Load defaults plus environment only (for --no-config)
    pub fn load_without_files() -> Result<FileConfig, Box<figment::Error>> {
        let figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));
        Self::extract(Self::with_env(figment))
    }

    fn extract(figment: Figment) -> Result<FileConfig, Box<figment::Error>> {
        figment.extract().map_err(Box::new)
    }

    /// Layer the environment on top of whatever the files said.
    ///
    /// `PROMPTLOG_LOG__FILE=...` style keys reach any field; the
    /// two OpenAI variables win over everything else.
    fn with_env(figment: Figment) -> Figment {
        figment
            .merge(Env::prefixed("PROMPTLOG_").split("__"))
            .merge(Env::raw().only(&["OPENAI_URL", "OPENAI_API_KEY"]).map(|key| {
                if key.as_str().eq_ignore_ascii_case("OPENAI_API_KEY") {
                    "completion.api_key".into()
                } else {
                    "completion.endpoint".into()
                }
            }))
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/promptlog/config.toml if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("promptlog").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");

        println!("  [ENV  ] OPENAI_URL, OPENAI_API_KEY, PROMPTLOG_*");

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./promptlog.toml or ./.promptlog.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}
