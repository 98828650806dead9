use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::AppContext;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config
{
    /// Extra ignore globs applied when listing package sources
    pub ignore_patterns: Vec<String>,

    /// Workspace resolution settings
    pub workspace: WorkspaceConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WorkspaceConfig
{
    /// Environment variable holding colon-separated workspace roots
    pub env: String,

    /// Subdirectory of each root where package trees live
    pub src_dir: String,
}

impl Default for Config
{
    fn default() -> Self
    {
        Self {
            ignore_patterns: vec![
                "vendor/**".to_string(),
                "testdata/**".to_string(),
                ".git/**".to_string(),
            ],
            workspace: WorkspaceConfig {
                env: "GOPATH".to_string(),
                src_dir: "src".to_string(),
            },
        }
    }
}

pub fn load_config() -> Result<Config>
{
    let mut builder = config::Config::builder();

    // Load from config files in priority order
    let config_paths = ["exphash.toml", ".exphash.toml"];

    for path in &config_paths
    {
        if Path::new(path).exists()
        {
            builder = builder.add_source(config::File::with_name(path));
            break;
        }
    }

    // Add environment variables with EXPHASH_ prefix
    builder = builder.add_source(config::Environment::with_prefix("EXPHASH").separator("_"));

    let cfg = builder
        .build()
        .context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}

pub fn init(
    force: bool,
    _ctx: &AppContext,
) -> Result<()>
{
    let config_path = Path::new("exphash.toml");

    if config_path.exists() && !force
    {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).context("Failed to serialize default config")?;

    std::fs::write(config_path, toml_string).context("Failed to write config file")?;

    println!("Created config file at {}", config_path.display());
    Ok(())
}
