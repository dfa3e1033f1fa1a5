use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::{AppContext, InitArgs};

/// Names probed, in order, in the working directory
pub const CONFIG_FILES: [&str; 4] = ["renum.toml", "renum.yaml", "renum.json", ".renum.toml"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config
{
    /// Change-log file name, created inside the run's root directory
    pub log_file: String,

    /// Extensions that are never renamed
    pub skip_extensions: Vec<String>,

    /// Extensions that switch a run to document style (`NN-Title.ext`)
    pub document_extensions: Vec<String>,

    /// Extra glob patterns to ignore (relative to the root)
    pub ignore_patterns: Vec<String>,

    /// Include dot files and folders
    pub include_hidden: bool,

    /// Honor .gitignore and .ignore files (off: every file keeps its position)
    pub respect_ignore_files: bool,
}

impl Default for Config
{
    fn default() -> Self
    {
        Self {
            log_file: "renum.log".to_string(),
            skip_extensions: vec!["exe".to_string(), "bak".to_string()],
            document_extensions: vec!["mp4".to_string()],
            ignore_patterns: Vec::new(),
            include_hidden: true,
            respect_ignore_files: false,
        }
    }
}

/// Load configuration from the working directory.
pub fn load_config() -> Result<Config>
{
    load_config_from(Path::new("."))
}

/// Load the first config file found in `dir`, layered with `RENUM_*`
/// environment variables. Missing keys fall back to [`Config::default`].
pub fn load_config_from(dir: &Path) -> Result<Config>
{
    let mut builder = config::Config::builder();

    for name in &CONFIG_FILES
    {
        let path = dir.join(name);
        if path.exists()
        {
            builder = builder.add_source(config::File::from(path));
            break;
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("RENUM")
            .prefix_separator("_")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("skip_extensions")
            .with_list_parse_key("document_extensions")
            .with_list_parse_key("ignore_patterns"),
    );

    let cfg = builder
        .build()
        .context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}

pub fn init(
    args: InitArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config_path = args
        .path
        .join(CONFIG_FILES[0]);

    if config_path.exists() && !args.force
    {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).context("Failed to serialize default config")?;

    std::fs::write(&config_path, toml_string).context("Failed to write config file")?;

    if !ctx.quiet
    {
        println!("Created config file at {}", config_path.display());
    }
    Ok(())
}
