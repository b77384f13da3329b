use crate::foundation::storage::DEFAULT_STORE_PATH;
use crate::process::DEFAULT_AUDIO_SUFFIX;
use anyhow::Context;
use config::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

/// Prefix of the environment variables that override file settings,
/// e.g. `ARTISTORE__STORAGE__DATA_PATH`.
const ENV_PREFIX: &str = "ARTISTORE";

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub storage: StorageSettings,
    pub library: LibrarySettings,
}

#[derive(Debug, Deserialize)]
pub struct StorageSettings {
    pub data_path: String,
}

#[derive(Debug, Deserialize)]
pub struct LibrarySettings {
    pub root: String,
    pub extension: String,
}

/// Loads settings from `cfg_file`, if it exists, on top of the built-in defaults.
/// `ARTISTORE__*` environment variables win over both.
///
/// # Arguments
///
/// * `cfg_file` - Path of the YAML configuration file. A missing file is not an error.
///
/// # Examples
///
/// ```no_run
/// use artistore::get_configuration;
/// use std::path::Path;
///
/// let settings = get_configuration(Path::new("/home/listener/.artistore/config.yaml"))?;
/// println!("Store: {}", settings.storage.data_path);
/// # Ok::<(), config::ConfigError>(())
/// ```
pub fn get_configuration(cfg_file: &Path) -> Result<Settings, ConfigError> {
    let cfg_file = cfg_file
        .to_str()
        .ok_or_else(|| ConfigError::Message("Configuration path is not valid UTF-8".into()))?;

    build_settings(Some(cfg_file), environment())
}

/// Built-in defaults with the `ARTISTORE__*` environment variables applied.
pub fn default_configuration() -> Result<Settings, ConfigError> {
    build_settings(None, environment())
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX).separator("__")
}

fn build_settings(
    cfg_file: Option<&str>,
    environment: config::Environment,
) -> Result<Settings, ConfigError> {
    let mut builder = config::Config::builder()
        .set_default("storage.data_path", DEFAULT_STORE_PATH)?
        .set_default("library.root", ".")?
        .set_default("library.extension", DEFAULT_AUDIO_SUFFIX)?;

    if let Some(cfg_file) = cfg_file {
        builder =
            builder.add_source(config::File::new(cfg_file, config::FileFormat::Yaml).required(false));
    }

    builder
        .add_source(environment)
        .build()?
        .try_deserialize::<Settings>()
}

/// Where the configuration lives, below the user's home folder.
pub struct ConfigFolder {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
}

impl ConfigFolder {
    /// Resolves `~/.artistore` from `HOME`. Fails when `HOME` is not set.
    pub fn new() -> anyhow::Result<Self> {
        let home_dir = env::var("HOME").context("Failed to get HOME environment variable")?;
        Ok(Self::in_home(Path::new(&home_dir)))
    }

    pub fn in_home(home_dir: &Path) -> Self {
        let config_dir = home_dir.join(".artistore");
        Self {
            config_file: config_dir.join("config.yaml"),
            config_dir,
        }
    }
}

pub fn create_config(cfg_folder: &ConfigFolder) -> anyhow::Result<()> {
    println!("\x1b[1m\x1b[32mCreating configuration...\x1b[0m");

    if cfg_folder.config_file.exists() && !confirm_overwrite()? {
        println!("\x1b[33mOperation cancelled.\x1b[0m");
        return Ok(());
    }

    write_config_template(cfg_folder)?;

    println!("\x1b[32mConfiguration file created at:");
    println!("  -> {}", cfg_folder.config_file.display());
    println!("\x1b[0mPlease edit the configuration file with your specific settings.");

    Ok(())
}

fn write_config_template(cfg_folder: &ConfigFolder) -> anyhow::Result<()> {
    fs::create_dir_all(&cfg_folder.config_dir).with_context(|| {
        format!(
            "Failed to create configuration folder {}",
            cfg_folder.config_dir.display()
        )
    })?;

    let config_content = include_str!("config_template.yaml");
    fs::write(&cfg_folder.config_file, config_content)
        .with_context(|| format!("Failed to write {}", cfg_folder.config_file.display()))
}

fn confirm_overwrite() -> Result<bool, io::Error> {
    println!("\x1b[31mThe configuration file already exists.");
    println!("Do you want to overwrite it? Your settings will be lost. (y/N)\x1b[0m");

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().to_lowercase() == "y")
}
