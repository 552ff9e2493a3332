use crate::models::prelude::{HelpMetadata, ModelRoot};
use crate::shared::models::prelude::{ParsedConfig, RoastPersona};
use crate::shared::{CONFIG_DIR_NAME, RUN_ID_ENV_VAR, directories};
use anyhow::{Result, anyhow};
use clap::{ArgGroup, Parser};
use colored::*;
use serde::Deserialize;
use serde_yaml::{Deserializer, Value};

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

#[derive(Parser, Debug, Default)]
#[clap(group = ArgGroup::new("config"))]
pub struct ConfigOptions {
    /// Add paths to search for configuration. By default, `kaopei` will search up
    /// for `.kaopei` directories and load `.yml` and `.yaml` files from them.
    /// Specifying this option will _add_ the paths/files to the loaded config.
    #[clap(long, env = "KAOPEI_CONFIG_DIR", global(true))]
    extra_config: Vec<String>,

    /// When set, default config files will not be loaded and only specified config will be loaded.
    #[arg(
        long,
        env = "KAOPEI_DISABLE_DEFAULT_CONFIG",
        default_value = "false",
        global(true)
    )]
    disable_default_config: bool,

    /// Override the working directory
    #[arg(long, short = 'C', global(true))]
    working_dir: Option<String>,

    /// The run-id names the log file of this run. Re-using a run-id overwrites the old log.
    #[arg(long, global(true), env = RUN_ID_ENV_VAR)]
    run_id: Option<String>,
}

impl ConfigOptions {
    pub fn generate_run_id() -> String {
        let id = nanoid::nanoid!(4, &nanoid::alphabet::SAFE);
        let now = chrono::Local::now();
        let current_time = now.format("%Y%m%d");
        format!("{}-{}", current_time, id)
    }

    pub fn get_run_id(&self) -> String {
        self.run_id.clone().unwrap_or_else(Self::generate_run_id)
    }

    pub async fn load_config(&self) -> Result<FoundConfig> {
        let current_dir = std::env::current_dir();
        let working_dir = match (current_dir, &self.working_dir) {
            (Ok(cwd), None) => cwd,
            (_, Some(dir)) => PathBuf::from(&dir),
            _ => {
                error!(target: "user", "Unable to get a working dir");
                return Err(anyhow!("Unable to get a working dir"));
            }
        };

        let config_path = self.find_config_paths(&working_dir);
        let found_config = FoundConfig::new(self, working_dir, config_path).await;

        debug!("Loaded config {:?}", found_config);

        Ok(found_config)
    }

    fn find_config_paths(&self, working_dir: &Path) -> Vec<PathBuf> {
        let mut config_paths = Vec::new();

        if !self.disable_default_config {
            for config_dir in build_config_path(working_dir) {
                debug!("Checking if {} exists", config_dir.display());
                if config_dir.exists() && !config_paths.contains(&config_dir) {
                    config_paths.push(config_dir)
                }
            }
        }

        for extra_config in &self.extra_config {
            let config_dir = Path::new(&extra_config);
            debug!("Checking if {} exists", config_dir.display());
            if config_dir.exists() {
                config_paths.push(config_dir.to_path_buf())
            }
        }

        config_paths
    }
}

#[derive(Debug, Clone)]
pub struct FoundConfig {
    pub working_dir: PathBuf,
    /// Personas in discovery order, closest to the working dir first.
    pub personas: Vec<RoastPersona>,
    pub config_path: Vec<PathBuf>,
    pub run_id: String,
}

impl FoundConfig {
    pub fn empty(working_dir: PathBuf) -> Self {
        Self {
            working_dir,
            personas: Vec::new(),
            config_path: Vec::new(),
            run_id: ConfigOptions::generate_run_id(),
        }
    }

    pub async fn new(
        config_options: &ConfigOptions,
        working_dir: PathBuf,
        config_path: Vec<PathBuf>,
    ) -> Self {
        let raw_config = load_all_config(&config_path).await;

        let mut this = Self {
            working_dir,
            personas: Vec::new(),
            config_path,
            run_id: config_options.get_run_id(),
        };

        for raw_config in raw_config {
            let name = raw_config.full_name();
            match ParsedConfig::try_from(raw_config) {
                Ok(value) => this.add_model(value),
                Err(e) => warn!(target: "user", "Ignoring {}: {}", name.bold(), e),
            }
        }

        this
    }

    /// The persona closest to the working dir, or the built-in one.
    pub fn get_persona(&self) -> RoastPersona {
        self.personas
            .first()
            .cloned()
            .unwrap_or_else(RoastPersona::builtin)
    }

    fn add_model(&mut self, parsed_config: ParsedConfig) {
        match parsed_config {
            ParsedConfig::RoastPersona(persona) => {
                if self
                    .personas
                    .iter()
                    .any(|existing| existing.full_name == persona.full_name)
                {
                    warn!(target: "user", "Duplicate {} found, dropping {} in {}", persona.full_name.bold(), persona.name().bold(), persona.file_path());
                } else {
                    self.personas.push(persona);
                }
            }
        }
    }
}

async fn load_all_config(paths: &[PathBuf]) -> Vec<ModelRoot<Value>> {
    let mut loaded_values = Vec::new();

    for file_path in expand_to_files(paths) {
        let file_contents = match tokio::fs::read_to_string(&file_path).await {
            Err(e) => {
                warn!(target: "user", "Unable to read file {} because {}", file_path.display(), e);
                continue;
            }
            Ok(content) => content,
        };
        for doc in Deserializer::from_str(&file_contents) {
            if let Some(parsed_model) = parse_model(doc, &file_path) {
                loaded_values.push(parsed_model)
            }
        }
    }

    loaded_values
}

pub(crate) fn parse_model(doc: Deserializer, file_path: &Path) -> Option<ModelRoot<Value>> {
    let value = match Value::deserialize(doc) {
        Ok(value) => value,
        Err(e) => {
            warn!(target: "user", "Unable to load document from {} because {}", file_path.display(), e);
            return None;
        }
    };

    match serde_yaml::from_value::<ModelRoot<Value>>(value) {
        Ok(mut value) => {
            value.metadata.annotations.file_path = Some(file_path.display().to_string());
            value.metadata.annotations.file_dir =
                file_path.parent().map(|dir| dir.display().to_string());
            Some(value)
        }
        Err(e) => {
            warn!(target: "user", "Unable to parse model from {} because {}", file_path.display(), e);
            None
        }
    }
}

fn expand_to_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut config_files = Vec::new();
    for path in paths {
        let expanded_paths = expand_path(path).unwrap_or_else(|e| {
            warn!(target: "user", "Unable to access filesystem because {}", e);
            Vec::new()
        });
        config_files.extend(expanded_paths);
    }

    config_files
}

fn expand_path(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    if path.is_dir() {
        let mut files = Vec::new();
        for dir_entry in fs::read_dir(path)?.flatten() {
            let file_path = dir_entry.path();
            if !file_path.is_file() {
                continue;
            }

            let extension = file_path.extension();
            if extension == Some(OsStr::new("yaml")) || extension == Some(OsStr::new("yml")) {
                debug!(target: "user", "Found file {:?}", file_path);
                files.push(file_path);
            }
        }
        // read_dir order is platform dependent
        files.sort();

        return Ok(files);
    }

    warn!("Unknown file type {}", path.display());
    Ok(Vec::new())
}

/// Every directory that may hold persona files, most specific first.
pub fn build_config_path(working_dir: &Path) -> Vec<PathBuf> {
    let mut config_path = Vec::new();

    let working_dir = fs::canonicalize(working_dir).unwrap_or_else(|_| working_dir.to_path_buf());
    for search_dir in working_dir.ancestors() {
        config_path.push(search_dir.join(CONFIG_DIR_NAME));
    }

    if let Some(home) = directories::home() {
        config_path.push(home.join(CONFIG_DIR_NAME));
    }

    if let Some(config_dir) = directories::config() {
        config_path.push(config_dir.join("kaopei"));
    }

    config_path
}
