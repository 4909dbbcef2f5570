use indexmap::IndexMap;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::exclusion::ExclusionTable;

/// File name looked up in the working directory when no config is given.
pub const DEFAULT_CONFIG_FILE: &str = "modgen.yaml";

/// Extension of template bodies inside the template store.
pub const TEMPLATE_STORE_EXT: &str = "tpl";

/// How one template is turned into one output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDescriptor {
    pub extension: String,
    /// Informational only; nothing checks it before generation.
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "outputSubdir")]
    pub subdir: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        alias = "filenamePattern"
    )]
    pub filename_pattern: Option<String>,
}

fn default_required() -> bool {
    true
}

impl TemplateDescriptor {
    pub fn new(extension: &str) -> Self {
        Self {
            extension: extension.to_string(),
            required: true,
            subdir: None,
            filename_pattern: None,
        }
    }

    pub fn with_subdir(mut self, subdir: &str) -> Self {
        self.subdir = Some(subdir.to_string());
        self
    }

    pub fn with_filename_pattern(mut self, pattern: &str) -> Self {
        self.filename_pattern = Some(pattern.to_string());
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// The complete generation configuration. Built once, then only borrowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateSet {
    pub templates_dir: PathBuf,
    pub output_dir: PathBuf,
    pub templates: IndexMap<String, TemplateDescriptor>,
    pub exclusions: ExclusionTable,
}

impl TemplateSet {
    /// Location of the body for `template_id` in the template store.
    pub fn template_path(&self, template_id: &str) -> PathBuf {
        self.templates_dir
            .join(format!("{}.{}", template_id, TEMPLATE_STORE_EXT))
    }

    /// Builds the effective configuration: built-in defaults, shallow-merged
    /// with the user file when one is found.
    ///
    /// An explicit `path` that is missing, or any file that cannot be read or
    /// parsed, is reported and the defaults are used instead.
    pub fn load(path: Option<&Path>) -> Self {
        let defaults = crate::defaults::template_set();
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.exists() {
                    info!("No {} found, using built-in defaults", DEFAULT_CONFIG_FILE);
                    return defaults;
                }
                fallback
            }
        };
        match UserConfig::load(&path) {
            Ok(user) => {
                info!("Loaded config from {:?}", path);
                user.apply_to(defaults)
            }
            Err(e) => {
                warn!("Ignoring config {:?}: {}. Using built-in defaults", path, e);
                defaults
            }
        }
    }
}

/// A user-supplied configuration. Every key is optional; a key that is
/// present replaces the built-in value as a whole.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserConfig {
    #[serde(default, alias = "templatesDir")]
    pub templates_dir: Option<PathBuf>,
    #[serde(default, alias = "outputDir")]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub templates: Option<IndexMap<String, TemplateDescriptor>>,
    #[serde(default)]
    pub exclusions: Option<ExclusionTable>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0:?}")]
    NotFound(PathBuf),
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl UserConfig {
    /// Parses a YAML file, or a JSON file when the extension is `.json`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let config = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        Ok(config)
    }

    /// Shallow merge onto `base`: no merging happens inside `templates` or
    /// `exclusions`.
    pub fn apply_to(self, base: TemplateSet) -> TemplateSet {
        TemplateSet {
            templates_dir: self.templates_dir.unwrap_or(base.templates_dir),
            output_dir: self.output_dir.unwrap_or(base.output_dir),
            templates: self.templates.unwrap_or(base.templates),
            exclusions: self.exclusions.unwrap_or(base.exclusions),
        }
    }
}
