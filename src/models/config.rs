use std::{
    collections::{HashMap, HashSet},
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use reqwest::Url;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::debug;

use crate::{
    models::artifact::{ArtifactSpec, ProvisioningTarget},
    utils::{
        dir::DirUtils,
        errors::{EmptyResult, ResultTrait, ResultWithError},
        variables::VariablesUtils,
    },
};

/// Build file describing the artifacts to provision and the tasks to run.
#[derive(Debug, Deserialize, Clone, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub provision: ProvisionConfig,
    #[serde(default)]
    pub tasks: Vec<TaskConfig>,

    /// Directory containing the build file. Relative paths resolve against it.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl Config {
    pub fn load(explicit: Option<&Path>) -> ResultWithError<Self> {
        let config_path = DirUtils::config_path(explicit)?;
        debug!("Loading config from {:?}", config_path);

        let content = fs::read_to_string(&config_path).auto_err(&format!(
            "Could not read config file {}",
            config_path.display()
        ))?;

        let base_dir = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self::from_yaml(&content, base_dir)
    }

    pub fn from_yaml(content: &str, base_dir: PathBuf) -> ResultWithError<Self> {
        let expanded = VariablesUtils::expand_env_vars(content);
        debug!("Config expanded");

        let mut config: Config =
            serde_yaml::from_str(&expanded).auto_err("Invalid config format")?;
        config.base_dir = base_dir;
        config.validate()?;
        debug!("Config validated");

        Ok(config)
    }

    fn validate(&self) -> EmptyResult {
        let mut seen = HashSet::new();
        for artifact in &self.provision.artifacts {
            artifact.validate()?;
            if !seen.insert(artifact.file_name.as_str()) {
                return Err(format!("Duplicate artifact file name: {}", artifact.file_name).into());
            }
        }
        Ok(())
    }

    pub fn target(&self) -> ResultWithError<ProvisioningTarget> {
        let path = DirUtils::resolve(&self.base_dir, &self.provision.target_dir)?;
        Ok(ProvisioningTarget::new(path))
    }
}

#[derive(Debug, Deserialize, Clone, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ProvisionConfig {
    /// Name of the provisioning task in the task graph.
    #[serde(default = "default_task_name")]
    pub task_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub group: Option<String>,

    /// Destination directory, relative to the build file unless absolute.
    #[serde(default = "default_target_dir")]
    pub target_dir: PathBuf,

    /// Optional per-request timeout. No timeout when omitted.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Show a progress bar while artifacts download.
    #[serde(default = "default_true")]
    pub progress: bool,

    /// Tasks that may only run once provisioning has succeeded.
    #[serde(default)]
    pub required_by: Vec<String>,

    pub artifacts: Vec<ArtifactConfig>,
}

impl ProvisionConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn specs(&self) -> Vec<ArtifactSpec> {
        self.artifacts
            .iter()
            .map(|a| ArtifactSpec::new(&a.file_name, &a.url))
            .collect()
    }
}

fn default_task_name() -> String {
    "downloadArtifacts".to_string()
}

fn default_target_dir() -> PathBuf {
    PathBuf::from("libs")
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ArtifactConfig {
    /// File name inside the target directory, e.g. "Geyser-Spigot.jar"
    pub file_name: String,
    /// HTTP(S) URL the file is downloaded from when missing
    pub url: String,
}

impl ArtifactConfig {
    fn validate(&self) -> EmptyResult {
        let name = self.file_name.as_str();
        if name.is_empty()
            || name == "."
            || name == ".."
            || name.contains(['/', '\\'])
            || name.contains('\0')
        {
            return Err(format!("Invalid artifact file name: '{name}'").into());
        }

        let url = Url::parse(&self.url).auto_err(&format!("Invalid URL for {name}"))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!(
                "Unsupported URL scheme '{}' for {name}, expected http or https",
                url.scheme()
            )
            .into());
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TaskConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    /// Command line, split shell-style. Runs in the build file's directory.
    pub command: String,
    #[serde(default)]
    pub env: Option<HashMap<String, String>>,
    #[serde(default)]
    pub depends_on: Vec<String>,
}
