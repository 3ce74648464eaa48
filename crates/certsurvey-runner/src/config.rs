use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_JOBS_ROOT: &str = "/var/vcap/jobs";
pub const DEFAULT_APPLY_SPEC_PATH: &str = "/var/vcap/bosh/spec.json";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SurveyConfig {
    #[serde(default = "default_jobs_root")]
    pub jobs_root: String,
    #[serde(default = "default_apply_spec_path")]
    pub apply_spec_path: String,
}

fn default_jobs_root() -> String {
    DEFAULT_JOBS_ROOT.to_string()
}

fn default_apply_spec_path() -> String {
    DEFAULT_APPLY_SPEC_PATH.to_string()
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            jobs_root: default_jobs_root(),
            apply_spec_path: default_apply_spec_path(),
        }
    }
}

impl SurveyConfig {
    pub fn load_from(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let cfg: SurveyConfig = toml::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
        Ok(cfg)
    }

    pub fn jobs_root(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.jobs_root).to_string())
    }

    pub fn apply_spec_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.apply_spec_path).to_string())
    }
}
