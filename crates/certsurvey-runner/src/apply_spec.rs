use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use certsurvey_core::JobName;
use certsurvey_fs::FileSystem;
use serde::{Deserialize, Serialize};

/// The subset of the agent's apply spec the survey consumes.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ApplySpec {
    #[serde(default)]
    pub job: JobSpec,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct JobSpec {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub templates: Vec<JobTemplateSpec>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JobTemplateSpec {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
}

impl ApplySpec {
    pub fn with_job_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            job: JobSpec {
                name: None,
                templates: names
                    .into_iter()
                    .map(|n| JobTemplateSpec { name: n.into(), version: None })
                    .collect(),
            },
        }
    }

    /// Names of the currently deployed job templates, in document order.
    pub fn job_names(&self) -> Vec<JobName> {
        self.job.templates.iter().map(|t| JobName::from_str(t.name.clone())).collect()
    }
}

pub trait ApplySpecService: Send + Sync {
    fn get(&self) -> Result<ApplySpec>;
}

/// Reads the apply spec JSON through the filesystem collaborator.
pub struct FileApplySpecService {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl FileApplySpecService {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Self {
        Self { fs, path: path.into() }
    }
}

impl ApplySpecService for FileApplySpecService {
    fn get(&self) -> Result<ApplySpec> {
        let s = self
            .fs
            .read_file_string(&self.path)
            .with_context(|| format!("read apply spec {}", self.path.display()))?;
        let spec: ApplySpec = serde_json::from_str(&s)
            .with_context(|| format!("parse apply spec {}", self.path.display()))?;
        Ok(spec)
    }
}

/// Fixed spec, for `--job` on the command line and for tests.
#[derive(Clone, Debug, Default)]
pub struct StaticApplySpecService {
    pub spec: ApplySpec,
}

impl StaticApplySpecService {
    pub fn new(spec: ApplySpec) -> Self {
        Self { spec }
    }
}

impl ApplySpecService for StaticApplySpecService {
    fn get(&self) -> Result<ApplySpec> {
        Ok(self.spec.clone())
    }
}
