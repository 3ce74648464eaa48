use std::path::{Path, PathBuf};

use certsurvey_core::{JobError, JobName};
use certsurvey_fs::FileSystem;

pub const CERT_FILE_NAME: &str = "validate_certificate.yml";

/// Maps a job to `<jobs_root>/<job>/config/validate_certificate.yml`.
#[derive(Clone, Debug)]
pub struct JobLocator {
    jobs_root: PathBuf,
}

impl JobLocator {
    pub fn new(jobs_root: impl Into<PathBuf>) -> Self {
        Self { jobs_root: jobs_root.into() }
    }

    pub fn jobs_root(&self) -> &Path {
        &self.jobs_root
    }

    pub fn config_path(&self, job: &JobName) -> PathBuf {
        self.jobs_root.join(job.as_str()).join("config").join(CERT_FILE_NAME)
    }

    /// Path of the job's certificate file if it exists. Absence comes back
    /// as a job-level error value.
    pub fn locate(&self, fs: &dyn FileSystem, job: &JobName) -> Result<PathBuf, JobError> {
        let path = self.config_path(job);
        if fs.exists(&path) {
            Ok(path)
        } else {
            Err(JobError::NotFound { path })
        }
    }
}
