use std::sync::Arc;

use certsurvey_core::{Action, ActionError, JobName, JobOutcome, SurveyError, SurveyResult};
use certsurvey_fs::FileSystem;
use tracing::{debug, info, info_span, warn};

use crate::{
    apply_spec::ApplySpecService, cert::extract_expirations, decode::decode_property_certs,
    locator::JobLocator,
};

/// Reports the expiration of every certificate declared by each deployed job.
///
/// `run` only fails when the apply spec cannot be obtained. Missing files,
/// malformed YAML and undecodable certificates are recorded in the result.
pub struct GetCertInfoAction {
    spec_service: Arc<dyn ApplySpecService>,
    fs: Arc<dyn FileSystem>,
    locator: JobLocator,
}

impl GetCertInfoAction {
    pub fn new(spec_service: Arc<dyn ApplySpecService>, fs: Arc<dyn FileSystem>, locator: JobLocator) -> Self {
        Self { spec_service, fs, locator }
    }

    pub fn run(&self) -> Result<SurveyResult, SurveyError> {
        let spec = self
            .spec_service
            .get()
            .map_err(|e| SurveyError::ApplySpec(format!("{e:#}")))?;
        let jobs = spec.job_names();
        info!(jobs = jobs.len(), jobs_root = %self.locator.jobs_root().display(), "surveying certificates");

        let mut result = SurveyResult::new();
        for job in jobs {
            let outcome = self.survey_job(&job);
            result.insert(job, outcome.into());
        }

        let failed = result.values().filter(|info| !info.is_ok()).count();
        info!(jobs = result.len(), failed, "certificate survey finished");
        Ok(result)
    }

    pub fn survey_job(&self, job: &JobName) -> JobOutcome {
        let path = match self.locator.locate(self.fs.as_ref(), job) {
            Ok(path) => path,
            Err(e) => {
                warn!(job = %job, error = %e, "no certificate file");
                return JobOutcome::Failed(e);
            }
        };

        let _span = info_span!("survey_job", path = %path.display()).entered();
        match decode_property_certs(self.fs.as_ref(), &path) {
            Ok(certs) => {
                debug!(job = %job, properties = certs.len(), "decoded certificate file");
                JobOutcome::Surveyed(extract_expirations(job, certs))
            }
            Err(e) => {
                warn!(job = %job, error = %e, "certificate file rejected");
                JobOutcome::Failed(e)
            }
        }
    }
}

impl Action for GetCertInfoAction {
    type Output = SurveyResult;

    fn is_asynchronous(&self) -> bool {
        false
    }

    fn is_persistent(&self) -> bool {
        false
    }

    fn is_loggable(&self) -> bool {
        true
    }

    fn resume(&self) -> Result<SurveyResult, ActionError> {
        Err(ActionError::NotSupported)
    }

    fn cancel(&self) -> Result<(), ActionError> {
        Err(ActionError::NotSupported)
    }
}
