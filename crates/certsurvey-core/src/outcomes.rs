use std::collections::BTreeMap;

use crate::{
    error::{CertDecodeError, JobError},
    model::{CertExpirationInfo, CertsInfo},
};

/// Result of decoding one property's certificate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyOutcome {
    Expires(i64),
    DecodeFailed(CertDecodeError),
}

/// Result of surveying one job. Each variant is terminal for the job.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JobOutcome {
    /// File present and decoded; may hold zero properties.
    Surveyed(BTreeMap<String, PropertyOutcome>),
    Failed(JobError),
}

impl From<PropertyOutcome> for CertExpirationInfo {
    fn from(outcome: PropertyOutcome) -> Self {
        match outcome {
            PropertyOutcome::Expires(ts) => CertExpirationInfo::expiring_at(ts),
            PropertyOutcome::DecodeFailed(_) => CertExpirationInfo::decode_failed(),
        }
    }
}

impl From<JobOutcome> for CertsInfo {
    fn from(outcome: JobOutcome) -> Self {
        match outcome {
            JobOutcome::Surveyed(props) => CertsInfo::surveyed(
                props.into_iter().map(|(k, v)| (k, CertExpirationInfo::from(v))).collect(),
            ),
            JobOutcome::Failed(err) => CertsInfo::failed(err.to_string()),
        }
    }
}
