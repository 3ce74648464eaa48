use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{error::CERT_DECODE_FAILED, ids::JobName};

/// Expiration of a single certificate property.
///
/// Exactly one of two shapes is ever built: `expires` set with an empty
/// `error_string`, or `expires == 0` with the fixed decode-failure text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertExpirationInfo {
    /// Not-after time, unix seconds.
    pub expires: i64,
    pub error_string: String,
}

impl CertExpirationInfo {
    pub fn expiring_at(expires: i64) -> Self {
        Self { expires, error_string: String::new() }
    }

    pub fn decode_failed() -> Self {
        Self { expires: 0, error_string: CERT_DECODE_FAILED.to_string() }
    }

    pub fn is_ok(&self) -> bool {
        self.error_string.is_empty()
    }
}

/// Per-job survey record.
///
/// `certificates` is `None` iff `error_string` is non-empty. An empty map
/// means the config file was present and held no properties.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertsInfo {
    pub certificates: Option<BTreeMap<String, CertExpirationInfo>>,
    pub error_string: String,
}

impl CertsInfo {
    pub fn surveyed(certificates: BTreeMap<String, CertExpirationInfo>) -> Self {
        Self { certificates: Some(certificates), error_string: String::new() }
    }

    pub fn failed(error_string: impl Into<String>) -> Self {
        Self { certificates: None, error_string: error_string.into() }
    }

    pub fn is_ok(&self) -> bool {
        self.error_string.is_empty()
    }
}

/// One entry per enumerated job.
pub type SurveyResult = BTreeMap<JobName, CertsInfo>;

/// Certificates across the whole result that decoded and expire strictly before `deadline`.
pub fn expiring_before(result: &SurveyResult, deadline: i64) -> Vec<(&JobName, &str, i64)> {
    let mut out = vec![];
    for (job, info) in result {
        let Some(certs) = &info.certificates else { continue };
        for (property, cert) in certs {
            if cert.is_ok() && cert.expires < deadline {
                out.push((job, property.as_str(), cert.expires));
            }
        }
    }
    out
}
