use std::collections::BTreeMap;

use certsurvey_core::{CertDecodeError, JobName, PropertyOutcome};
use tracing::{debug, warn};
use x509_parser::pem::parse_x509_pem;

use crate::decode::PropertyCertMap;

/// Not-after time (unix seconds) of the first PEM certificate found in `raw`.
///
/// Text before the `-----BEGIN` line is skipped. A not-after at or before the
/// unix epoch is rejected.
pub fn cert_expiration(raw: &str) -> Result<i64, CertDecodeError> {
    let (_, pem) = parse_x509_pem(raw.as_bytes())
        .map_err(|e| CertDecodeError::new(format!("parse PEM: {e}")))?;
    let cert = pem
        .parse_x509()
        .map_err(|e| CertDecodeError::new(format!("parse X.509 certificate: {e}")))?;
    checked_not_after(cert.validity().not_after.timestamp())
}

fn checked_not_after(ts: i64) -> Result<i64, CertDecodeError> {
    if ts <= 0 {
        return Err(CertDecodeError::new(format!("not-after {ts} is not after the unix epoch")));
    }
    Ok(ts)
}

/// Decode every property independently; a bad entry only affects its own outcome.
pub fn extract_expirations(job: &JobName, certs: PropertyCertMap) -> BTreeMap<String, PropertyOutcome> {
    certs
        .into_iter()
        .map(|(property, raw)| {
            let outcome = match cert_expiration(&raw) {
                Ok(expires) => {
                    debug!(job = %job, property = %property, expires, "certificate decoded");
                    PropertyOutcome::Expires(expires)
                }
                Err(e) => {
                    warn!(job = %job, property = %property, error = %e.detail, "certificate decode failed");
                    PropertyOutcome::DecodeFailed(e)
                }
            };
            (property, outcome)
        })
        .collect()
}
