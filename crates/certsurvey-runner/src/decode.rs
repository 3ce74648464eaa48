use std::collections::BTreeMap;
use std::path::Path;

use certsurvey_core::JobError;
use certsurvey_fs::FileSystem;
use serde::Deserialize;
use tracing::debug;

/// Property name -> raw PEM text, as found in one job's certificate file.
pub type PropertyCertMap = BTreeMap<String, String>;

/// Read and decode a job's certificate file.
///
/// Read failures are reported the same way as a missing file. A file holding
/// only whitespace or comments decodes to an empty map. Only the first YAML
/// document is read. Values are taken as text; whether they hold a
/// certificate is decided later.
pub fn decode_property_certs(fs: &dyn FileSystem, path: &Path) -> Result<PropertyCertMap, JobError> {
    let bytes = match fs.read_file(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "certificate file unreadable");
            return Err(JobError::NotFound { path: path.to_path_buf() });
        }
    };
    parse_property_certs(&bytes).map_err(|e| JobError::Unmarshal {
        format: "YAML",
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

pub fn parse_property_certs(bytes: &[u8]) -> Result<PropertyCertMap, serde_yaml::Error> {
    if is_blank_document(bytes) {
        return Ok(PropertyCertMap::new());
    }
    let Some(first) = serde_yaml::Deserializer::from_slice(bytes).next() else {
        return Ok(PropertyCertMap::new());
    };
    let doc = Option::<BTreeMap<String, Option<String>>>::deserialize(first)?;
    Ok(doc
        .unwrap_or_default()
        .into_iter()
        .map(|(k, v)| (k, v.unwrap_or_default()))
        .collect())
}

fn is_blank_document(bytes: &[u8]) -> bool {
    let Ok(s) = std::str::from_utf8(bytes) else { return false };
    s.lines().all(|l| {
        let l = l.trim();
        l.is_empty() || l.starts_with('#')
    })
}
