use std::collections::BTreeMap;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use certsurvey_core::{Action, ActionError, CertExpirationInfo, CertsInfo, JobName, SurveyError};
use certsurvey_fs::InMemoryFileSystem;
use certsurvey_runner::{
    ApplySpec, ApplySpecService, GetCertInfoAction, JobLocator, StaticApplySpecService,
};

const JOBS_ROOT: &str = "/var/vcap/jobs";
const NATS_CA: &str = include_str!("../fixtures/nats_ca.pem");
const NOT_AFTER: i64 = 1574372638;

const FIRST_PROP: &str = "nats.tls.client_ca.certificate";
const SECOND_PROP: &str = "other.tls.client.ca.certificate";
const JOBS: [&str; 2] = ["fake-job", "another-fake-job"];

fn cert_file_path(job: &str) -> String {
    format!("{JOBS_ROOT}/{job}/config/validate_certificate.yml")
}

fn fake_cert(prop: &str, valid: bool) -> String {
    if valid {
        let body: String = NATS_CA.lines().map(|l| format!("  {l}\n")).collect();
        format!("{prop}: |\n{body}")
    } else {
        format!("{prop}: |\n  UNPARSEABLE CERT\n")
    }
}

struct Fixture {
    fs: Arc<InMemoryFileSystem>,
    action: GetCertInfoAction,
}

fn fixture() -> Fixture {
    let fs = Arc::new(InMemoryFileSystem::new());
    for job in JOBS {
        fs.write_file_string(cert_file_path(job), "");
    }
    let specs = Arc::new(StaticApplySpecService::new(ApplySpec::with_job_names(JOBS)));
    let action = GetCertInfoAction::new(specs, fs.clone(), JobLocator::new(JOBS_ROOT));
    Fixture { fs, action }
}

fn ok(expires: i64) -> CertExpirationInfo {
    CertExpirationInfo::expiring_at(expires)
}

fn certs(entries: &[(&str, CertExpirationInfo)]) -> CertsInfo {
    CertsInfo::surveyed(entries.iter().map(|(k, v)| (k.to_string(), v.clone())).collect())
}

fn job(name: &str) -> JobName {
    JobName::from_str(name)
}

#[test]
fn classified_as_synchronous_loggable_and_final() {
    let f = fixture();
    assert!(!f.action.is_asynchronous());
    assert!(!f.action.is_persistent());
    assert!(f.action.is_loggable());
    assert_eq!(f.action.resume().unwrap_err(), ActionError::NotSupported);
    assert_eq!(f.action.cancel().unwrap_err(), ActionError::NotSupported);
}

#[test]
fn returns_expiry_per_job_for_valid_certs() {
    let f = fixture();
    for j in JOBS {
        let content = fake_cert(FIRST_PROP, true) + "\n" + &fake_cert(SECOND_PROP, true);
        f.fs.write_file_string(cert_file_path(j), &content);
    }

    let result = f.action.run().unwrap();

    let expected = certs(&[(FIRST_PROP, ok(NOT_AFTER)), (SECOND_PROP, ok(NOT_AFTER))]);
    assert_eq!(result.len(), 2);
    assert_eq!(result[&job("fake-job")], expected);
    assert_eq!(result[&job("another-fake-job")], expected);
}

#[test]
fn unparseable_cert_is_reported_per_property() {
    let f = fixture();
    for j in JOBS {
        f.fs.write_file_string(cert_file_path(j), &fake_cert(FIRST_PROP, false));
    }

    let result = f.action.run().unwrap();

    let expected = certs(&[(FIRST_PROP, CertExpirationInfo::decode_failed())]);
    for j in JOBS {
        assert_eq!(result[&job(j)], expected);
        assert_eq!(result[&job(j)].error_string, "");
    }
    assert_eq!(
        result[&job("fake-job")].certificates.as_ref().unwrap()[FIRST_PROP],
        CertExpirationInfo { expires: 0, error_string: "failed to decode certificate".into() }
    );
}

#[test]
fn empty_file_yields_empty_certificates() {
    let f = fixture();

    let result = f.action.run().unwrap();

    for j in JOBS {
        assert_eq!(result[&job(j)], CertsInfo { certificates: Some(BTreeMap::new()), error_string: String::new() });
    }
}

#[test]
fn mixed_valid_and_invalid_certs() {
    let f = fixture();
    for j in JOBS {
        let content = fake_cert("this.is.bad", false)
            + "\n"
            + &fake_cert(FIRST_PROP, true)
            + "\n"
            + &fake_cert(SECOND_PROP, true);
        f.fs.write_file_string(cert_file_path(j), &content);
    }

    let result = f.action.run().unwrap();

    let expected = certs(&[
        ("this.is.bad", CertExpirationInfo::decode_failed()),
        (FIRST_PROP, ok(NOT_AFTER)),
        (SECOND_PROP, ok(NOT_AFTER)),
    ]);
    for j in JOBS {
        assert_eq!(result[&job(j)], expected);
    }
}

#[test]
fn unmarshalable_yaml_fails_the_job_only() {
    let f = fixture();
    for j in JOBS {
        f.fs.write_file_string(cert_file_path(j), &format!("{FIRST_PROP}: |\nTHIS NO WORK"));
    }

    let result = f.action.run().unwrap();

    assert_eq!(result.len(), 2);
    for j in JOBS {
        let info = &result[&job(j)];
        assert!(info.certificates.is_none());
        let prefix = format!("Unmarshaling YAML for {} file failed: ", cert_file_path(j));
        assert!(info.error_string.starts_with(&prefix), "{}", info.error_string);
        assert!(info.error_string.len() > prefix.len());
    }
}

#[test]
fn missing_file_fails_that_job_only() {
    let f = fixture();
    f.fs.write_file_string(cert_file_path("fake-job"), &fake_cert(FIRST_PROP, true));
    f.fs.remove(Path::new(&cert_file_path("another-fake-job")));

    let result = f.action.run().unwrap();

    assert_eq!(result[&job("fake-job")], certs(&[(FIRST_PROP, ok(NOT_AFTER))]));
    assert_eq!(
        result[&job("another-fake-job")],
        CertsInfo::failed("/var/vcap/jobs/another-fake-job/config/validate_certificate.yml not found")
    );
}

#[test]
fn unreadable_file_reads_as_not_found() {
    let f = fixture();
    f.fs.set_unreadable(cert_file_path("fake-job"));

    let result = f.action.run().unwrap();

    assert_eq!(
        result[&job("fake-job")],
        CertsInfo::failed("/var/vcap/jobs/fake-job/config/validate_certificate.yml not found")
    );
    assert_eq!(result[&job("another-fake-job")], CertsInfo::surveyed(BTreeMap::new()));
}

#[test]
fn every_job_gets_exactly_one_exclusive_entry() {
    let f = fixture();
    f.fs.write_file_string(cert_file_path("fake-job"), "- not\n- a map\n");
    f.fs.remove(Path::new(&cert_file_path("another-fake-job")));

    let result = f.action.run().unwrap();

    assert_eq!(result.len(), JOBS.len());
    for info in result.values() {
        assert_eq!(info.certificates.is_none(), !info.error_string.is_empty());
    }
}

struct FailingSpecService;

impl ApplySpecService for FailingSpecService {
    fn get(&self) -> anyhow::Result<ApplySpec> {
        Err(anyhow!("spec.json: no such file"))
    }
}

#[test]
fn unavailable_apply_spec_is_a_hard_error() {
    let fs = Arc::new(InMemoryFileSystem::new());
    let action = GetCertInfoAction::new(Arc::new(FailingSpecService), fs, JobLocator::new(JOBS_ROOT));

    match action.run() {
        Err(SurveyError::ApplySpec(msg)) => assert!(msg.contains("no such file")),
        other => panic!("expected apply spec error, got {other:?}"),
    }
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn decode_failure_log_names_job_and_path() {
    let f = fixture();
    f.fs.write_file_string(cert_file_path("another-fake-job"), &fake_cert("this.is.bad", false));

    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, || f.action.run().unwrap());

    let out = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    let line = out
        .lines()
        .find(|l| l.contains("certificate decode failed"))
        .unwrap_or_else(|| panic!("no decode failure logged:\n{out}"));
    assert!(line.contains("job=another-fake-job"), "{line}");
    assert!(line.contains(&cert_file_path("another-fake-job")), "{line}");
    assert!(line.contains("property=this.is.bad"), "{line}");
}
