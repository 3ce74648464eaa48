use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use certsurvey_core::expiring_before;
use certsurvey_fs::{FileSystem, OsFileSystem};
use certsurvey_runner::{
    ApplySpec, ApplySpecService, FileApplySpecService, GetCertInfoAction, JobLocator, StaticApplySpecService,
    SurveyConfig,
};

#[derive(Parser)]
#[command(name = "certsurvey", version, about = "Report certificate expiration for deployed jobs")]
struct Cli {
    /// TOML config file (jobs_root, apply_spec_path)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the jobs root directory
    #[arg(long)]
    jobs_root: Option<String>,

    /// Override the apply spec JSON path
    #[arg(long)]
    apply_spec: Option<String>,

    /// Survey these jobs instead of reading the apply spec (repeatable)
    #[arg(long = "job")]
    jobs: Vec<String>,

    /// Exit with status 2 if a decoded certificate expires within this many days
    #[arg(long)]
    check_expiring_within: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut cfg = match &cli.config {
        Some(path) => SurveyConfig::load_from(path)?,
        None => SurveyConfig::default(),
    };
    if let Some(root) = cli.jobs_root {
        cfg.jobs_root = root;
    }
    if let Some(spec) = cli.apply_spec {
        cfg.apply_spec_path = spec;
    }

    let fs: Arc<dyn FileSystem> = Arc::new(OsFileSystem::new());
    let specs: Arc<dyn ApplySpecService> = if cli.jobs.is_empty() {
        Arc::new(FileApplySpecService::new(fs.clone(), cfg.apply_spec_path()))
    } else {
        Arc::new(StaticApplySpecService::new(ApplySpec::with_job_names(cli.jobs)))
    };

    let action = GetCertInfoAction::new(specs, fs, JobLocator::new(cfg.jobs_root()));
    let result = action.run().context("certificate survey")?;

    println!("{}", serde_json::to_string_pretty(&result)?);

    if let Some(days) = cli.check_expiring_within {
        let deadline = expiry_deadline(certsurvey_runner::now_unix(), days);
        let expiring = expiring_before(&result, deadline);
        for (job, property, expires) in &expiring {
            warn!(job = %job, property = %property, expires, "certificate expires within {days} days");
        }
        if !expiring.is_empty() {
            std::process::exit(2);
        }
    }

    Ok(())
}

/// `now` plus `days`, clamped to `i64::MAX`.
fn expiry_deadline(now: i64, days: u64) -> i64 {
    let days = i64::try_from(days).unwrap_or(i64::MAX);
    now.saturating_add(days.saturating_mul(86_400))
}
