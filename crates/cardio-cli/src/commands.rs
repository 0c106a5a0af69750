use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use polars::prelude::DataFrame;
use tracing::{Level, info, info_span, trace, warn};

use cardio_core::FeaturePipeline;
use cardio_ingest::{IngestOptions, read_survey_csv, write_survey_csv};
use cardio_model::CorrectionOptions;
use cardio_transform::{add_pressure_sum, age_to_years};

use crate::cli::{CleanArgs, StatsArgs};
use crate::logging::redact_value;
use crate::types::{CleanResult, StatsResult};

const PREVIEW_ROWS: usize = 5;

/// Load correction options from a JSON file, or the defaults when no file
/// is given. Keys missing from the file keep their default.
pub fn load_options(path: Option<&Path>) -> Result<CorrectionOptions> {
    let Some(path) = path else {
        return Ok(CorrectionOptions::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let options: CorrectionOptions = serde_json::from_str(&text)
        .with_context(|| format!("parse config {}", path.display()))?;
    options
        .validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    info!(path = %path.display(), "loaded correction options");
    Ok(options)
}

fn ingest_options(separator: char) -> Result<IngestOptions> {
    let byte = u8::try_from(separator)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| anyhow!("separator must be one ASCII character, got {separator:?}"))?;
    Ok(IngestOptions::default().with_separator(byte))
}

fn read(path: &Path, options: &IngestOptions, role: &str) -> Result<DataFrame> {
    read_survey_csv(path, options).with_context(|| format!("read {role} {}", path.display()))
}

pub fn run_clean(args: &CleanArgs) -> Result<CleanResult> {
    let span = info_span!("clean", input = %args.input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let options = load_options(args.config.as_deref())?;
    let ingest = ingest_options(args.separator)?;
    let reference = read(&args.reference, &ingest, "reference")?;
    let input = read(&args.input, &ingest, "input")?;

    let mut pipeline = FeaturePipeline::new(&options, ())?;
    pipeline.fit_correctors(&reference)?;
    let correction = pipeline.correct(&input)?;

    let mut records = correction.records;
    if args.age_years {
        records = age_to_years(&records).context("convert age to years")?;
    }
    if args.pressure_sum {
        records = add_pressure_sum(&records).context("add pressure sum")?;
    }
    log_preview(&records);

    write_survey_csv(&mut records, &args.output, &ingest)
        .with_context(|| format!("write output {}", args.output.display()))?;

    let result = CleanResult {
        reference: args.reference.clone(),
        input: args.input.clone(),
        output: args.output.clone(),
        reference_records: reference.height(),
        records: records.height(),
        reports: correction.reports,
    };
    if let Some(path) = &args.report {
        write_report(path, &result)?;
    }
    if result.unresolved() > 0 {
        warn!(
            unresolved = result.unresolved(),
            "some values had no reference group and remain missing"
        );
    }
    info!(
        records = result.records,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "cleaned survey"
    );
    Ok(result)
}

pub fn run_stats(args: &StatsArgs) -> Result<StatsResult> {
    let span = info_span!("stats", reference = %args.reference.display());
    let _guard = span.enter();

    let options = load_options(args.config.as_deref())?;
    let ingest = ingest_options(args.separator)?;
    let reference = read(&args.reference, &ingest, "reference")?;

    let mut pipeline = FeaturePipeline::new(&options, ())?;
    pipeline.fit_correctors(&reference)?;
    Ok(StatsResult {
        reference: args.reference.clone(),
        records: reference.height(),
        weight: pipeline.body_metrics().stats().clone(),
        pressure: pipeline.blood_pressure().stats().clone(),
    })
}

fn write_report(path: &Path, result: &CleanResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result).context("serialize report")?;
    fs::write(path, json).with_context(|| format!("write report {}", path.display()))?;
    info!(path = %path.display(), "wrote correction report");
    Ok(())
}

fn log_preview(records: &DataFrame) {
    if !tracing::enabled!(Level::TRACE) {
        return;
    }
    let preview = records.head(Some(PREVIEW_ROWS)).to_string();
    trace!(rows = PREVIEW_ROWS, preview = %redact_value(&preview), "corrected records");
}
