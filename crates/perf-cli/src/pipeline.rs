//! Analysis pipeline: ingest, score, normalize, tier, write.
//!
//! Each stage runs inside its own `info_span` and logs its duration. Errors
//! carry context naming the stage and file involved; nothing here exits the
//! process.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span, warn};

use perf_common::population_std_dev;
use perf_ingest::{
    CleaningOptions, clean_records, load_employee_table, score_employees, score_sample,
};
use perf_model::{NormalityResult, ScoredEmployee, TierThresholds};
use perf_report::{
    AnalysisSummary, NORMAL_PLOT_FILE, NormalitySummary, PERFORMANCE_HISTOGRAM_FILE,
    RecordCounts, StrategySummary, TRANSFORMATION_HISTOGRAMS_FILE, TierCount, categorize,
    compute_thresholds, plot_normal_distribution, plot_performance_histogram,
    plot_transformation_histograms, tier_counts, write_analysis_summary_json,
    write_categorized_csv,
};
use perf_transform::{
    Evaluation, NormalitySelector, OriginalTransformation, TransformationStrategy, default_catalog,
};

use crate::types::{AnalysisOptions, AnalysisResult, OutputPaths};

/// Runs the full analysis and writes its outputs under `options.output_dir`.
pub fn run_analysis(options: &AnalysisOptions) -> Result<AnalysisResult> {
    validate_options(options)?;
    let run_span = info_span!("analysis", input = %options.input.display());
    let _run_guard = run_span.enter();

    // Stage 1: load and clean
    let ingest_start = Instant::now();
    let cleaned = info_span!("ingest").in_scope(|| -> Result<_> {
        let table = load_employee_table(&options.input)
            .with_context(|| format!("load {}", options.input.display()))?;
        let cleaning = CleaningOptions {
            cap_quantile: options.cap_quantile,
        };
        clean_records(&table, &cleaning).context("clean employee records")
    })?;
    info!(
        kept_rows = cleaned.records.len(),
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );

    // Stage 2: composite scores
    let scored: Vec<ScoredEmployee> = score_employees(&cleaned.records);
    let sample = score_sample(&scored);

    // Stage 3: normality and transformation selection
    let normality_start = Instant::now();
    let normality_span = info_span!("normality", employees = sample.len());
    let (initial, selection, evaluation) = normality_span.in_scope(|| -> Result<_> {
        let initial = initial_normality(&sample, options.alpha);
        let selector = NormalitySelector::new(default_catalog());
        let (selection, evaluation) = selector
            .apply_best(&sample)
            .context("select a normalizing transformation")?;
        Ok((initial, selection, evaluation))
    })?;
    let post_transform = post_transform_normality(&evaluation, &selection.strategy);
    info!(
        strategy = %selection.strategy,
        p_value = post_transform.as_ref().map(|r| r.p_value),
        duration_ms = normality_start.elapsed().as_millis(),
        "selected transformation"
    );

    // Stage 4: tiers, computed on the raw scores
    let thresholds = compute_thresholds(&sample).context("compute tier thresholds")?;
    let categorized = categorize(&scored, &thresholds);
    let counts = tier_counts(&categorized);
    info!(
        poor = thresholds.poor,
        average = thresholds.average,
        good = thresholds.good,
        best = thresholds.best,
        "tier thresholds"
    );

    // Stage 5: outputs
    let output_start = Instant::now();
    let output_span = info_span!("output", output_dir = %options.output_dir.display());
    let outputs = output_span.in_scope(|| -> Result<OutputPaths> {
        let mut outputs = OutputPaths {
            categorized_csv: Some(
                write_categorized_csv(&options.output_dir, &categorized)
                    .context("write categorized employees")?,
            ),
            ..OutputPaths::default()
        };

        let summary = AnalysisSummary {
            source: options.input.display().to_string(),
            alpha: options.alpha,
            records: RecordCounts {
                input_rows: cleaned.report.input_rows,
                kept_rows: cleaned.records.len(),
                dropped_missing: cleaned.report.dropped_missing,
                dropped_invalid: cleaned.report.dropped_invalid,
            },
            initial_normality: initial
                .as_ref()
                .map(|r| NormalitySummary::new(r, options.alpha)),
            strategies: StrategySummary::from_evaluation(&evaluation, options.alpha),
            selected_strategy: Some(selection.strategy.clone()),
            post_transform_normality: post_transform
                .as_ref()
                .map(|r| NormalitySummary::new(r, options.alpha)),
            thresholds,
            tier_counts: counts
                .iter()
                .map(|(tier, count)| TierCount {
                    tier: *tier,
                    count: *count,
                })
                .collect(),
        };
        outputs.summary_json = Some(
            write_analysis_summary_json(&options.output_dir, &summary)
                .context("write analysis summary")?,
        );

        if options.plots {
            outputs.plots = render_plots(options, &sample, &evaluation, &thresholds)?;
        }
        Ok(outputs)
    })?;
    info!(
        plots = outputs.plots.len(),
        duration_ms = output_start.elapsed().as_millis(),
        "output complete"
    );

    Ok(AnalysisResult {
        input: options.input.clone(),
        output_dir: options.output_dir.clone(),
        alpha: options.alpha,
        cleaning: cleaned.report,
        employees: scored.len(),
        initial_normality: initial,
        evaluation,
        selected_strategy: selection.strategy,
        post_transform_normality: post_transform,
        thresholds,
        tier_counts: counts,
        outputs,
    })
}

fn validate_options(options: &AnalysisOptions) -> Result<()> {
    if !(options.alpha > 0.0 && options.alpha < 1.0) {
        bail!("alpha must be in (0, 1), got {}", options.alpha);
    }
    if options.bins == 0 {
        bail!("histogram bins must be at least 1");
    }
    Ok(())
}

/// Shapiro-Wilk on the raw scores, logged the way an analyst reads it.
fn initial_normality(sample: &[f64], alpha: f64) -> Option<NormalityResult> {
    match OriginalTransformation.test_normality(sample) {
        Ok(result) => {
            if result.is_normal_at(alpha) {
                info!(
                    statistic = result.statistic,
                    p_value = result.p_value,
                    "scores are normally distributed"
                );
            } else {
                info!(
                    statistic = result.statistic,
                    p_value = result.p_value,
                    "scores are not normally distributed, trying transformations"
                );
            }
            Some(result)
        }
        Err(failure) => {
            warn!(%failure, "cannot test raw scores for normality");
            None
        }
    }
}

fn post_transform_normality(evaluation: &Evaluation, strategy: &str) -> Option<NormalityResult> {
    evaluation
        .get(strategy)
        .and_then(|outcome| outcome.as_ref().ok())
        .cloned()
}

fn render_plots(
    options: &AnalysisOptions,
    sample: &[f64],
    evaluation: &Evaluation,
    thresholds: &TierThresholds,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(&options.output_dir)
        .with_context(|| format!("create {}", options.output_dir.display()))?;
    let dir: &Path = &options.output_dir;
    let mut written = Vec::new();

    let path = dir.join(PERFORMANCE_HISTOGRAM_FILE);
    plot_performance_histogram(&path, sample, options.bins)
        .with_context(|| format!("plot {}", path.display()))?;
    written.push(path);

    let path = dir.join(TRANSFORMATION_HISTOGRAMS_FILE);
    plot_transformation_histograms(&path, evaluation, options.bins)
        .with_context(|| format!("plot {}", path.display()))?;
    written.push(path);

    if population_std_dev(sample).is_some_and(|std_dev| std_dev > 0.0) {
        let path = dir.join(NORMAL_PLOT_FILE);
        plot_normal_distribution(&path, sample, thresholds)
            .with_context(|| format!("plot {}", path.display()))?;
        written.push(path);
    } else {
        warn!("scores have no spread, skipping normal distribution plot");
    }

    Ok(written)
}
