use anyhow::Result;
use comfy_table::{Cell, CellAlignment, Table};
use tracing::info_span;

use perf_cli::pipeline::run_analysis;
use perf_cli::types::{AnalysisOptions, AnalysisResult};
use perf_transform::default_catalog;

use crate::cli::AnalyzeArgs;
use crate::summary::{align_column, apply_table_style, header_cell};

pub fn run_strategies() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Strategy"), header_cell("Description")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (idx, strategy) in default_catalog().list().iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(strategy.name()),
            Cell::new(strategy.description()),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_analyze(args: &AnalyzeArgs) -> Result<AnalysisResult> {
    let span = info_span!("analyze", input = %args.input.display());
    let _guard = span.enter();
    run_analysis(&options_from_args(args))
}

fn options_from_args(args: &AnalyzeArgs) -> AnalysisOptions {
    AnalysisOptions {
        input: args.input.clone(),
        output_dir: args.output_dir.clone(),
        alpha: args.alpha,
        cap_quantile: (!args.no_cap).then_some(args.cap_quantile),
        bins: args.bins,
        plots: !args.no_plots,
    }
}
