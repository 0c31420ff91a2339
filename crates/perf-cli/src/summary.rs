use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use perf_cli::types::AnalysisResult;
use perf_model::PerformanceTier;

pub fn print_summary(result: &AnalysisResult) {
    println!("Input: {}", result.input.display());
    println!("Output: {}", result.output_dir.display());
    println!(
        "Employees: {} of {} rows ({} missing, {} invalid)",
        result.employees,
        result.cleaning.input_rows,
        result.cleaning.dropped_missing,
        result.cleaning.dropped_invalid
    );
    match &result.initial_normality {
        Some(initial) if initial.is_normal_at(result.alpha) => println!(
            "Raw scores are normally distributed (W = {:.4}, p = {:.4})",
            initial.statistic, initial.p_value
        ),
        Some(initial) => println!(
            "Raw scores are not normally distributed (W = {:.4}, p = {:.4})",
            initial.statistic, initial.p_value
        ),
        None => println!("Raw scores could not be tested for normality"),
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Strategy"),
        header_cell("W"),
        header_cell("p-value"),
        header_cell("Excluded"),
        header_cell("Normal"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 4, CellAlignment::Center);
    for entry in result.evaluation.entries() {
        let selected = entry.strategy == result.selected_strategy;
        let name = if selected {
            Cell::new(format!("{} *", entry.strategy))
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(&entry.strategy)
        };
        match &entry.outcome {
            Ok(normality) => table.add_row(vec![
                name,
                Cell::new(format!("{:.4}", normality.statistic)),
                Cell::new(format!("{:.4}", normality.p_value)),
                count_cell(normality.excluded, Color::Yellow),
                if normality.is_normal_at(result.alpha) {
                    Cell::new("yes").fg(Color::Green)
                } else {
                    dim_cell("no")
                },
            ]),
            Err(failure) => table.add_row(vec![
                name,
                Cell::new(failure.to_string()).fg(Color::Red),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
            ]),
        };
    }
    println!();
    println!("Transformations (* selected):");
    println!("{table}");

    let mut tiers = Table::new();
    tiers.set_header(vec![
        header_cell("Tier"),
        header_cell("Percentile"),
        header_cell("Threshold"),
        header_cell("Employees"),
    ]);
    apply_table_style(&mut tiers);
    for index in 1..=3 {
        align_column(&mut tiers, index, CellAlignment::Right);
    }
    for (tier, count) in &result.tier_counts {
        tiers.add_row(vec![
            tier_cell(*tier),
            Cell::new(format!("{:.0}th", tier.percentile())),
            Cell::new(format!("{:.2}", result.thresholds.get(*tier))),
            Cell::new(count),
        ]);
    }
    println!();
    println!("Tiers:");
    println!("{tiers}");

    let outputs = &result.outputs;
    for path in outputs
        .categorized_csv
        .iter()
        .chain(outputs.summary_json.iter())
        .chain(outputs.plots.iter())
    {
        println!("Wrote {}", path.display());
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn tier_cell(tier: PerformanceTier) -> Cell {
    let color = match tier {
        PerformanceTier::Poor => Color::Red,
        PerformanceTier::Average => Color::DarkYellow,
        PerformanceTier::Good => Color::Yellow,
        PerformanceTier::Best => Color::Green,
    };
    Cell::new(tier.as_str())
        .fg(color)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
