use analytics::{AnalyticsEngine, SalesReport};
use anyhow::{Context, Result};
use charts::{ChartSet, PlottersRenderer, render_charts};
use clap::Parser;
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use configuration::Config;
use exporter::{ExportOutput, ReportExporter};
use generator::SalesGenerator;
use rust_decimal::Decimal;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Generates a synthetic sales dataset, summarizes it, renders four charts and
/// writes the spreadsheet report into the output directory.
///
/// Settings are read from an optional `config.toml` in the working directory.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {}

fn main() -> Result<()> {
    let _cli = Cli::parse();

    let config = configuration::load_config().context("Failed to load config.toml")?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.level)
                .with_context(|| format!("Invalid logging.level '{}'", config.logging.level))?,
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    run(&config)
}

/// Generate, analyze, visualize, export. Each stage must succeed before the next runs.
fn run(config: &Config) -> Result<()> {
    let table = SalesGenerator::new(config.generator.clone())
        .generate()
        .context("Failed to generate sales data")?;

    let report = AnalyticsEngine::new()
        .analyze(&table)
        .context("Failed to analyze sales data")?;

    let renderer = PlottersRenderer::new(config.charts.width, config.charts.height);
    let charts = render_charts(&table, &report, &renderer, config.output.directory())
        .context("Failed to render charts")?;

    let output = ReportExporter::new(config.charts.image_scale)
        .export(
            &report,
            &charts,
            &config.output.workbook_path(),
            &config.output.workbook_with_charts_path(),
        )
        .context("Failed to export spreadsheet report")?;

    print_summary(&report, &charts, &output);
    Ok(())
}

fn print_summary(report: &SalesReport, charts: &ChartSet, output: &ExportOutput) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Key Metric", "Value"]);
    table.add_row(vec!["Transactions".to_string(), report.transaction_count.to_string()]);
    table.add_row(vec!["Total Sales".to_string(), money(Some(report.total_sales))]);
    table.add_row(vec!["Average Sales per Transaction".to_string(), money(report.average_sales)]);
    table.add_row(vec!["Total Quantity Sold".to_string(), report.total_quantity.to_string()]);
    table.add_row(vec![
        "Average Quantity Sold per Transaction".to_string(),
        money(report.average_quantity),
    ]);
    println!("{table}");

    let mut files = Table::new();
    files.load_preset(UTF8_FULL);
    files.set_header(vec!["Output"]);
    for path in charts.paths() {
        files.add_row(vec![path.display().to_string()]);
    }
    files.add_row(vec![output.workbook.display().to_string()]);
    files.add_row(vec![output.workbook_with_charts.display().to_string()]);
    println!("{files}");
}

fn money(value: Option<Decimal>) -> String {
    value
        .map(|v| v.round_dp(2).to_string())
        .unwrap_or_else(|| "N/A".to_string())
}
