//! kgdash - Knowledge-graph contextualisation dashboard
//!
//! Command-line front end over the catalog: list views with search, filters,
//! sorting and pagination, a dashboard summary with SVG widgets, standalone
//! chart rendering, and table metadata edits.
//!
//! # Usage
//!
//! ```bash
//! kgdash list tables --where source=SAP --sort records --desc
//! kgdash list responses --where user~sarah --from 2025-01-01 --to 2025-01-31
//! kgdash list jobs --search equipment --json
//! kgdash dashboard --svg-dir ./widgets
//! kgdash chart donut Mapped=12 Pending=3:#9CA3AF
//! kgdash chart gauge 72 --label "Coverage"
//! kgdash annotate t1 --status mapped --alias WO --alias ORDERS
//! kgdash config --init
//! ```

use clap::{Parser, Subcommand};
use kgdash::catalog::{
    KgStatus, ListKind, TableUpdate, load_catalog, resolve_catalog_path, save_catalog,
};
use kgdash::charts::donut::DonutGeometry;
use kgdash::charts::svg::{
    render_donut_svg, render_gauge_svg, render_progress_svg, render_sparkline_svg,
};
use kgdash::charts::{ChartSegment, Palette};
use kgdash::config::{self, AppConfig};
use kgdash::dashboard::{DashboardSummary, render_dashboard_svgs};
use kgdash::formatting::{format_percent, format_thousands, render_text_table};
use kgdash::listing::list_catalog;
use kgdash::table::{DateRange, FilterState, SortSpec, TableQuery};
use kgdash::validators::{
    Bound, parse_date_bound, parse_field_filter, sanitize_search_term, validate_field_name,
    validate_hex_color, validate_page_size,
};
use kgdash::{Error, Result};
use std::path::PathBuf;
use std::process::ExitCode;

shadow_rs::shadow!(build);

#[derive(Parser)]
#[command(name = "kgdash")]
#[command(version = build::CLAP_LONG_VERSION)]
#[command(about = "Knowledge-graph contextualisation dashboard", long_about = None)]
struct Cli {
    /// Catalog file (default: $KGDASH_CATALOG, then the config, then the data directory)
    #[arg(long, global = true, value_name = "PATH")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List tables, forms, sync jobs or form responses
    List(ListArgs),
    /// Print the dashboard summary and optionally write its widgets as SVG
    Dashboard {
        /// Directory to write one SVG file per widget into
        #[arg(long, value_name = "DIR")]
        svg_dir: Option<PathBuf>,
    },
    /// Render a single chart as SVG on stdout
    Chart {
        #[command(subcommand)]
        chart: ChartCommand,
    },
    /// Update a table's metadata and save the catalog
    Annotate {
        /// Table id
        id: String,
        #[arg(long)]
        description: Option<String>,
        /// mapped, partially_mapped, pending or error
        #[arg(long)]
        status: Option<KgStatus>,
        #[arg(long)]
        source: Option<String>,
        /// Alternate name (repeatable, replaces the existing list)
        #[arg(long = "alias", value_name = "NAME")]
        aliases: Vec<String>,
    },
    /// Show the effective configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        init: bool,
    },
}

#[derive(clap::Args)]
struct ListArgs {
    /// tables, forms, jobs or responses
    kind: ListKind,
    /// Case-insensitive text search
    #[arg(short, long)]
    search: Option<String>,
    /// Field filter: field=value (exact, `all` disables) or field~value (contains)
    #[arg(short = 'w', long = "where", value_name = "FILTER")]
    filters: Vec<String>,
    /// Earliest date, inclusive (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    from: Option<String>,
    /// Latest date, inclusive (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    to: Option<String>,
    /// Field to sort by
    #[arg(long)]
    sort: Option<String>,
    /// Sort descending
    #[arg(long)]
    desc: bool,
    /// Page number, starting at 1
    #[arg(short, long, default_value_t = 1)]
    page: usize,
    /// Rows per page (default from config)
    #[arg(long)]
    page_size: Option<usize>,
    /// Print the page as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum ChartCommand {
    /// Donut chart from label=value[:#color] segments
    Donut {
        #[arg(required = true, value_name = "SEGMENT")]
        segments: Vec<String>,
        #[arg(long, default_value = "Chart")]
        title: String,
    },
    /// Radial gauge for a percentage
    Gauge {
        #[arg(allow_negative_numbers = true)]
        value: f64,
        #[arg(long, default_value = "")]
        label: String,
    },
    /// Sparkline over a series of values
    Sparkline {
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
        /// Line colour (default: palette accent)
        #[arg(long)]
        color: Option<String>,
    },
    /// Horizontal progress bar for a percentage
    Progress {
        #[arg(allow_negative_numbers = true)]
        value: f64,
        #[arg(long, default_value = "")]
        label: String,
    },
}

fn main() -> ExitCode {
    let _ = kgdash::utils::ensure_dirs();
    let cli = Cli::parse();

    let loaded = config::load_config_blocking();
    kgdash::utils::init_logging(loaded.config.log_to_file);
    if let Some(warning) = &loaded.warning {
        tracing::warn!("{warning}");
        eprintln!("Warning: {warning}");
    }
    let config = loaded.config;

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(handle_cli(cli, config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            let translation = e.translate();
            eprintln!("Error: {}", translation.user_message);
            for suggestion in &translation.suggestions {
                eprintln!("  • {suggestion}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn handle_cli(cli: Cli, config: AppConfig) -> Result<()> {
    let catalog_path =
        || resolve_catalog_path(cli.catalog.as_deref().or(config.catalog_path.as_deref()));

    match cli.command {
        Commands::List(ref args) => {
            let catalog = load_catalog(&catalog_path()?).await?;
            let query = build_query(args, &config)?;
            println!("{}", list_catalog(&catalog, args.kind, &query, args.json)?);
        }
        Commands::Dashboard { ref svg_dir } => {
            let catalog = load_catalog(&catalog_path()?).await?;
            let summary = DashboardSummary::from_catalog(&catalog);
            print_summary(&summary);

            if let Some(dir) = svg_dir {
                tokio::fs::create_dir_all(dir).await?;
                let widgets = render_dashboard_svgs(&summary, &config.palette, config.chart_size);
                for widget in &widgets {
                    tokio::fs::write(dir.join(&widget.file_name), &widget.svg).await?;
                }
                println!("\n✓ Wrote {} widgets to {}", widgets.len(), dir.display());
            }
        }
        Commands::Chart { ref chart } => {
            println!("{}", render_chart(chart, &config)?);
        }
        Commands::Annotate {
            ref id,
            ref description,
            status,
            ref source,
            ref aliases,
        } => {
            let update = TableUpdate {
                id: id.clone(),
                description: description.clone(),
                kg_status: status,
                source: source.clone(),
                alternate_names: (!aliases.is_empty()).then(|| aliases.clone()),
            };
            if update.is_empty() {
                return Err(Error::validation(
                    "annotate",
                    "nothing to change; pass --description, --status, --source or --alias",
                ));
            }

            let path = catalog_path()?;
            let mut catalog = load_catalog(&path).await?;
            let badge = catalog.update_table(&update)?.status_badge();
            save_catalog(&path, &catalog).await?;
            println!("✓ Updated {id}: {badge}");
        }
        Commands::Config { init } => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            if init {
                config::save_config(&config).await?;
                if let Some(path) = config::config_path() {
                    println!("✓ Saved to {}", path.display());
                }
            }
        }
    }
    Ok(())
}

fn build_query(args: &ListArgs, config: &AppConfig) -> Result<TableQuery> {
    let page_size = match args.page_size {
        Some(size) => validate_page_size(size).map_err(|e| Error::validation("page-size", e))?,
        None => config.page_sizes.for_kind(args.kind),
    };

    let mut filters =
        FilterState::new().with_search(sanitize_search_term(args.search.as_deref().unwrap_or("")));
    for clause in &args.filters {
        let (field, filter) = parse_field_filter(clause).map_err(|e| Error::validation("where", e))?;
        filters.set_filter(field, filter);
    }

    let start = args
        .from
        .as_deref()
        .map(|s| parse_date_bound(s, Bound::Start))
        .transpose()
        .map_err(|e| Error::validation("from", e))?;
    let end = args
        .to
        .as_deref()
        .map(|s| parse_date_bound(s, Bound::End))
        .transpose()
        .map_err(|e| Error::validation("to", e))?;
    let filters = filters.with_date_range(DateRange::new(start, end));

    // Responses read newest first unless a sort was asked for
    let (field, descending) = match &args.sort {
        Some(field) => (
            validate_field_name(field).map_err(|e| Error::validation("sort", e))?,
            args.desc,
        ),
        None => (
            args.kind.default_sort_field().to_string(),
            args.desc || args.kind == ListKind::Responses,
        ),
    };
    let sort = if descending {
        SortSpec::desc(field)
    } else {
        SortSpec::asc(field)
    };

    Ok(TableQuery::new(page_size)
        .with_filters(filters)
        .with_sort(sort)
        .with_page(args.page))
}

fn print_summary(summary: &DashboardSummary) {
    println!(
        "Tables contextualised: {} of {} ({})",
        summary.contextualised_tables,
        summary.total_tables,
        format_percent(summary.coverage)
    );
    for (status, count) in &summary.tables_by_status {
        println!("  {:<16} {count}", status.label());
    }
    println!("KG conversion rate:    {}", format_percent(summary.kg_conversion_rate));
    println!(
        "Forms converted:       {} of {} ({})",
        summary.converted_forms,
        summary.total_forms,
        format_percent(summary.forms_conversion_rate)
    );
    println!("Failed sync jobs:      {}", summary.failed_jobs);

    if !summary.sources.is_empty() {
        let rows: Vec<Vec<String>> = summary
            .sources
            .iter()
            .map(|s| {
                vec![
                    s.name.clone(),
                    format!("{}/{}", s.mapped, s.total),
                    format_percent(s.percent()),
                    format_thousands(s.records),
                    s.errors.to_string(),
                ]
            })
            .collect();
        println!();
        println!(
            "{}",
            render_text_table(&["Source", "Mapped", "Progress", "Records", "Errors"], &rows, 40)
        );
    }
}

fn render_chart(chart: &ChartCommand, config: &AppConfig) -> Result<String> {
    let palette = &config.palette;
    match chart {
        ChartCommand::Donut { segments, title } => {
            let segments = segments
                .iter()
                .enumerate()
                .map(|(i, spec)| parse_segment(spec, default_color(palette, i)))
                .collect::<Result<Vec<_>>>()?;
            let geometry = DonutGeometry {
                size: config.chart_size,
                ..DonutGeometry::default()
            };
            Ok(render_donut_svg(&segments, &geometry, palette, title))
        }
        ChartCommand::Gauge { value, label } => {
            Ok(render_gauge_svg(*value, label, config.chart_size, palette))
        }
        ChartCommand::Sparkline { values, color } => {
            let color = match color {
                Some(c) => validate_hex_color(c).map_err(|e| Error::validation("color", e))?,
                None => palette.accent.clone(),
            };
            render_sparkline_svg(values, &color, "value")
                .ok_or_else(|| Error::validation("values", "at least one value is required"))
        }
        ChartCommand::Progress { value, label } => Ok(render_progress_svg(*value, label, palette)),
    }
}

/// Cycles through the palette for segments without an explicit colour
fn default_color(palette: &Palette, index: usize) -> &str {
    let colors = [&palette.success, &palette.warning, &palette.danger, &palette.accent];
    colors[index % colors.len()]
}

/// Parses `label=value` or `label=value:#color`.
fn parse_segment(spec: &str, fallback_color: &str) -> Result<ChartSegment> {
    let invalid = |message: String| Error::validation("segment", message);
    let (label, rest) = spec
        .split_once('=')
        .ok_or_else(|| invalid(format!("expected label=value, got: {spec}")))?;
    let (value, color) = match rest.split_once(':') {
        Some((value, color)) => (
            value,
            validate_hex_color(color.trim()).map_err(invalid)?,
        ),
        None => (rest, fallback_color.to_string()),
    };
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| invalid(format!("not a number: {value}")))?;
    Ok(ChartSegment::new(label.trim(), value, color))
}
