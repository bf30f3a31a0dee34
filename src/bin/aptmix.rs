use anyhow::{Context, Result, bail};
use aptmix::format::{DEFAULT_LOCALE, format_integer_locale};
use aptmix::report::{COLUMNS, Report, report_for};
use aptmix::{GroupingMode, ReportConfig, characteristics, compare, storage};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "aptmix",
    version,
    about = "Roll up & compare apartment-mix sales data of a property and its competitors"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the rollup table (and optionally save it).
    Report(ReportArgs),
    /// Check for comparable groups and print per-pair cost statistics.
    Compare(InputArgs),
    /// Print the side-by-side characteristics summary.
    Summary(InputArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum GroupBy {
    Property,
    Type,
}

impl From<GroupBy> for GroupingMode {
    fn from(g: GroupBy) -> Self {
        match g {
            GroupBy::Property => GroupingMode::Property,
            GroupBy::Type => GroupingMode::Type,
        }
    }
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Upload-service response (JSON with `groups`, `characteristics`, …).
    #[arg(short, long)]
    input: PathBuf,
    /// Locale for number grouping (ru, en, de, …).
    #[arg(long, default_value = DEFAULT_LOCALE)]
    locale: String,
}

#[derive(Args, Debug)]
struct ReportArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Top-level grouping: by property or by unit-type.
    #[arg(short, long, value_enum, default_value_t = GroupBy::Property)]
    group_by: GroupBy,
    /// Save the rendered table to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Report(args) => cmd_report(args),
        Command::Compare(args) => cmd_compare(args),
        Command::Summary(args) => cmd_summary(args),
    }
}

fn load(args: &InputArgs) -> Result<aptmix::UploadResponse> {
    storage::load_response(&args.input)
        .with_context(|| format!("read {}", args.input.display()))
}

fn cmd_report(args: ReportArgs) -> Result<()> {
    if args.format.is_some() && args.out.is_none() {
        bail!("--format needs --out");
    }
    let resp = load(&args.input)?;
    if resp.groups.is_empty() {
        println!("no data");
        return Ok(());
    }

    let config = ReportConfig::new(args.group_by.into(), args.input.locale.clone());
    let report = report_for(&resp.groups, &config);
    print_report(&report);

    if let Some(path) = args.out.as_ref() {
        let fmt = args.format.as_ref().map(|f| match f {
            OutFormat::Csv => "csv",
            OutFormat::Json => "json",
        });
        storage::save(&report, path, fmt)
            .with_context(|| format!("save {}", path.display()))?;
        eprintln!("Saved {} rows to {}", report.rows.len(), path.display());
    }
    Ok(())
}

fn print_report(report: &Report) {
    let mut header = vec!["group", "label", "count", "%"];
    header.extend(COLUMNS.iter().map(|c| c.key()));
    println!("{}", header.join("\t"));
    for row in &report.rows {
        let marker = if row.is_main { "*" } else { "" };
        let cells: Vec<&str> = row.cells.iter().map(|c| c.display.as_str()).collect();
        println!(
            "{}\t{}{}\t{}\t{}\t{}",
            row.group,
            row.label,
            marker,
            row.count,
            row.percentage,
            cells.join("\t")
        );
    }
}

fn cmd_compare(args: InputArgs) -> Result<()> {
    let resp = load(&args)?;
    if !compare::has_comparable_groups(&resp.groups) {
        println!("no comparable groups");
        return Ok(());
    }

    let fmt_diff = |d: Option<f64>| match d {
        Some(x) => format!(" ({:+.2}%)", x),
        None => String::new(),
    };
    for c in compare::compare_pairs(&resp.groups) {
        println!(
            "{} • {} vs {}",
            c.unit_type, c.main_source, c.competitor_source
        );
        let lines = [
            ("mean", c.main.mean, c.competitor.mean, c.percentage_diffs.mean),
            ("median", c.main.median, c.competitor.median, c.percentage_diffs.median),
            ("min", c.main.min, c.competitor.min, c.percentage_diffs.min),
            ("max", c.main.max, c.competitor.max, c.percentage_diffs.max),
        ];
        for (name, main, comp, diff) in lines {
            println!(
                "  {:<7} {}{}  |  {}",
                name,
                format_integer_locale(main, &args.locale),
                fmt_diff(diff),
                format_integer_locale(comp, &args.locale)
            );
        }
        println!(
            "  outliers {} ({} low, {} high)  |  {} ({} low, {} high)",
            c.main.outliers_count(),
            c.main.outliers_lower.len(),
            c.main.outliers_upper.len(),
            c.competitor.outliers_count(),
            c.competitor.outliers_lower.len(),
            c.competitor.outliers_upper.len()
        );
    }
    Ok(())
}

fn cmd_summary(args: InputArgs) -> Result<()> {
    let resp = load(&args)?;
    let rows = resp.characteristics.unwrap_or_default();
    if rows.is_empty() {
        println!("no characteristics");
        return Ok(());
    }

    let summary = characteristics::summarize(&rows, &resp.groups, &args.locale);
    for p in &summary.properties {
        let marker = if p.is_main { " (main)" } else { "" };
        println!("{}{}", p.name, marker);
        for (label, value) in p.attributes.fields() {
            if !value.is_empty() {
                println!("  {}: {}", label, value);
            }
        }
        println!("  units: {}", p.total_units);
        for (label, cell) in summary.unit_types.iter().zip(&p.counts) {
            if !cell.display.is_empty() {
                println!("    {}: {}", label, cell.display);
            }
        }
        if !p.avg_price_per_area.display.is_empty() {
            println!("  avg price per m²: {}", p.avg_price_per_area.display);
        }
        for (label, cell) in summary.unit_types.iter().zip(&p.avg_costs) {
            if !cell.display.is_empty() {
                println!("    {}: {}", label, cell.display);
            }
        }
    }
    Ok(())
}
