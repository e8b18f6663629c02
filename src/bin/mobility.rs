use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use mobility_trends::{ChartConfig, RegionGroup, TransportType};
use mobility_trends::{chart, group, series, stats, storage, viz};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "mobility",
    version,
    about = "Normalize regional mobility-trend CSVs and chart them against their baseline"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one region's series as an SVG or PNG chart.
    Plot(PlotArgs),
    /// List region names (optionally filtered by substring).
    Regions(RegionsArgs),
    /// Build one region's series and print, save, or summarize it.
    Series(SeriesArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Transport {
    Driving,
    Walking,
    Transit,
}

impl From<Transport> for TransportType {
    fn from(t: Transport) -> Self {
        match t {
            Transport::Driving => TransportType::Driving,
            Transport::Walking => TransportType::Walking,
            Transport::Transit => TransportType::Transit,
        }
    }
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct Selection {
    /// Wide mobility CSV (one row per region and transport type).
    #[arg(short, long)]
    input: PathBuf,
    /// Region name, exactly as it appears in the CSV.
    #[arg(short, long)]
    region: String,
    /// Transport type row to use.
    #[arg(short, long, value_enum, default_value_t = Transport::Driving)]
    transport: Transport,
}

#[derive(Args, Debug)]
struct PlotArgs {
    #[command(flatten)]
    sel: Selection,
    /// Output chart path (.svg, or .png with `font_path` configured).
    #[arg(short, long)]
    out: PathBuf,
    /// TOML chart configuration; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    width: Option<u32>,
    #[arg(long)]
    height: Option<u32>,
    /// Upper bound of the value axis (e.g. 1.5 or 2.0).
    #[arg(long)]
    value_max: Option<f64>,
    /// Gap left of labelled gridlines, in pixels.
    #[arg(long)]
    tick_offset: Option<u32>,
}

#[derive(Args, Debug)]
struct RegionsArgs {
    #[arg(short, long)]
    input: PathBuf,
    /// Case-insensitive substring to match.
    #[arg(short, long)]
    filter: Option<String>,
}

#[derive(Args, Debug)]
struct SeriesArgs {
    #[command(flatten)]
    sel: Selection,
    /// Save the series (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Print summary statistics instead of every point.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 4 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn load_group(input: &Path) -> Result<RegionGroup> {
    let records = storage::load_records(input)?;
    Ok(group::group_by_region(records))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Plot(args) => cmd_plot(args),
        Command::Regions(args) => cmd_regions(args),
        Command::Series(args) => cmd_series(args),
    }
}

fn cmd_plot(args: PlotArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => ChartConfig::load(path)?,
        None => ChartConfig::default(),
    };
    if let Some(w) = args.width {
        config.width = w;
    }
    if let Some(h) = args.height {
        config.height = h;
    }
    if let Some(v) = args.value_max {
        config.value_max = v;
    }
    if let Some(t) = args.tick_offset {
        config.tick_offset = t;
    }
    config.validate()?;

    let regions = load_group(&args.sel.input)?;
    let region = args.sel.region.as_str();
    let data = chart::prepare(&regions, region, args.sel.transport.into(), &config)
        .map_err(|e| anyhow::anyhow!("data unavailable for {region}: {e}"))?;
    viz::render_chart(&data, &config, &args.out)?;
    eprintln!("Wrote chart to {}", args.out.display());
    Ok(())
}

fn cmd_regions(args: RegionsArgs) -> Result<()> {
    let regions = load_group(&args.input)?;
    for name in regions.matching_regions(args.filter.as_deref().unwrap_or("")) {
        println!("{name}");
    }
    Ok(())
}

fn cmd_series(args: SeriesArgs) -> Result<()> {
    let regions = load_group(&args.sel.input)?;
    let region = args.sel.region.as_str();
    let built = regions
        .select(region, args.sel.transport.into())
        .and_then(series::build_series)
        .map_err(|e| anyhow::anyhow!("data unavailable for {region}: {e}"))?;

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(&built, path)?,
            "json" => storage::save_json(&built, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} points to {}", built.len(), path.display());
    }

    if args.stats {
        let s = stats::summarize(&built);
        println!(
            "{} • {}  count={} baseline={}  min={} max={} mean={} median={}  latest={} ({})",
            s.region,
            s.transport,
            s.count,
            fmt_opt(Some(s.baseline)),
            fmt_opt(s.min_ratio),
            fmt_opt(s.max_ratio),
            fmt_opt(s.mean_ratio),
            fmt_opt(s.median_ratio),
            fmt_opt(s.latest_ratio),
            s.latest_change.as_deref().unwrap_or("NA")
        );
    } else if args.out.is_none() {
        for p in &built.points {
            println!("{}\t{}\t{}\t{}", p.date, p.percentage, fmt_opt(Some(p.ratio)), p.percentage_change);
        }
    }

    Ok(())
}
