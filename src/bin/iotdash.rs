use anyhow::{Result, anyhow, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::warn;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use iotdash::config::{Config, generate_default_config};
use iotdash::dashboard::{EnergyChart, spawn_refresh};
use iotdash::readings::{Readout, SensorSimulator};
use iotdash::scheduler::RecurringTask;
use iotdash::source::{FileSource, RandomSource, SampleSource};
use iotdash::viz::FileSurfaceProvider;
use iotdash::{SurfaceSize, stats, storage, viz};

#[derive(Parser, Debug)]
#[command(
    name = "iotdash",
    version,
    about = "Render the smart-home energy chart & simulated sensor readouts"
)]
struct Cli {
    /// TOML config file (defaults: $IOTDASH_CONFIG, then the user config dir).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one chart frame (and optionally export samples and print stats).
    Render(RenderArgs),
    /// Re-render the chart on a schedule with fresh samples.
    Watch(WatchArgs),
    /// Print a simulated climate/energy readout.
    Readings(ReadingsArgs),
    /// Print the default configuration as TOML.
    Config,
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct SurfaceArgs {
    /// Logical chart width (default from config: 600).
    #[arg(long)]
    width: Option<f64>,
    /// Logical chart height (default from config: 300).
    #[arg(long)]
    height: Option<f64>,
    /// Device pixel ratio; the image is width*ratio x height*ratio pixels.
    #[arg(long)]
    pixel_ratio: Option<f64>,
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Read samples from a CSV (hour,value) or JSON file instead of generating them.
    #[arg(long)]
    input: Option<PathBuf>,
    /// Seed for generated samples (reproducible output).
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Chart output path (.svg or .png).
    #[arg(long)]
    out: PathBuf,
    #[command(flatten)]
    surface: SurfaceArgs,
    #[command(flatten)]
    source: SourceArgs,
    /// Save the rendered samples (format inferred by --format or extension).
    #[arg(long)]
    export: Option<PathBuf>,
    /// Export format (csv or json). If omitted, inferred from --export extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Print summary statistics to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

#[derive(Args, Debug)]
struct WatchArgs {
    /// Chart output path (.svg or .png), overwritten on every frame.
    #[arg(long)]
    out: PathBuf,
    #[command(flatten)]
    surface: SurfaceArgs,
    #[command(flatten)]
    source: SourceArgs,
    /// Seconds between frames (default from config: 10).
    #[arg(long)]
    interval: Option<f64>,
    /// Milliseconds before the first frame (default from config: 1000).
    #[arg(long)]
    delay_ms: Option<u64>,
    /// Number of frames to draw before exiting.
    #[arg(long, default_value_t = 3)]
    count: u64,
}

#[derive(Args, Debug)]
struct ReadingsArgs {
    /// Seed for the simulated sensors.
    #[arg(long)]
    seed: Option<u64>,
    /// Print JSON instead of a table.
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Number of readouts; more than one follows the climate refresh interval.
    #[arg(long, default_value_t = 1)]
    count: u64,
    /// Seconds between readouts (default from config: 5).
    #[arg(long)]
    interval: Option<f64>,
}

fn fmt_num(x: f64) -> String {
    // Up to 3 decimals, then trim trailing zeros and trailing dot.
    let s = format!("{:.3}", x);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn surface_size(config: &Config, args: &SurfaceArgs) -> SurfaceSize {
    SurfaceSize::new(
        args.width.unwrap_or(config.surface.width),
        args.height.unwrap_or(config.surface.height),
        args.pixel_ratio.unwrap_or(config.surface.pixel_ratio),
    )
}

fn build_source(args: &SourceArgs) -> Result<Box<dyn SampleSource>> {
    Ok(match (&args.input, args.seed) {
        (Some(path), _) => Box::new(FileSource::new(path)),
        (None, Some(seed)) => Box::new(RandomSource::seeded(seed, 1.0, 4.0)?),
        (None, None) => Box::new(RandomSource::default()),
    })
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Config => {
            print!("{}", generate_default_config()?);
            Ok(())
        }
        Command::Readings(args) => cmd_readings(&Config::resolve(cli.config.as_deref())?, args),
        Command::Render(args) => cmd_render(&Config::resolve(cli.config.as_deref())?, args),
        Command::Watch(args) => cmd_watch(&Config::resolve(cli.config.as_deref())?, args),
    }
}

fn cmd_render(config: &Config, args: RenderArgs) -> Result<()> {
    let size = surface_size(config, &args.surface);
    let samples = build_source(&args.source)?.next_samples()?;

    viz::render_to_file(&samples, &args.out, size, &config.chart)?;
    eprintln!("Wrote chart to {}", args.out.display());

    if let Some(path) = args.export.as_ref() {
        export(&samples, path, args.format.as_ref())?;
        eprintln!("Saved {} samples to {}", samples.len(), path.display());
    }

    if args.stats {
        let s = stats::summarize(&samples);
        println!(
            "count={} min={} max={} mean={} median={} total={} peak_hour={}",
            s.count,
            fmt_num(s.min),
            fmt_num(s.max),
            fmt_num(s.mean),
            fmt_num(s.median),
            fmt_num(s.total),
            s.peak_hour
        );
    }
    Ok(())
}

fn export(samples: &iotdash::SampleSet, path: &Path, format: Option<&OutFormat>) -> Result<()> {
    let fmt = match format {
        Some(OutFormat::Csv) => "csv",
        Some(OutFormat::Json) => "json",
        None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
    }
    .to_ascii_lowercase();
    match fmt.as_str() {
        "csv" => storage::save_csv(samples, path),
        "json" => storage::save_json(samples, path),
        other => bail!("unsupported format: {}", other),
    }
}

fn parse_interval(secs: Option<f64>) -> Result<Option<Duration>> {
    match secs {
        Some(s) if s.is_finite() && s > 0.0 => Ok(Some(Duration::from_secs_f64(s))),
        Some(s) => bail!("--interval must be a positive number of seconds, got {s}"),
        None => Ok(None),
    }
}

fn cmd_watch(config: &Config, args: WatchArgs) -> Result<()> {
    if args.count == 0 {
        bail!("--count must be at least 1");
    }
    let mut schedule = config.refresh.chart_schedule();
    if let Some(interval) = parse_interval(args.interval)? {
        schedule.interval = interval;
    }
    if let Some(ms) = args.delay_ms {
        schedule.initial_delay = Duration::from_millis(ms);
    }

    let size = surface_size(config, &args.surface);
    size.pixel_dims()?;
    let chart = Arc::new(Mutex::new(EnergyChart::new(
        config.chart,
        build_source(&args.source)?,
    )));
    let provider = Arc::new(Mutex::new(FileSurfaceProvider::new(
        &args.out,
        size,
        config.chart.style.background,
    )));

    let task = spawn_refresh(chart, provider, schedule, Some(args.count))?;
    let frames = task
        .join()
        .map_err(|_| anyhow!("chart refresh worker panicked"))?;
    eprintln!("Drew {} frames to {}", frames, args.out.display());
    Ok(())
}

fn print_readout(readout: &Readout, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(readout)?);
    } else {
        println!("{readout}\n");
    }
    Ok(())
}

fn cmd_readings(config: &Config, args: ReadingsArgs) -> Result<()> {
    if args.count == 0 {
        bail!("--count must be at least 1");
    }
    let mut sim = match args.seed {
        Some(seed) => SensorSimulator::seeded(seed),
        None => SensorSimulator::new(),
    };
    if args.count <= 1 {
        return print_readout(&sim.readout(), args.json);
    }

    let mut schedule = config.refresh.climate_schedule().with_initial_delay(Duration::ZERO);
    if let Some(interval) = parse_interval(args.interval)? {
        schedule.interval = interval;
    }
    let (json, count) = (args.json, args.count);
    let task = RecurringTask::spawn("readings", schedule, move |tick| {
        if let Err(e) = print_readout(&sim.readout(), json) {
            warn!("readout {tick} not printed: {e:#}");
            return ControlFlow::Break(());
        }
        if tick + 1 >= count {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })?;
    task.join().map_err(|_| anyhow!("readings worker panicked"))?;
    Ok(())
}
