use chrono::{NaiveDate, NaiveTime, TimeDelta};
use clap::Parser;
use std::io::{self, BufWriter};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use logsnap::sources::SkipReason;
use logsnap::target::{join_target, parse_date, parse_span, parse_time, DEFAULT_SPAN, DEFAULT_TIME};
use logsnap::{
    resolve_sources, write_records, OutputFormat, PipelineConfig, SnapPipeline, TimeWindow,
    UntimedPolicy, Zone, DEFAULT_LOG_FILES,
};

#[derive(Parser)]
#[command(name = "logsnap")]
#[command(about = "Extract a snapshot from log files, centered around a specified date and time")]
#[command(version)]
struct Args {
    /// Date to center on, as YYYY-MM-DD
    #[arg(value_name = "DATE", value_parser = parse_date)]
    date: NaiveDate,

    /// Time to center on, as HH:MM:SS (24-hour clock)
    #[arg(value_name = "TIME", default_value = DEFAULT_TIME, value_parser = parse_time)]
    time: NaiveTime,

    /// Hours before and after the target to include; decimals and durations like "90m" work
    #[arg(short = 's', long = "span", value_name = "TIMESPAN", default_value = DEFAULT_SPAN, value_parser = parse_span)]
    span: TimeDelta,

    /// Additional files to search through
    #[arg(short = 'f', long = "files", value_name = "FILE", num_args = 1..)]
    files: Vec<PathBuf>,

    /// Don't search the standard system logs, only --files
    #[arg(long)]
    no_default_logs: bool,

    /// Interpret log times and the target as UTC instead of local time
    #[arg(long)]
    utc: bool,

    /// Year assumed for syslog lines, which don't record one (default: current year)
    #[arg(long, value_name = "YEAR")]
    year: Option<i32>,

    /// Drop lines without a timestamp instead of giving them the previous line's time
    #[arg(long)]
    drop_untimed: bool,

    /// Output format
    #[arg(short = 'F', long = "format", value_enum, default_value = "line")]
    format: OutputFormat,

    /// Buffer size for I/O
    #[arg(long, default_value = "65536")] // 64KB
    buffer_size: NonZeroUsize,

    /// Debug mode - show processing details on stderr
    #[arg(long)]
    debug: bool,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.debug);

    if let Err(e) = run(args) {
        eprintln!("logsnap: error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(debug: bool) {
    let default_filter = if debug { "logsnap=debug,warn" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}

fn run(args: Args) -> anyhow::Result<()> {
    let zone = if args.utc { Zone::Utc } else { Zone::Local };

    let center = join_target(args.date, args.time, zone)?;
    let window = TimeWindow::new(center, args.span)?;
    tracing::debug!(
        lower = %window.lower_bound(),
        upper = %window.upper_bound(),
        "time window"
    );

    let config = PipelineConfig::new(window)
        .with_zone(zone)
        .with_year(args.year.unwrap_or_else(|| zone.current_year()))
        .with_untimed(if args.drop_untimed {
            UntimedPolicy::Drop
        } else {
            UntimedPolicy::Inherit
        })
        .with_buffer_size(args.buffer_size);
    let buffer_size = config.buffer_size;

    let defaults: Vec<PathBuf> = if args.no_default_logs {
        Vec::new()
    } else {
        DEFAULT_LOG_FILES.iter().map(PathBuf::from).collect()
    };
    let source_set = resolve_sources(&defaults, &args.files)?;

    for skipped in &source_set.skipped {
        // Absent standard logs are normal on many systems
        if !skipped.explicit && matches!(skipped.reason, SkipReason::NotFound) {
            continue;
        }
        eprintln!("logsnap: skipping {} - {}", skipped.path, skipped.reason);
    }

    let mut pipeline = SnapPipeline::new(config);
    for source in source_set.sources {
        let id = source.id.clone();
        pipeline.process_source(source.into_reader(buffer_size), &id)?;
    }

    let (records, stats) = pipeline.finish();

    let stdout = io::stdout();
    let mut output = BufWriter::with_capacity(buffer_size, stdout.lock());
    let written = write_records(&mut output, &records, args.format)?;

    tracing::debug!(
        sources = stats.sources_scanned,
        lines = stats.lines_read,
        recognized = stats.lines_recognized,
        inherited = stats.lines_inherited,
        written,
        "done"
    );

    Ok(())
}
