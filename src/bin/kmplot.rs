use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{error, info, warn};

use kmplot::config::ChartConfig;
use kmplot::km::render::save_svg;
use kmplot::km::schema::schema_json_pretty;
use kmplot::km::{ChartProps, HoverEvent, Intent, KmChart, RawGroupSet, SplitCount};

#[derive(Parser)]
#[command(name = "kmplot")]
#[command(
    about = "Kaplan-Meier survival curve renderer",
    long_about = "Renders Kaplan-Meier survival curves from aggregated group sets to SVG, with censor marks, legend highlighting and summary statistics."
)]
struct Cli {
    /// Log verbosity level
    #[arg(long, global = true, default_value = "info")]
    log_level: LogLevel,
    /// Write log output to a file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<String>,
    /// Append to log file instead of truncating
    #[arg(long, global = true)]
    append_log: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render a group set to SVG
    Render {
        /// Group set JSON (parallel colors/labels/curves arrays plus statistics). Omit to render the loading state.
        #[arg(long)]
        groups: Option<String>,
        /// Output SVG path
        #[arg(long, required = true)]
        out: String,
        /// Chart configuration JSON file (sizes, stroke styles, leave policy). Defaults apply when omitted.
        #[arg(long)]
        config: Option<String>,
        /// Text appended to the "Kaplan Meier" title
        #[arg(long, default_value = "")]
        title: String,
        /// Name of the feature the groups were split on
        #[arg(long, default_value = "")]
        label: String,
        /// Cutoff the groups were aggregated at
        #[arg(long)]
        cutoff: Option<f64>,
        /// Number of groups selected in the split selector (2 or 3)
        #[arg(long, default_value = "2")]
        splits: SplitCount,
        /// Render with this group highlighted
        #[arg(long)]
        hover: Option<String>,
        /// Overwrite the output file if it exists
        #[arg(long)]
        force: bool,
    },
    /// Print the JSON Schema of the group set input
    Schema,
    /// Print the payload of an outbound request
    Intent {
        #[command(subcommand)]
        intent: IntentCommand,
    },
}

#[derive(Subcommand)]
enum IntentCommand {
    /// Re-aggregate at a new cutoff
    Cutoff { value: f64 },
    /// Re-aggregate into 2 or 3 groups
    Splits { count: SplitCount },
    /// Close the plot
    Close,
}

fn check_output_path(out: &str, force: bool) -> Result<()> {
    let path = Path::new(out);
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        info!("Creating output directory: {:?}", parent);
        fs::create_dir_all(parent)?;
    }
    if !force && path.exists() {
        bail!("Output file {} already exists. Use --force to overwrite.", out);
    }
    Ok(())
}

fn read_groups(path: &str) -> Result<RawGroupSet> {
    let json = fs::read_to_string(path).with_context(|| format!("Could not read group set {}", path))?;
    RawGroupSet::from_json(&json).with_context(|| format!("Could not parse group set {}", path))
}

fn run_render(
    groups: Option<&str>,
    out: &str,
    config: Option<&str>,
    props: ChartProps,
    hover: Option<&str>,
    force: bool,
) -> Result<()> {
    check_output_path(out, force)?;

    let config = match config {
        Some(path) => ChartConfig::load(path).with_context(|| format!("Error loading chart config {}", path))?,
        None => ChartConfig::default(),
    };
    let raw = groups.map(read_groups).transpose()?;

    let mut chart = KmChart::new(config, props, |intent| info!("intent: {:?}", intent));
    if let Some(label) = hover {
        chart.hover(HoverEvent::Enter(label.to_string()));
    }
    let frame = chart.render_raw(raw.as_ref())?;
    if let (Some(label), Some(set)) = (hover, raw.as_ref())
        && !set.labels.iter().flatten().any(|l| l == label)
    {
        warn!("--hover {} matches no group label", label);
    }

    save_svg(&frame, chart.config(), out)?;
    info!("Wrote {} frame to {}", frame.kind(), out);
    Ok(())
}

fn print_intent(intent: Intent) -> Result<()> {
    println!("{}", intent.to_json()?);
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let mut log_builder = env_logger::Builder::from_default_env();
    log_builder
        .filter_level(cli.log_level.to_level_filter())
        .format_module_path(false);
    if let Some(ref path) = cli.log_file {
        let file = if cli.append_log {
            fs::File::options().create(true).append(true).open(path)
        } else {
            fs::File::create(path)
        };
        match file {
            Ok(file) => {
                log_builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => {
                eprintln!("Could not open log file '{}': {}", path, e);
                std::process::exit(1);
            }
        }
    }
    log_builder.init();

    let result = match cli.command {
        Commands::Render {
            groups,
            out,
            config,
            title,
            label,
            cutoff,
            splits,
            hover,
            force,
        } => {
            let props = ChartProps {
                title,
                feature_label: label,
                splits,
                cutoff,
            };
            run_render(
                groups.as_deref(),
                &out,
                config.as_deref(),
                props,
                hover.as_deref(),
                force,
            )
        }
        Commands::Schema => schema_json_pretty()
            .map(|schema| println!("{}", schema))
            .map_err(anyhow::Error::from),
        Commands::Intent { intent } => match intent {
            IntentCommand::Cutoff { value } => print_intent(Intent::Cutoff(value)),
            IntentCommand::Splits { count } => print_intent(Intent::Splits(count)),
            IntentCommand::Close => print_intent(Intent::Close),
        },
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
