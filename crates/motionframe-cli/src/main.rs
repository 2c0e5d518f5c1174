use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use motionframe_core::export::JsonLinesSink;
use motionframe_core::{export_frames, scripting, CancelToken, ExportSettings, Project, Session};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info, Level};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Log format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the interpolated properties of one shape as JSON
    Sample {
        /// Project JSON or Rhai script
        #[arg(value_name = "PROJECT")]
        project: PathBuf,

        #[arg(long)]
        shape: String,

        /// Time in milliseconds
        #[arg(long)]
        time: f64,
    },

    /// Stream every resolved frame as newline-delimited JSON
    Frames {
        /// Project JSON or Rhai script
        #[arg(value_name = "PROJECT")]
        project: PathBuf,

        /// Frame rate, defaults to the project's
        #[arg(long, env = "MOTIONFRAME_FPS")]
        fps: Option<u32>,

        /// Length in milliseconds, defaults to the project's
        #[arg(long)]
        duration: Option<f64>,

        /// Output file, stdout when omitted
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Run a Rhai script and save the project it returns
    Script {
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Output project path, defaults to the script path with `.json`
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogFormat {
    Pretty,
    Json,
}

/// Installs the stderr subscriber; `RUST_LOG` directives override `level`.
fn init_logging(level: LogLevel, format: LogFormat) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level.into()).into())
        .from_env_lossy();

    // stdout carries command output, logs go to stderr.
    let subscriber_builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false);

    match format {
        LogFormat::Json => subscriber_builder.json().init(),
        LogFormat::Pretty => subscriber_builder.pretty().init(),
    }
}

/// Loads a project from JSON, or by running a `.rhai` script.
fn load_project(path: &Path) -> Result<Project> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let project = match path.extension().and_then(|e| e.to_str()) {
        Some("rhai") => scripting::run_script(&source)?,
        _ => Project::from_json(&source)
            .with_context(|| format!("parsing project {}", path.display()))?,
    };
    info!(
        name = %project.name,
        shapes = project.shapes.len(),
        keyframes = project.keyframes.len(),
        "project loaded"
    );
    Ok(project)
}

fn sample(path: &Path, shape: &str, time: f64) -> Result<()> {
    let session = Session::new(load_project(path)?);
    if session.project().shape(shape).is_none() {
        bail!("no shape with id '{}'", shape);
    }
    let patch = session.evaluate(shape, time).unwrap_or_default();
    println!("{}", serde_json::to_string_pretty(&patch)?);
    Ok(())
}

fn frames(
    path: &Path,
    fps: Option<u32>,
    duration: Option<f64>,
    output: Option<PathBuf>,
) -> Result<()> {
    let session = Session::new(load_project(path)?);
    let defaults = ExportSettings::from_project(session.project());
    let settings = ExportSettings {
        fps: fps.unwrap_or(defaults.fps),
        duration: duration.unwrap_or(defaults.duration),
        ..defaults
    };

    let writer: Box<dyn Write> = match &output {
        Some(out) => Box::new(BufWriter::new(
            File::create(out).with_context(|| format!("creating {}", out.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    let mut sink = JsonLinesSink::new(writer);

    let mut last_decile = 0;
    let written = export_frames(
        &session,
        &settings,
        &mut sink,
        |progress| {
            let decile = (progress * 10.0).floor() as u32;
            if decile > last_decile {
                last_decile = decile;
                info!("export {}%", decile * 10);
            }
        },
        &CancelToken::new(),
    )?;
    info!(frames = written, "frames written");
    Ok(())
}

fn script(path: &Path, output: Option<PathBuf>) -> Result<()> {
    let output = output.unwrap_or_else(|| path.with_extension("json"));
    info!("Script: {:?}", path);
    info!("Output: {:?}", output);

    let source = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let project = scripting::run_script(&source)?;
    project.save(&output)?;
    info!("Project saved.");
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Sample {
            project,
            shape,
            time,
        } => sample(&project, &shape, time),
        Command::Frames {
            project,
            fps,
            duration,
            output,
        } => frames(&project, fps, duration, output),
        Command::Script { script: path, output } => script(&path, output),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level, cli.log_format);

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
