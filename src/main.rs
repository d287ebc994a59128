use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::collections::BTreeMap;
use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use mirror::{introspect_getters, tree, Config, Depth, TextEmitter, TreeBuilder};

const APP_NAME: &str = "mirror";

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Xml,
    Text,
}

/// Prints a snapshot of the running process as XML or text
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output format (xml/text)
    #[arg(short, long, value_enum, default_value_t = Format::Xml)]
    format: Format,

    /// Levels to descend; negative for unbounded
    #[arg(short, long, default_value_t = -1, allow_negative_numbers = true)]
    depth: i64,

    /// Name of the root element
    #[arg(short, long)]
    name: Option<String>,

    /// Regular expression element and attribute names must match
    #[arg(long)]
    name_pattern: Option<String>,

    /// Fail on the first accessor error instead of leaving the member out
    #[arg(long)]
    strict: bool,

    /// Output file path
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// What the process knows about itself at startup
#[derive(Debug)]
struct Snapshot {
    program: String,
    arguments: Vec<String>,
    directory: Option<PathBuf>,
    environment: BTreeMap<String, String>,
    config_folder: Option<PathBuf>,
}

introspect_getters!(Snapshot {
    getProgram => program,
    getArguments => arguments,
    getDirectory => directory,
    getEnvironment => environment,
    getConfigFolder => config_folder,
});

impl Snapshot {
    fn capture(app_name: &str) -> Self {
        let mut args = env::args_os().map(|arg| arg.to_string_lossy().into_owned());
        let program = args.next().unwrap_or_default();
        Self {
            program,
            arguments: args.collect(),
            directory: env::current_dir().ok(),
            environment: env::vars_os()
                .map(|(key, value)| {
                    (
                        key.to_string_lossy().into_owned(),
                        value.to_string_lossy().into_owned(),
                    )
                })
                .collect(),
            config_folder: app_config_folder(app_name),
        }
    }
}

/// Per-user folder for application data
fn app_config_folder(app_name: &str) -> Option<PathBuf> {
    let home = env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .map(PathBuf::from);
    let appdata = env::var_os("APPDATA").map(PathBuf::from);
    config_folder_for(env::consts::OS, home, appdata, app_name)
}

/// `~/Library/Java` on macOS, `%APPDATA%\Sun\Java` on Windows, `~/.config`
/// everywhere else and as the fallback
fn config_folder_for(
    os: &str,
    home: Option<PathBuf>,
    appdata: Option<PathBuf>,
    app_name: &str,
) -> Option<PathBuf> {
    let root = match os {
        "macos" => home.map(|home| home.join("Library").join("Java")),
        "windows" => appdata
            .map(|appdata| appdata.join("Sun").join("Java"))
            .or_else(|| home.map(|home| home.join(".config"))),
        _ => home.map(|home| home.join(".config")),
    };
    root.map(|root| root.join(app_name))
}

fn main() {
    // Initialize the default subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let mut config = if args.strict {
        Config::strict()
    } else {
        Config::default()
    };
    if let Some(pattern) = &args.name_pattern {
        config = config
            .with_name_pattern(pattern)
            .with_context(|| format!("invalid --name-pattern `{pattern}`"))?;
    }

    let depth = Depth::from(args.depth);
    let name = args.name.as_deref();
    let snapshot = Snapshot::capture(APP_NAME);
    info!(format = ?args.format, %depth, "Projecting process snapshot");

    let mut sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    match args.format {
        Format::Xml => {
            let document = TreeBuilder::with_config(config).serialize_named(&snapshot, name, depth)?;
            tree::write_document(&document, &mut sink)?;
        }
        Format::Text => {
            TextEmitter::with_config(config).emit_named(&mut sink, &snapshot, name, depth)?;
        }
    }
    writeln!(sink)?;
    sink.flush()?;

    if let Some(path) = &args.output {
        info!("Output written to: {}", path.display());
    }
    Ok(())
}
