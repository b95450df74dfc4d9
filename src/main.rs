//! Manifest Sync CLI
//!
//! Entry point for the `manifest-sync` command-line tool.

use clap::{Parser, Subcommand};
use manifest_sync::config::{EditorSettings, EffectiveConfig, DEFAULT_CONFIG_FILE};
use manifest_sync::schema::FormModel;
use manifest_sync::session::{self, StepReport};
use manifest_sync::source::{InitialManifest, ManifestFile, SAMPLE_MANIFEST};
use manifest_sync::sync::{reset_form, SyncController};
use manifest_sync::transform;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "manifest-sync")]
#[command(about = "Edit manifests as text or as a form, kept in sync", version)]
struct Cli {
    /// Path to config file (default: .manifest-sync.toml)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode manifest text into a form model (JSON)
    Decode {
        /// Manifest file (default: stdin)
        path: Option<PathBuf>,

        /// Fail instead of printing the reset form
        #[arg(long)]
        strict: bool,
    },

    /// Encode a form model (JSON) into manifest text
    Encode {
        /// Form model file (default: stdin)
        path: Option<PathBuf>,
    },

    /// Check that manifest text survives decode + encode unchanged
    Check {
        /// Manifest file (default: stdin)
        path: Option<PathBuf>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Print the bundled sample manifest
    Sample,

    /// Replay a scripted editing session
    Session {
        /// Script file, one JSON event per line (default: stdin)
        script: Option<PathBuf>,

        /// Initial manifest (default: bundled sample)
        #[arg(long, short = 'i')]
        initial: Option<PathBuf>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = match load_settings(cli.config.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            process::exit(1);
        }
    };

    match cli.command {
        Commands::Decode { path, strict } => run_decode(path, strict, &settings),
        Commands::Encode { path } => run_encode(path, &settings),
        Commands::Check { path, json } => run_check(path, json),
        Commands::Sample => print!("{}", SAMPLE_MANIFEST),
        Commands::Session {
            script,
            initial,
            json,
        } => run_session(script, initial, json, settings),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_settings(config_path: Option<&Path>) -> Result<EditorSettings, String> {
    if let Some(p) = config_path {
        if !p.exists() {
            return Err(format!("config file not found: {}", p.display()));
        }
    }
    let path = config_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    let config = EffectiveConfig::build(Some(path), None).map_err(|e| e.to_string())?;
    config.settings().map_err(|e| e.to_string())
}

fn read_input(path: Option<&Path>) -> Result<String, String> {
    match path {
        Some(p) => ManifestFile::new(p).load().map_err(|e| e.to_string()),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("Failed to read stdin: {}", e))?;
            Ok(buf)
        }
    }
}

fn read_or_exit(path: Option<&Path>) -> String {
    match read_input(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}

fn run_decode(path: Option<PathBuf>, strict: bool, settings: &EditorSettings) {
    let text = read_or_exit(path.as_deref());

    let form = match transform::decode_text(&text) {
        Ok(form) => form,
        Err(e) if strict => {
            eprintln!("Decode error: {}", e);
            process::exit(1);
        }
        Err(e) => {
            tracing::warn!(error = %e, "decode failed, printing reset form");
            reset_form(settings)
        }
    };

    print_json(&form);
}

fn run_encode(path: Option<PathBuf>, settings: &EditorSettings) {
    let text = read_or_exit(path.as_deref());

    let form: FormModel = match serde_json::from_str(&text) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Invalid form model: {}", e);
            process::exit(1);
        }
    };

    match transform::encode_text(&form, settings.output.indent) {
        Ok(manifest) => println!("{}", manifest),
        Err(e) => {
            eprintln!("Error rendering manifest: {}", e);
            process::exit(1);
        }
    }
}

fn run_check(path: Option<PathBuf>, json_output: bool) {
    let text = read_or_exit(path.as_deref());

    let result = match transform::check_round_trip(&text) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Decode error: {}", e);
            process::exit(1);
        }
    };

    if json_output {
        print_json(&result);
    } else if result.lossless {
        println!("Round trip lossless ({} fields)", result.fields);
    } else {
        println!("Round trip NOT lossless ({} fields)", result.fields);
        println!("Re-encoded manifest:");
        match serde_json::to_string_pretty(&result.reencoded) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("Error serializing output: {}", e),
        }
    }

    if !result.lossless {
        process::exit(1);
    }
}

fn run_session(
    script: Option<PathBuf>,
    initial: Option<PathBuf>,
    json_output: bool,
    settings: EditorSettings,
) {
    let mut controller = SyncController::new(settings);

    let started = match initial {
        Some(path) => controller.start(&ManifestFile::new(path)),
        None => controller.start(&manifest_sync::BundledSample),
    };
    if let Err(e) = started {
        eprintln!("Error loading initial manifest: {}", e);
        process::exit(1);
    }

    let events = match script {
        Some(ref path) => std::fs::File::open(path)
            .map_err(session::SessionError::from)
            .and_then(|f| session::parse_script(BufReader::new(f))),
        None => session::parse_script(io::stdin().lock()),
    };
    let events = match events {
        Ok(events) => events,
        Err(e) => {
            eprintln!("Script error: {}", e);
            process::exit(1);
        }
    };

    let reports = match session::replay(&mut controller, events) {
        Ok(reports) => reports,
        Err(e) => {
            eprintln!("Session stopped: {}", e);
            process::exit(1);
        }
    };

    if json_output {
        print_json(&serde_json::json!({
            "steps": reports,
            "form": controller.form(),
            "text": controller.text(),
        }));
    } else {
        for report in &reports {
            print_step(report);
        }
        println!();
        println!("{}", controller.text());
    }
}

fn print_step(report: &StepReport) {
    let what = match serde_json::to_value(&report.propagation) {
        Ok(v) => v.to_string(),
        Err(_) => format!("{:?}", report.propagation),
    };
    println!("  line {:>3}: {} ({} fields)", report.line, what, report.fields);
}
