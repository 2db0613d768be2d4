mod commands;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use commands::init::InitOptions;
use commands::{EXIT_FAILURE, EXIT_MANIFEST_ERROR};
use std::path::PathBuf;
use std::process::ExitCode;

pub const BIN_NAME: &str = "appmanifest";

#[derive(Debug, Parser)]
#[command(
    name = "appmanifest",
    version,
    about = "Derive, patch, and validate web app manifests"
)]
struct Cli {
    /// Path to the manifest file.
    #[arg(long, short = 'm', default_value = "manifest.webapp", global = true)]
    manifest: PathBuf,

    /// Output results as structured JSON.
    #[arg(long, default_value_t = false, global = true)]
    json: bool,

    /// Write compact JSON instead of two-space indented output.
    #[arg(long, default_value_t = false, global = true)]
    ugly: bool,

    /// Enable verbose (debug) logging output.
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    /// Enable trace-level logging (more detailed than --verbose).
    #[arg(long, default_value_t = false, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create a manifest from a package descriptor.
    Init {
        /// Package descriptor to derive fields from.
        #[arg(long, short, default_value = "package.json")]
        package: PathBuf,
        /// Defaults layered under the package data (TOML or JSON).
        #[arg(long)]
        defaults: Option<PathBuf>,
        /// Overwrite an existing manifest.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Print the value of a dot-path field (e.g. `icons.48`).
    Get {
        field: String,
    },
    /// Set a dot-path field. An empty value removes the field.
    Set {
        field: String,
        value: String,
        /// Store the value as text even if it parses as JSON.
        #[arg(long, default_value_t = false)]
        text: bool,
    },
    /// Merge a JSON file into the manifest.
    Merge {
        /// JSON object to merge.
        file: PathBuf,
        /// Write empty values and replace nested objects wholesale.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Check required fields; exits 3 when any are missing.
    Validate {
        /// Also report empty optional fields.
        #[arg(long, default_value_t = false)]
        all: bool,
    },
    /// Print the manifest.
    Show,
    /// Generate shell completions for bash, zsh, fish, elvish, or powershell.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
    /// Generate man pages in the specified directory.
    ManPages {
        /// Output directory for man pages.
        #[arg(default_value = "man")]
        dir: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("APPMANIFEST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let manifest = cli.manifest.as_path();
    let json_output = cli.json;
    let ugly = cli.ugly;

    let result = match cli.command {
        Commands::Init {
            package,
            defaults,
            force,
        } => commands::init::run(
            manifest,
            &InitOptions {
                package: &package,
                defaults: defaults.as_deref(),
                force,
                ugly,
            },
            json_output,
        ),
        Commands::Get { field } => commands::get::run(manifest, &field, json_output),
        Commands::Set { field, value, text } => {
            commands::set::run(manifest, &field, &value, text, ugly, json_output)
        }
        Commands::Merge { file, force } => {
            commands::merge::run(manifest, &file, force, ugly, json_output)
        }
        Commands::Validate { all } => commands::validate::run(manifest, all, json_output),
        Commands::Show => commands::show::run(manifest, ugly),
        Commands::Completions { shell } => commands::completions::run::<Cli>(shell),
        Commands::ManPages { dir } => commands::man_pages::run::<Cli>(&dir),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(msg) => {
            eprintln!("error: {msg}");
            let code = if msg.starts_with("manifest error:")
                || msg.starts_with("failed to read package descriptor")
            {
                EXIT_MANIFEST_ERROR
            } else {
                EXIT_FAILURE
            };
            ExitCode::from(code)
        }
    }
}
