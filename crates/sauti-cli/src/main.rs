//! sauti - operator CLI for the multi-stream speech token codec.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod style;
mod units;
mod utils;

use commands::decode::DecodeArgs;
use commands::encode::EncodeArgs;
use commands::inspect::InspectArgs;
use config::Mode;
use style::Theme;

#[derive(Debug, Parser)]
#[command(
    name = "sauti",
    about = "Encode and decode multi-stream speech token sequences",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Encode per-stream units (JSON) into a token sequence
    Encode {
        /// Units file, or `-` for stdin
        #[arg(short, long)]
        input: PathBuf,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Stream table preset
        #[arg(long, value_enum, default_value_t = Mode::Expressive)]
        mode: Mode,

        /// TOML stream table overriding the preset
        #[arg(long)]
        layout: Option<PathBuf>,
    },
    /// Decode a token sequence back into per-stream units (JSON)
    Decode {
        /// Sequence file, or `-` for stdin
        #[arg(short, long)]
        input: PathBuf,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Stream table preset
        #[arg(long, value_enum, default_value_t = Mode::Expressive)]
        mode: Mode,

        /// TOML stream table overriding the preset
        #[arg(long)]
        layout: Option<PathBuf>,

        /// Primary-stream frame count the synthesizer expects
        #[arg(long)]
        frames: Option<usize>,
    },
    /// Summarize the streams in a token sequence
    Inspect {
        /// Sequence file, or `-` for stdin
        #[arg(short, long)]
        input: PathBuf,

        /// Stream table preset
        #[arg(long, value_enum, default_value_t = Mode::Expressive)]
        mode: Mode,

        /// TOML stream table overriding the preset
        #[arg(long)]
        layout: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Generate shell completion scripts
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Plain,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sauti=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let theme = if cli.no_color {
        Theme::no_color()
    } else {
        Theme::default()
    };

    if let Err(e) = run(cli.command, &theme) {
        theme.error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(command: Commands, theme: &Theme) -> error::Result<()> {
    match command {
        Commands::Encode {
            input,
            output,
            mode,
            layout,
        } => commands::encode::execute(
            EncodeArgs {
                input,
                output,
                mode,
                layout,
            },
            theme,
        ),
        Commands::Decode {
            input,
            output,
            mode,
            layout,
            frames,
        } => commands::decode::execute(
            DecodeArgs {
                input,
                output,
                mode,
                layout,
                frames,
            },
            theme,
        ),
        Commands::Inspect {
            input,
            mode,
            layout,
            format,
        } => commands::inspect::execute(
            InspectArgs {
                input,
                mode,
                layout,
                format,
            },
            theme,
        ),
        Commands::Completions { shell } => {
            commands::completions::execute(shell);
            Ok(())
        }
    }
}
