use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use playlist_export::{cli, config, error};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
  args_conflicts_with_subcommands = true // bare invocation runs an export
)]
struct Cli {
    #[clap(subcommand)]
    command: Option<Command>,

    #[clap(flatten)]
    export: ExportArgs,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Export a playlist's tracks to a JSON file
    Export(ExportArgs),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ExportArgs {
    /// Playlist URL (prompted for when omitted)
    #[clap(long)]
    url: Option<String>,

    /// Market used for catalog lookups (e.g. US, DE)
    #[clap(long)]
    country_code: Option<String>,

    /// Pause before every API request, in milliseconds
    #[clap(long)]
    delay_ms: Option<u64>,

    /// Root directory for exports (defaults to ~/Music/Playlist)
    #[clap(long)]
    output_dir: Option<PathBuf>,

    /// Write the export file after this many tracks
    #[clap(long, value_parser = clap::value_parser!(u64).range(1..))]
    checkpoint_every: Option<u64>,
}

impl From<ExportArgs> for cli::ExportOptions {
    fn from(args: ExportArgs) -> Self {
        cli::ExportOptions {
            url: args.url,
            country_code: args.country_code,
            delay_ms: args.delay_ms,
            output_dir: args.output_dir,
            checkpoint_every: args.checkpoint_every.map(|n| n as usize),
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Export(opt)) => cli::export(opt.into()).await,
        None => cli::export(cli.export.into()).await,
        Some(Command::Completions(opt)) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
