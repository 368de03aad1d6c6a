use std::path::PathBuf;

use clap::{
    ArgAction, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use replaycli::{cli, config, error};

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
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show the most-listened tracks from the streaming history export
    Top(TopOptions),

    /// Replace a Spotify playlist with the most-listened tracks
    Sync(SyncOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct TopOptions {
    /// Root directory of the streaming history export (one subdirectory per user)
    #[clap(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Year to include; can be repeated (defaults to the current year)
    #[clap(long = "year", action = ArgAction::Append, num_args = 1)]
    pub years: Vec<String>,

    /// User directory to exclude; can be repeated
    #[clap(long = "exclude", action = ArgAction::Append, num_args = 1)]
    pub exclude: Vec<String>,

    /// Number of tracks to list
    #[clap(long, default_value_t = 100)]
    pub count: usize,
}

#[derive(Parser, Debug, Clone)]
pub struct SyncOptions {
    /// Root directory of the streaming history export (one subdirectory per user)
    #[clap(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Year to include; can be repeated (defaults to the current year)
    #[clap(long = "year", action = ArgAction::Append, num_args = 1)]
    pub years: Vec<String>,

    /// User directory to exclude; can be repeated
    #[clap(long = "exclude", action = ArgAction::Append, num_args = 1)]
    pub exclude: Vec<String>,

    /// Number of tracks to push into the playlist
    #[clap(long, default_value_t = 100)]
    pub count: usize,

    /// Target playlist ID; its contents are fully replaced
    #[clap(long)]
    pub playlist: String,
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
        Command::Top(opt) => cli::top(opt.data_dir, opt.years, opt.exclude, opt.count).await,
        Command::Sync(opt) => {
            cli::sync(opt.data_dir, opt.years, opt.exclude, opt.count, opt.playlist).await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
