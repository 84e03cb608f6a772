use std::process::ExitCode;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use autoloader::{
    cli::{self, App, Phases},
    config::{self, Config},
    error, info,
};

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
    /// Without a subcommand, releases and playlists are synced
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Only check followed artists for new releases
    Releases,

    /// Only sync followed playlists
    Playlists,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let phases = match cli.command {
        None => Phases::ALL,
        Some(Command::Releases) => Phases {
            releases: true,
            playlists: false,
        },
        Some(Command::Playlists) => Phases {
            releases: false,
            playlists: true,
        },
        Some(Command::Completions(opt)) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
            return ExitCode::SUCCESS;
        }
    };

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("Invalid configuration. Err: {}", e),
    };

    if let Err(e) = config.ensure_layout().await {
        error!("Cannot create directories. Err: {}", e);
    }

    let app = match App::from_config(config) {
        Ok(app) => app,
        Err(e) => error!("Cannot start. Err: {}", e),
    };
    info!("Downloading with {}", app.executor_name());

    if cli::run(&app, phases).await {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
