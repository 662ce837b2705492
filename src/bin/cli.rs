//! rconsole CLI
//!
//! Command-line interface for administering a game server over RCON.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use rconsole::{AdminAction, Config, RconClient, RconError, TailReader};
use tracing_subscriber::{fmt, EnvFilter};

/// rconsole CLI
#[derive(Parser, Debug)]
#[command(name = "rcon-cli")]
#[command(about = "Basic game server manager via RCON")]
#[command(version)]
struct Args {
    /// Server host
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// RCON port
    #[arg(short, long, default_value = "25575")]
    port: u16,

    /// RCON password
    #[arg(long)]
    password: Option<String>,

    /// I/O timeout in milliseconds
    #[arg(short, long, default_value = "3000")]
    timeout_ms: u64,

    /// Path to the server log file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Server directory (log read from logs/latest.log)
    #[arg(long)]
    server_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List online players
    Players,

    /// Get server status
    Status,

    /// Ban a player
    Ban {
        /// Player name to ban
        player: String,
    },

    /// Broadcast a message to all players
    Broadcast {
        /// Message to broadcast
        message: String,
    },

    /// Send restart command to the server
    Restart,

    /// Show last lines of the log file
    Logs {
        /// Number of log lines to show
        #[arg(short, long, default_value = "20")]
        lines: usize,
    },

    /// Send a raw console command
    Command {
        /// Command string
        cmd: String,
    },
}

fn main() {
    // Logs go to stderr so command output stays clean on stdout
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,rconsole=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), RconError> {
    let mut builder = Config::builder()
        .host(&args.host)
        .port(args.port)
        .timeout_ms(args.timeout_ms);
    if let Some(password) = &args.password {
        builder = builder.password(password);
    }
    if let Some(dir) = &args.server_dir {
        builder = builder.server_dir(dir);
    }
    if let Some(file) = &args.log_file {
        builder = builder.log_file(file);
    }
    let config = builder.build();

    let action = match args.command {
        Commands::Logs { lines } => {
            let path = config.log_path()?;
            let text = TailReader::new(config.tail_block_size).tail(&path, lines)?;
            println!("{}", text);
            return Ok(());
        }
        Commands::Players => AdminAction::ListPlayers,
        Commands::Status => AdminAction::Status,
        Commands::Ban { player } => AdminAction::Ban { player },
        Commands::Broadcast { message } => AdminAction::Broadcast { message },
        Commands::Restart => AdminAction::Restart,
        Commands::Command { cmd } => AdminAction::Raw(cmd),
    };

    if args.password.is_none() {
        return Err(RconError::Config(
            "--password is required for RCON commands".to_string(),
        ));
    }

    tracing::info!("rconsole v{} -> {}:{}", rconsole::VERSION, config.host, config.port);
    let reply = RconClient::session(&config, |client| action.run(client))?;
    println!("{}", reply);
    Ok(())
}
