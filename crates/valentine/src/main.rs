use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;
mod output;

use commands::defaults::MessagePart;
use commands::no_button::Viewport;
use output::Output;

#[derive(Parser)]
#[command(name = "valentine")]
#[command(version)]
#[command(about = "Build and open valentine message links")]
#[command(long_about = concat!(
    "Packs a valentine message into a shareable link and opens links back into messages.\n\n",
    "The whole message travels inside the link; nothing is stored server side."
))]
struct Cli {
    /// Output in JSON format (for scripts)
    #[arg(short, long, global = true)]
    json: bool,

    /// Data directory (default: platform data dir/valentine)
    #[arg(long, global = true, env = "VALENTINE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log decoding steps (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a shareable link
    Link {
        /// Draft JSON file, `-` for stdin (default message if omitted)
        draft: Option<PathBuf>,
        /// Origin to build the link against (default from config)
        #[arg(long)]
        base_url: Option<String>,
        /// Sub-path the viewer is deployed under
        #[arg(long)]
        base_path: Option<String>,
        /// Also render the link as a QR code
        #[arg(long)]
        qr: bool,
    },

    /// Open a link and show the message it carries
    #[command(alias = "view")]
    Open {
        /// Full link, query string or raw payload
        link: String,
        /// Fail on a broken link instead of showing the default message
        #[arg(long)]
        strict: bool,
    },

    /// Check a draft and list every issue
    Validate {
        /// Draft JSON file, `-` for stdin
        draft: PathBuf,
        /// Which part of a message the draft holds
        #[arg(short, long, value_enum, default_value = "combined")]
        part: MessagePart,
    },

    /// Print a default message
    Default {
        #[arg(value_enum, default_value = "combined")]
        part: MessagePart,
    },

    /// Simulate clicks on the no button
    NoButton {
        /// Draft JSON file, `-` for stdin (default message if omitted)
        #[arg(conflicts_with = "link")]
        draft: Option<PathBuf>,
        /// Take the message from a shared link instead
        #[arg(long)]
        link: Option<String>,
        /// Number of clicks
        #[arg(short, long, default_value = "5")]
        clicks: u32,
        /// Seed for reproducible runs
        #[arg(short, long)]
        seed: Option<u64>,
        /// Viewport width used to place a moved button
        #[arg(long, default_value = "1280")]
        width: usize,
        /// Viewport height used to place a moved button
        #[arg(long, default_value = "720")]
        height: usize,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set the origin links are built against
    SetBaseUrl {
        /// Absolute URL, e.g. https://example.com
        base_url: String,
        /// Sub-path the viewer is deployed under
        #[arg(long)]
        base_path: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let output = Output::new(cli.json);

    let result = run(cli, &output);

    if let Err(e) = result {
        output.error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // stdout is reserved for command output
    fmt::Subscriber::builder()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .init();
}

fn run(cli: Cli, output: &Output) -> anyhow::Result<()> {
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?
            .join("valentine"),
    };

    let config = config::Config::load(&data_dir)?;

    match cli.command {
        Commands::Link {
            draft,
            base_url,
            base_path,
            qr,
        } => commands::link::create(
            draft.as_deref(),
            base_url.as_deref(),
            base_path.as_deref(),
            qr,
            &config,
            output,
        ),
        Commands::Open { link, strict } => commands::view::open(&link, strict, output),
        Commands::Validate { draft, part } => commands::validate::check(&draft, part, output),
        Commands::Default { part } => commands::defaults::show(part, output),
        Commands::NoButton {
            draft,
            link,
            clicks,
            seed,
            width,
            height,
        } => commands::no_button::simulate(
            draft.as_deref(),
            link.as_deref(),
            clicks,
            seed,
            Viewport { width, height },
            output,
        ),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::show(&config, output),
            ConfigCommands::SetBaseUrl {
                base_url,
                base_path,
            } => {
                // Ensure data directory exists
                std::fs::create_dir_all(&data_dir)?;
                commands::config::set_base_url(&base_url, base_path.as_deref(), &config, output)
            }
        },
    }
}
