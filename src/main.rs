//! CLI entry point for travelog

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "travelog")]
#[command(version = "0.1.0")]
#[command(about = "A blog generator and server backed by a headless CMS", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Generate static files from the content store
    #[command(alias = "g")]
    Generate,

    /// Start the blog server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Clean the public folder
    Clean,

    /// List posts from the content store
    List,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "travelog=debug,info"
    } else {
        "travelog=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            travelog::commands::init::init_site(&target_dir)?;
            println!("Initialized empty Travelog site in {:?}", target_dir);
        }

        Commands::Generate => {
            let travelog = travelog::Travelog::new(&base_dir)?;
            tracing::info!("Generating static files...");
            travelog::commands::generate::run(&travelog).await?;
            println!("Generated successfully!");
        }

        Commands::Server { port, ip } => {
            let travelog = travelog::Travelog::new(&base_dir)?;

            // Warm build; the server still starts when the store is down
            tracing::info!("Generating static files...");
            if let Err(e) = travelog::commands::generate::run(&travelog).await {
                tracing::warn!("Initial generation failed: {}", e);
            }

            tracing::info!("Starting server at http://{}:{}", ip, port);
            travelog::server::start(&travelog, &ip, port).await?;
        }

        Commands::Clean => {
            let travelog = travelog::Travelog::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            travelog::commands::clean::run(&travelog)?;
            println!("Cleaned successfully!");
        }

        Commands::List => {
            let travelog = travelog::Travelog::new(&base_dir)?;
            travelog::commands::list::run(&travelog).await?;
        }

        Commands::Version => {
            println!("travelog version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
