//! CLI entry point for hashsite

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "hashsite")]
#[command(version)]
#[command(about = "Build, import and preview a hash-routed showcase site", long_about = None)]
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
    /// Build the static output directory
    #[command(alias = "b")]
    Build,

    /// Copy data files from the core repository
    Import {
        /// Location of the core repository
        #[arg(long, env = "CORE_DIR")]
        core_dir: Option<PathBuf>,
    },

    /// Build, then serve the output locally
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Enable static mode (no file watching)
        #[arg(long)]
        r#static: bool,
    },

    /// Render a route to the terminal
    Render {
        /// Location fragment, e.g. "#/kb"
        #[arg(default_value = "#/")]
        fragment: String,

        /// Use the flat route table instead of the site structure
        #[arg(long)]
        routes: bool,
    },

    /// List site information
    List {
        /// What to list (routes, pages, menu)
        #[arg(default_value = "routes")]
        r#type: String,
    },

    /// Remove the output directory
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "hashsite=debug,info"
    } else {
        "hashsite=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Build => {
            let site = hashsite::Site::new(&base_dir)?;
            site.build()?;
            println!("Built successfully!");
        }

        Commands::Import { core_dir } => {
            let site = hashsite::Site::new(&base_dir)?;
            let report = hashsite::commands::import::run(&site, core_dir.as_deref())?;
            println!(
                "Imported {} files from {} ({} skipped)",
                report.copied,
                report.core_dir.display(),
                report.skipped
            );
        }

        Commands::Server {
            port,
            ip,
            r#static,
        } => {
            let site = hashsite::Site::new(&base_dir)?;
            site.build()?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            hashsite::server::start(&site, &ip, port, !r#static).await?;
        }

        Commands::Render { fragment, routes } => {
            let site = hashsite::Site::new(&base_dir)?;
            let page = hashsite::commands::render::run(&site, &fragment, routes).await?;
            print!("{}", page);
        }

        Commands::List { r#type } => {
            let site = hashsite::Site::new(&base_dir)?;
            hashsite::commands::list::run(&site, &r#type)?;
        }

        Commands::Clean => {
            let site = hashsite::Site::new(&base_dir)?;
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("hashsite version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
