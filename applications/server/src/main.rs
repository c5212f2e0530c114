/// Lesson Server - audio proxy and web UI host for the lesson player
use anyhow::Context;
use clap::{Parser, Subcommand};
use lesson_core::{announcement::parse_announcement, resolve_source, Catalog};
use lesson_server::{
    api::create_router, config::ServerConfig, services::DriveUpstream, state::AppState,
};
use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lesson-server")]
#[command(about = "Lesson player audio proxy and web server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long, env = "LESSON_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Add a lesson from an announcement post to the catalog
    Import {
        /// Catalog file to update (created if missing)
        #[arg(short, long, default_value = "lessons.json")]
        catalog: PathBuf,
        /// Drive file id of the lesson audio
        #[arg(short, long)]
        file_id: String,
        /// Text file holding the announcement post
        #[arg(short, long)]
        text: PathBuf,
        /// Only lesson numbers above this are accepted when the catalog is empty
        #[arg(short, long, default_value_t = 0)]
        baseline: u64,
    },
    /// Validate a catalog file
    Check {
        /// Catalog file to read
        #[arg(short, long, default_value = "lessons.json")]
        catalog: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lesson_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            serve(config).await?;
        }
        Commands::Import {
            catalog,
            file_id,
            text,
            baseline,
        } => {
            import_lesson(&catalog, &file_id, &text, baseline)?;
        }
        Commands::Check { catalog } => {
            check_catalog(&catalog)?;
        }
    }

    Ok(())
}

async fn serve(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load(config_path.as_deref())?;
    config.validate()?;

    tracing::info!("Starting Lesson Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);
    tracing::info!("Audio proxy: {} -> {}", config.proxy.route, config.proxy.download_url);
    tracing::info!("Web UI: {}", config.content.web_dir.display());

    let upstream = Arc::new(DriveUpstream::from_settings(&config.proxy)?);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    // Build application state and router
    let app_state = AppState::new(Arc::new(config), upstream);
    let app = create_router(app_state);

    tracing::info!("Server listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn import_lesson(
    catalog_path: &Path,
    file_id: &str,
    text_path: &Path,
    baseline: u64,
) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(text_path)
        .with_context(|| format!("reading announcement {}", text_path.display()))?;

    let announcement = parse_announcement(&text);
    let lesson = announcement
        .into_lesson(file_id)
        .context("announcement does not name a lesson number")?;
    let lesson_id = lesson.id.clone();

    let mut catalog = if catalog_path.exists() {
        Catalog::load(catalog_path)?
    } else {
        Catalog::default()
    };

    let added = catalog.merge_newer([lesson], baseline);
    if added == 0 {
        println!("Lesson {lesson_id} is not newer than the catalog; nothing to do");
        return Ok(());
    }

    catalog.save(catalog_path)?;
    println!(
        "Added lesson {lesson_id}; {} now has {} lessons",
        catalog_path.display(),
        catalog.len()
    );

    Ok(())
}

fn check_catalog(catalog_path: &Path) -> anyhow::Result<()> {
    let catalog = Catalog::load(catalog_path)?;

    let proxied = catalog
        .iter()
        .filter(|lesson| resolve_source(&lesson.url).is_proxied())
        .count();

    println!("Lessons: {}", catalog.len());
    println!("  via audio proxy: {}", proxied);
    println!("  direct URLs:     {}", catalog.len() - proxied);

    Ok(())
}
