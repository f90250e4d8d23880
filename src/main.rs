use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use greenhouse::common::write_string_to_file;
use greenhouse::config::AppConfig;
use greenhouse::database::{
    establish_connection, get_database_url, migrate_database, seed_data, setup_database,
    MigrateDirection,
};
use greenhouse::export::{self, ExportFormat};
use greenhouse::layout::LayoutStore;
use greenhouse::services::LayoutService;

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    /// YAML or TOML configuration file
    #[clap(short, long, global = true)]
    config: Option<String>,
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[cfg(feature = "server")]
    Serve {
        #[clap(short, long)]
        port: Option<u16>,
        #[clap(short, long)]
        database: Option<String>,
        #[clap(long)]
        cors_origin: Option<String>,
    },
    Db {
        #[clap(subcommand)]
        command: DbCommands,
    },
    Layout {
        #[clap(subcommand)]
        command: LayoutCommands,
    },
}

#[derive(Subcommand, Debug)]
enum DbCommands {
    Init {
        #[clap(short, long)]
        database: Option<String>,
    },
    Migrate {
        #[clap(subcommand)]
        direction: MigrateDirection,
        #[clap(short, long)]
        database: Option<String>,
    },
    /// Load a sample greenhouse into an empty layout
    Seed {
        #[clap(short, long)]
        database: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum LayoutCommands {
    /// Print every component in paint order
    List {
        #[clap(short, long)]
        database: Option<String>,
    },
    Export {
        #[clap(short, long, value_enum, default_value = "svg")]
        format: ExportFormat,
        /// Write to a file instead of stdout
        #[clap(short, long)]
        output: Option<String>,
        #[clap(short, long)]
        database: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let mut config = AppConfig::load_or_default(args.config.as_deref())?;
    if args.log_level.is_some() {
        config.log_level = args.log_level.clone();
    }
    setup_logging(&config.log_level);

    match args.command {
        #[cfg(feature = "server")]
        Commands::Serve {
            port,
            database,
            cors_origin,
        } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(database) = database {
                config.database.path = database;
            }
            if cors_origin.is_some() {
                config.server.cors_origin = cors_origin;
            }
            info!("Starting server on port {}", config.server.port);
            greenhouse::server::start_server(&config).await?;
        }
        Commands::Db { command } => match command {
            DbCommands::Init { database } => {
                let database = database.unwrap_or(config.database.path);
                info!("Initializing database: {}", database);
                migrate_database(&database, MigrateDirection::Up).await?;
            }
            DbCommands::Migrate {
                direction,
                database,
            } => {
                let database = database.unwrap_or(config.database.path);
                info!("Running database migration: {:?}", direction);
                migrate_database(&database, direction).await?;
            }
            DbCommands::Seed { database } => {
                let database = database.unwrap_or(config.database.path);
                let db = establish_connection(&get_database_url(Some(&database))).await?;
                setup_database(&db).await?;
                let created = seed_data::create_example_layout(&db).await?;
                info!("Seeded {} components into {}", created, database);
            }
        },
        Commands::Layout { command } => match command {
            LayoutCommands::List { database } => {
                let service = open_layout(database.unwrap_or(config.database.path)).await?;
                let components = service.list_components().await?;
                println!(
                    "{:>5}  {:<24} {:<9} {:>9} {:>9} {:>7} {:>7}  {:<11} {:>5}",
                    "id", "name", "type", "x", "y", "width", "height", "status", "layer"
                );
                for c in components {
                    println!(
                        "{:>5}  {:<24} {:<9} {:>9.1} {:>9.1} {:>7.1} {:>7.1}  {:<11} {:>5}",
                        c.id(),
                        c.name,
                        c.component_type,
                        c.x_position,
                        c.y_position,
                        c.width,
                        c.height,
                        c.status,
                        c.layer_order
                    );
                }
            }
            LayoutCommands::Export {
                format,
                output,
                database,
            } => {
                let service = open_layout(database.unwrap_or(config.database.path)).await?;
                let components = service.list_components().await?;
                let rendered = export::render(format, &components, &config.canvas.export_options())
                    .map_err(|e| anyhow::anyhow!("Export failed: {}", e))?;
                match output {
                    Some(path) => {
                        write_string_to_file(&path, &rendered)
                            .with_context(|| format!("Failed to write {}", path))?;
                        info!("Exported {} components to {}", components.len(), path);
                    }
                    None => print!("{}", rendered),
                }
            }
        },
    }

    Ok(())
}

async fn open_layout(database: String) -> Result<LayoutService> {
    let db = establish_connection(&get_database_url(Some(&database))).await?;
    setup_database(&db).await?;
    Ok(LayoutService::new(db))
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_ref()
        .unwrap_or(&"info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!(
            "sqlx=warn,sea_orm_migration=warn,{}",
            log_level
        )))
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
