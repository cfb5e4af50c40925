use std::{path::PathBuf, sync::Arc};

use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dailynews::{
    commands::{self, SuperuserArgs},
    config::EnvConfig,
    db::mariadb_service::MariaDbService,
    routes::configure_routes,
    utils::mail::Notifier,
};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "dailynews")]
#[command(about = "DailyNews publishing service.", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the MariaDB database (utf8mb4).
    Createdb {
        /// Database name. Defaults to the one in DATABASE_URL, then `dailynews_db`.
        #[arg(long)]
        name: Option<String>,
    },
    /// Apply pending migrations and seed the core publishers.
    Migrate,
    /// List migrations and whether they are applied.
    Showmigrations,
    /// Load a JSON fixture.
    #[command(arg_required_else_help = true)]
    Loaddata {
        file: PathBuf,
    },
    /// Create a staff superuser.
    Createsuperuser {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Read the password from DAILYNEWS_SUPERUSER_PASSWORD instead of prompting.
        #[arg(long)]
        noinput: bool,
    },
    /// Serve the HTTP API.
    Runserver {
        /// Listen address, e.g. `0.0.0.0:8000`.
        addr: Option<String>,
    },
}

#[actix_web::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = EnvConfig::from_env()?;

    match cli.command {
        Commands::Createdb { name } => {
            let name = commands::createdb(&config.db_url, name).await?;
            println!("Database {name} is ready.");
        }
        Commands::Migrate => {
            commands::migrate(&config.db_url).await?;
        }
        Commands::Showmigrations => {
            let states = commands::showmigrations(&config.db_url).await?;
            println!("{}", commands::format_migrations(&states));
        }
        Commands::Loaddata { file } => {
            let db = MariaDbService::connect(&config.db_url).await?;
            let count = commands::loaddata(&db, &file).await?;
            println!("Installed {count} object(s) from 1 fixture(s)");
        }
        Commands::Createsuperuser { username, email, noinput } => {
            let (username, email, password) =
                commands::superuser_input(SuperuserArgs { username, email, noinput })?;
            let db = MariaDbService::connect(&config.db_url).await?;
            commands::create_superuser(&db, &username, &email, &password).await?;
            println!("Superuser created successfully.");
        }
        Commands::Runserver { addr } => {
            let addr = addr.unwrap_or_else(|| config.bind_addr.clone());
            runserver(config, &addr).await?;
        }
    }
    Ok(())
}

async fn runserver(config: EnvConfig, addr: &str) -> Result<()> {
    let db = Arc::new(
        MariaDbService::new(&config.db_url)
            .await
            .context("Failed to initialize MariaDbService")?,
    );
    let notifier = Notifier::new(&config).context("Failed to build HTTP client")?;

    info!("Starting server on {addr}");
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(Arc::clone(&db)))
            .app_data(web::Data::new(notifier.clone()))
            .configure(configure_routes)
    })
    .bind(addr)
    .with_context(|| format!("binding {addr}"))?
    .run()
    .await?;
    Ok(())
}
