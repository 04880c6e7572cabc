use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;

mod balance;
mod db;
mod error;
mod expense;
mod repo;
mod response;
mod routes;
mod schemas;
mod settings;
mod validation;

use settings::Settings;

fn init_tracing(settings: &Settings) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter())
        .compact()
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env().context("invalid configuration")?;
    init_tracing(&settings)?;

    let pool = db::create_pool(&settings)
        .await
        .context("failed to connect to the database")?;
    tracing::info!(
        max_connections = settings.max_connections,
        tls = !settings.local,
        "connected to database"
    );
    if settings.auto_migrate {
        db::ensure_schema(&pool)
            .await
            .context("failed to prepare the database schema")?;
    }

    let data = web::Data::new(pool.clone());
    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .configure(routes::configure)
    })
    .bind((settings.bind_address, settings.port))
    .with_context(|| format!("failed to bind {}:{}", settings.bind_address, settings.port))?;

    tracing::info!("Server is up and running on {}:{}", settings.bind_address, settings.port);
    server.run().await?;

    pool.close().await;
    tracing::info!("server stopped");
    Ok(())
}
