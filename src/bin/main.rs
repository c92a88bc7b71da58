use std::fs;

use finances_server::{categories::DbConnCategoryService, config::Config, date_time_provider::CoreTimeProvider, db, env_provider::CoreEnvProvider, routes, state::AppState, transactions::DbConnTransactionService};
use log::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "finances_server=debug,tower_http=debug".into())
        )
        .init();

    let env_provider = CoreEnvProvider::new_dyn();
    let time_provider = CoreTimeProvider::new_dyn();

    let config = Config::from_env(env_provider.as_ref())?;
    if let Some(parent) = config.sqlite_file_path().as_deref().and_then(|path| path.parent()) {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let db = db::connect(&config.database_url).await?;
    let cat_svc = DbConnCategoryService::new_dyn(db.clone(), time_provider.clone());
    let tx_svc = DbConnTransactionService::new_dyn(db, time_provider);
    let app_state = AppState { cat_svc, tx_svc };

    let app = routes::app(app_state, &config.static_dir);
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!("Server listening on http://{}:{}", config.host, config.port);
    info!("Serving frontend from {}", config.static_dir.display());
    axum::serve(listener, app).await?;

    Ok(())
}
