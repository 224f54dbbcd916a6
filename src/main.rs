use todo_rest::application::todo_service::TodoServiceImpl;
use todo_rest::config::AppConfig;
use todo_rest::domain::repository::TodoRepository;
use todo_rest::http::routing;
use todo_rest::http::routes::todos;
use todo_rest::infrastructure::sqlite_repo::SqliteTodoRepository;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env()?;
    let repo = SqliteTodoRepository::connect(&config.database_url, config.max_connections).await?;
    repo.init().await?;
    let service = TodoServiceImpl::new(repo);
    let router = routing::app(todos::router(todos::AppState { service }), config.request_timeout);

    tracing::info!(addr = %config.bind_addr, database = %config.database_url, "listening");
    axum::serve(tokio::net::TcpListener::bind(config.bind_addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::ctrl_c;
    let _ = ctrl_c().await;
    tracing::info!("shutdown");
}

