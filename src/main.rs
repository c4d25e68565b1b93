use anyhow::Result;
use mebel_blog::application::{
    ports::{time::Clock, util::SlugGenerator},
    services::ApplicationServices,
};
use mebel_blog::config::AppConfig;
use mebel_blog::domain::{
    author::AuthorRepository,
    category::CategoryRepository,
    post::{PostReadRepository, PostWriteRepository},
    slug::SlugRepository,
};
use mebel_blog::infrastructure::{
    database,
    repositories::{
        PostgresAuthorRepository, PostgresCategoryRepository, PostgresPostReadRepository,
        PostgresPostWriteRepository, PostgresSlugRepository,
    },
    time::SystemClock,
    util::TransliteratingSlugGenerator,
};
use mebel_blog::presentation::http::{routes::build_router, state::HttpState};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool =
        database::init_pool(config.database_url(), config.database_max_connections()).await?;
    database::run_migrations(&pool).await?;
    tracing::info!(collation = config.sort_collation().as_str(), "database ready");

    let collation = config.sort_collation().clone();
    let post_write_repo: Arc<dyn PostWriteRepository> =
        Arc::new(PostgresPostWriteRepository::new(pool.clone()));
    let post_read_repo: Arc<dyn PostReadRepository> = Arc::new(PostgresPostReadRepository::new(
        pool.clone(),
        collation.clone(),
    ));
    let category_repo: Arc<dyn CategoryRepository> = Arc::new(PostgresCategoryRepository::new(
        pool.clone(),
        collation.clone(),
    ));
    let author_repo: Arc<dyn AuthorRepository> =
        Arc::new(PostgresAuthorRepository::new(pool.clone(), collation));
    let slug_repo: Arc<dyn SlugRepository> = Arc::new(PostgresSlugRepository::new(pool));

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let slugger: Arc<dyn SlugGenerator> = Arc::new(TransliteratingSlugGenerator);

    let services = Arc::new(ApplicationServices::new(
        post_write_repo,
        post_read_repo,
        category_repo,
        author_repo,
        slug_repo,
        clock,
        slugger,
    ));

    let state = HttpState::new(services, config.admin_api_token());
    let app = build_router(state, config.allowed_origins());

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for CTRL+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
