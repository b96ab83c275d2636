use munifin_server::{
    app_router, build_state, config::LogFormat, init_tracing, scheduler, Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing(LogFormat::from_env());
    let config = Config::from_env()?;
    let state = build_state(&config).await?;

    scheduler::start_cache_purge_scheduler(state.clone());

    let router = app_router(state, &config);
    tracing::info!("Listening on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
