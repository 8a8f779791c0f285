use anyhow::Context;

use ecommerce_backend as api;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = api::config::load_config().context("failed to load configuration")?;
    api::config::init_tracing(cfg.log_level(), cfg.log_json);

    let server = api::server::Server::bind(cfg)
        .await
        .context("failed to start HTTP listener")?;
    server.serve().await.context("HTTP server terminated")?;

    Ok(())
}
