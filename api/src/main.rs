use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use carbonplate_api::{
    application::http::server::http_server::{router, state},
    args::{Args, LogArgs},
};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(log: &LogArgs) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    if log.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv::dotenv().ok();

    let args = Arc::new(Args::parse());
    init_tracing(&args.log);

    let app_state = state(args.clone())?;
    let app = router(app_state)?;

    let addr: SocketAddr = format!("{}:{}", args.server.host, args.server.port)
        .parse()
        .context("invalid server address")?;

    info!("listening on {}", addr);

    axum_server::bind(addr)
        .serve(app.into_make_service())
        .await
        .context("server error")?;

    Ok(())
}
