use actix_web::{web, App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vnpay_server::{routes, ServerConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };
    let port = config.port;

    tracing::info!(?config, "configuration loaded");
    tracing::info!(
        environment = %config.gateway.environment(),
        payment_url = config.gateway.payment_url(),
        "vnpay-server listening at http://0.0.0.0:{port}"
    );
    tracing::warn!(
        "/echo-ip trusts X-FORWARDED-FOR; run behind a proxy that overwrites it"
    );

    let state = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
