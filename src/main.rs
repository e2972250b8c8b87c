use scheme_toggler::config::ServiceConfig;
use scheme_toggler::routes;
use scheme_toggler::state::AppState;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = ServiceConfig::from_env().expect("invalid configuration");
    tracing::info!(
        site = %config.site_key(),
        store = ?config.store,
        system_appearance = %config.system_appearance,
        "scheme-toggler configured"
    );

    let state = AppState::from_config(&config);

    let app = routes::app(state);
    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "scheme-toggler listening");
    axum::serve(listener, app).await.expect("server failed");
}
