use axum::Router;
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use myecclesia_server::auth::GoTrueClient;
use myecclesia_server::config::Config;
use myecclesia_server::payments::StripeClient;
use myecclesia_server::routes::create_routes;
use myecclesia_server::state::AppState;
use myecclesia_server::store::PgStore;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Successfully connected to database");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    tracing::info!("Migrations run successfully");

    let state = AppState {
        store: Arc::new(PgStore::new(pool)),
        payments: Arc::new(StripeClient::new(&config.stripe_secret_key)),
        auth: Arc::new(GoTrueClient::new(
            &config.auth_base_url,
            &config.auth_service_key,
        )),
    };

    let app: Router = create_routes(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server running at http://{}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}
