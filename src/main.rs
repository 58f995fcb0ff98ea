mod config;
mod db;
mod dtos;
mod error;
mod handler;
mod mail;
mod middleware;
mod models;
mod routes;
mod service;
mod utils;

use std::sync::Arc;

use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use config::Config;
use dotenv::dotenv;
use routes::create_router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::filter::LevelFilter;

use crate::db::db::DBClient;
use crate::mail::sendmail::Mailer;
use crate::service::{
    ocr::HttpOcrEngine, order_service::OrderService, referral_service::ReferralService,
    subscription_service::SubscriptionService, verification_service::VerificationService,
    withdrawal_service::WithdrawalService,
};

#[derive(Clone)]
pub struct AppState {
    pub env: Config,
    pub db_client: Arc<DBClient>,
    // Services
    pub order_service: Arc<OrderService>,
    pub subscription_service: Arc<SubscriptionService>,
    pub referral_service: Arc<ReferralService>,
    pub withdrawal_service: Arc<WithdrawalService>,
}

impl AppState {
    pub fn new(db_client: DBClient, config: Config) -> Self {
        let db_client_arc = Arc::new(db_client);
        let mailer = Mailer::from_config(&config);

        let ocr_engine = Arc::new(HttpOcrEngine::new(
            config.ocr_api_url.clone(),
            config.ocr_timeout_secs,
        ));
        let verification_service = Arc::new(VerificationService::new(ocr_engine));

        let referral_service = Arc::new(ReferralService::new(db_client_arc.clone(), &config));

        let order_service = Arc::new(OrderService::new(
            db_client_arc.clone(),
            referral_service.clone(),
            mailer.clone(),
        ));

        let subscription_service = Arc::new(SubscriptionService::new(
            db_client_arc.clone(),
            verification_service.clone(),
            config.subscription_reward,
        ));

        let withdrawal_service = Arc::new(WithdrawalService::new(
            db_client_arc.clone(),
            &config,
            mailer,
        ));

        Self {
            env: config,
            db_client: db_client_arc,
            order_service,
            subscription_service,
            referral_service,
            withdrawal_service,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::DEBUG)
        .init();

    dotenv().ok();

    let config = Config::init();

    let pool = match PgPoolOptions::new()
        .max_connections(20)
        .min_connections(5)
        .connect(&config.database_url)
        .await
    {
        Ok(pool) => {
            println!("✅ Connection to the database is successful!");
            pool
        }
        Err(err) => {
            println!("🔥 Failed to connect to the database: {:?}", err);
            std::process::exit(1);
        }
    };

    let db_client = DBClient::new(pool);

    let allowed_origins = vec![
        config.app_url.parse::<HeaderValue>().unwrap(),
        "http://localhost:5173".parse::<HeaderValue>().unwrap(),
        "http://localhost:8000".parse::<HeaderValue>().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE])
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ]);

    let app_state = Arc::new(AppState::new(db_client, config.clone()));

    let app = create_router(app_state).layer(cors);

    println!("🚀 Server is running on http://localhost:{}", config.port);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", &config.port))
        .await
        .unwrap();

    axum::serve(listener, app).await.unwrap();
}
