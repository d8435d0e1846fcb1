use sea_orm::Database;
use tracing::info;

use ecclesia_core::config::Config;
use ecclesia_core::tracing::init_tracing;
use ecclesia_portal::config::PortalConfig;
use ecclesia_portal::infra::db::DbSettingsRepository;
use ecclesia_portal::infra::hashing::BcryptHasher;
use ecclesia_portal::infra::mail::SmtpResetNotifier;
use ecclesia_portal::router::build_router;
use ecclesia_portal::settings::SettingsHandle;
use ecclesia_portal::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = PortalConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let redis_cfg = deadpool_redis::Config::from_url(&config.redis_url);
    let redis = redis_cfg
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .expect("failed to create Redis pool");

    let mailer = SmtpResetNotifier::new(
        &config.smtp_host,
        config.smtp_port,
        &config.smtp_username,
        &config.smtp_password,
        &config.mail_from,
    )
    .expect("invalid SMTP configuration");

    let settings = SettingsHandle::load(&DbSettingsRepository { db: db.clone() })
        .await
        .expect("failed to load church settings");

    let state = AppState {
        db,
        redis,
        mailer,
        hasher: BcryptHasher::default(),
        settings,
        cookie_domain: config.cookie_domain,
        session_ttl_secs: config.session_ttl_secs,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.portal_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("portal listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
