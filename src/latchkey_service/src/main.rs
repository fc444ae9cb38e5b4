use color_eyre::eyre::{Result, WrapErr};
use latchkey_adapters::{
    AllowedOrigins, Argon2PasswordHasher, EcTokenSigner, PostgresCredentialStore,
    PostmarkNotifier, Settings,
};
use latchkey_application::CredentialProvider;
use latchkey_core::Email;
use latchkey_service::{AdminCredentials, CredentialService};
use reqwest::Client as HttpClient;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let settings = Settings::load().wrap_err("failed to load configuration")?;

    let pg_pool = PgPoolOptions::new()
        .max_connections(settings.database.max_connections)
        .connect(settings.database.url.expose_secret())
        .await
        .wrap_err("failed to connect to PostgreSQL")?;

    let store = PostgresCredentialStore::new(pg_pool);
    store.migrate().await.wrap_err("failed to run migrations")?;

    let signer = EcTokenSigner::new(&settings.jwt.private_key, settings.jwt.signer_config())
        .wrap_err("failed to load the signing key")?;

    let http_client = HttpClient::builder()
        .timeout(settings.email.timeout())
        .build()?;
    let notifier = PostmarkNotifier::new(
        settings.email.base_url.clone(),
        Email::try_from(settings.email.sender.as_str())?,
        settings.email.auth_token.clone(),
        settings.password_reset.link_base_url.clone(),
        http_client,
    );

    let provider = CredentialProvider::new(store, signer, notifier, Argon2PasswordHasher::new())
        .with_reset_token_ttl(settings.password_reset.token_ttl());

    let admin = settings.admin_api.enabled.then(|| {
        AdminCredentials::new(
            settings.admin_api.username.clone(),
            settings.admin_api.password.clone(),
        )
    });

    let allowed_origins = AllowedOrigins::try_from(settings.server.allowed_origins.as_slice())
        .wrap_err("invalid allowed origin")?;
    let allowed_origins = (!allowed_origins.is_empty()).then_some(allowed_origins);

    let listener = tokio::net::TcpListener::bind(&settings.server.address).await?;
    tracing::info!("Starting latchkey");

    CredentialService::new(provider, admin)
        .run_standalone(listener, allowed_origins)
        .await?;

    Ok(())
}

fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
