use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use orgboard::config::Config;
use orgboard::data::guild_link::GuildLinkRepository;
use orgboard::data::organization::OrganizationRepository;
use orgboard::discord::api::DiscordApi;
use orgboard::discord::client::RestClient;
use orgboard::discord::commands;
use orgboard::error::AppError;
use orgboard::router::router;
use orgboard::scheduler::clock::SystemClock;
use orgboard::scheduler::retry::RetryScheduler;
use orgboard::service::command::CommandRouter;
use orgboard::startup;
use orgboard::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let db = startup::connect_to_database(&config).await?;

    let api: Arc<dyn DiscordApi> = Arc::new(RestClient::new(
        config.discord_bot_token.clone(),
        config.discord_application_id,
    )?);

    // Registration failures are logged per definition; the server still
    // starts so already-registered commands keep working.
    commands::register_commands(api.as_ref()).await;

    let scheduler = RetryScheduler::new(Arc::new(SystemClock));

    // Composition root: every collaborator is wired here, once.
    let organizations = Arc::new(OrganizationRepository::new(db.clone()));
    let command_router = Arc::new(CommandRouter::new(
        Arc::clone(&api),
        Arc::new(GuildLinkRepository::new(db.clone())),
        organizations.clone(),
        organizations,
        config.discord_application_id,
        config.app_url.clone(),
    ));

    let state = AppState::new(
        command_router,
        Arc::clone(&scheduler),
        config.signature_policy.clone(),
    );

    tracing::info!("listening on {}", config.bind_address);
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, router().with_state(state)).await?;

    Ok(())
}
