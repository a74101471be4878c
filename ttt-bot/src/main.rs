use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};

use ttt_bot::{
    config::Config,
    create_routes,
    game_manager::GameManager,
    handlers::InteractionHandler,
    rate_limiter::UserRateLimiter,
    ready::{HttpCommandRegistrar, on_ready},
    relay_auth::RelayAuth,
};
use ttt_persistence::StatsStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Tic-Tac-Toe bot...");

    let config = Config::new();

    let stats = Arc::new(StatsStore::new(&config.stats_file));
    info!("Recording stats in {}", stats.path().display());

    let game_manager = Arc::new(GameManager::new(stats));
    let interaction_handler = Arc::new(InteractionHandler::new(
        game_manager.clone(),
        UserRateLimiter::new(
            config.click_burst,
            Duration::from_secs(config.click_refill_seconds),
        ),
    ));
    let relay_auth = Arc::new(RelayAuth::from_config(config.relay_token.as_deref()));
    if relay_auth.is_dev_mode() {
        warn!("RELAY_TOKEN not set, accepting unauthenticated interactions");
    } else {
        info!("Relay token configured, interactions require a bearer token");
    }

    // Commands must be registered before events are accepted
    match (&config.discord_token, &config.application_id) {
        (Some(token), Some(application_id)) => {
            let registrar = HttpCommandRegistrar::new(
                config.api_base.clone(),
                application_id.clone(),
                token.clone(),
            );
            on_ready(&config.bot_name, &registrar).await;
        }
        _ => warn!(
            "DISCORD_TOKEN or DISCORD_APPLICATION_ID not set, skipping command registration"
        ),
    }

    // Retry unsaved outcomes and drop idle rate limit buckets periodically
    let maintenance_handler = interaction_handler.clone();
    let maintenance_game_manager = game_manager.clone();
    let maintenance_interval = Duration::from_secs(config.maintenance_interval_seconds.max(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(maintenance_interval);
        loop {
            interval.tick().await;
            maintenance_game_manager.flush_pending().await;
            maintenance_handler.rate_limiter().evict_idle();
        }
    });

    let routes = create_routes(interaction_handler, game_manager.clone(), relay_auth);

    let ip: std::net::IpAddr = config.host.parse()?;
    let addr = (ip, config.port);

    let (addr, server) = warp::serve(routes).bind_with_graceful_shutdown(addr, async {
        // Wait for SIGINT (Ctrl+C) or SIGTERM
        #[cfg(unix)]
        {
            match (
                signal::unix::signal(signal::unix::SignalKind::interrupt()),
                signal::unix::signal(signal::unix::SignalKind::terminate()),
            ) {
                (Ok(mut sigint), Ok(mut sigterm)) => {
                    tokio::select! {
                        _ = sigint.recv() => {
                            info!("Received SIGINT, shutting down gracefully...");
                        }
                        _ = sigterm.recv() => {
                            info!("Received SIGTERM, shutting down gracefully...");
                        }
                    }
                }
                _ => {
                    let _ = signal::ctrl_c().await;
                    info!("Received Ctrl+C, shutting down gracefully...");
                }
            }
        }

        #[cfg(not(unix))]
        {
            let _ = signal::ctrl_c().await;
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    });

    info!("Listening for interactions on {}. Press Ctrl+C to stop.", addr);
    server.await;

    let unsaved = game_manager.flush_pending().await;
    if unsaved > 0 {
        error!("Shutting down with {} game outcome(s) not saved to stats", unsaved);
    }
    info!("Bot shutdown complete.");
    Ok(())
}
