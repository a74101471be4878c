use std::sync::Arc;
use warp::Filter;

use crate::game_manager::GameManager;
use crate::handlers::InteractionHandler;
use crate::relay_auth::RelayAuth;
use ttt_types::Interaction;

pub mod config;
pub mod game_manager;
pub mod handlers;
pub mod rate_limiter;
pub mod ready;
pub mod relay_auth;

pub fn create_routes(
    interaction_handler: Arc<InteractionHandler>,
    game_manager: Arc<GameManager>,
    relay_auth: Arc<RelayAuth>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let handler_filter = warp::any().map({
        let interaction_handler = interaction_handler.clone();
        move || interaction_handler.clone()
    });

    let game_manager_filter = warp::any().map({
        let game_manager = game_manager.clone();
        move || game_manager.clone()
    });

    let auth_filter = warp::any().map({
        let relay_auth = relay_auth.clone();
        move || relay_auth.clone()
    });

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", warp::http::StatusCode::OK));

    // Events forwarded by the gateway relay
    let interactions = warp::path("interactions")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::header::optional::<String>("authorization"))
        .and(auth_filter.clone())
        .and(warp::body::json())
        .and(handler_filter)
        .and_then(handle_interaction_request);

    let user_stats = warp::path!("stats" / String)
        .and(warp::get())
        .and(warp::header::optional::<String>("authorization"))
        .and(auth_filter)
        .and(game_manager_filter)
        .and_then(handle_user_stats_request);

    health
        .or(interactions)
        .or(user_stats)
        .with(warp::log("tictactoe_bot"))
}

fn unauthorized(error: relay_auth::AuthError) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(
        warp::reply::json(&serde_json::json!({ "error": error.to_string() })),
        warp::http::StatusCode::UNAUTHORIZED,
    )
}

async fn handle_interaction_request(
    auth_header: Option<String>,
    relay_auth: Arc<RelayAuth>,
    interaction: Interaction,
    interaction_handler: Arc<InteractionHandler>,
) -> Result<impl warp::Reply, warp::Rejection> {
    if let Err(e) = relay_auth.verify(auth_header.as_deref()) {
        tracing::warn!("Rejected interaction from relay: {}", e);
        return Ok(unauthorized(e));
    }

    let response = interaction_handler.handle_interaction(interaction).await;
    Ok(warp::reply::with_status(
        warp::reply::json(&response),
        warp::http::StatusCode::OK,
    ))
}

async fn handle_user_stats_request(
    user_id: String,
    auth_header: Option<String>,
    relay_auth: Arc<RelayAuth>,
    game_manager: Arc<GameManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    if let Err(e) = relay_auth.verify(auth_header.as_deref()) {
        return Ok(unauthorized(e));
    }

    match game_manager.get_stats(&user_id).await {
        Some(record) => Ok(warp::reply::with_status(
            warp::reply::json(&record),
            warp::http::StatusCode::OK,
        )),
        None => Ok(warp::reply::with_status(
            warp::reply::json(&serde_json::json!({
                "error": "No games played yet"
            })),
            warp::http::StatusCode::NOT_FOUND,
        )),
    }
}
