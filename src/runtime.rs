use std::sync::Arc;

use serde::{Deserialize, Serialize};
use warp::Filter;

use crate::service::orchestrator::Orchestrator;
use crate::service::session::ChatSession;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Runs one user message through the orchestrator and wraps the answer.
pub async fn chat_reply(
    orchestrator: &Orchestrator,
    session: &ChatSession,
    request: ChatRequest,
) -> ChatResponse {
    let response = orchestrator.handle_message(session, &request.message).await;
    ChatResponse { response }
}

/// `POST /chat` with `{"message": "..."}`, replying `{"response": "..."}`.
pub fn chat_route(
    orchestrator: Arc<Orchestrator>,
    session: Arc<ChatSession>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let orchestrator = warp::any().map(move || orchestrator.clone());
    let session_filter = warp::any().map(move || session.clone());

    warp::post()
        .and(warp::path("chat"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(orchestrator)
        .and(session_filter)
        .and_then(handle_chat)
}

async fn handle_chat(
    request: ChatRequest,
    orchestrator: Arc<Orchestrator>,
    session: Arc<ChatSession>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let reply = chat_reply(&orchestrator, &session, request).await;
    Ok(warp::reply::json(&reply))
}

pub async fn run_api(orchestrator: Arc<Orchestrator>, session: Arc<ChatSession>, port: u16) {
    let route = chat_route(orchestrator, session);
    tracing::info!(port, "serving chat API");
    warp::serve(route).run(([0, 0, 0, 0], port)).await;
}
