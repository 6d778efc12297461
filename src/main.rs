#![allow(non_snake_case)]

use std::sync::Arc;

use calendarBot::config::AppConfig;
use calendarBot::service::calendar_service::GoogleCalendarService;
use calendarBot::service::openai_service::OpenAIService;
use calendarBot::service::orchestrator::Orchestrator;
use calendarBot::service::session::ChatSession;
use calendarBot::service::tools::ToolRegistry;
use calendarBot::{cli, runtime};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load();

    let openai_api_key = config
        .openai_api_key()
        .expect("OPENAI_API_KEY environment variable not set");
    let calendar_token = config
        .calendar_token()
        .expect("CALENDAR_API_TOKEN environment variable not set");

    let llm = Arc::new(OpenAIService::new(openai_api_key, config.openai_model()));
    let gateway = Arc::new(GoogleCalendarService::new(
        calendar_token,
        config.calendar_id(),
    ));
    let orchestrator = Arc::new(Orchestrator::new(llm, ToolRegistry::new(gateway)));
    let session = Arc::new(ChatSession::new());

    let run_mode = config.run_mode();
    if run_mode == "api" {
        runtime::run_api(orchestrator, session, config.port()).await;
    } else if run_mode == "cli" {
        cli::cli(orchestrator, session).await;
    } else {
        println!("Invalid run mode {}", run_mode);
    }
}
