use std::sync::Arc;

use chat_relay::config::AppConfig;
use chat_relay::conversation::ConversationService;
use chat_relay::llm::gemini::GeminiClient;
use chat_relay::logging::init_logging;
use chat_relay::routes::configure_routes;
use chat_relay::store::PgChatStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    init_logging(config.environment)?;

    let store = PgChatStore::new(config.store.clone()).await?;
    store.migrate().await?;
    let model = GeminiClient::new(config.gemini.clone()).await?;

    let service = ConversationService::new(Arc::new(store), Arc::new(model));
    let routes = configure_routes(service);

    tracing::info!(addr = %config.bind_addr, environment = ?config.environment, "starting server");
    warp::serve(routes).run(config.bind_addr).await;

    Ok(())
}
