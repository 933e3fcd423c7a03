//! Bot lifecycle: configuration, services, graceful shutdown

use crate::{
    config::{self, with_config},
    logger::{self, LogTag},
    price::{CmcClient, PriceCache, SystemClock},
    telegram, webserver,
};
use std::sync::Arc;

/// Main bot execution function
///
/// Wires configuration, the price cache, the liveness webserver, and the
/// Telegram dispatcher together, then blocks until ctrl-c.
pub async fn run_bot() -> Result<(), String> {
    config::load_config()?;

    let upstream = with_config(|c| c.upstream.clone());
    let token = with_config(|c| c.telegram.bot_token.clone());

    // Liveness endpoint for uptime monitors
    let web_handle = tokio::spawn(async {
        if let Err(e) = webserver::start_server().await {
            logger::error(LogTag::Webserver, &format!("Webserver failed: {}", e));
        }
    });

    // Price stack: one HTTP client behind one TTL cache, shared by all handlers
    let client = CmcClient::new(&upstream)?;
    let cache = Arc::new(PriceCache::new(
        Arc::new(client),
        Arc::new(SystemClock),
        upstream.cache_ttl_secs,
    ));
    logger::info(
        LogTag::Price,
        &format!("Price cache ready (TTL {}s)", upstream.cache_ttl_secs),
    );

    // Blocks until the dispatcher's ctrl-c handler fires
    let bot = telegram::bot::connect(&token).await?;
    telegram::polling::run(bot, cache).await;

    // Dispatcher returned; take the webserver down with us
    webserver::shutdown();
    let _ = web_handle.await;

    Ok(())
}
