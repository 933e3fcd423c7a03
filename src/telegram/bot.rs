//! Bot creation and token validation

use crate::logger::{self, LogTag};
use teloxide::prelude::*;

/// Create a bot from the configured token and validate it via getMe
pub async fn connect(token: &str) -> Result<Bot, String> {
    if token.is_empty() {
        return Err("Bot token is empty".to_string());
    }

    let bot = Bot::new(token);

    match bot.get_me().await {
        Ok(me) => {
            logger::info(
                LogTag::Telegram,
                &format!(
                    "Bot connected: @{} (ID: {})",
                    me.username.as_deref().unwrap_or("unknown"),
                    me.id
                ),
            );
            Ok(bot)
        }
        Err(e) => Err(format!("Invalid bot token: {}", e)),
    }
}
