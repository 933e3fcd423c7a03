//! Update polling and command dispatch

use crate::logger::{self, LogTag};
use crate::price::PriceCache;
use crate::telegram::commands::{self, Command};
use std::sync::Arc;
use teloxide::{dptree, prelude::*};

/// Run long polling until shutdown (ctrl-c)
///
/// The price cache is handed to command handlers through the dispatcher's
/// dependency map; nothing in this module reads it directly. Messages that
/// don't parse as a known command fall through to the default handler and
/// are ignored.
pub async fn run(bot: Bot, cache: Arc<PriceCache>) {
    logger::info(LogTag::Telegram, "Starting command polling...");

    let handler = Update::filter_message().branch(
        dptree::entry()
            .filter_command::<Command>()
            .endpoint(commands::handle_command),
    );

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![cache])
        .default_handler(|_upd| async {
            logger::debug(LogTag::Telegram, "Ignoring non-command update");
        })
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    logger::info(LogTag::Telegram, "Command polling stopped");
}
