//! Bot commands and their handlers
//!
//! Every handler resolves to a ready-to-send HTML string. Price lookups go
//! through the shared `PriceCache`; user-input problems (missing or
//! malformed amounts) get a usage reply and never reach the price layer.

use crate::errors::UpstreamError;
use crate::logger::{self, LogTag};
use crate::price::{PriceCache, PriceQuote};
use crate::telegram::formatters::format_amount;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::utils::command::BotCommands;

/// Commands understood by the bot
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Supported commands:")]
pub enum Command {
    #[command(description = "show the welcome message")]
    Start,
    #[command(description = "show this usage text")]
    Help,
    #[command(description = "current USDT → KRW rate")]
    Price,
    #[command(description = "convert a USDT amount to KRW, e.g. /usdt 100")]
    Usdt(String),
    #[command(description = "convert a KRW amount to USDT, e.g. /krw 100000")]
    Krw(String),
}

/// Dispatcher endpoint: route a parsed command and send the reply
pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    cache: Arc<PriceCache>,
) -> ResponseResult<()> {
    let reply = match cmd {
        Command::Start => start_text(),
        Command::Help => help_text(),
        Command::Price => handle_price(&cache).await,
        Command::Usdt(args) => handle_usdt(&cache, &args).await,
        Command::Krw(args) => handle_krw(&cache, &args).await,
    };

    bot.send_message(msg.chat.id, reply)
        .parse_mode(ParseMode::Html)
        .await?;

    Ok(())
}

fn start_text() -> String {
    "👋 Welcome to <b>RateBot</b>!\n\n\
     I answer USDT ↔ KRW conversion questions.\n\
     Send /help to see what I can do."
        .to_string()
}

fn help_text() -> String {
    format!("📗 <b>RateBot usage</b>\n\n{}", Command::descriptions())
}

/// Handle /price
async fn handle_price(cache: &PriceCache) -> String {
    match cache.get_price().await {
        Ok(quote) => render_price(&quote),
        Err(e) => unavailable_text(&e),
    }
}

/// Handle /usdt <amount>
async fn handle_usdt(cache: &PriceCache, args: &str) -> String {
    let amount = match parse_amount(args) {
        Some(a) => a,
        None => return usage_text("/usdt", "/usdt 100"),
    };

    match cache.get_price().await {
        Ok(quote) => render_usdt_to_krw(amount, &quote),
        Err(e) => unavailable_text(&e),
    }
}

/// Handle /krw <amount>
async fn handle_krw(cache: &PriceCache, args: &str) -> String {
    let amount = match parse_amount(args) {
        Some(a) => a,
        None => return usage_text("/krw", "/krw 100000"),
    };

    match cache.get_price().await {
        Ok(quote) => render_krw_to_usdt(amount, &quote),
        Err(e) => unavailable_text(&e),
    }
}

fn render_price(quote: &PriceQuote) -> String {
    let cached_note = if quote.from_cache { " (cached)" } else { "" };
    format!(
        "💱 1 USDT = <b>{} KRW</b>{}",
        format_amount(quote.value),
        cached_note
    )
}

fn render_usdt_to_krw(amount: f64, quote: &PriceQuote) -> String {
    let krw = amount * quote.value;
    format!(
        "💱 {} USDT ≈ <b>{} KRW</b>\n<i>rate: 1 USDT = {} KRW</i>",
        format_amount(amount),
        format_amount(krw),
        format_amount(quote.value)
    )
}

fn render_krw_to_usdt(amount: f64, quote: &PriceQuote) -> String {
    let usdt = amount / quote.value;
    format!(
        "💱 {} KRW ≈ <b>{} USDT</b>\n<i>rate: 1 USDT = {} KRW</i>",
        format_amount(amount),
        format_amount(usdt),
        format_amount(quote.value)
    )
}

/// Parse a user-supplied amount: positive, finite, separators allowed
fn parse_amount(args: &str) -> Option<f64> {
    let raw = args.trim().replace(',', "");
    let amount: f64 = raw.parse().ok()?;

    if amount.is_finite() && amount > 0.0 {
        Some(amount)
    } else {
        None
    }
}

fn usage_text(command: &str, example: &str) -> String {
    format!(
        "⚠️ Usage: <code>{} &lt;amount&gt;</code> with a positive number.\n\
         Example: <code>{}</code>",
        command, example
    )
}

fn unavailable_text(err: &UpstreamError) -> String {
    logger::warning(LogTag::Price, &format!("Price lookup failed: {}", err));
    "❌ Couldn't fetch the USDT/KRW rate right now. Please try again later.".to_string()
}
