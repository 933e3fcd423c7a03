use ratebot::{
    arguments,
    logger::{self, LogTag},
};

/// Main entry point for RateBot
///
/// Headless service: Telegram long polling plus a liveness webserver
/// (default :8080) for hosting-platform uptime checks.
#[tokio::main]
async fn main() {
    logger::init();

    if arguments::is_help_requested() {
        arguments::print_help();
        return;
    }

    logger::info(LogTag::System, "🚀 RateBot starting up...");

    match ratebot::run::run_bot().await {
        Ok(_) => {
            logger::info(LogTag::System, "✅ RateBot shut down cleanly");
        }
        Err(e) => {
            logger::error(LogTag::System, &format!("❌ RateBot failed: {}", e));
            std::process::exit(1);
        }
    }
}
