//! Command-line argument helpers
//!
//! RateBot is configured through the environment; the command line only
//! carries operational switches.

use once_cell::sync::Lazy;

/// Cached command-line arguments
static ARGS: Lazy<Vec<String>> = Lazy::new(|| std::env::args().collect());

fn has_flag(flag: &str) -> bool {
    ARGS.iter().any(|a| a == flag)
}

/// Check if --help / -h was passed
pub fn is_help_requested() -> bool {
    has_flag("--help") || has_flag("-h")
}

/// Check if --debug was passed (enables debug-level logging)
pub fn is_debug_enabled() -> bool {
    has_flag("--debug")
}

/// Print usage information
pub fn print_help() {
    println!(
        "RateBot v{} - USDT/KRW exchange-rate Telegram bot",
        crate::version::VERSION
    );
    println!();
    println!("USAGE:");
    println!("    ratebot [FLAGS]");
    println!();
    println!("FLAGS:");
    println!("    -h, --help     Print this help text");
    println!("        --debug    Enable debug-level logging");
    println!();
    println!("ENVIRONMENT (a .env file is honored):");
    println!("    TELEGRAM_TOKEN          Bot token from @BotFather (required)");
    println!("    CMC_API_KEY             CoinMarketCap API key (required)");
    println!("    CMC_BASE_URL            Override the upstream base URL");
    println!("    PRICE_CACHE_TTL_SECS    Price cache TTL in seconds (default 60)");
    println!("    UPSTREAM_TIMEOUT_SECS   Upstream request timeout in seconds (default 5)");
    println!("    WEBSERVER_HOST          Liveness endpoint host (default 127.0.0.1)");
    println!("    WEBSERVER_PORT          Liveness endpoint port (default 8080)");
}
