//! USDT/KRW price lookup with time-based caching
//!
//! ```text
//! price/
//! ├── mod.rs      # public API
//! ├── client.rs   # CoinMarketCap HTTP client (PriceSource impl)
//! └── cache.rs    # TTL cache around the upstream call
//! ```
//!
//! The cache is the single owner of the upstream call: command handlers
//! only ever see `PriceCache::get_price()`.

pub mod cache;
pub mod client;

pub use cache::{Clock, PriceCache, PriceQuote, SystemClock};
pub use client::{CmcClient, PriceSource};
