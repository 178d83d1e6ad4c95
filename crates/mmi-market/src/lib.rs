//! Quote and company metadata lookup keyed by ticker symbol.

pub mod client;
pub mod error;
pub mod types;

pub use client::QuoteClient;
pub use error::QuoteError;
pub use types::Quote;
