//! Upstream HTTP providers.
//!
//! Each provider sits behind an async trait so services and tests can swap
//! the implementation.

pub mod client;
pub mod coach;
pub mod quotes;

pub use coach::{ChatMessage, ChatProvider, ChatRole, OpenAiChat};
pub use quotes::{FinnhubQuotes, QuoteLookup, QuoteProvider};
