//! Listing sources for the price monitor
//!
//! Two sources feed each run: MaxFHR supplies priced hotel listings (the
//! primary source) and Amex supplies promotional offers (the secondary
//! source). Both fetch over HTTP with bounded retries and parse
//! semi-structured result cards, dropping rows that fail validation rather
//! than passing bad data downstream.
//!
//! Hotel identity is not assigned here: sources return display names as
//! scraped, and callers derive join keys from them.
//!
//! # Example
//!
//! ```ignore
//! use staylow_scrape::{ListingSource, MaxFhr, MaxFhrConfig};
//!
//! let maxfhr = MaxFhr::new(MaxFhrConfig::default())?;
//! let listings = maxfhr.fetch().await?;
//! ```

mod amex;
mod error;
mod listing;
mod maxfhr;
pub mod resilience;
mod source;

pub use amex::{Amex, AmexConfig};
pub use error::SourceError;
pub use listing::{Listing, Offer};
pub use maxfhr::{MaxFhr, MaxFhrConfig};
pub use source::{ListingSource, OfferSource};
