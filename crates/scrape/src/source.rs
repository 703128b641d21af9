//! Source trait definitions

use std::future::Future;

use crate::error::SourceError;
use crate::listing::{Listing, Offer};

/// User agent sent with every request
pub(crate) const USER_AGENT: &str = "staylow/0.1";

/// Trait for the primary source of priced hotel listings
///
/// A fetch covers one full sweep of the source; retries for transient
/// failures happen inside the source, not in the caller.
pub trait ListingSource: Send + Sync {
    /// Returns the source name (e.g., "maxfhr")
    fn name(&self) -> &'static str;

    /// Fetch all current listings
    fn fetch(&self) -> impl Future<Output = Result<Vec<Listing>, SourceError>> + Send;
}

/// Trait for the secondary source of promotional offers
pub trait OfferSource: Send + Sync {
    /// Returns the source name (e.g., "amex")
    fn name(&self) -> &'static str;

    /// Fetch all current offers
    fn fetch(&self) -> impl Future<Output = Result<Vec<Offer>, SourceError>> + Send;
}
