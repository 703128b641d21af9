//! Telegram-HTML report assembly
//!
//! Turns a classified set of hotel observations into the daily update
//! message: a dated header, then one section per price category (record
//! lows, new listings, rises, unchanged), each item rendered with its
//! price, booking window, credit and any active promotion. Sections with
//! no items are dropped entirely.
//!
//! The assembled payload is a single string; [`split_for_delivery`] cuts
//! it into transport-sized chunks without regard for line boundaries, so
//! a chunk may end mid-item. Promotion text goes through
//! [`normalize_promo`] before rendering to strip footnote markers and
//! rewrite booking windows into ISO dates.

mod assemble;
mod chunk;
mod promo;

pub use assemble::{ClassifiedListing, assemble};
pub use chunk::split_for_delivery;
pub use promo::normalize_promo;
