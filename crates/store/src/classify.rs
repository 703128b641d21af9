//! Price classification against the historical floor
//!
//! A fresh observation is judged against the all-time low computed with
//! today's entries excluded. Equaling the floor is not a record; only a
//! strictly lower price is.

use crate::types::PriceFloor;

/// How today's price relates to the hotel's history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No prior history for this hotel
    New,

    /// Strictly below the historical floor
    RecordLow { floor: PriceFloor, delta: u32 },

    /// Strictly above the historical floor
    Rise { floor: PriceFloor, delta: u32 },

    /// Exactly at the historical floor
    Unchanged { floor: PriceFloor },
}

/// Classify a price against the floor returned by
/// [`price_floor`](crate::price_floor)
pub fn classify(price: u32, floor: Option<PriceFloor>) -> Verdict {
    match floor {
        None => Verdict::New,
        Some(floor) if price < floor.price => Verdict::RecordLow {
            floor,
            delta: floor.price - price,
        },
        Some(floor) if price > floor.price => Verdict::Rise {
            floor,
            delta: price - floor.price,
        },
        Some(floor) => Verdict::Unchanged { floor },
    }
}
