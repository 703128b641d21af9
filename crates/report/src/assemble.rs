//! Report assembly
//!
//! Renders classified listings into one Telegram-HTML payload: a header
//! block, then one section per non-empty category in fixed display order
//! (record lows, new listings, rises, unchanged). Categories with no items
//! are omitted entirely, header included.

use chrono::NaiveDateTime;
use staylow_store::{Observation, PriceFloor, Verdict};

use crate::promo::normalize_promo;

/// One listing ready for rendering
#[derive(Debug)]
pub struct ClassifiedListing<'a> {
    pub observation: &'a Observation,
    pub verdict: Verdict,

    /// Raw offer text from the secondary source, when one matched
    pub promo: Option<String>,
}

/// Assemble the report payload
///
/// `default_credit` fills the credit line for hotels whose card did not
/// show one. Input order is preserved within each section; section order
/// is fixed regardless of input order.
pub fn assemble(
    items: &[ClassifiedListing<'_>],
    title: &str,
    default_credit: u32,
    now: NaiveDateTime,
) -> String {
    let mut payload = format!(
        "📅 <b>{title}</b>\nUpdated: {}\n",
        now.format("%Y-%m-%d %H:%M")
    );

    let sections = [
        ("🔥", "Record lows", render_category(items, default_credit, |v| {
            matches!(v, Verdict::RecordLow { .. })
        })),
        ("🆕", "New listings", render_category(items, default_credit, |v| {
            matches!(v, Verdict::New)
        })),
        ("🔺", "Price rises", render_category(items, default_credit, |v| {
            matches!(v, Verdict::Rise { .. })
        })),
        ("📌", "Unchanged", render_category(items, default_credit, |v| {
            matches!(v, Verdict::Unchanged { .. })
        })),
    ];

    for (emoji, name, rendered) in sections {
        if rendered.is_empty() {
            continue;
        }
        payload.push_str(&format!(
            "\n<b>{emoji} {name} ({})</b>\n\n{}",
            rendered.len(),
            rendered.join("\n\n")
        ));
    }

    payload
}

fn render_category(
    items: &[ClassifiedListing<'_>],
    default_credit: u32,
    pick: impl Fn(&Verdict) -> bool,
) -> Vec<String> {
    items
        .iter()
        .filter(|item| pick(&item.verdict))
        .map(|item| render_item(item, default_credit))
        .collect()
}

/// Render one listing as its report lines
///
/// Every variant leads with a linked hotel name and the price line. Floors
/// add a previous-low line with the date the low was available; record
/// lows add the all-time-low banner. Rise lines carry no promo.
fn render_item(item: &ClassifiedListing<'_>, default_credit: u32) -> String {
    let obs = item.observation;

    let link = match obs.url.as_deref() {
        Some(url) => format!("<a href='{url}'>{}</a>", obs.name),
        None => obs.name.clone(),
    };
    let price = obs.price;
    let date_txt = obs
        .earliest
        .map(|date| format!(" ({date})"))
        .unwrap_or_default();
    let credit_txt = format!("\n💳 Credit: ${}", obs.credit.unwrap_or(default_credit));
    let promo_txt = item
        .promo
        .as_deref()
        .map(|promo| format!("\n🎁 {}", normalize_promo(promo)))
        .unwrap_or_default();

    match item.verdict {
        Verdict::New => {
            format!("🆕 {link}\n💰 Price: <b>${price}</b>{date_txt}{credit_txt}{promo_txt}")
        }
        Verdict::RecordLow { floor, .. } => {
            format!(
                "🔥 Record low! {link}\n💰 Price: <b>${price}</b>{date_txt}\n🔻 Previous low: ${}{}{credit_txt}\n✨ <b>All-time low</b>{promo_txt}",
                floor.price,
                floor_date_txt(&floor)
            )
        }
        Verdict::Rise { floor, .. } => {
            format!(
                "🔺 {link}\n💰 Price: <b>${price}</b>{date_txt}\n🔺 Previous low: ${}{}{credit_txt}",
                floor.price,
                floor_date_txt(&floor)
            )
        }
        Verdict::Unchanged { floor } => {
            format!(
                "🏨 {link}\n💰 Price: <b>${price}</b>{date_txt}\n🔻 Previous low: ${}{}{credit_txt}{promo_txt}",
                floor.price,
                floor_date_txt(&floor)
            )
        }
    }
}

fn floor_date_txt(floor: &PriceFloor) -> String {
    floor
        .earliest
        .map(|date| format!(" ({date})"))
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "assemble_test.rs"]
mod assemble_test;
