//! Coupon block extraction from the listing page HTML.

use pizzadb_core::PromoRecord;
use scraper::{ElementRef, Html, Selector};

use crate::filter::PIZZA_TERM;

const ITEM_SELECTOR: &str = ".coupon-item";
const TITLE_SELECTOR: &str = ".coupon-title";
const CODE_SELECTOR: &str = ".coupon-code";

/// Extract pizza promo codes from a coupon listing page.
///
/// A block is kept when both its title and code are non-empty after trimming
/// and the title contains the lowercase pizza stem. Unlike the vendor filter
/// this match is case-sensitive. Output follows document order.
#[must_use]
pub fn parse_coupons(html: &str) -> Vec<PromoRecord> {
    let document = Html::parse_document(html);
    let item = Selector::parse(ITEM_SELECTOR).expect("valid coupon item selector");
    let title = Selector::parse(TITLE_SELECTOR).expect("valid coupon title selector");
    let code = Selector::parse(CODE_SELECTOR).expect("valid coupon code selector");

    document
        .select(&item)
        .filter_map(|block| {
            let title_text = inner_text(block, &title);
            let code_text = inner_text(block, &code);
            let title_text = title_text.trim();
            let code_text = code_text.trim();

            if title_text.is_empty() || code_text.is_empty() {
                return None;
            }
            if !title_text.contains(PIZZA_TERM) {
                return None;
            }

            Some(PromoRecord {
                code: code_text.to_string(),
                description: title_text.to_string(),
            })
        })
        .collect()
}

/// Concatenated text of every descendant matching `selector`.
fn inner_text(block: ElementRef<'_>, selector: &Selector) -> String {
    block
        .select(selector)
        .flat_map(|el| el.text())
        .collect::<String>()
}
