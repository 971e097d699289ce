//! Estimated prices: a fixed brand table with a randomized fallback.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Ordered brand price table; the first contained substring wins.
pub const BRAND_PRICES: &[(&str, u32)] = &[
    ("Додо", 349),
    ("Папа Джонс", 399),
    ("Пицца Суши", 299),
    ("Теремок", 250),
];

pub const FALLBACK_PRICE_MIN: u32 = 300;
pub const FALLBACK_PRICE_MAX: u32 = 499;

/// Returns the fixed price of the first brand substring contained in `name`.
#[must_use]
pub fn brand_price(name: &str) -> Option<u32> {
    BRAND_PRICES
        .iter()
        .find(|(brand, _)| name.contains(brand))
        .map(|&(_, price)| price)
}

/// Maps vendor names to estimated prices.
///
/// The randomness source is injected so callers can seed it; the fallback
/// branch stands in for a price feed that does not exist yet.
#[derive(Debug)]
pub struct PriceEstimator<R> {
    rng: R,
}

impl<R: Rng> PriceEstimator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Brand price if one matches, otherwise a uniform draw from
    /// `[FALLBACK_PRICE_MIN, FALLBACK_PRICE_MAX]`.
    pub fn estimate(&mut self, name: &str) -> u32 {
        match brand_price(name) {
            Some(price) => price,
            None => self
                .rng
                .random_range(FALLBACK_PRICE_MIN..=FALLBACK_PRICE_MAX),
        }
    }
}

impl PriceEstimator<StdRng> {
    /// Estimator seeded from the operating system.
    #[must_use]
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}
