//! Conversion from provider places into [`pizzadb_core::VendorRecord`].

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use pizzadb_core::VendorRecord;

use crate::places::types::PlaceProperties;

pub const MAP_BASE_URL: &str = "https://yandex.ru/maps/?text=";

/// Fixed placeholder until a real delivery-time source exists.
pub const DELIVERY_ESTIMATE: &str = "30-45 мин";

/// Characters left unescaped by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Map search URL for a vendor. A pure function of `(name, city)`.
#[must_use]
pub fn map_link(name: &str, city: &str) -> String {
    let query = format!("{name} {city}");
    format!(
        "{MAP_BASE_URL}{}",
        utf8_percent_encode(&query, URI_COMPONENT)
    )
}

/// Assemble a vendor record from a place that already passed the vendor filter.
#[must_use]
pub fn vendor_record(place: &PlaceProperties, city: &str, estimated_price: u32) -> VendorRecord {
    VendorRecord {
        name: place.name.clone(),
        address: place.address(),
        rating: place.rating,
        review_count: place.reviews,
        map_link: map_link(&place.name, city),
        estimated_price,
        delivery_estimate: Some(DELIVERY_ESTIMATE.to_string()),
        website_link: place.website(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_link_percent_encodes_name_and_city() {
        assert_eq!(
            map_link("Додо Пицца", "Сыктывкар"),
            "https://yandex.ru/maps/?text=%D0%94%D0%BE%D0%B4%D0%BE%20%D0%9F%D0%B8%D1%86%D1%86%D0%B0%20%D0%A1%D1%8B%D0%BA%D1%82%D1%8B%D0%B2%D0%BA%D0%B0%D1%80"
        );
    }

    #[test]
    fn map_link_matches_encode_uri_component_reserved_set() {
        assert_eq!(
            map_link("Papa's (Pizza) & Co", "Сыктывкар"),
            "https://yandex.ru/maps/?text=Papa's%20(Pizza)%20%26%20Co%20%D0%A1%D1%8B%D0%BA%D1%82%D1%8B%D0%B2%D0%BA%D0%B0%D1%80"
        );
    }

    #[test]
    fn map_link_is_deterministic() {
        let a = map_link("Пиццерия №1", "Сыктывкар");
        let b = map_link("Пиццерия №1", "Сыктывкар");
        assert_eq!(a, b);
    }

    #[test]
    fn vendor_record_carries_place_fields() {
        let place: PlaceProperties = serde_json::from_value(serde_json::json!({
            "name": "Додо Пицца",
            "description": "Октябрьский просп., 131",
            "rating": 4.5,
            "reviews": 120
        }))
        .expect("props");

        let record = vendor_record(&place, "Сыктывкар", 349);
        assert_eq!(record.name, "Додо Пицца");
        assert_eq!(record.address.as_deref(), Some("Октябрьский просп., 131"));
        assert_eq!(record.rating, Some(4.5));
        assert_eq!(record.review_count, Some(120));
        assert_eq!(record.estimated_price, 349);
        assert_eq!(record.delivery_estimate.as_deref(), Some(DELIVERY_ESTIMATE));
        assert_eq!(record.map_link, map_link("Додо Пицца", "Сыктывкар"));
        assert!(record.website_link.is_none());
    }
}
