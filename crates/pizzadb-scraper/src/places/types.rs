//! Response shapes for the geo-search provider.

use serde::Deserialize;

/// One `features[]` entry. Only `properties` is read.
#[derive(Debug, Clone, Deserialize)]
pub struct GeoFeature {
    pub properties: PlaceProperties,
}

/// Place attributes as returned under `features[].properties`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceProperties {
    pub name: String,
    /// Street address line, when the provider knows one.
    #[serde(default)]
    pub description: Option<String>,
    /// Free-form display text; used as the address when `description` is absent.
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub reviews: Option<u32>,
    #[serde(default, rename = "CompanyMetaData")]
    pub company: Option<CompanyMetaData>,
}

/// Business metadata attached to `type=biz` results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyMetaData {
    #[serde(default)]
    pub url: Option<String>,
}

impl PlaceProperties {
    /// `description`, falling back to `text`.
    #[must_use]
    pub fn address(&self) -> Option<String> {
        self.description
            .as_deref()
            .or(self.text.as_deref())
            .map(str::to_owned)
    }

    #[must_use]
    pub fn website(&self) -> Option<String> {
        self.company.as_ref().and_then(|c| c.url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_minimal_feature() {
        let feature: GeoFeature =
            serde_json::from_value(serde_json::json!({"properties": {"name": "Додо Пицца"}}))
                .expect("minimal feature");
        assert_eq!(feature.properties.name, "Додо Пицца");
        assert!(feature.properties.address().is_none());
        assert!(feature.properties.website().is_none());
    }

    #[test]
    fn address_prefers_description_over_text() {
        let props: PlaceProperties = serde_json::from_value(serde_json::json!({
            "name": "Пиццерия",
            "description": "ул. Ленина, 1",
            "text": "Пиццерия, ул. Ленина, 1, Сыктывкар"
        }))
        .expect("props");
        assert_eq!(props.address().as_deref(), Some("ул. Ленина, 1"));
    }

    #[test]
    fn address_falls_back_to_text() {
        let props: PlaceProperties = serde_json::from_value(serde_json::json!({
            "name": "Пиццерия",
            "text": "Пиццерия, Сыктывкар"
        }))
        .expect("props");
        assert_eq!(props.address().as_deref(), Some("Пиццерия, Сыктывкар"));
    }

    #[test]
    fn website_comes_from_company_metadata() {
        let props: PlaceProperties = serde_json::from_value(serde_json::json!({
            "name": "Додо Пицца",
            "CompanyMetaData": {"url": "https://dodopizza.ru"}
        }))
        .expect("props");
        assert_eq!(props.website().as_deref(), Some("https://dodopizza.ru"));
    }
}
