use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    /// Free-text merchant annotation. Older shops expose the same field as `personal_notes`.
    #[serde(default)]
    pub private_note: Option<String>,
    #[serde(default)]
    pub personal_notes: Option<String>,
    /// Set when this product is a variation (e.g. a size/colour) of a base product.
    #[serde(default)]
    pub variation_base_id: Option<i64>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

impl Product {
    /// The merchant's private note, taking whichever of the two field spellings is non-empty.
    pub fn note(&self) -> Option<&str> {
        self.private_note
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.personal_notes.as_deref().filter(|s| !s.trim().is_empty()))
    }

    /// The main product image. Prom lists the primary image first.
    pub fn main_image_url(&self) -> Option<&str> {
        self.images.first().map(|img| img.url.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImage {
    #[serde(default)]
    pub id: Option<i64>,
    pub url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn note_prefers_private_note_then_personal_notes() {
        let p: Product = serde_json::from_str(
            r#"{"id": 1, "private_note": "", "personal_notes": "Поставщик: Acme"}"#,
        )
        .unwrap();
        assert_eq!(p.note(), Some("Поставщик: Acme"));
        let p: Product =
            serde_json::from_str(r#"{"id": 2, "private_note": "Price: 100", "personal_notes": "x"}"#).unwrap();
        assert_eq!(p.note(), Some("Price: 100"));
        let p: Product = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        assert!(p.note().is_none());
        assert!(p.variation_base_id.is_none());
    }

    #[test]
    fn first_image_wins() {
        let p: Product = serde_json::from_str(
            r#"{"id": 4, "images": [{"url": "https://img/main.jpg"}, {"url": "https://img/alt.jpg"}]}"#,
        )
        .unwrap();
        assert_eq!(p.main_image_url(), Some("https://img/main.jpg"));
    }
}
