//! Catalog entry record and its validated draft builder
use super::error::ValidationError;

pub type EntryId = u64;

/// Shown for entries that were saved without an image reference.
pub const PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1518779578993-ec3579fee39f?q=80&w=1200&auto=format&fit=crop";

/// A purchasable catalog entry. Prices are plain decimals in the deployment
/// currency; `discount_percent` stays within [0, 100] because every entry is
/// built through a validated [`EntryDraft`].
#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    #[n(0)]
    pub id: EntryId,
    #[n(1)]
    pub name: String,
    #[n(2)]
    pub description: String,
    #[n(3)]
    pub base_price: f64,
    #[n(4)]
    pub discount_percent: f64,
    #[n(5)]
    pub image_ref: Option<String>,
}

impl CatalogEntry {
    pub fn image_or_placeholder(&self) -> &str {
        self.image_ref.as_deref().unwrap_or(PLACEHOLDER_IMAGE)
    }
}

// Also used for constructing updates: the store validates the draft, then
// either assigns a fresh id (add) or applies it over an existing id (update).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EntryDraft {
    name: String,
    description: String,
    base_price: f64,
    discount_percent: f64,
    image_ref: Option<String>,
}

impl EntryDraft {
    /// Construct a new draft, the basis for an add or update submission
    pub fn new() -> Self {
        Self::default()
    }
    pub fn set_name(mut self, name: &str) -> Self {
        self.name = name.trim().to_string();
        self
    }
    pub fn set_description(mut self, description: &str) -> Self {
        self.description = description.trim().to_string();
        self
    }
    pub fn set_base_price(mut self, base_price: f64) -> Self {
        self.base_price = base_price;
        self
    }
    pub fn set_discount_percent(mut self, discount_percent: f64) -> Self {
        self.discount_percent = discount_percent;
        self
    }
    /// A blank reference is treated as absent and falls back to the placeholder
    pub fn set_image_ref(mut self, image_ref: &str) -> Self {
        let trimmed = image_ref.trim();
        self.image_ref = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    // Checks fields, then finalises the draft into an entry under the given id.
    pub(crate) fn validate_and_finalise(self, id: EntryId) -> Result<CatalogEntry, ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        // `!(x >= 0.0)` also rejects NaN
        if !self.base_price.is_finite() || self.base_price < 0.0 {
            return Err(ValidationError::InvalidBasePrice);
        }
        if !(0.0..=100.0).contains(&self.discount_percent) {
            return Err(ValidationError::DiscountOutOfRange);
        }

        Ok(CatalogEntry {
            id,
            name: self.name,
            description: self.description,
            base_price: self.base_price,
            discount_percent: self.discount_percent,
            image_ref: self.image_ref,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_encoding() {
        let original = EntryDraft::new()
            .set_name("Wireless Headphones")
            .set_description("Bluetooth over-ear, noise cancelling.")
            .set_base_price(45999.0)
            .set_discount_percent(10.0)
            .validate_and_finalise(1)
            .unwrap();

        let encoding = minicbor::to_vec(&original).unwrap();
        let decoded: CatalogEntry = minicbor::decode(&encoding).unwrap();

        assert_eq!(original, decoded);
    }

    #[test]
    fn blank_image_ref_falls_back_to_placeholder() {
        let entry = EntryDraft::new()
            .set_name("Mouse")
            .set_description("Ergonomic")
            .set_base_price(100.0)
            .set_image_ref("   ")
            .validate_and_finalise(7)
            .unwrap();

        assert_eq!(entry.image_ref, None);
        assert_eq!(entry.image_or_placeholder(), PLACEHOLDER_IMAGE);
    }
}
