use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{vocabulary_serde, Vocabulary};

/// Accepted product categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductType {
    Electronics,
    Clothes,
    Shoes,
}

impl Vocabulary for ProductType {
    const ALL: &'static [Self] = &[ProductType::Electronics, ProductType::Clothes, ProductType::Shoes];

    fn as_str(&self) -> &'static str {
        match self {
            ProductType::Electronics => "электроника",
            ProductType::Clothes => "одежда",
            ProductType::Shoes => "обувь",
        }
    }
}

vocabulary_serde!(ProductType, "product type");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub date_time: DateTime<Utc>,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub reception_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_three_categories_parse() {
        assert_eq!(ProductType::parse("Электроника"), Some(ProductType::Electronics));
        assert_eq!(ProductType::parse("одежда"), Some(ProductType::Clothes));
        assert_eq!(ProductType::parse("ОБУВЬ"), Some(ProductType::Shoes));
        assert_eq!(ProductType::parse("мебель"), None);
        assert_eq!(ProductType::parse("electronics"), None);
    }
}
