use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{vocabulary_serde, Product, Reception, Vocabulary};

/// Cities where a pickup point may be opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Moscow,
    SaintPetersburg,
    Kazan,
}

impl Vocabulary for City {
    const ALL: &'static [Self] = &[City::Moscow, City::SaintPetersburg, City::Kazan];

    fn as_str(&self) -> &'static str {
        match self {
            City::Moscow => "москва",
            City::SaintPetersburg => "санкт-петербург",
            City::Kazan => "казань",
        }
    }
}

vocabulary_serde!(City, "city");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupPoint {
    pub id: Uuid,
    pub registration_date: DateTime<Utc>,
    pub city: City,
}

/// A pickup point with its receptions, each carrying its products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupPointDetails {
    pub pvz: PickupPoint,
    pub receptions: Vec<ReceptionDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceptionDetails {
    pub reception: Reception,
    pub products: Vec<Product>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cities_case_insensitively() {
        assert_eq!(City::parse("Москва"), Some(City::Moscow));
        assert_eq!(City::parse("САНКТ-ПЕТЕРБУРГ"), Some(City::SaintPetersburg));
        assert_eq!(City::parse(" казань "), Some(City::Kazan));
        assert_eq!(City::parse("Воронеж"), None);
        assert_eq!(City::parse(""), None);
    }

    #[test]
    fn serializes_as_lowercase_name() {
        let pvz = PickupPoint { id: Uuid::nil(), registration_date: Utc::now(), city: City::Kazan };
        let value = serde_json::to_value(&pvz).unwrap();
        assert_eq!(value["city"], "казань");
        assert!(value.get("registrationDate").is_some());
    }
}
