pub mod product;
pub mod pvz;
pub mod reception;
pub mod user;

pub use product::{Product, ProductType};
pub use pvz::{City, PickupPoint, PickupPointDetails, ReceptionDetails};
pub use reception::{Reception, ReceptionStatus};
pub use user::{NewUser, Role, User};

/// A closed set of lowercase words with a fixed textual form.
///
/// Cities, product categories, roles and reception statuses are all stored
/// and exchanged as text. The default `parse` trims and lowercases before
/// matching; roles and statuses override it to match exactly.
pub trait Vocabulary: Sized + Copy + 'static {
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase();
        Self::ALL.iter().copied().find(|v| v.as_str() == normalized)
    }
}

/// Implements `Serialize`/`Deserialize` through `Vocabulary::as_str`/`parse`.
macro_rules! vocabulary_serde {
    ($ty:ty, $what:literal) => {
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str($crate::models::Vocabulary::as_str(self))
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                <$ty as $crate::models::Vocabulary>::parse(&raw)
                    .ok_or_else(|| serde::de::Error::custom(format!("unknown {}: {}", $what, raw)))
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::models::Vocabulary::as_str(self))
            }
        }
    };
}

pub(crate) use vocabulary_serde;
