// Data model: the car record exchanged with the server.
//
// The identifier is a plain integer everywhere in the client. The server may
// hand it back either as a JSON number or as a string of digits (records
// created by this client carry a string id), so reading accepts both and
// writing on create uses the string form.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Oldest production year the database accepts.
pub const MIN_PRODUCTION_YEAR: u16 = 1900;
/// Newest production year the database accepts.
pub const MAX_PRODUCTION_YEAR: u16 = 2000;

/// Positive integer identifying a car record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CarId(u64);

impl CarId {
    /// Returns `None` for zero, which the server never assigns.
    pub fn new(raw: u64) -> Option<Self> {
        (raw > 0).then_some(CarId(raw))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for CarId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        let raw = match Raw::deserialize(deserializer)? {
            Raw::Number(n) => n,
            Raw::Text(s) => s
                .trim()
                .parse::<u64>()
                .map_err(|_| serde::de::Error::custom(format!("car id {s:?} is not a number")))?,
        };
        CarId::new(raw).ok_or_else(|| serde::de::Error::custom("car id must be positive"))
    }
}

/// Writes the id as a JSON string, the form the server keeps for ids the
/// client supplies.
fn id_as_text<S: Serializer>(id: &Option<CarId>, serializer: S) -> Result<S::Ok, S::Error> {
    match id {
        Some(id) => serializer.serialize_str(&id.to_string()),
        None => serializer.serialize_none(),
    }
}

/// The editable part of a record. This is the body of an update request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CarDetails {
    pub brand: String,
    pub model: String,
    pub production_year: u16,
    pub convertible: bool,
}

/// Body of a create request. `id` is only sent when the operator chose one.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NewCar {
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "id_as_text")]
    pub id: Option<CarId>,
    #[serde(flatten)]
    pub details: CarDetails,
}

/// A record as returned by the listing endpoint.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Car {
    pub id: CarId,
    #[serde(flatten)]
    pub details: CarDetails,
}
