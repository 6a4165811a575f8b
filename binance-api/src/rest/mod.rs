pub mod client;
pub mod endpoint;
pub mod market;
pub mod params;
pub mod query;

use serde::{de::DeserializeOwned, Deserialize};

/// Some market endpoints answer with a bare object for a single symbol and
/// with an array when several symbols are requested.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        return match self {
            OneOrMany::One(x) => vec![x],
            OneOrMany::Many(x) => x,
        };
    }
}

impl<T: DeserializeOwned> OneOrMany<T> {
    /// Picks the variant from the JSON shape, so a bad field is reported by
    /// name instead of as an unmatched untagged variant.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        return match value {
            serde_json::Value::Array(_) => Ok(OneOrMany::Many(serde_json::from_value(value)?)),
            value => Ok(OneOrMany::One(serde_json::from_value(value)?)),
        };
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::OneOrMany;

    #[derive(Debug, Deserialize)]
    struct Price {
        #[allow(dead_code)]
        price: String,
    }

    #[test]
    fn object_and_array_both_decode() {
        let one = OneOrMany::<Price>::from_value(json!({"price": "1.0"})).unwrap();
        assert_eq!(one.into_vec().len(), 1);

        let many = OneOrMany::<Price>::from_value(json!([{"price": "1.0"}, {"price": "2.0"}]));
        assert_eq!(many.unwrap().into_vec().len(), 2);
    }

    #[test]
    fn field_errors_keep_the_field_name() {
        let err = OneOrMany::<Price>::from_value(json!({"symbol": "BTCUSDT"})).unwrap_err();
        assert!(err.to_string().contains("missing field `price`"), "{err}");

        let err = OneOrMany::<Price>::from_value(json!([{"price": 1}])).unwrap_err();
        assert!(!err.to_string().contains("untagged"), "{err}");
    }
}
