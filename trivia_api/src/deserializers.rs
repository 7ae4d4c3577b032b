use serde::{Deserialize, Deserializer};

// the quiz client builds category ids from object keys, so they can arrive
// either as numbers or as numeric strings
#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i64),
    Str(String),
}

pub fn deserialize_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match IntOrString::deserialize(deserializer)? {
        IntOrString::Int(v) => Ok(v),
        IntOrString::Str(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| serde::de::Error::custom(format!("Wrong value {s}, can not parse to i64"))),
    }
}

/// Lenient integer parsing for query parameters: anything unparseable is `None`
pub fn lenient_i64(value: Option<&str>) -> Option<i64> {
    value.and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        #[serde(deserialize_with = "deserialize_id")]
        id: i64,
    }

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        let w: Wrapper = serde_json::from_str(r#"{"id": 5}"#).unwrap();
        assert_eq!(w.id, 5);
        let w: Wrapper = serde_json::from_str(r#"{"id": "5"}"#).unwrap();
        assert_eq!(w.id, 5);
    }

    #[test]
    fn rejects_non_numeric() {
        assert!(serde_json::from_str::<Wrapper>(r#"{"id": "art"}"#).is_err());
        assert!(serde_json::from_str::<Wrapper>(r#"{"id": [1]}"#).is_err());
    }

    #[test]
    fn lenient_parse() {
        assert_eq!(lenient_i64(Some("3")), Some(3));
        assert_eq!(lenient_i64(Some("abc")), None);
        assert_eq!(lenient_i64(None), None);
    }
}
