use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One artist entry in the store.
///
/// `name` and `alternative_names` are the fixed part of the record. Any other
/// key found in the JSON object lands in `extra` and is written back untouched,
/// after the fixed fields.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ArtistRecord {
    pub name: String,
    #[serde(default)]
    pub alternative_names: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ArtistRecord {
    /// Builds a record with no extra fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use artistore::ArtistRecord;
    ///
    /// let record = ArtistRecord::new("Björk", ["Bjork"]);
    /// assert_eq!(record.alternative_names, vec!["Bjork"]);
    /// assert!(record.extra.is_empty());
    /// ```
    pub fn new<I, S>(name: &str, alternative_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            alternative_names: alternative_names.into_iter().map(Into::into).collect(),
            extra: Map::new(),
        }
    }

    /// Looks up a field by its JSON key, fixed fields included.
    pub fn field(&self, key: &str) -> Option<Value> {
        match key {
            "name" => Some(Value::String(self.name.clone())),
            "alternative_names" => Some(Value::from(self.alternative_names.clone())),
            _ => self.extra.get(key).cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extra_fields_survive_round_trip() {
        let raw = json!({
            "name": "Portishead",
            "alternative_names": ["Portis"],
            "origin": "Bristol",
            "active": true
        });

        let record: ArtistRecord = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(record.name, "Portishead");
        assert_eq!(record.extra.len(), 2);
        assert_eq!(serde_json::to_value(&record).unwrap(), raw);
    }

    #[test]
    fn test_missing_alternative_names_defaults_to_empty() {
        let record: ArtistRecord = serde_json::from_str(r#"{"name": "Low"}"#).unwrap();
        assert!(record.alternative_names.is_empty());
        assert!(record.extra.is_empty());
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let result = serde_json::from_str::<ArtistRecord>(r#"{"alternative_names": []}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_field_lookup() {
        let mut record = ArtistRecord::new("Air", ["AIR"]);
        record.extra.insert("genre".to_string(), json!("electronic"));

        assert_eq!(record.field("name"), Some(json!("Air")));
        assert_eq!(record.field("alternative_names"), Some(json!(["AIR"])));
        assert_eq!(record.field("genre"), Some(json!("electronic")));
        assert_eq!(record.field("label"), None);
    }
}
