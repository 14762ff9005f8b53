//! JSON Schema of the group-set input.

use std::sync::LazyLock;

use schemars::schema_for;

use crate::km::model::RawGroupSet;
use crate::plotting::PlotResult;

/// Cached JSON Schema for RawGroupSet.
static SCHEMA: LazyLock<schemars::Schema> = LazyLock::new(|| schema_for!(RawGroupSet));

pub fn schema() -> &'static schemars::Schema {
    &SCHEMA
}

/// Returns the JSON Schema as a pretty-printed JSON string.
pub fn schema_json_pretty() -> PlotResult<String> {
    Ok(serde_json::to_string_pretty(&*SCHEMA)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_schema_generation() {
        let schema = schema_json_pretty().unwrap();
        let parsed: Value = serde_json::from_str(&schema).unwrap();
        assert_eq!(parsed.get("type").and_then(|v| v.as_str()), Some("object"));
        let props = parsed.get("properties").unwrap();
        for field in ["colors", "labels", "curves", "domain", "maySplit", "pValue", "logRank"] {
            assert!(props.get(field).is_some(), "missing {}", field);
        }
    }

    #[test]
    fn test_no_field_is_required() {
        let value = serde_json::to_value(schema()).unwrap();
        let required = value.get("required").and_then(|r| r.as_array());
        assert!(required.is_none_or(|r| r.is_empty()));
    }
}
