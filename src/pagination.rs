//! Cursor-paginated result pages.

use serde_json::Value;

use crate::error::Result;
use crate::model::{AdditionalProperties, FieldReader, FieldWriter, Model, RawValidator};

/// One page of results. `next` is absent on the last page and `previous` on
/// the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Paginated<T> {
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
    pub additional_properties: AdditionalProperties,
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self {
            next: None,
            previous: None,
            results: Vec::new(),
            additional_properties: AdditionalProperties::new(),
        }
    }
}

impl<T> Paginated<T> {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.results.iter()
    }
}

impl<T> IntoIterator for Paginated<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Paginated<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

impl<T: Model> Model for Paginated<T> {
    /// A single bad element fails the whole page.
    fn from_json(json: &str) -> Result<Self> {
        let mut reader = FieldReader::parse("PaginatedList", json)?;
        let next = reader.string("next")?;
        let previous = reader.string("previous")?;
        let results = reader.model_list::<T>("results")?.unwrap_or_default();
        Ok(Self {
            next,
            previous,
            results,
            additional_properties: reader.finish(),
        })
    }

    fn to_value(&self) -> Value {
        FieldWriter::new()
            .field("next", &self.next)
            .field("previous", &self.previous)
            .required_model_list("results", &self.results)
            .build()
    }

    fn validate_raw(obj: &Value) -> Result<()> {
        RawValidator::new("PaginatedList", obj)?
            .string("next")?
            .string("previous")?
            .array("results")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticketing::Project;

    #[test]
    fn test_absent_cursors_stay_absent() {
        let page = Paginated::<Project>::from_json(r#"{"results":[]}"#).unwrap();
        assert_eq!(page.next, None);
        assert_eq!(page.previous, None);
        assert!(page.results.is_empty());
        assert!(!page.has_next());
    }

    #[test]
    fn test_cursors_and_results_parse() {
        let page = Paginated::<Project>::from_json(
            r#"{"next":"cD0yMDIx","previous":null,"results":[{"id":"p1","name":"Roadmap"},{"id":"p2"}]}"#,
        )
        .unwrap();
        assert_eq!(page.next.as_deref(), Some("cD0yMDIx"));
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].name.as_deref(), Some("Roadmap"));
    }

    #[test]
    fn test_bad_element_aborts_whole_page() {
        let err = Paginated::<Project>::from_json(
            r#"{"results":[{"id":"ok"},{"id":"bad","created_at":"not a date"}]}"#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Parse);
    }

    #[test]
    fn test_page_serializes_all_three_keys() {
        let page = Paginated::<Project> {
            next: Some("abc".to_string()),
            ..Default::default()
        };
        assert_eq!(
            page.to_json(),
            r#"{"next":"abc","previous":null,"results":[]}"#
        );
    }

    #[test]
    fn test_validate_raw_checks_cursor_types() {
        let ok = serde_json::json!({"next": null, "results": []});
        assert!(Paginated::<Project>::validate_raw(&ok).is_ok());
        let bad = serde_json::json!({"next": 3});
        assert!(Paginated::<Project>::validate_raw(&bad).is_err());
    }
}
