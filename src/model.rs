//! The serialization contract every generated type follows.
//!
//! Plain models read their fields with [`FieldReader`], write them with
//! [`FieldWriter`], and check raw candidates with [`RawValidator`]. Whatever
//! keys the reader did not consume become the model's additional properties.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::wire_enum::WireEnum;

pub type AdditionalProperties = Map<String, Value>;

pub trait Model: Sized {
    fn from_json(json: &str) -> Result<Self>;

    fn to_value(&self) -> Value;

    /// Checks a raw JSON value against the declared field types without
    /// building the model.
    fn validate_raw(obj: &Value) -> Result<()>;

    fn to_json(&self) -> String {
        self.to_value().to_string()
    }
}

pub(crate) fn parse_datetime(field: &str, raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|source| Error::DateTime {
            field: field.to_string(),
            source,
        })
}

pub(crate) fn format_datetime(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Consumes declared fields out of a parsed JSON object.
pub struct FieldReader {
    model: &'static str,
    fields: Map<String, Value>,
}

impl FieldReader {
    pub fn parse(model: &'static str, json: &str) -> Result<Self> {
        match serde_json::from_str(json)? {
            Value::Object(fields) => Ok(Self { model, fields }),
            _ => Err(Error::validation(model, "object")),
        }
    }

    fn field_name(&self, key: &str) -> String {
        format!("{}.{key}", self.model)
    }

    fn mismatch(&self, key: &str, expected: &'static str) -> Error {
        Error::validation(self.field_name(key), expected)
    }

    /// Removes `key`, treating JSON `null` the same as an absent key.
    fn take(&mut self, key: &str) -> Option<Value> {
        match self.fields.remove(key) {
            Some(Value::Null) | None => None,
            Some(value) => Some(value),
        }
    }

    pub fn string(&mut self, key: &str) -> Result<Option<String>> {
        match self.take(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(_) => Err(self.mismatch(key, "string")),
        }
    }

    pub fn required_string(&mut self, key: &str) -> Result<String> {
        self.string(key)?
            .ok_or_else(|| self.mismatch(key, "string"))
    }

    pub fn bool(&mut self, key: &str) -> Result<Option<bool>> {
        match self.take(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(b)),
            Some(_) => Err(self.mismatch(key, "boolean")),
        }
    }

    pub fn integer(&mut self, key: &str) -> Result<Option<i64>> {
        match self.take(key) {
            None => Ok(None),
            Some(value) => value
                .as_i64()
                .map(Some)
                .ok_or_else(|| self.mismatch(key, "integer")),
        }
    }

    pub fn required_integer(&mut self, key: &str) -> Result<i64> {
        self.integer(key)?
            .ok_or_else(|| self.mismatch(key, "integer"))
    }

    pub fn number(&mut self, key: &str) -> Result<Option<f64>> {
        match self.take(key) {
            None => Ok(None),
            Some(value) => value
                .as_f64()
                .map(Some)
                .ok_or_else(|| self.mismatch(key, "number")),
        }
    }

    /// Strict RFC 3339 parse; a malformed string is a parse error, not a
    /// validation error.
    pub fn datetime(&mut self, key: &str) -> Result<Option<DateTime<Utc>>> {
        match self.string(key)? {
            None => Ok(None),
            Some(raw) => parse_datetime(&self.field_name(key), &raw).map(Some),
        }
    }

    pub fn string_list(&mut self, key: &str) -> Result<Option<Vec<String>>> {
        match self.take(key) {
            None => Ok(None),
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    _ => Err(self.mismatch(key, "array of strings")),
                })
                .collect::<Result<Vec<_>>>()
                .map(Some),
            Some(_) => Err(self.mismatch(key, "array")),
        }
    }

    pub fn object(&mut self, key: &str) -> Result<Option<Map<String, Value>>> {
        match self.take(key) {
            None => Ok(None),
            Some(Value::Object(map)) => Ok(Some(map)),
            Some(_) => Err(self.mismatch(key, "object")),
        }
    }

    pub fn string_map(&mut self, key: &str) -> Result<Option<BTreeMap<String, String>>> {
        match self.object(key)? {
            None => Ok(None),
            Some(map) => map
                .into_iter()
                .map(|(k, v)| match v {
                    Value::String(s) => Ok((k, s)),
                    _ => Err(self.mismatch(key, "object of strings")),
                })
                .collect::<Result<BTreeMap<_, _>>>()
                .map(Some),
        }
    }

    /// Untyped field, kept as raw JSON.
    pub fn raw(&mut self, key: &str) -> Option<Value> {
        self.take(key)
    }

    pub fn required_raw(&mut self, key: &str) -> Result<Value> {
        self.take(key).ok_or_else(|| self.mismatch(key, "any value"))
    }

    pub fn raw_list(&mut self, key: &str) -> Result<Option<Vec<Value>>> {
        match self.take(key) {
            None => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items)),
            Some(_) => Err(self.mismatch(key, "array")),
        }
    }

    pub fn wire_enum<E: WireEnum>(&mut self, key: &str) -> Result<Option<E>> {
        Ok(self.string(key)?.map(|wire| E::from_wire(&wire)))
    }

    pub fn required_wire_enum<E: WireEnum>(&mut self, key: &str) -> Result<E> {
        self.wire_enum(key)?
            .ok_or_else(|| self.mismatch(key, "string"))
    }

    /// Nested model or union. The sub-value is written back out to text and
    /// handed to the nested type's own `from_json`; `null` never reaches it.
    pub fn model<T: Model>(&mut self, key: &str) -> Result<Option<T>> {
        match self.take(key) {
            None => Ok(None),
            Some(value) => T::from_json(&value.to_string()).map(Some),
        }
    }

    pub fn required_model<T: Model>(&mut self, key: &str) -> Result<T> {
        self.model(key)?
            .ok_or_else(|| self.mismatch(key, "object"))
    }

    pub fn model_list<T: Model>(&mut self, key: &str) -> Result<Option<Vec<T>>> {
        match self.take(key) {
            None => Ok(None),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| T::from_json(&item.to_string()))
                .collect::<Result<Vec<_>>>()
                .map(Some),
            Some(_) => Err(self.mismatch(key, "array")),
        }
    }

    pub fn required_model_list<T: Model>(&mut self, key: &str) -> Result<Vec<T>> {
        self.model_list(key)?
            .ok_or_else(|| self.mismatch(key, "array"))
    }

    /// Keys no declared field claimed.
    pub fn finish(self) -> AdditionalProperties {
        self.fields
    }
}

/// Values that can be written as a JSON field.
pub trait ToField {
    fn to_field(&self) -> Value;
}

impl ToField for String {
    fn to_field(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ToField for bool {
    fn to_field(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ToField for i64 {
    fn to_field(&self) -> Value {
        Value::from(*self)
    }
}

impl ToField for f64 {
    fn to_field(&self) -> Value {
        Value::from(*self)
    }
}

impl ToField for DateTime<Utc> {
    fn to_field(&self) -> Value {
        Value::String(format_datetime(self))
    }
}

impl ToField for Value {
    fn to_field(&self) -> Value {
        self.clone()
    }
}

impl ToField for Map<String, Value> {
    fn to_field(&self) -> Value {
        Value::Object(self.clone())
    }
}

impl ToField for BTreeMap<String, String> {
    fn to_field(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect(),
        )
    }
}

impl<T: ToField> ToField for Vec<T> {
    fn to_field(&self) -> Value {
        Value::Array(self.iter().map(ToField::to_field).collect())
    }
}

impl<T: ToField> ToField for Option<T> {
    fn to_field(&self) -> Value {
        self.as_ref().map_or(Value::Null, ToField::to_field)
    }
}

/// Builds a JSON object with keys in declaration order.
#[derive(Debug, Default)]
pub struct FieldWriter {
    fields: Map<String, Value>,
}

impl FieldWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field<V: ToField>(mut self, key: &str, value: &V) -> Self {
        self.fields.insert(key.to_string(), value.to_field());
        self
    }

    pub fn wire_enum<E: WireEnum>(mut self, key: &str, value: &Option<E>) -> Self {
        let value = value
            .as_ref()
            .map_or(Value::Null, |e| Value::String(e.as_wire().to_string()));
        self.fields.insert(key.to_string(), value);
        self
    }

    pub fn model<T: Model>(mut self, key: &str, value: &Option<T>) -> Self {
        self.fields
            .insert(key.to_string(), value.as_ref().map_or(Value::Null, Model::to_value));
        self
    }

    pub fn required_model<T: Model>(mut self, key: &str, value: &T) -> Self {
        self.fields.insert(key.to_string(), value.to_value());
        self
    }

    pub fn model_list<T: Model>(mut self, key: &str, value: &Option<Vec<T>>) -> Self {
        let value = value.as_ref().map_or(Value::Null, |items| {
            Value::Array(items.iter().map(Model::to_value).collect())
        });
        self.fields.insert(key.to_string(), value);
        self
    }

    pub fn required_model_list<T: Model>(mut self, key: &str, value: &[T]) -> Self {
        self.fields.insert(
            key.to_string(),
            Value::Array(value.iter().map(Model::to_value).collect()),
        );
        self
    }

    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}

/// Field-by-field type checks over a raw JSON candidate.
pub struct RawValidator<'a> {
    model: &'static str,
    fields: &'a Map<String, Value>,
}

impl<'a> RawValidator<'a> {
    pub fn new(model: &'static str, obj: &'a Value) -> Result<Self> {
        match obj {
            Value::Object(fields) => Ok(Self { model, fields }),
            _ => Err(Error::validation(model, "object")),
        }
    }

    fn present(&self, key: &str) -> Option<&'a Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    fn check(
        &self,
        key: &str,
        required: bool,
        expected: &'static str,
        ok: impl FnOnce(&Value) -> bool,
    ) -> Result<&Self> {
        match self.present(key) {
            Some(value) if ok(value) => Ok(self),
            None if !required => Ok(self),
            _ => Err(Error::validation(format!("{}.{key}", self.model), expected)),
        }
    }

    pub fn string(&self, key: &str) -> Result<&Self> {
        self.check(key, false, "string", Value::is_string)
    }

    pub fn required_string(&self, key: &str) -> Result<&Self> {
        self.check(key, true, "string", Value::is_string)
    }

    pub fn bool(&self, key: &str) -> Result<&Self> {
        self.check(key, false, "boolean", Value::is_boolean)
    }

    pub fn integer(&self, key: &str) -> Result<&Self> {
        self.check(key, false, "integer", Value::is_i64)
    }

    pub fn required_integer(&self, key: &str) -> Result<&Self> {
        self.check(key, true, "integer", Value::is_i64)
    }

    pub fn required_bool(&self, key: &str) -> Result<&Self> {
        self.check(key, true, "boolean", Value::is_boolean)
    }

    pub fn number(&self, key: &str) -> Result<&Self> {
        self.check(key, false, "number", Value::is_number)
    }

    pub fn datetime(&self, key: &str) -> Result<&Self> {
        self.check(key, false, "date-time", |v| {
            v.as_str()
                .is_some_and(|raw| chrono::DateTime::parse_from_rfc3339(raw).is_ok())
        })
    }

    pub fn array(&self, key: &str) -> Result<&Self> {
        self.check(key, false, "array", Value::is_array)
    }

    pub fn required_raw(&self, key: &str) -> Result<&Self> {
        self.check(key, true, "any value", |_| true)
    }

    pub fn required_array(&self, key: &str) -> Result<&Self> {
        self.check(key, true, "array", Value::is_array)
    }

    pub fn object(&self, key: &str) -> Result<&Self> {
        self.check(key, false, "object", Value::is_object)
    }

    /// Nested model, union, or enum; delegates to its own `validate_raw`.
    pub fn nested(&self, key: &str, validate: fn(&Value) -> Result<()>) -> Result<&Self> {
        match self.present(key) {
            Some(value) => validate(value).map(|()| self),
            None => Ok(self),
        }
    }

    pub fn required_nested(
        &self,
        key: &str,
        validate: fn(&Value) -> Result<()>,
    ) -> Result<&Self> {
        match self.present(key) {
            Some(value) => validate(value).map(|()| self),
            None => Err(Error::validation(format!("{}.{key}", self.model), "object")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reader_leaves_unknown_keys_behind() {
        let mut reader =
            FieldReader::parse("Thing", r#"{"id":"a","extra":1,"other":null}"#).unwrap();
        assert_eq!(reader.string("id").unwrap().as_deref(), Some("a"));
        let rest = reader.finish();
        assert_eq!(rest.len(), 2);
        assert_eq!(rest.get("extra"), Some(&json!(1)));
    }

    #[test]
    fn test_reader_null_and_absent_are_none() {
        let mut reader = FieldReader::parse("Thing", r#"{"name":null}"#).unwrap();
        assert_eq!(reader.string("name").unwrap(), None);
        assert_eq!(reader.string("missing").unwrap(), None);
    }

    #[test]
    fn test_reader_rejects_wrong_primitive_type() {
        let mut reader = FieldReader::parse("Thing", r#"{"is_muted":"yes"}"#).unwrap();
        let err = reader.bool("is_muted").unwrap_err();
        assert!(err.to_string().contains("Thing.is_muted"));
    }

    #[test]
    fn test_reader_malformed_datetime_is_parse_error() {
        let mut reader =
            FieldReader::parse("Thing", r#"{"created_at":"yesterday"}"#).unwrap();
        let err = reader.datetime("created_at").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Parse);
    }

    #[test]
    fn test_reader_parses_offset_datetime_to_utc() {
        let mut reader =
            FieldReader::parse("Thing", r#"{"at":"2024-01-01T02:00:00+02:00"}"#).unwrap();
        let at = reader.datetime("at").unwrap().unwrap();
        assert_eq!(format_datetime(&at), "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_reader_rejects_non_object_input() {
        assert!(FieldReader::parse("Thing", "\"just a string\"").is_err());
        assert!(FieldReader::parse("Thing", "{").is_err());
    }

    #[test]
    fn test_writer_keeps_declaration_order_and_nulls() {
        let value = FieldWriter::new()
            .field("zeta", &Some("z".to_string()))
            .field("alpha", &None::<String>)
            .field("mid", &Some(true))
            .build();
        assert_eq!(value.to_string(), r#"{"zeta":"z","alpha":null,"mid":true}"#);
    }

    #[test]
    fn test_validator_skips_absent_optional_fields() {
        let obj = json!({"id": "x"});
        let v = RawValidator::new("Thing", &obj).unwrap();
        assert!(v.string("id").is_ok());
        assert!(v.bool("flag").is_ok());
        assert!(v.required_string("name").is_err());
    }

    #[test]
    fn test_integer_checks_agree_beyond_i64() {
        let raw = r#"{"count":18446744073709551615}"#;
        let obj: Value = serde_json::from_str(raw).unwrap();
        assert!(RawValidator::new("Thing", &obj).unwrap().integer("count").is_err());
        let mut reader = FieldReader::parse("Thing", raw).unwrap();
        assert!(reader.integer("count").is_err());

        let obj = json!({"count": 3});
        assert!(RawValidator::new("Thing", &obj).unwrap().integer("count").is_ok());
    }

    #[test]
    fn test_validator_names_offending_field() {
        let obj = json!({"count": "three"});
        let err = RawValidator::new("Thing", &obj)
            .unwrap()
            .integer("count")
            .err()
            .unwrap();
        assert!(err.to_string().contains("Thing.count"));
    }

    #[test]
    fn test_validator_rejects_scalars() {
        assert!(RawValidator::new("Thing", &json!("2024-01-01")).is_err());
    }
}
