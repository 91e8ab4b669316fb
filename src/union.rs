//! Ordered trial resolution for "one of several shapes" values.
//!
//! A union lists its candidates in declaration order. Deserialization tries
//! each one and keeps the first that validates; later candidates are never
//! consulted, even if they would also accept the input. When nothing
//! matches, the value is kept as `Unresolved` raw JSON instead of failing,
//! while `validate_raw` over the same input does fail.

use std::any::Any;

use serde_json::Value;
use tracing::warn;

use crate::error::{Error, Result};
use crate::model::Model;
use crate::wire_enum::WireEnum;

/// One parse attempt: gets the parsed value and the original JSON text.
pub type Candidate<U> = fn(&Value, &str) -> Result<U>;

/// One validation attempt.
pub type Check = fn(&Value) -> Result<()>;

pub trait Union: Model {
    /// The resolved member, for runtime type checks.
    fn member(&self) -> &dyn Any;

    /// True when the resolved member is a `T`.
    fn is<T: Any>(&self) -> bool {
        self.member().is::<T>()
    }

    fn downcast<T: Any>(&self) -> Option<&T> {
        self.member().downcast_ref::<T>()
    }
}

pub fn resolve<U>(
    union: &'static str,
    json: &str,
    candidates: &[Candidate<U>],
    unresolved: fn(Value) -> U,
) -> Result<U> {
    let value: Value = serde_json::from_str(json)?;
    for candidate in candidates {
        if let Ok(member) = candidate(&value, json) {
            return Ok(member);
        }
    }
    warn!(union = %union, "no candidate matched, keeping raw value");
    Ok(unresolved(value))
}

pub fn validate_any(union: &'static str, obj: &Value, checks: &[Check]) -> Result<()> {
    if checks.iter().any(|check| check(obj).is_ok()) {
        Ok(())
    } else {
        Err(Error::NoMatchingCandidate { union })
    }
}

pub fn check_string(obj: &Value) -> Result<()> {
    if obj.is_string() {
        Ok(())
    } else {
        Err(Error::validation("member", "string"))
    }
}

pub fn expect_string(value: &Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::validation("member", "string"))
}

/// Candidate check for an enum member: a string the table knows.
pub fn check_known<E: WireEnum>(obj: &Value) -> Result<()> {
    match obj.as_str() {
        Some(wire) if E::TABLE.contains_wire(wire) => Ok(()),
        _ => Err(Error::validation(E::NAME, "known enum value")),
    }
}

/// Candidate for a nested model: validate first, then parse the text.
pub fn model_candidate<T: Model>(value: &Value, json: &str) -> Result<T> {
    T::validate_raw(value)?;
    T::from_json(json)
}

/// The `[Enum, String]` union the schema uses for nearly every enum-typed
/// field: a known wire value resolves to the enum, any other string stays a
/// string.
///
/// Values compare by their JSON form, so a hand-built `String("ONGOING")`
/// equals `Enum(Ongoing)`. Use [`EnumOrString::from_wire`] or
/// [`EnumOrString::normalized`] to get the member a parse would produce.
#[derive(Debug, Clone)]
pub enum EnumOrString<E> {
    Enum(E),
    String(String),
    Unresolved(Value),
}

impl<E: WireEnum> EnumOrString<E> {
    /// The member `from_json` resolves for this wire string.
    pub fn from_wire(wire: &str) -> Self {
        if E::TABLE.contains_wire(wire) {
            Self::Enum(E::from_wire(wire))
        } else {
            Self::String(wire.to_string())
        }
    }

    /// Moves the value to the member `from_json` would have resolved.
    pub fn normalized(self) -> Self {
        match self.as_str() {
            Some(wire) => Self::from_wire(wire),
            None => self,
        }
    }

    pub fn as_enum(&self) -> Option<&E> {
        match self {
            Self::Enum(e) => Some(e),
            _ => None,
        }
    }

    /// The wire string, whichever candidate matched.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Enum(e) => Some(e.as_wire()),
            Self::String(s) => Some(s),
            Self::Unresolved(value) => value.as_str(),
        }
    }
}

impl<E: WireEnum> PartialEq for EnumOrString<E> {
    fn eq(&self, other: &Self) -> bool {
        match (self.as_str(), other.as_str()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => self.to_value() == other.to_value(),
            _ => false,
        }
    }
}

impl<E: WireEnum> From<E> for EnumOrString<E> {
    fn from(value: E) -> Self {
        Self::Enum(value)
    }
}

impl<E: WireEnum> Model for EnumOrString<E> {
    fn from_json(json: &str) -> Result<Self> {
        resolve::<Self>(
            E::NAME,
            json,
            &[
                |value: &Value, _: &str| {
                    check_known::<E>(value)?;
                    Ok(Self::Enum(E::from_wire(value.as_str().unwrap_or_default())))
                },
                |value: &Value, _: &str| expect_string(value).map(Self::String),
            ],
            Self::Unresolved,
        )
    }

    fn to_value(&self) -> Value {
        match self {
            Self::Enum(e) => Value::String(e.as_wire().to_string()),
            Self::String(s) => Value::String(s.clone()),
            Self::Unresolved(value) => value.clone(),
        }
    }

    fn validate_raw(obj: &Value) -> Result<()> {
        validate_any(E::NAME, obj, &[check_known::<E>, check_string])
    }
}

impl<E: WireEnum> Union for EnumOrString<E> {
    fn member(&self) -> &dyn Any {
        match self {
            Self::Enum(e) => e as &dyn Any,
            Self::String(s) => s as &dyn Any,
            Self::Unresolved(value) => value as &dyn Any,
        }
    }
}
