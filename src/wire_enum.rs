//! Frozen symbolic-key ↔ wire-value tables.
//!
//! Every enum the remote schema declares is generated with [`wire_enum!`]:
//! one Rust variant per table entry plus `Other(String)`, which keeps wire
//! values the table does not know about. Parsing never fails on an unknown
//! value; it is passed through verbatim.

/// A closed mapping of symbolic keys to canonical wire strings.
#[derive(Debug, Clone, Copy)]
pub struct EnumTable {
    entries: &'static [(&'static str, &'static str)],
}

impl EnumTable {
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// Wire value for a symbolic key. Keys must match exactly.
    pub fn wire_value(&self, key: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, wire)| *wire)
    }

    /// Symbolic key for a wire value, if the table has one.
    pub fn key(&self, wire: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(_, w)| *w == wire)
            .map(|(key, _)| *key)
    }

    /// Symbolic key for `wire`, or `wire` itself when the table has no entry.
    pub fn resolve<'a>(&self, wire: &'a str) -> &'a str {
        self.key(wire).unwrap_or(wire)
    }

    pub fn contains_wire(&self, wire: &str) -> bool {
        self.key(wire).is_some()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Behaviour shared by all generated enums.
pub trait WireEnum: Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    /// Schema name, used in error messages.
    const NAME: &'static str;
    const TABLE: EnumTable;

    /// Never fails: unknown values come back as the `Other` variant.
    fn from_wire(value: &str) -> Self;
    fn as_wire(&self) -> &str;
    /// Symbolic key, or the raw wire value for unknown members.
    fn key(&self) -> &str;
    fn is_known(&self) -> bool;
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $variant:ident => $key:ident = $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis enum $name {
            $( $variant, )+
            /// Wire value not present in the table, kept verbatim.
            Other(String),
        }

        impl $crate::wire_enum::WireEnum for $name {
            const NAME: &'static str = stringify!($name);
            const TABLE: $crate::wire_enum::EnumTable =
                $crate::wire_enum::EnumTable::new(&[ $( (stringify!($key), $wire) ),+ ]);

            fn from_wire(value: &str) -> Self {
                match value {
                    $( $wire => Self::$variant, )+
                    other => Self::Other(other.to_string()),
                }
            }

            fn as_wire(&self) -> &str {
                match self {
                    $( Self::$variant => $wire, )+
                    Self::Other(raw) => raw,
                }
            }

            fn key(&self) -> &str {
                match self {
                    $( Self::$variant => stringify!($key), )+
                    Self::Other(raw) => raw,
                }
            }

            fn is_known(&self) -> bool {
                !matches!(self, Self::Other(_))
            }
        }

        // Members compare by wire value: `Other("X")` equals the known
        // variant whose wire value is "X", as it would after a reparse.
        impl ::std::cmp::PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                $crate::wire_enum::WireEnum::as_wire(self)
                    == $crate::wire_enum::WireEnum::as_wire(other)
            }
        }

        impl ::std::cmp::Eq for $name {}

        impl ::std::hash::Hash for $name {
            fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                ::std::hash::Hash::hash($crate::wire_enum::WireEnum::as_wire(self), state);
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::wire_enum::WireEnum::as_wire(self))
            }
        }

        impl $crate::model::Model for $name {
            fn from_json(json: &str) -> $crate::Result<Self> {
                let value: ::serde_json::Value = ::serde_json::from_str(json)?;
                match value.as_str() {
                    Some(wire) => Ok(<Self as $crate::wire_enum::WireEnum>::from_wire(wire)),
                    None => Err($crate::Error::Validation {
                        field: stringify!($name).to_string(),
                        expected: "string",
                    }),
                }
            }

            fn to_value(&self) -> ::serde_json::Value {
                ::serde_json::Value::String(
                    $crate::wire_enum::WireEnum::as_wire(self).to_string(),
                )
            }

            fn validate_raw(obj: &::serde_json::Value) -> $crate::Result<()> {
                if obj.is_string() {
                    Ok(())
                } else {
                    Err($crate::Error::Validation {
                        field: stringify!($name).to_string(),
                        expected: "string",
                    })
                }
            }
        }

        impl $crate::request::QueryValue for $name {
            fn to_query(&self) -> String {
                $crate::wire_enum::WireEnum::as_wire(self).to_string()
            }
        }
    };
}

pub(crate) use wire_enum;
