/*!
Declared parameter types recognized by loom generators.

The classifier stores whatever follows the first colon verbatim; this
catalogue is only consulted by callers that want to validate `params`.

Helpers:
  - variants()
  - aliases()
  - from_str_ci()
  - unknown_params()
*/

use std::fmt;

use super::Params;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ParamType {
    String,
    /// Long-form string
    Text,
    Integer,
    Number,
    Boolean,
    Date,
    /// Comma separated list
    Array,
}

impl ParamType {
    /// All variants, in help display order.
    pub const fn variants() -> &'static [ParamType] {
        &[
            ParamType::String,
            ParamType::Text,
            ParamType::Integer,
            ParamType::Number,
            ParamType::Boolean,
            ParamType::Date,
            ParamType::Array,
        ]
    }

    /// Short spellings accepted in addition to the canonical name.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            ParamType::String => &["str"],
            ParamType::Text => &[],
            ParamType::Integer => &["int"],
            ParamType::Number => &["float"],
            ParamType::Boolean => &["bool"],
            ParamType::Date => &[],
            ParamType::Array => &["list"],
        }
    }

    pub fn from_str_ci(s: &str) -> Option<Self> {
        let norm = s.trim().to_ascii_lowercase();
        match norm.as_str() {
            "string" | "str" => Some(ParamType::String),
            "text" => Some(ParamType::Text),
            "integer" | "int" => Some(ParamType::Integer),
            "number" | "float" => Some(ParamType::Number),
            "boolean" | "bool" => Some(ParamType::Boolean),
            "date" => Some(ParamType::Date),
            "array" | "list" => Some(ParamType::Array),
            _ => None,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParamType::String => "string",
            ParamType::Text => "text",
            ParamType::Integer => "integer",
            ParamType::Number => "number",
            ParamType::Boolean => "boolean",
            ParamType::Date => "date",
            ParamType::Array => "array",
        };
        f.write_str(s)
    }
}

/// Params whose declared type is not in the catalogue, in insertion order.
pub fn unknown_params(params: &Params) -> Vec<(&str, &str)> {
    params
        .iter()
        .filter(|(_, kind)| ParamType::from_str_ci(kind).is_none())
        .collect()
}
