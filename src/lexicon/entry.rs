use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One `lexicon.txt` line. Entries order by word, then pronunciation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub word: String,
    pub pronunciation: String,
}

impl LexiconEntry {
    pub fn new(word: impl Into<String>, pronunciation: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            pronunciation: pronunciation.into(),
        }
    }

    pub fn to_line(&self) -> String {
        format!("{} {}", self.word, self.pronunciation)
    }
}

/// The pronunciation side of a word mapping: one phone string or several variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pronunciation {
    Single(String),
    Variants(Vec<String>),
}

impl Pronunciation {
    /// Accept a JSON string or an array of strings; reject anything else
    /// with the offending value and its JSON type.
    pub fn from_value(word: &str, value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(Pronunciation::Single(s.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(invalid(word, other)),
                })
                .collect::<Result<Vec<_>>>()
                .map(Pronunciation::Variants),
            other => Err(invalid(word, other)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let variants: &[String] = match self {
            Pronunciation::Single(s) => std::slice::from_ref(s),
            Pronunciation::Variants(v) => v.as_slice(),
        };
        variants.iter().map(String::as_str)
    }
}

impl From<&str> for Pronunciation {
    fn from(s: &str) -> Self {
        Pronunciation::Single(s.to_string())
    }
}

impl From<String> for Pronunciation {
    fn from(s: String) -> Self {
        Pronunciation::Single(s)
    }
}

impl From<Vec<String>> for Pronunciation {
    fn from(v: Vec<String>) -> Self {
        Pronunciation::Variants(v)
    }
}

impl From<Vec<&str>> for Pronunciation {
    fn from(v: Vec<&str>) -> Self {
        Pronunciation::Variants(v.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Pronunciation {
    fn from(v: [&str; N]) -> Self {
        Pronunciation::Variants(v.iter().map(|s| s.to_string()).collect())
    }
}

fn invalid(word: &str, value: &Value) -> Error {
    Error::Pronunciation {
        word: word.to_string(),
        value: value.to_string(),
        type_name: json_type_name(value),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
