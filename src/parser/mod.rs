//! Argument classification (model name vs positionals vs typed params).
//!
//! classify -> Classification { args, name, paths, params }
//! parse    -> classify + store under the descriptor path in `ParsedPrograms`
//! Token grammar: bare word (plain) or `key:type` split on the first colon.
//!
use serde::Serialize;
use serde::ser::SerializeMap;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;

pub mod param_type;

/* ---- Input ---- */

/// One program invocation: the invoked command path plus its raw tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramDescriptor {
    pub path: String,
    pub args: Vec<String>,
}

impl ProgramDescriptor {
    pub fn new<I, S>(path: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/* ---- Tokens ---- */

/// Classification of a single raw token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// No `:` separator. Model name if first, positional otherwise.
    Plain(&'a str),
    /// `key:type`. Everything after the first colon is the type, colons included.
    Param { key: &'a str, kind: &'a str },
}

impl<'a> Token<'a> {
    pub fn classify(raw: &'a str) -> Self {
        match raw.split_once(':') {
            Some((key, kind)) => Token::Param { key, kind },
            None => Token::Plain(raw),
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Plain(word) => write!(f, "plain({word:?})"),
            Token::Param { key, kind } => write!(f, "param({key:?} => {kind:?})"),
        }
    }
}

/* ---- Params ---- */

/// Insertion-ordered `name -> declared type` mapping.
///
/// Re-inserting an existing key replaces its type in place, so the entry keeps
/// its first-seen position while the last written type wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. Returns the previous type when the key existed.
    pub fn insert(&mut self, key: impl Into<String>, kind: impl Into<String>) -> Option<String> {
        let key = key.into();
        let kind = kind.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(&mut slot.1, kind));
        }
        self.entries.push((key, kind));
        None
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

impl Serialize for Params {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/* ---- Output ---- */

/// Result of classifying one descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Plain tokens after the model name, in input order.
    pub args: Vec<String>,
    /// First plain token, if any.
    pub name: Option<String>,
    /// Always exactly `[descriptor.path]`.
    pub paths: Vec<String>,
    pub params: Params,
}

impl Classification {
    /// Number of input tokens this result accounts for (duplicate param keys count once).
    pub fn token_count(&self) -> usize {
        usize::from(self.name.is_some()) + self.args.len() + self.params.len()
    }
}

/// Classifications keyed by the base path of the descriptor they came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParsedPrograms {
    entries: BTreeMap<String, Classification>,
}

impl ParsedPrograms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `result` under `path`, replacing any earlier classification.
    pub fn attach(&mut self, path: impl Into<String>, result: Classification) -> &Classification {
        match self.entries.entry(path.into()) {
            Entry::Occupied(mut slot) => {
                slot.insert(result);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(result),
        }
    }

    pub fn get(&self, path: &str) -> Option<&Classification> {
        self.entries.get(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

}

/* ---- Operations ---- */

/// Classify the tokens of `descriptor` in a single left-to-right pass.
///
/// - `key:type` tokens go to `params` (first colon splits, last duplicate wins)
/// - the first plain token becomes `name`
/// - later plain tokens go to `args`
///
/// Total over any input; an empty token is plain and `":"` is the param `"" => ""`.
pub fn classify(descriptor: &ProgramDescriptor) -> Classification {
    let mut name: Option<String> = None;
    let mut args = Vec::new();
    let mut params = Params::new();

    for raw in &descriptor.args {
        match Token::classify(raw) {
            Token::Param { key, kind } => {
                params.insert(key, kind);
            }
            Token::Plain(word) if name.is_none() => name = Some(word.to_string()),
            Token::Plain(word) => args.push(word.to_string()),
        }
    }

    Classification {
        args,
        name,
        paths: vec![descriptor.path.clone()],
        params,
    }
}

/// Classify `descriptor` and store the result in `programs` under `descriptor.path`.
pub fn parse<'p>(
    programs: &'p mut ParsedPrograms,
    descriptor: &ProgramDescriptor,
) -> &'p Classification {
    let result = classify(descriptor);
    programs.attach(descriptor.path.clone(), result)
}
