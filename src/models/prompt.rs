use anyhow::{bail, Result};
use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

pub const ID_KEY: &str = "id";
pub const CREATED_AT_KEY: &str = "created_at";
pub const TITLE_KEY: &str = "title";
pub const CONTENT_KEY: &str = "content";
pub const TAGS_KEY: &str = "tags";

/// A stored prompt record.
///
/// Only `id`, `created_at` and `tags` are owned by the server; every other key
/// the client sends (`title`, `content`, `category`, ...) is carried through
/// untouched and in its original order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Prompt(Map<String, Value>);

impl Prompt {
    /// Wraps a decoded request body. Anything other than a JSON object is rejected.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => bail!(
                "prompt payload must be a JSON object, got {}",
                json_kind(&other)
            ),
        }
    }

    /// Assigns server-owned fields: a fresh id (replacing any client id), the
    /// creation timestamp, and normalized tags.
    pub fn stamp(&mut self) {
        self.0
            .insert(ID_KEY.to_string(), Value::String(Uuid::new_v4().to_string()));
        self.0.insert(
            CREATED_AT_KEY.to_string(),
            Value::String(iso_timestamp(Local::now().naive_local())),
        );
        match self.0.get_mut(TAGS_KEY) {
            Some(slot) => *slot = normalize_tags(Some(slot.take())),
            None => {
                self.0.insert(TAGS_KEY.to_string(), normalize_tags(None));
            }
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.str_field(ID_KEY)
    }

    pub fn created_at(&self) -> Option<&str> {
        self.str_field(CREATED_AT_KEY)
    }

    pub fn title(&self) -> Option<&str> {
        self.str_field(TITLE_KEY)
    }

    pub fn content(&self) -> Option<&str> {
        self.str_field(CONTENT_KEY)
    }

    /// String tags of the record. A missing or non-array `tags` yields nothing.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.0
            .get(TAGS_KEY)
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Case-insensitive substring test over title, content and tags.
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        let hit = |field: Option<&str>| field.unwrap_or_default().to_lowercase().contains(needle);
        hit(self.title())
            || hit(self.content())
            || self.tags().any(|tag| tag.to_lowercase().contains(needle))
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

#[cfg(test)]
impl From<Prompt> for Value {
    fn from(prompt: Prompt) -> Self {
        Value::Object(prompt.0)
    }
}

/// Applies the tag rules: absent becomes `[]`, a comma separated string is
/// split into trimmed non-empty pieces, anything else is kept verbatim.
pub fn normalize_tags(tags: Option<Value>) -> Value {
    match tags {
        None => Value::Array(Vec::new()),
        Some(Value::String(joined)) => Value::Array(
            joined
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(|tag| Value::String(tag.to_string()))
                .collect(),
        ),
        Some(other) => other,
    }
}

/// Formats a local time as `YYYY-MM-DDTHH:MM:SS[.ffffff]`, dropping the
/// fraction when it is zero microseconds.
pub fn iso_timestamp(at: NaiveDateTime) -> String {
    if at.nanosecond() / 1_000 == 0 {
        at.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
