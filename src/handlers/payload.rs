use std::fmt;

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

/// Parse a document identifier from its wire form; the message becomes the
/// 400 body when the identifier is malformed.
pub fn parse_id(raw: &str, message: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ApiError::invalid_identifier(message))
}

/// A free-text list field. Accepts either a JSON array of strings or a single
/// comma-separated string; elements are trimmed and empties dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringList(Vec<String>);

impl StringList {
    pub fn from_comma_separated(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(String::from)
                .collect(),
        )
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl<'de> Deserialize<'de> for StringList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StringListVisitor;

        impl<'de> Visitor<'de> for StringListVisitor {
            type Value = StringList;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or a sequence of strings")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(StringList::from_comma_separated(value))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut items = Vec::new();
                while let Some(item) = seq.next_element::<String>()? {
                    let item = item.trim();
                    if !item.is_empty() {
                        items.push(item.to_string());
                    }
                }
                Ok(StringList(items))
            }
        }

        deserializer.deserialize_any(StringListVisitor)
    }
}

/// A buffered file upload: raw bytes plus the declared MIME type.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}
