//! Record access.
//!
//! The indexer never looks inside a record on its own. It needs exactly two
//! things from one:
//!
//! - the value of the index's time field, through [`Record::field`];
//! - an `(id, text)` pair, through a [`FieldAccessor`] supplied per pass.
//!
//! Any closure `Fn(&R) -> Option<(String, String)>` is a field accessor, which
//! keeps ad-hoc extraction cheap:
//!
//! ```
//! use argent::record::{FieldAccessor, RecordFields};
//! use serde_json::json;
//!
//! let accessor = |r: &serde_json::Value| {
//!     let id = r.get("id")?.as_str()?.to_string();
//!     let text = r.get("caption").or_else(|| r.get("label"))?.as_str()?.to_string();
//!     Some((id, text))
//! };
//!
//! let record = json!({"id": "7", "label": "Harbour at dusk"});
//! let fields = accessor.access(&record).unwrap();
//! assert_eq!(fields, RecordFields::new("7", "Harbour at dusk"));
//! ```

use std::collections::HashMap;

use serde_json::Value;

use crate::error::{ArgentError, Result};

/// A record produced by a [`RecordSource`](crate::source::RecordSource).
pub trait Record {
    /// Read a named field as a string, if present.
    fn field(&self, name: &str) -> Option<String>;
}

impl Record for Value {
    fn field(&self, name: &str) -> Option<String> {
        match self.get(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

impl Record for HashMap<String, String> {
    fn field(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// The identifier and searchable text extracted from a record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordFields {
    /// Record identifier stored as the sorted-set member.
    pub id: String,
    /// Free text the index words are extracted from.
    pub text: String,
}

impl RecordFields {
    pub fn new<I: Into<String>, T: Into<String>>(id: I, text: T) -> Self {
        RecordFields {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Extracts `(id, text)` from a record.
///
/// Returning [`ArgentError::MissingAttribute`] skips just this record;
/// the pass goes on with the rest of the batch.
pub trait FieldAccessor<R> {
    fn access(&self, record: &R) -> Result<RecordFields>;
}

impl<R, F> FieldAccessor<R> for F
where
    F: Fn(&R) -> Option<(String, String)>,
{
    fn access(&self, record: &R) -> Result<RecordFields> {
        match self(record) {
            Some((id, text)) => Ok(RecordFields { id, text }),
            None => Err(ArgentError::missing_attribute(None, "accessor")),
        }
    }
}

/// A field accessor driven by field names.
///
/// The id comes from `id_field`; the text from the first of `text_fields`
/// that is present on the record, so `caption` can fall back to `label`.
#[derive(Clone, Debug)]
pub struct FieldNames {
    id_field: String,
    text_fields: Vec<String>,
}

impl FieldNames {
    /// Create an accessor reading `id_field` and a single text field.
    pub fn new<I: Into<String>, T: Into<String>>(id_field: I, text_field: T) -> Self {
        FieldNames {
            id_field: id_field.into(),
            text_fields: vec![text_field.into()],
        }
    }

    /// Add a fallback text field, tried when the earlier ones are absent.
    pub fn or_text_field<T: Into<String>>(mut self, text_field: T) -> Self {
        self.text_fields.push(text_field.into());
        self
    }

    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    pub fn text_fields(&self) -> &[String] {
        &self.text_fields
    }
}

impl<R: Record> FieldAccessor<R> for FieldNames {
    fn access(&self, record: &R) -> Result<RecordFields> {
        let id = record
            .field(&self.id_field)
            .ok_or_else(|| ArgentError::missing_attribute(None, self.id_field.clone()))?;

        let text = self
            .text_fields
            .iter()
            .find_map(|name| record.field(name))
            .ok_or_else(|| {
                ArgentError::missing_attribute(Some(id.clone()), self.text_fields.join("|"))
            })?;

        Ok(RecordFields { id, text })
    }
}
