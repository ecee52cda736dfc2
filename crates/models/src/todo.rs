use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::errors::ModelError;

pub const TITLE_REQUIRED: &str = "title is required";

/// A single todo item as persisted and as returned over HTTP.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub done: bool,
    /// ISO-8601 UTC timestamp, fixed at creation.
    pub created_at: String,
}

impl Todo {
    /// Fresh, not-done item whose id is `now` in epoch milliseconds.
    pub fn new(title: String, now: DateTime<Utc>) -> Self {
        Self {
            id: now.timestamp_millis(),
            title,
            done: false,
            created_at: format_timestamp(now),
        }
    }
}

/// `2024-05-01T12:00:00.000Z`
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Strips Unicode whitespace and the byte-order mark U+FEFF from both ends.
pub fn trim_title(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Body of a create request. Wrong-typed `title` is treated as absent.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct CreateTodo {
    #[serde(default, deserialize_with = "string_or_absent")]
    pub title: Option<String>,
}

impl CreateTodo {
    pub fn validated_title(&self) -> Result<String, ModelError> {
        match self.title.as_deref().map(trim_title) {
            Some(t) if !t.is_empty() => Ok(t.to_string()),
            _ => Err(ModelError::Validation(TITLE_REQUIRED.into())),
        }
    }
}

/// Body of an update request. Absent or wrong-typed fields leave the item unchanged.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct UpdateTodo {
    #[serde(default, deserialize_with = "string_or_absent")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "bool_or_absent")]
    pub done: Option<bool>,
}

impl UpdateTodo {
    /// Title is trimmed but may end up empty; `id` and `created_at` are never touched.
    pub fn apply(&self, todo: &mut Todo) {
        if let Some(title) = &self.title {
            todo.title = trim_title(title).to_string();
        }
        if let Some(done) = self.done {
            todo.done = done;
        }
    }
}

fn string_or_absent<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn bool_or_absent<'de, D>(de: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        Value::Bool(b) => Some(b),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn sample() -> Todo {
        Todo {
            id: 1,
            title: "Buy milk".into(),
            done: false,
            created_at: "2024-05-01T12:00:00.000Z".into(),
        }
    }

    #[test]
    fn new_todo_uses_millis_and_iso_timestamp() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let todo = Todo::new("x".into(), now);
        assert_eq!(todo.id, 1_714_564_800_000);
        assert_eq!(todo.created_at, "2024-05-01T12:00:00.000Z");
        assert!(!todo.done);
    }

    #[test]
    fn serialized_shape_matches_wire_format() {
        let v = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            v,
            json!({"id": 1, "title": "Buy milk", "done": false, "created_at": "2024-05-01T12:00:00.000Z"})
        );
    }

    #[test]
    fn create_title_is_trimmed() {
        let body: CreateTodo = serde_json::from_value(json!({"title": "  Buy milk "})).unwrap();
        assert_eq!(body.validated_title().unwrap(), "Buy milk");
    }

    #[test]
    fn create_rejects_missing_blank_and_wrong_typed_title() {
        let bodies = [
            json!({}),
            json!({"title": ""}),
            json!({"title": "   "}),
            json!({"title": 42}),
            json!({"title": null}),
        ];
        for v in bodies {
            let body: CreateTodo = serde_json::from_value(v.clone()).unwrap();
            assert_eq!(
                body.validated_title(),
                Err(ModelError::Validation(TITLE_REQUIRED.into())),
                "body {v}"
            );
        }
    }

    #[test]
    fn byte_order_mark_counts_as_blank() {
        let body: CreateTodo = serde_json::from_value(json!({"title": "\u{feff}"})).unwrap();
        assert_eq!(body.validated_title(), Err(ModelError::Validation(TITLE_REQUIRED.into())));

        let body: CreateTodo = serde_json::from_value(json!({"title": "\u{feff} tea \u{a0}"})).unwrap();
        assert_eq!(body.validated_title().unwrap(), "tea");

        let mut todo = sample();
        UpdateTodo { title: Some("\u{feff}".into()), done: None }.apply(&mut todo);
        assert_eq!(todo.title, "");
    }

    #[test]
    fn update_ignores_wrong_typed_and_unknown_fields() {
        let body: UpdateTodo =
            serde_json::from_value(json!({"title": 7, "done": "yes", "id": 99, "extra": true})).unwrap();
        assert_eq!(body, UpdateTodo::default());

        let mut todo = sample();
        body.apply(&mut todo);
        assert_eq!(todo, sample());
    }

    #[test]
    fn update_done_only_leaves_other_fields() {
        let body: UpdateTodo = serde_json::from_value(json!({"done": true})).unwrap();
        let mut todo = sample();
        body.apply(&mut todo);
        assert!(todo.done);
        assert_eq!(todo.title, "Buy milk");
        assert_eq!(todo.id, 1);
        assert_eq!(todo.created_at, "2024-05-01T12:00:00.000Z");
    }

    #[test]
    fn update_title_trims_without_rejecting_empty() {
        let body: UpdateTodo = serde_json::from_value(json!({"title": "   "})).unwrap();
        let mut todo = sample();
        body.apply(&mut todo);
        assert_eq!(todo.title, "");
    }
}
