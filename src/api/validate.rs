//! Request validation for song create payloads
//!
//! Coerces wire-format JSON into a validated `NewSong`. Every offending
//! field is reported at once: the result of a failed parse is a mapping from
//! field name to human-readable messages, which becomes the 400 response
//! body verbatim.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::db::songs::NewSong;

/// Maximum length for every string field
const MAX_STRING_LEN: usize = 200;

/// The set of keys a create payload may carry
const KNOWN_FIELDS: [&str; 8] = [
    "title",
    "artist",
    "album",
    "release_date",
    "genre",
    "running_time",
    "likes",
    "dislikes",
];

/// Field-to-messages mapping collected during validation
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    fn push(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for a field, if any
    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

/// Validate a create payload and coerce it into a `NewSong`
///
/// `title`, `artist`, and `album` must be present and string-typed; the
/// remaining fields are optional with the stated types. Unknown keys are
/// rejected. `likes`/`dislikes` default to 0 when absent.
pub fn parse_new_song(value: &Value) -> Result<NewSong, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let Some(object) = value.as_object() else {
        errors.push("_schema", "Invalid input type.");
        return Err(errors);
    };

    for key in object.keys() {
        if !KNOWN_FIELDS.contains(&key.as_str()) {
            errors.push(key, "Unknown field.");
        }
    }

    let title = required_string(object, "title", &mut errors);
    let artist = required_string(object, "artist", &mut errors);
    let album = required_string(object, "album", &mut errors);
    let release_date = optional_date(object, "release_date", &mut errors);
    let genre = optional_string(object, "genre", &mut errors);
    let running_time = optional_seconds(object, "running_time", &mut errors);
    let likes = optional_integer(object, "likes", &mut errors).unwrap_or(0);
    let dislikes = optional_integer(object, "dislikes", &mut errors).unwrap_or(0);

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewSong {
        title: title.unwrap_or_default(),
        artist: artist.unwrap_or_default(),
        album: album.unwrap_or_default(),
        release_date,
        genre,
        running_time,
        likes,
        dislikes,
    })
}

fn checked_string(field: &str, s: &str, errors: &mut ValidationErrors) -> Option<String> {
    if s.chars().count() > MAX_STRING_LEN {
        errors.push(field, "Longer than maximum length 200.");
        None
    } else {
        Some(s.to_string())
    }
}

fn required_string(
    object: &Map<String, Value>,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match object.get(field) {
        None => {
            errors.push(field, "Missing data for required field.");
            None
        }
        Some(Value::Null) => {
            errors.push(field, "Field may not be null.");
            None
        }
        Some(Value::String(s)) => checked_string(field, s, errors),
        Some(_) => {
            errors.push(field, "Not a valid string.");
            None
        }
    }
}

fn optional_string(
    object: &Map<String, Value>,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match object.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => checked_string(field, s, errors),
        Some(_) => {
            errors.push(field, "Not a valid string.");
            None
        }
    }
}

fn optional_date(
    object: &Map<String, Value>,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<NaiveDate> {
    match object.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                errors.push(field, "Not a valid date.");
                None
            }
        },
        Some(_) => {
            errors.push(field, "Not a valid date.");
            None
        }
    }
}

fn optional_integer(
    object: &Map<String, Value>,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<i64> {
    match object.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => match n.as_i64() {
            Some(v) => Some(v),
            None => {
                errors.push(field, "Not a valid integer.");
                None
            }
        },
        Some(_) => {
            errors.push(field, "Not a valid integer.");
            None
        }
    }
}

fn optional_seconds(
    object: &Map<String, Value>,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<i64> {
    match optional_integer(object, field, errors) {
        Some(v) if v < 0 => {
            errors.push(field, "Must be greater than or equal to 0.");
            None
        }
        other => other,
    }
}
