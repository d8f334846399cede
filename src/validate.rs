use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    models::posts::{Attachment, Post, PostStatus},
    models::users::User,
    Result, ValidationError,
};

/// Checks an untyped record against the `User` contract and returns the
/// typed value, dropping any fields the contract does not declare.
pub fn validate_user(input: &Value) -> Result<User> {
    check_user(input, "").map_err(|err| {
        debug!("user validation failed: {err}");
        err
    })
}

/// Checks an untyped record against the `Post` contract, including the
/// embedded `author` and any `attachments` entries.
pub fn validate_post(input: &Value) -> Result<Post> {
    check_post(input, "").map_err(|err| {
        debug!("post validation failed: {err}");
        err
    })
}

pub fn validate_users(inputs: &[Value]) -> Result<Vec<User>> {
    inputs
        .iter()
        .enumerate()
        .map(|(index, input)| check_user(input, &format!("[{index}]")))
        .collect::<Result<Vec<_>>>()
        .map_err(|err| {
            debug!("user validation failed: {err}");
            err
        })
}

pub fn validate_posts(inputs: &[Value]) -> Result<Vec<Post>> {
    inputs
        .iter()
        .enumerate()
        .map(|(index, input)| check_post(input, &format!("[{index}]")))
        .collect::<Result<Vec<_>>>()
        .map_err(|err| {
            debug!("post validation failed: {err}");
            err
        })
}

// Fields are checked in contract declaration order, so the reported
// violation is always the first one.
fn check_user(input: &Value, prefix: &str) -> Result<User> {
    let fields = as_record(input, prefix)?;

    Ok(User {
        id: required_string(fields, prefix, "id")?,
        username: required_string(fields, prefix, "username")?,
        email: required_string(fields, prefix, "email")?,
        avatar: optional_string(fields, prefix, "avatar")?,
        created_at: required_string(fields, prefix, "createdAt")?,
    })
}

fn check_post(input: &Value, prefix: &str) -> Result<Post> {
    let fields = as_record(input, prefix)?;

    Ok(Post {
        id: required_string(fields, prefix, "id")?,
        content: required_string(fields, prefix, "content")?,
        author: check_user(
            required(fields, prefix, "author")?,
            &field_path(prefix, "author"),
        )?,
        images: optional_string_seq(fields, prefix, "images")?,
        youtube_url: optional_string(fields, prefix, "youtubeUrl")?,
        attachments: optional_attachments(fields, prefix, "attachments")?,
        likes: required_count(fields, prefix, "likes")?,
        comments: required_count(fields, prefix, "comments")?,
        shares: required_count(fields, prefix, "shares")?,
        is_liked: required_bool(fields, prefix, "isLiked")?,
        is_saved: required_bool(fields, prefix, "isSaved")?,
        created_at: required_string(fields, prefix, "createdAt")?,
        status: required_status(fields, prefix, "status")?,
        comments_enabled: required_bool(fields, prefix, "commentsEnabled")?,
        likes_visible: required_bool(fields, prefix, "likesVisible")?,
    })
}

fn as_record<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>> {
    match value.as_object() {
        Some(fields) => Ok(fields),
        // A non-record at the top level is a type error; nested it means
        // the embedded value itself is malformed.
        None if path.is_empty() => Err(ValidationError::mismatch(
            "$",
            "object",
            json_type_name(value),
        )),
        None => Err(ValidationError::malformed(path)),
    }
}

fn field_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

fn required<'a>(fields: &'a Map<String, Value>, prefix: &str, name: &str) -> Result<&'a Value> {
    fields
        .get(name)
        .ok_or_else(|| ValidationError::missing(field_path(prefix, name)))
}

fn required_string(fields: &Map<String, Value>, prefix: &str, name: &str) -> Result<String> {
    let value = required(fields, prefix, name)?;
    value.as_str().map(str::to_owned).ok_or_else(|| {
        ValidationError::mismatch(field_path(prefix, name), "string", json_type_name(value))
    })
}

// Explicit `null` counts as "not provided", matching how serde treats a
// missing `Option` field.
fn optional_string(
    fields: &Map<String, Value>,
    prefix: &str,
    name: &str,
) -> Result<Option<String>> {
    match fields.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value.as_str().map(|s| Some(s.to_owned())).ok_or_else(|| {
            ValidationError::mismatch(field_path(prefix, name), "string", json_type_name(value))
        }),
    }
}

fn required_bool(fields: &Map<String, Value>, prefix: &str, name: &str) -> Result<bool> {
    let value = required(fields, prefix, name)?;
    value.as_bool().ok_or_else(|| {
        ValidationError::mismatch(field_path(prefix, name), "boolean", json_type_name(value))
    })
}

fn required_count(fields: &Map<String, Value>, prefix: &str, name: &str) -> Result<u64> {
    let value = required(fields, prefix, name)?;
    match value {
        Value::Number(number) => {
            if let Some(count) = number.as_u64() {
                Ok(count)
            } else if number.as_i64().is_some() {
                Err(ValidationError::negative(field_path(prefix, name)))
            } else {
                // Floats are not valid counters.
                Err(ValidationError::mismatch(
                    field_path(prefix, name),
                    "integer",
                    "number",
                ))
            }
        }
        other => Err(ValidationError::mismatch(
            field_path(prefix, name),
            "integer",
            json_type_name(other),
        )),
    }
}

fn required_status(fields: &Map<String, Value>, prefix: &str, name: &str) -> Result<PostStatus> {
    let value = required(fields, prefix, name)?;
    let raw = value.as_str().ok_or_else(|| {
        ValidationError::mismatch(field_path(prefix, name), "string", json_type_name(value))
    })?;
    PostStatus::from_str(raw)
        .ok_or_else(|| ValidationError::invalid_enum(field_path(prefix, name), raw))
}

fn optional_string_seq(
    fields: &Map<String, Value>,
    prefix: &str,
    name: &str,
) -> Result<Option<Vec<String>>> {
    let value = match fields.get(name) {
        None | Some(Value::Null) => return Ok(None),
        Some(value) => value,
    };
    let items = value.as_array().ok_or_else(|| {
        ValidationError::mismatch(field_path(prefix, name), "array", json_type_name(value))
    })?;

    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let element_path = format!("{}[{index}]", field_path(prefix, name));
        let url = item.as_str().ok_or_else(|| {
            ValidationError::mismatch(element_path, "string", json_type_name(item))
        })?;
        out.push(url.to_owned());
    }
    Ok(Some(out))
}

fn optional_attachments(
    fields: &Map<String, Value>,
    prefix: &str,
    name: &str,
) -> Result<Option<Vec<Attachment>>> {
    let value = match fields.get(name) {
        None | Some(Value::Null) => return Ok(None),
        Some(value) => value,
    };
    let items = value.as_array().ok_or_else(|| {
        ValidationError::mismatch(field_path(prefix, name), "array", json_type_name(value))
    })?;

    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let element_path = format!("{}[{index}]", field_path(prefix, name));
        let entry = item
            .as_object()
            .ok_or_else(|| ValidationError::malformed(element_path.clone()))?;

        out.push(Attachment {
            name: required_string(entry, &element_path, "name")?,
            url: required_string(entry, &element_path, "url")?,
            kind: required_string(entry, &element_path, "type")?,
        });
    }
    Ok(Some(out))
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
