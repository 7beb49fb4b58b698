use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub content: String,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for a post insert, produced by the form layer.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub description: String,
    pub content: String,
}

/// Validated replacement values for an edit. All three fields are
/// overwritten in place; partial edits are not part of the form.
#[derive(Debug, Clone)]
pub struct PostPatch {
    pub title: String,
    pub description: String,
    pub content: String,
}
