use serde::Serialize;

/// Tag names are stored lowercased; lookups lowercase their input first.
#[derive(Debug, Clone, Serialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}
