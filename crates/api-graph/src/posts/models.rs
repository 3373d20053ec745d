use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A `:POST` node joined with its author and the `:CREATED` edge.
///
/// Timestamps are epoch milliseconds as produced by Cypher `timestamp()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "author.id")]
    pub author_id: Option<String>,
    #[serde(rename = "author.name")]
    pub author_name: Option<String>,
    #[serde(rename = "author.email")]
    pub author_email: Option<String>,
    pub id: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub post_type: Option<String>,
    pub body: Option<String>,
    pub status: Option<String>,
    pub publish_date: Option<i64>,
    pub upvotes: Option<i64>,
    pub downvotes: Option<i64>,
    pub view_count: Option<i64>,
    pub create_time: Option<i64>,
    pub last_modified_date: Option<i64>,
}
