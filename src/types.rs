//! Typed records decoded from the forum's GraphQL API.
//!
//! These types are shared across the pipeline stages (fetch → thread →
//! render → assemble) and mirror the field selections of the queries in
//! [`crate::api`]. The API serves camelCase field names; `_id` is the
//! forum's identifier field.
//!
//! Records are immutable once fetched: each render is a single pass over
//! one snapshot, and no identity survives across invocations.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A comment as returned by the `comments` queries.
///
/// `parent_comment_id` may name a comment that was never fetched — or never
/// existed. The API is known to serve such dangling references (deleted
/// parents keep their children), so resolution is the thread builder's
/// problem, not a decode error.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRecord {
    #[serde(rename = "_id")]
    pub id: String,
    /// Absent for top-level comments.
    #[serde(default)]
    pub parent_comment_id: Option<String>,
    /// `None` when the author deleted their account.
    #[serde(default)]
    pub user: Option<UserRef>,
    /// Raw HTML fragment, pre-sanitization.
    #[serde(default)]
    pub html_body: String,
    #[serde(default)]
    pub base_score: i64,
    #[serde(default)]
    pub vote_count: i64,
    pub posted_at: DateTime<Utc>,
    /// Canonical permalink on the upstream forum.
    #[serde(default)]
    pub page_url: String,
    /// Parent post, selected only by the per-user comments query.
    /// `None` there means the post was deleted.
    #[serde(default)]
    pub post: Option<PostRef>,
}

/// A post as returned by the `post`/`posts` queries.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub page_url: String,
    pub posted_at: DateTime<Utc>,
    #[serde(default)]
    pub base_score: i64,
    #[serde(default)]
    pub comments_count: i64,
    /// Not selected by the daily-listing query.
    #[serde(default)]
    pub html_body: Option<String>,
    #[serde(default)]
    pub user: Option<UserRef>,
}

/// A user row from the user-list query.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(rename = "_id")]
    pub id: String,
    /// `None` for deleted accounts.
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub karma: i64,
    #[serde(default)]
    pub post_count: i64,
    #[serde(default)]
    pub comment_count: i64,
}

/// Embedded author reference on posts and comments.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRef {
    pub username: String,
}

/// Embedded parent-post reference on per-user comments.
#[derive(Debug, Clone, Deserialize)]
pub struct PostRef {
    pub title: String,
}

/// Sort key for the user-list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum UserSort {
    Karma,
    Posts,
    Comments,
}

impl UserSort {
    /// The query-string value understood by the user-list page links.
    pub fn as_param(self) -> &'static str {
        match self {
            UserSort::Karma => "karma",
            UserSort::Posts => "postCount",
            UserSort::Comments => "commentCount",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_decodes_camel_case_fields() {
        let raw = r#"{
            "_id": "abc123",
            "parentCommentId": "def456",
            "user": {"username": "alice"},
            "htmlBody": "<p>hi</p>",
            "baseScore": 7,
            "voteCount": 3,
            "postedAt": "2019-09-17T13:42:59.028Z",
            "pageUrl": "https://forum.example/c/abc123"
        }"#;
        let comment: CommentRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(comment.id, "abc123");
        assert_eq!(comment.parent_comment_id.as_deref(), Some("def456"));
        assert_eq!(comment.user.unwrap().username, "alice");
        assert_eq!(comment.base_score, 7);
        assert_eq!(comment.vote_count, 3);
        assert!(comment.post.is_none());
    }

    #[test]
    fn comment_tolerates_deleted_author_and_missing_parent() {
        let raw = r#"{
            "_id": "abc123",
            "parentCommentId": null,
            "user": null,
            "htmlBody": "",
            "postedAt": "2020-01-01T00:00:00Z",
            "pageUrl": ""
        }"#;
        let comment: CommentRecord = serde_json::from_str(raw).unwrap();
        assert!(comment.user.is_none());
        assert!(comment.parent_comment_id.is_none());
        assert_eq!(comment.base_score, 0);
    }

    #[test]
    fn post_decodes_without_body() {
        // The daily-listing query does not select htmlBody.
        let raw = r#"{
            "_id": "p1",
            "title": "A post",
            "pageUrl": "https://forum.example/p/p1",
            "postedAt": "2021-06-01T12:00:00Z",
            "baseScore": 42,
            "user": {"username": "bob"}
        }"#;
        let post: PostRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(post.title, "A post");
        assert!(post.html_body.is_none());
        assert_eq!(post.comments_count, 0);
    }

    #[test]
    fn user_row_tolerates_null_slug() {
        let raw = r#"{"_id": "u1", "slug": null, "karma": 100, "postCount": 5, "commentCount": 50}"#;
        let user: UserRecord = serde_json::from_str(raw).unwrap();
        assert!(user.slug.is_none());
        assert_eq!(user.karma, 100);
        assert_eq!(user.comment_count, 50);
    }

    #[test]
    fn user_sort_params_match_api_field_names() {
        assert_eq!(UserSort::Karma.as_param(), "karma");
        assert_eq!(UserSort::Posts.as_param(), "postCount");
        assert_eq!(UserSort::Comments.as_param(), "commentCount");
    }
}
