//! GraphQL fetching.
//!
//! Stage 1 of the render pipeline. Builds the forum's GraphQL query
//! documents, sends them as a `query` URL parameter over a blocking HTTP
//! client, and decodes the response envelopes into the typed records in
//! [`crate::types`].
//!
//! ## Failure Semantics
//!
//! Any transport or decode failure aborts the current render — there are
//! no retries and no partial pages. A null single-object result (unknown
//! post id, unknown username) maps to [`ApiError::NotFound`]. Dangling
//! parent references inside an otherwise successful comments fetch are
//! NOT errors; the thread builder owns that policy.
//!
//! ## Query Construction
//!
//! The query builders are pure string functions mirroring the forum's
//! view names (`daily`, `postCommentsTop`, `userComments`, `userPosts`,
//! `LWUsersAdmin`), so they can be unit-tested without a network.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::SiteConfig;
use crate::types::{CommentRecord, PostRecord, UserRecord, UserSort};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed API response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("not found: {0}")]
    NotFound(String),
}

/// Blocking client bound to one GraphQL endpoint.
pub struct ApiClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    page_size: u32,
    userlist_size: u32,
}

impl ApiClient {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            endpoint: config.graphql_url.clone(),
            page_size: config.limits.page_size,
            userlist_size: config.limits.userlist_size,
        }
    }

    /// Send a query document and decode the `data` envelope.
    fn send<T: DeserializeOwned>(&self, query: &str) -> Result<T, ApiError> {
        let body = self
            .http
            .get(&self.endpoint)
            .query(&[("query", query)])
            .send()?
            .error_for_status()?
            .text()?;
        let envelope: Envelope<T> = serde_json::from_str(&body)?;
        Ok(envelope.data)
    }

    /// All comments of a post, flat and unordered.
    pub fn comments_for_post(&self, post_id: &str) -> Result<Vec<CommentRecord>, ApiError> {
        let data: CommentsData = self.send(&post_comments_query(post_id))?;
        Ok(data.comments.results)
    }

    /// A single post, with body.
    pub fn post(&self, post_id: &str) -> Result<PostRecord, ApiError> {
        let data: PostData = self.send(&post_query(post_id))?;
        data.post
            .result
            .ok_or_else(|| ApiError::NotFound(format!("post {post_id}")))
    }

    /// The most recently posted posts, one fetch page.
    pub fn daily_posts(&self) -> Result<Vec<PostRecord>, ApiError> {
        let data: PostsData = self.send(&daily_posts_query(self.page_size))?;
        Ok(data.posts.results)
    }

    /// Resolve a username slug to the user's id.
    pub fn user_id(&self, username: &str) -> Result<String, ApiError> {
        let data: UserData = self.send(&user_by_slug_query(username))?;
        data.user
            .result
            .map(|user| user.id)
            .ok_or_else(|| ApiError::NotFound(format!("user {username}")))
    }

    /// A user's most recent posts, one fetch page.
    pub fn posts_for_user(&self, user_id: &str) -> Result<Vec<PostRecord>, ApiError> {
        let data: PostsData = self.send(&user_posts_query(user_id, self.page_size))?;
        Ok(data.posts.results)
    }

    /// A user's most recent comments, one fetch page.
    pub fn comments_for_user(&self, user_id: &str) -> Result<Vec<CommentRecord>, ApiError> {
        let data: CommentsData = self.send(&user_comments_query(user_id, self.page_size))?;
        Ok(data.comments.results)
    }

    /// The user table, sorted server-side.
    pub fn users_list(&self, sort: UserSort) -> Result<Vec<UserRecord>, ApiError> {
        let data: UsersData = self.send(&users_list_query(sort, self.userlist_size))?;
        Ok(data.users.results)
    }
}

// ============================================================================
// Response envelopes
// ============================================================================

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct Results<T> {
    results: Vec<T>,
}

#[derive(Deserialize)]
struct SingleResult<T> {
    result: Option<T>,
}

#[derive(Deserialize)]
struct CommentsData {
    comments: Results<CommentRecord>,
}

#[derive(Deserialize)]
struct PostsData {
    posts: Results<PostRecord>,
}

#[derive(Deserialize)]
struct PostData {
    post: SingleResult<PostRecord>,
}

#[derive(Deserialize)]
struct UsersData {
    users: Results<UserRecord>,
}

#[derive(Deserialize)]
struct UserData {
    user: SingleResult<UserId>,
}

#[derive(Deserialize)]
struct UserId {
    #[serde(rename = "_id")]
    id: String,
}

// ============================================================================
// Query documents
// ============================================================================

fn post_comments_query(post_id: &str) -> String {
    format!(
        r#"{{
  comments(input: {{
    terms: {{
      view: "postCommentsTop",
      postId: "{post_id}",
    }}
  }}) {{
    results {{
      _id
      user {{
        username
      }}
      parentCommentId
      pageUrl
      htmlBody
      baseScore
      voteCount
      postedAt
    }}
  }}
}}"#
    )
}

fn post_query(post_id: &str) -> String {
    format!(
        r#"{{
  post(input: {{
    selector: {{
      _id: "{post_id}"
    }}
  }}) {{
    result {{
      _id
      postedAt
      title
      slug
      pageUrl
      commentsCount
      htmlBody
      baseScore
      user {{
        username
      }}
    }}
  }}
}}"#
    )
}

fn daily_posts_query(limit: u32) -> String {
    format!(
        r#"{{
  posts(input: {{
    terms: {{
      view: "daily"
      limit: {limit}
    }}
  }}) {{
    results {{
      _id
      title
      slug
      pageUrl
      postedAt
      baseScore
      user {{
        username
      }}
    }}
  }}
}}"#
    )
}

fn user_by_slug_query(username: &str) -> String {
    format!(
        r#"{{
  user(input: {{selector: {{slug: "{username}"}}}}) {{
    result {{
      _id
    }}
  }}
}}"#
    )
}

fn user_comments_query(user_id: &str, limit: u32) -> String {
    format!(
        r#"{{
  comments(input: {{
    terms: {{
      view: "userComments",
      userId: "{user_id}",
      limit: {limit},
    }}
  }}) {{
    results {{
      _id
      post {{
        title
      }}
      user {{
        username
      }}
      pageUrl
      htmlBody
      baseScore
      voteCount
      postedAt
    }}
  }}
}}"#
    )
}

fn user_posts_query(user_id: &str, limit: u32) -> String {
    format!(
        r#"{{
  posts(input: {{
    terms: {{
      view: "userPosts"
      userId: "{user_id}"
      limit: {limit}
    }}
  }}) {{
    results {{
      _id
      title
      slug
      pageUrl
      postedAt
      htmlBody
    }}
  }}
}}"#
    )
}

fn users_list_query(sort: UserSort, limit: u32) -> String {
    let sort_line = match sort {
        UserSort::Karma => "sort: {karma: -1}",
        UserSort::Posts => "sort: {postCount: -1}",
        UserSort::Comments => "sort: {commentCount: -1}",
    };
    format!(
        r#"{{
  users(input: {{
    terms: {{
      view: "LWUsersAdmin"
      limit: {limit}
      {sort_line}
    }}
  }}) {{
    results {{
      _id
      slug
      karma
      postCount
      commentCount
    }}
  }}
}}"#
    )
}
