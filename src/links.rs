//! URL formatting for generated pages.
//!
//! Pages link to each other in one of two addressing styles, selected by
//! configuration when the [`Links`] formatter is constructed — never at
//! request time, and never through process-wide state:
//!
//! - [`PathStyle::Localhost`]: relative, query-string addressed
//!   (`./posts?id=<id>`), for running the reader next to its output
//!   during development.
//! - [`PathStyle::Official`]: the forum's canonical paths
//!   (`/posts/<id>/<slug>`), for deploying behind the real routes.
//!
//! All functions are pure and return raw URLs; HTML-escaping happens when
//! maud embeds them.

use serde::{Deserialize, Serialize};

use crate::types::UserSort;

/// Addressing style for generated links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathStyle {
    Localhost,
    Official,
}

/// Output format a link should request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkFormat {
    Html,
    Rss,
}

impl LinkFormat {
    fn as_param(self) -> &'static str {
        match self {
            LinkFormat::Html => "html",
            LinkFormat::Rss => "rss",
        }
    }
}

/// Link formatter bound to one [`PathStyle`].
#[derive(Debug, Clone, Copy)]
pub struct Links {
    style: PathStyle,
}

impl Links {
    pub fn new(style: PathStyle) -> Self {
        Self { style }
    }

    /// URL of a post page. The slug only appears in official paths.
    pub fn post(&self, post_id: &str, slug: &str, format: LinkFormat) -> String {
        match (self.style, format) {
            (PathStyle::Localhost, LinkFormat::Html) => format!("./posts?id={post_id}"),
            (PathStyle::Localhost, format) => {
                format!("./posts?id={post_id}&format={}", format.as_param())
            }
            (PathStyle::Official, LinkFormat::Html) => format!("/posts/{post_id}/{slug}"),
            (PathStyle::Official, format) => {
                format!("/posts/{post_id}/{slug}?format={}", format.as_param())
            }
        }
    }

    /// URL of a user page (or their feed, with [`LinkFormat::Rss`]).
    pub fn user(&self, user_slug: &str, format: LinkFormat) -> String {
        match (self.style, format) {
            (PathStyle::Localhost, LinkFormat::Html) => format!("./users?id={user_slug}"),
            (PathStyle::Localhost, format) => {
                format!("./users?id={user_slug}&format={}", format.as_param())
            }
            (PathStyle::Official, LinkFormat::Html) => format!("/users/{user_slug}"),
            (PathStyle::Official, format) => {
                format!("/users/{user_slug}?format={}", format.as_param())
            }
        }
    }

    /// URL of the user-list page, optionally re-sorted.
    pub fn userlist(&self, sort: Option<UserSort>) -> String {
        let base = match self.style {
            PathStyle::Localhost => "./userlist",
            PathStyle::Official => "/userlist",
        };
        match sort {
            Some(sort) => format!("{base}?sort={}", sort.as_param()),
            None => base.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localhost_post_links() {
        let links = Links::new(PathStyle::Localhost);
        assert_eq!(links.post("abc", "ignored-slug", LinkFormat::Html), "./posts?id=abc");
        assert_eq!(
            links.post("abc", "ignored-slug", LinkFormat::Rss),
            "./posts?id=abc&format=rss"
        );
    }

    #[test]
    fn official_post_links_carry_slug() {
        let links = Links::new(PathStyle::Official);
        assert_eq!(links.post("abc", "my-post", LinkFormat::Html), "/posts/abc/my-post");
        assert_eq!(
            links.post("abc", "my-post", LinkFormat::Rss),
            "/posts/abc/my-post?format=rss"
        );
    }

    #[test]
    fn user_links_in_both_styles() {
        assert_eq!(
            Links::new(PathStyle::Localhost).user("alice", LinkFormat::Html),
            "./users?id=alice"
        );
        assert_eq!(
            Links::new(PathStyle::Official).user("alice", LinkFormat::Rss),
            "/users/alice?format=rss"
        );
    }

    #[test]
    fn userlist_links_with_and_without_sort() {
        let links = Links::new(PathStyle::Localhost);
        assert_eq!(links.userlist(None), "./userlist");
        assert_eq!(links.userlist(Some(UserSort::Posts)), "./userlist?sort=postCount");
        assert_eq!(
            Links::new(PathStyle::Official).userlist(Some(UserSort::Karma)),
            "/userlist?sort=karma"
        );
    }
}
