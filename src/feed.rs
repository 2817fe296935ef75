//! RSS 2.0 feed assembly.
//!
//! Stage 4 of the render pipeline, for the feed output format. A user's
//! feed is their posts and comments merged into one reverse-chronological
//! sequence, one `<item>` per record.
//!
//! ## Escaping Discipline
//!
//! The feed is XML, so it cannot lean on maud's HTML auto-escaping.
//! Instead [`FeedBuilder`] is the single place where values meet markup:
//! titles, descriptions, and authors pass through
//! [`render::escape_text`](crate::render::escape_text) at exactly that
//! point, while links, guids, and dates are embedded verbatim. Callers
//! hand the builder raw values and never pre-escape.

use crate::render::{author_name, clean_html_body, escape_text};
use crate::types::{CommentRecord, PostRecord};

/// Placeholder title for comments whose parent post was deleted.
const DELETED_POST: &str = "[deleted post]";

/// One feed entry. All fields are raw; escaping is the builder's job.
#[derive(Debug, Clone)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub description: String,
    pub author: String,
    pub guid: String,
    /// RFC 2822, as RSS requires.
    pub pub_date: String,
}

/// Assembles an RSS 2.0 document.
///
/// Fluent use:
///
/// ```
/// use forum_reader::feed::{FeedBuilder, FeedItem};
///
/// let rss = FeedBuilder::new("alice feed", "alice's posts and comments")
///     .item(FeedItem {
///         title: "Hello".into(),
///         link: "https://forum.example/p/1".into(),
///         description: "<p>hi</p>".into(),
///         author: "alice".into(),
///         guid: "p1".into(),
///         pub_date: "Mon, 01 Jun 2020 12:00:00 +0000".into(),
///     })
///     .build();
/// assert!(rss.contains("<rss version=\"2.0\">"));
/// ```
#[derive(Debug, Clone)]
pub struct FeedBuilder {
    title: String,
    description: String,
    language: String,
    items: Vec<FeedItem>,
}

impl FeedBuilder {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            language: "en-us".to_string(),
            items: Vec::new(),
        }
    }

    /// Override the channel language.
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Append an entry. Order of calls is document order.
    pub fn item(mut self, item: FeedItem) -> Self {
        self.items.push(item);
        self
    }

    /// Serialize the document.
    pub fn build(&self) -> String {
        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        out.push_str("<rss version=\"2.0\">\n");
        out.push_str("<channel>\n");
        out.push_str(&format!("<title>{}</title>\n", escape_text(&self.title)));
        out.push_str(&format!(
            "<description>{}</description>\n",
            escape_text(&self.description)
        ));
        out.push_str(&format!("<language>{}</language>\n", self.language));
        for item in &self.items {
            out.push_str("<item>\n");
            out.push_str(&format!("    <title>{}</title>\n", escape_text(&item.title)));
            out.push_str(&format!("    <link>{}</link>\n", item.link));
            out.push_str(&format!(
                "    <description>{}</description>\n",
                escape_text(&item.description)
            ));
            out.push_str(&format!("    <author>{}</author>\n", escape_text(&item.author)));
            out.push_str(&format!("    <guid>{}</guid>\n", item.guid));
            out.push_str(&format!("    <pubDate>{}</pubDate>\n", item.pub_date));
            out.push_str("</item>\n");
        }
        out.push_str("</channel>\n");
        out.push_str("</rss>\n");
        out
    }
}

/// Build a user's activity feed from their fetched posts and comments.
///
/// Entries are merged (comments first, then posts) and stable-sorted by
/// timestamp descending, so records sharing a timestamp keep that merge
/// order. Comment entries are titled after their parent post, with the
/// deleted-post placeholder when the post is gone.
pub fn user_feed(
    username: &str,
    posts: Vec<PostRecord>,
    comments: Vec<CommentRecord>,
    site_title: &str,
) -> String {
    let mut activity: Vec<Activity> = comments
        .into_iter()
        .map(Activity::Comment)
        .chain(posts.into_iter().map(Activity::Post))
        .collect();
    activity.sort_by(|a, b| b.posted_at().cmp(a.posted_at()));

    let mut builder = FeedBuilder::new(
        format!("{username} feed - {site_title}"),
        format!("{username}'s posts and comments on {site_title}"),
    );
    for entry in activity {
        builder = builder.item(match entry {
            Activity::Post(post) => FeedItem {
                title: post.title,
                link: post.page_url,
                description: clean_html_body(post.html_body.as_deref().unwrap_or_default()),
                author: username.to_string(),
                guid: post.id,
                pub_date: post.posted_at.to_rfc2822(),
            },
            Activity::Comment(comment) => {
                let post_title = comment
                    .post
                    .as_ref()
                    .map(|post| post.title.as_str())
                    .unwrap_or(DELETED_POST);
                let title = format!(
                    "Comment by {} on {}",
                    author_name(comment.user.as_ref()),
                    post_title
                );
                FeedItem {
                    title,
                    link: comment.page_url,
                    description: clean_html_body(&comment.html_body),
                    author: username.to_string(),
                    guid: comment.id,
                    pub_date: comment.posted_at.to_rfc2822(),
                }
            }
        });
    }
    builder.build()
}

enum Activity {
    Post(PostRecord),
    Comment(CommentRecord),
}

impl Activity {
    fn posted_at(&self) -> &chrono::DateTime<chrono::Utc> {
        match self {
            Activity::Post(post) => &post.posted_at,
            Activity::Comment(comment) => &comment.posted_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PostRef, UserRef};
    use chrono::{TimeZone, Utc};

    fn post(id: &str, title: &str, hour: u32) -> PostRecord {
        PostRecord {
            id: id.to_string(),
            title: title.to_string(),
            slug: None,
            page_url: format!("https://forum.example/p/{id}"),
            posted_at: Utc.with_ymd_and_hms(2020, 6, 1, hour, 0, 0).unwrap(),
            base_score: 10,
            comments_count: 0,
            html_body: Some("<p>post body</p>".to_string()),
            user: None,
        }
    }

    fn comment(id: &str, post_title: Option<&str>, hour: u32) -> CommentRecord {
        CommentRecord {
            id: id.to_string(),
            parent_comment_id: None,
            user: Some(UserRef {
                username: "alice".to_string(),
            }),
            html_body: "<p>comment body</p>".to_string(),
            base_score: 1,
            vote_count: 1,
            posted_at: Utc.with_ymd_and_hms(2020, 6, 1, hour, 0, 0).unwrap(),
            page_url: format!("https://forum.example/c/{id}"),
            post: post_title.map(|title| PostRef {
                title: title.to_string(),
            }),
        }
    }

    #[test]
    fn newer_post_precedes_older_comment() {
        // Post at noon, comment three hours earlier.
        let rss = user_feed(
            "alice",
            vec![post("p1", "A post", 12)],
            vec![comment("c1", Some("Other post"), 9)],
            "Test Forum",
        );
        let post_pos = rss.find("<guid>p1</guid>").unwrap();
        let comment_pos = rss.find("<guid>c1</guid>").unwrap();
        assert!(post_pos < comment_pos);
    }

    #[test]
    fn equal_timestamps_keep_merge_order() {
        // Comments are merged ahead of posts; a stable sort preserves that
        // for ties.
        let rss = user_feed(
            "alice",
            vec![post("p1", "A post", 12)],
            vec![comment("c1", Some("Other"), 12)],
            "Test Forum",
        );
        let comment_pos = rss.find("<guid>c1</guid>").unwrap();
        let post_pos = rss.find("<guid>p1</guid>").unwrap();
        assert!(comment_pos < post_pos);
    }

    #[test]
    fn channel_metadata_names_user_and_site() {
        let rss = user_feed("alice", vec![], vec![], "Test Forum");
        assert!(rss.contains("<title>alice feed - Test Forum</title>"));
        assert!(rss.contains("<description>alice's posts and comments on Test Forum</description>"));
        assert!(rss.contains("<language>en-us</language>"));
    }

    #[test]
    fn comment_items_are_titled_after_their_post() {
        let rss = user_feed(
            "alice",
            vec![],
            vec![comment("c1", Some("The parent post"), 9)],
            "Test Forum",
        );
        assert!(rss.contains("<title>Comment by alice on The parent post</title>"));
    }

    #[test]
    fn deleted_post_and_author_get_placeholders() {
        let mut orphan = comment("c1", None, 9);
        orphan.user = None;
        let rss = user_feed("alice", vec![], vec![orphan], "Test Forum");
        assert!(rss.contains("<title>Comment by [deleted] on [deleted post]</title>"));
    }

    #[test]
    fn pub_date_is_rfc_2822() {
        let rss = user_feed("alice", vec![post("p1", "A post", 12)], vec![], "Test Forum");
        assert!(rss.contains("<pubDate>Mon, "));
        assert!(rss.contains("Jun 2020 12:00:00 +0000</pubDate>"));
    }

    #[test]
    fn titles_and_descriptions_are_escaped_links_are_not() {
        let mut spiky = post("p1", "Q&A <live>", 12);
        spiky.page_url = "https://forum.example/p/p1?a=1&b=2".to_string();
        spiky.html_body = Some("<p>1 & 2</p>".to_string());
        let rss = user_feed("alice", vec![spiky], vec![], "Test Forum");
        assert!(rss.contains("<title>Q&amp;A &lt;live&gt;</title>"));
        assert!(rss.contains("<description>&lt;p&gt;1 &amp; 2&lt;/p&gt;</description>"));
        assert!(rss.contains("<link>https://forum.example/p/p1?a=1&b=2</link>"));
    }

    #[test]
    fn body_wrapper_tags_are_cleaned_before_escaping() {
        let mut wrapped = post("p1", "A post", 12);
        wrapped.html_body = Some("<html><body><p>x</p></body></html>".to_string());
        let rss = user_feed("alice", vec![wrapped], vec![], "Test Forum");
        assert!(rss.contains("<description>&lt;p&gt;x&lt;/p&gt;</description>"));
    }

    #[test]
    fn builder_emits_channel_skeleton() {
        let rss = FeedBuilder::new("t", "d").build();
        assert!(rss.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(rss.contains("<rss version=\"2.0\">"));
        assert!(rss.contains("<language>en-us</language>"));
        assert!(rss.trim_end().ends_with("</rss>"));
        assert!(!rss.contains("<item>"));
    }

    #[test]
    fn builder_language_override() {
        let rss = FeedBuilder::new("t", "d").language("de-de").build();
        assert!(rss.contains("<language>de-de</language>"));
    }
}
