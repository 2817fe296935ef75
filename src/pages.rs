//! HTML page assembly.
//!
//! Stage 4 of the render pipeline, for the HTML output format. Composes
//! rendered fragments with static chrome into complete documents:
//!
//! - **Post page**: title, byline, comment-count anchor, sanitized post
//!   body, then the rendered comment thread.
//! - **Daily page**: recent posts, newest first.
//! - **User-list page**: user table with sortable column headers.
//!
//! ## CSS
//!
//! Each page carries a single inline `<style>` block: the static
//! stylesheet embedded at compile time plus the color rules generated
//! from config. No external assets, so a saved page stays intact.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::config::{self, SiteConfig};
use crate::links::{LinkFormat, Links};
use crate::render::{self, author_name, clean_html_body};
use crate::thread::ThreadNode;
use crate::types::{PostRecord, UserRecord, UserSort};

const CSS_STATIC: &str = include_str!("../static/style.css");

/// The shared `<style>` block content for one site.
fn site_css(config: &SiteConfig) -> String {
    format!(
        "{}\n\n{}",
        config::generate_color_css(&config.colors),
        CSS_STATIC
    )
}

/// Renders the base HTML document structure.
fn base_document(title: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0, user-scalable=yes";
                title { (title) }
                style { (css) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders a post with its comment thread as a complete page.
pub fn post_page(post: &PostRecord, thread: &ThreadNode, config: &SiteConfig) -> Markup {
    let comment_count = post.comments_count;
    let content = html! {
        h1 { (post.title) }
        p.byline {
            "post by " b { (author_name(post.user.as_ref())) }
        }
        a href="#comments" { (comment_count) " comments" }
        (PreEscaped(clean_html_body(post.html_body.as_deref().unwrap_or_default())))
        h2 id="comments" { (comment_count) " comments" }
        (render::render_thread(thread, &config.colors.comment_band))
    };
    base_document(&post.title, &site_css(config), content)
}

/// Renders the recent-posts listing, newest first.
///
/// Sorting is stable, so posts sharing a timestamp keep fetch order.
pub fn daily_page(mut posts: Vec<PostRecord>, config: &SiteConfig, links: &Links) -> Markup {
    posts.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));
    let content = html! {
        h1 { (config.title) }
        @for post in &posts {
            div.post-entry {
                a href=(links.post(&post.id, post.slug.as_deref().unwrap_or_default(), LinkFormat::Html)) {
                    (post.title)
                }
                br;
                (author_name(post.user.as_ref())) ", score: " (post.base_score)
            }
        }
    };
    base_document(&config.title, &site_css(config), content)
}

/// Renders the user table. Column headers link to re-sorted views.
pub fn userlist_page(users: &[UserRecord], config: &SiteConfig, links: &Links) -> Markup {
    let content = html! {
        h1 { "Users" }
        table {
            tr {
                th { "Username" }
                th { "User ID" }
                th { a href=(links.userlist(Some(UserSort::Karma))) { "Karma" } }
                th { a href=(links.userlist(Some(UserSort::Posts))) { "Post count" } }
                th { a href=(links.userlist(Some(UserSort::Comments))) { "Comment count" } }
            }
            @for user in users {
                tr {
                    td {
                        @if let Some(slug) = &user.slug {
                            a href=(links.user(slug, LinkFormat::Html)) { (slug) }
                        } @else {
                            (render::DELETED_AUTHOR)
                        }
                    }
                    td { (user.id) }
                    td.numeric { (user.karma) }
                    td.numeric { (user.post_count) }
                    td.numeric { (user.comment_count) }
                }
            }
        }
    };
    base_document(&config.title, &site_css(config), content)
}
