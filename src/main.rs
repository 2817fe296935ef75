use clap::{Parser, Subcommand};
use forum_reader::api::ApiClient;
use forum_reader::config::SiteConfig;
use forum_reader::links::Links;
use forum_reader::types::UserSort;
use forum_reader::{config, feed, pages, thread};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "forum-reader")]
#[command(about = "Standalone reader for GraphQL-backed discussion forums")]
#[command(long_about = "\
Standalone reader for GraphQL-backed discussion forums

Fetches posts, comments, and users from a forum's GraphQL endpoint and
renders self-contained documents to stdout, one document per invocation:

  forum-reader post t3kfqd4            # post + comment thread, HTML
  forum-reader feed some-username      # user activity feed, RSS 2.0
  forum-reader daily                   # recent posts listing, HTML
  forum-reader userlist --sort karma   # user table, HTML

Point the reader at a forum with config.toml (see 'forum-reader
gen-config'); without one, it reads the EA Forum.")]
#[command(version)]
struct Cli {
    /// Path to the site config file
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a post and its comment thread as an HTML page
    Post {
        /// Post identifier
        id: String,
    },
    /// Render a user's posts-and-comments activity as an RSS feed
    Feed {
        /// Username slug
        username: String,
    },
    /// Render the recent-posts listing as an HTML page
    Daily,
    /// Render the user table as an HTML page
    Userlist {
        /// Server-side sort key
        #[arg(long, value_enum, default_value_t = UserSort::Karma)]
        sort: UserSort,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let site = SiteConfig::load_or_default(&cli.config)?;

    match cli.command {
        Command::Post { id } => {
            let api = ApiClient::new(&site);
            let post = api.post(&id)?;
            let comments = api.comments_for_post(&id)?;
            let root = thread::build_thread(comments);
            print!("{}", pages::post_page(&post, &root, &site).into_string());
        }
        Command::Feed { username } => {
            let api = ApiClient::new(&site);
            let user_id = api.user_id(&username)?;
            let posts = api.posts_for_user(&user_id)?;
            let comments = api.comments_for_user(&user_id)?;
            print!("{}", feed::user_feed(&username, posts, comments, &site.title));
        }
        Command::Daily => {
            let api = ApiClient::new(&site);
            let posts = api.daily_posts()?;
            let links = Links::new(site.path_style);
            print!("{}", pages::daily_page(posts, &site, &links).into_string());
        }
        Command::Userlist { sort } => {
            let api = ApiClient::new(&site);
            let users = api.users_list(sort)?;
            let links = Links::new(site.path_style);
            print!("{}", pages::userlist_page(&users, &site, &links).into_string());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
