use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use spdlog::{info, warn};

use codebook::logger::configure_logger;
use codebook::sort::SortBy;
use codebook::text_utils::CODE_PREVIEW_LINES;

use crate::commands::*;
use crate::config::open_config;

mod commands;
mod config;
mod config_data;

const CFG_FILE_NAME: &str = "codebook.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Posts collection to use instead of the configured one
    #[arg(short, long, global = true)]
    posts_file: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search posts by text, tags and language
    Search(SearchArgs),
    /// Suggest tags matching a partial name
    Suggest(SuggestArgs),
    /// List the most used tags
    Tags(TagsArgs),
    /// List the languages posts are stored with
    Languages,
    /// Show a single post
    Show(ShowArgs),
    /// Show a tag from the catalog with its live usage count
    Tag(TagArgs),
    /// Show a user and the posts they wrote
    User(UserArgs),
    /// Most recent posts
    Latest(ListArgs),
    /// Most liked posts
    Trending(ListArgs),
    /// Detect the language of a source file
    Detect(DetectArgs),
    /// Normalize a language label
    Normalize(NormalizeArgs),
    /// Build a post from a source file and print it as JSON
    Publish(PublishArgs),
    /// Write a sample configuration
    Init(InitArgs),
}

#[derive(Parser, Debug)]
pub(crate) struct SearchArgs {
    /// Free text query
    #[arg(short, long)]
    pub query: Option<String>,

    /// Required tag, any of the given tags matches
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,

    /// Language filter
    #[arg(short, long)]
    pub language: Option<String>,

    /// Order used when there is no query
    #[arg(short, long)]
    pub sort: Option<SortBy>,

    /// Page to show, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Read all filters from a URL query string (q, tag, tags, language, sort, page)
    #[arg(short, long, conflicts_with_all = ["query", "tags", "language", "sort"])]
    pub url_query: Option<String>,

    /// Print the matching posts as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub(crate) struct SuggestArgs {
    /// Part of a tag name
    pub partial: String,

    #[arg(short, long)]
    pub limit: Option<usize>,
}

#[derive(Parser, Debug)]
pub(crate) struct TagsArgs {
    #[arg(short, long)]
    pub top: Option<usize>,
}

#[derive(Parser, Debug)]
pub(crate) struct ShowArgs {
    pub id: String,

    /// Code lines to print, 0 prints the whole file
    #[arg(short, long, default_value_t = CODE_PREVIEW_LINES)]
    pub lines: usize,
}

#[derive(Parser, Debug)]
pub(crate) struct TagArgs {
    /// Tag name, any case
    pub name: String,
}

#[derive(Parser, Debug)]
pub(crate) struct UserArgs {
    pub id: String,
}

#[derive(Parser, Debug)]
pub(crate) struct ListArgs {
    #[arg(short, long)]
    pub limit: Option<usize>,
}

#[derive(Parser, Debug)]
pub(crate) struct DetectArgs {
    /// Source file to read
    pub file: PathBuf,

    /// Filename to use instead of the file's own name
    #[arg(short, long)]
    pub name: Option<String>,
}

#[derive(Parser, Debug)]
pub(crate) struct NormalizeArgs {
    pub label: String,
}

#[derive(Parser, Debug)]
pub(crate) struct PublishArgs {
    /// Source file attached to the post
    #[arg(short, long)]
    pub file: PathBuf,

    #[arg(short, long)]
    pub title: String,

    #[arg(short, long)]
    pub description: String,

    /// Markdown file with the post body
    #[arg(long)]
    pub body: Option<PathBuf>,

    /// Tags, comma or space separated
    #[arg(long)]
    pub tags: String,

    #[arg(short, long, default_value = "user-001")]
    pub author: String,

    /// Language label, detected from the file when missing
    #[arg(short, long)]
    pub language: Option<String>,

    /// Keep the post as an unpublished draft
    #[arg(long)]
    pub draft: bool,
}

#[derive(Parser, Debug)]
pub(crate) struct InitArgs {
    /// Where to write the configuration. Defaults to the user config dir
    pub out: Option<PathBuf>,
}

/// Loads the configuration, logger and collections the post commands work on.
/// `--posts-file` alone is enough to run without a configuration.
fn open_context(config_path: Option<PathBuf>, posts_file: Option<PathBuf>) -> Result<Context> {
    let config = match open_config(config_path) {
        Ok(config) => Some(config),
        Err(err) if posts_file.is_some() => {
            warn!("{}. Using defaults", err);
            None
        }
        Err(err) => bail!("{}. Please run codebook --help", err),
    };

    if let Some(ref config) = config {
        if let Err(err) = configure_logger(config) {
            warn!("Error creating logger sinks. Using console instead. Desc={}", err);
        }
    }

    let ctx = Context::new(config, posts_file)?;
    info!("Using posts from {}", ctx.posts_file.display());
    Ok(ctx)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config_path.map(PathBuf::from);
    let posts_file = args.posts_file.map(PathBuf::from);

    match args.command {
        // Commands that do not touch the post collection run without a config
        Command::Detect(args) => detect_cmd(args),
        Command::Normalize(args) => normalize_cmd(args),
        Command::Publish(args) => publish_cmd(args),
        Command::Init(args) => init_cmd(args),

        Command::Search(args) => search_cmd(&open_context(config_path, posts_file)?, args),
        Command::Suggest(args) => suggest_cmd(&open_context(config_path, posts_file)?, args),
        Command::Tags(args) => tags_cmd(&open_context(config_path, posts_file)?, args),
        Command::Languages => languages_cmd(&open_context(config_path, posts_file)?),
        Command::Show(args) => show_cmd(&open_context(config_path, posts_file)?, args),
        Command::Tag(args) => tag_cmd(&open_context(config_path, posts_file)?, args),
        Command::User(args) => user_cmd(&open_context(config_path, posts_file)?, args),
        Command::Latest(args) => latest_cmd(&open_context(config_path, posts_file)?, args),
        Command::Trending(args) => trending_cmd(&open_context(config_path, posts_file)?, args),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_subcommands() {
        let args = Args::try_parse_from(["codebook", "detect", "main.rs", "--name", "main.py"]).unwrap();
        assert!(matches!(args.command, Command::Detect(DetectArgs { name: Some(ref n), .. }) if n == "main.py"));

        let args = Args::try_parse_from(["codebook", "-p", "posts.json", "tag", "Rust"]).unwrap();
        assert_eq!(args.posts_file.as_deref(), Some("posts.json"));
        assert!(matches!(args.command, Command::Tag(TagArgs { ref name }) if name == "Rust"));

        let args = Args::try_parse_from(["codebook", "show", "post-001"]).unwrap();
        assert!(matches!(args.command, Command::Show(ShowArgs { lines: CODE_PREVIEW_LINES, .. })));

        assert!(Args::try_parse_from(["codebook", "search", "-q", "x", "-u", "q=y"]).is_err());
    }
}
