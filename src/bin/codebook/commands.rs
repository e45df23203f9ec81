use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context as _, Result};
use chrono::Utc;

use codebook::catalog::{TagCatalog, UserDirectory};
use codebook::config::{Config, Search};
use codebook::draft::{DraftSource, PostDraft};
use codebook::language::detection::{detect, Evidence};
use codebook::language::normalize_language_name;
use codebook::paginator::Paginator;
use codebook::post::Post;
use codebook::post_store::PostStore;
use codebook::query_string::{split_tags, QueryString};
use codebook::search::{search_posts, SearchFilters};
use codebook::tag_stats::{popular_tags, search_tag_suggestions, TagStats};
use codebook::text_utils::{format_date_time, format_relative_date, summary_line, truncate_code};

use crate::config::generate_cfg;
use crate::{DetectArgs, InitArgs, ListArgs, NormalizeArgs, PublishArgs, SearchArgs, ShowArgs, SuggestArgs, TagArgs,
            TagsArgs, UserArgs};

pub(crate) struct Context {
    pub posts_file: PathBuf,
    pub store: PostStore,
    pub tags: TagCatalog,
    pub users: UserDirectory,
    pub search: Search,
}

impl Context {
    pub fn new(config: Option<Config>, posts_file: Option<PathBuf>) -> Result<Self> {
        let (paths, search) = match config {
            Some(config) => (Some(config.paths), config.search),
            None => (None, Search::default()),
        };

        let posts_file = posts_file.or_else(|| paths.as_ref().map(|p| p.posts_file.clone()))
            .ok_or_else(|| anyhow!("No posts file configured"))?;
        let store = PostStore::open(&posts_file);

        let tags = match paths.as_ref().and_then(|p| p.tags_file.as_deref()) {
            Some(path) => TagCatalog::open(path),
            None => TagCatalog::empty(),
        };
        let users = match paths.as_ref().and_then(|p| p.users_file.as_deref()) {
            Some(path) => UserDirectory::open(path),
            None => UserDirectory::empty(),
        };

        Ok(Context {
            posts_file,
            store,
            tags,
            users,
            search,
        })
    }
}

fn print_post_line(post: &Post) {
    let (date, time) = format_date_time(&post.created_at);
    println!("{} {} [{}] {} ({}) likes={} views={}",
             date, time, post.id, post.title, post.source_code.language, post.likes, post.views);
    println!("    {}", summary_line(&post.description, 80));
    if !post.tags.is_empty() {
        println!("    #{}", post.tags.join(" #"));
    }
}

fn print_posts(posts: &[&Post]) {
    for post in posts {
        print_post_line(post);
    }
}

pub(crate) fn search_cmd(ctx: &Context, args: SearchArgs) -> Result<()> {
    let (filters, page) = match args.url_query {
        Some(ref query) => {
            let qs = QueryString::from(query.trim_start_matches('?'));
            (qs.to_filters(), qs.get_page())
        }
        None => {
            let filters = SearchFilters {
                query: args.query,
                tags: if args.tags.is_empty() { None } else { Some(args.tags) },
                language: args.language,
                sort_by: args.sort,
            };
            (filters, args.page)
        }
    };

    let results = search_posts(ctx.store.posts(), &filters);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    let paginator = Paginator::from(&results, ctx.search.page_size);
    let (page, items) = paginator.get_page_or_first(page);
    println!("{} result(s), page {}/{}", results.len(), page, paginator.page_count().max(1));
    print_posts(items);
    Ok(())
}

pub(crate) fn suggest_cmd(ctx: &Context, args: SuggestArgs) -> Result<()> {
    let limit = args.limit.unwrap_or(ctx.search.suggestion_limit);
    for suggestion in search_tag_suggestions(ctx.store.posts(), &args.partial, limit) {
        println!("{}\t{}", suggestion.tag, suggestion.count);
    }
    Ok(())
}

pub(crate) fn tags_cmd(ctx: &Context, args: TagsArgs) -> Result<()> {
    let top = args.top.unwrap_or(ctx.search.popular_tag_count);
    for tag in popular_tags(ctx.store.posts(), top) {
        println!("{}\t{}", tag.tag, tag.count);
    }
    Ok(())
}

pub(crate) fn languages_cmd(ctx: &Context) -> Result<()> {
    for language in ctx.store.available_languages() {
        println!("{}", language);
    }
    Ok(())
}

pub(crate) fn show_cmd(ctx: &Context, args: ShowArgs) -> Result<()> {
    let post = ctx.store.find_by_id(&args.id)
        .ok_or_else(|| anyhow!("Could not find post {}", args.id))?;

    println!("{}", post);
    println!("author: {}, {}", ctx.users.author_name(&post.author_id), format_relative_date(&post.created_at, &Utc::now()));
    let colors = ctx.tags.tag_colors(&post.tags);
    let tags: Vec<String> = post.tags.iter()
        .map(|tag| format!("#{}({})", tag, colors[tag.as_str()]))
        .collect();
    println!("{}", tags.join(" "));
    println!();
    println!("{}", post.content);
    println!();

    let code = &post.source_code.code;
    if args.lines == 0 {
        println!("{}", code);
    } else {
        println!("{}", truncate_code(code, args.lines));
    }
    Ok(())
}

pub(crate) fn tag_cmd(ctx: &Context, args: TagArgs) -> Result<()> {
    let stats = TagStats::from_posts(ctx.store.posts());
    let tag = ctx.tags.find_by_name(&args.name);
    let count = stats.get(&args.name)
        .or_else(|| tag.and_then(|t| stats.get(&t.name)));

    if tag.is_none() && count.is_none() {
        bail!("Unknown tag {}", args.name);
    }

    match tag {
        Some(tag) => {
            println!("{} [{:?}] color={}", tag.name, tag.category, ctx.tags.tag_color(&tag.name));
            if !tag.description.is_empty() {
                println!("    {}", tag.description);
            }
        }
        None => println!("{} (not in the tag catalog)", args.name),
    }
    println!("used {} time(s)", count.unwrap_or(0));
    Ok(())
}

pub(crate) fn user_cmd(ctx: &Context, args: UserArgs) -> Result<()> {
    let posts = ctx.store.by_author(&args.id);
    match ctx.users.find_by_id(&args.id) {
        Some(user) => {
            println!("{} (@{}) joined {}", user.display_name, user.username, format_date_time(&user.joined_at).0);
            if !user.bio.is_empty() {
                println!("    {}", user.bio);
            }
        }
        None if posts.is_empty() => bail!("Could not find user {}", args.id),
        None => println!("{} (not in the user directory)", args.id),
    }
    println!("{} post(s)", posts.len());
    print_posts(&posts);
    Ok(())
}

pub(crate) fn latest_cmd(ctx: &Context, args: ListArgs) -> Result<()> {
    print_posts(&ctx.store.latest(args.limit.unwrap_or(ctx.search.latest_count)));
    Ok(())
}

pub(crate) fn trending_cmd(ctx: &Context, args: ListArgs) -> Result<()> {
    print_posts(&ctx.store.trending(args.limit.unwrap_or(ctx.search.latest_count)));
    Ok(())
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_string()
}

pub(crate) fn detect_cmd(args: DetectArgs) -> Result<()> {
    let code = fs::read_to_string(&args.file)
        .with_context(|| format!("Error reading {}", args.file.display()))?;
    let filename = args.name.unwrap_or_else(|| file_name_of(&args.file));

    let detection = detect(&filename, &code);
    let evidence = match detection.evidence {
        Evidence::Filename => "filename",
        Evidence::Content => "content",
    };
    println!("{}\t(from {})", detection.language, evidence);
    Ok(())
}

pub(crate) fn normalize_cmd(args: NormalizeArgs) -> Result<()> {
    println!("{}", normalize_language_name(&args.label));
    Ok(())
}

pub(crate) fn publish_cmd(args: PublishArgs) -> Result<()> {
    let code = fs::read_to_string(&args.file)
        .with_context(|| format!("Error reading {}", args.file.display()))?;
    let content = match args.body {
        Some(ref body) => fs::read_to_string(body)
            .with_context(|| format!("Error reading {}", body.display()))?,
        None => String::new(),
    };

    let draft = PostDraft {
        title: args.title,
        description: args.description,
        content,
        source: DraftSource {
            filename: file_name_of(&args.file),
            code,
            language: args.language,
        },
        author_id: args.author,
        tags: split_tags(&args.tags),
    };

    let post = match draft.publish(!args.draft, Utc::now()) {
        Ok(post) => post,
        Err(errors) => {
            for error in errors.iter() {
                eprintln!("Invalid post: {}", error);
            }
            bail!("Post has {} invalid field(s)", errors.len());
        }
    };

    println!("{}", serde_json::to_string_pretty(&post)?);
    Ok(())
}

pub(crate) fn init_cmd(args: InitArgs) -> Result<()> {
    let path = generate_cfg(args.out).map_err(|e| anyhow!(e))?;
    println!("Sample config written to {}", path.display());
    Ok(())
}
