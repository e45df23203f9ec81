use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

#[derive(Deserialize)]
pub struct Paths {
    pub posts_file: PathBuf,
    /// Tag catalog, tags show without colors when missing
    pub tags_file: Option<PathBuf>,
    /// User directory, authors show by id when missing
    pub users_file: Option<PathBuf>,
}

fn default_page_size() -> u32 { 10 }

fn default_suggestion_limit() -> usize { 10 }

fn default_popular_tag_count() -> usize { 20 }

fn default_latest_count() -> usize { 10 }

#[derive(Deserialize)]
pub struct Search {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
    #[serde(default = "default_popular_tag_count")]
    pub popular_tag_count: usize,
    #[serde(default = "default_latest_count")]
    pub latest_count: usize,
}

impl Default for Search {
    fn default() -> Self {
        Search {
            page_size: default_page_size(),
            suggestion_limit: default_suggestion_limit(),
            popular_tag_count: default_popular_tag_count(),
            latest_count: default_latest_count(),
        }
    }
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize)]
pub struct Config {
    pub paths: Paths,
    #[serde(default)]
    pub search: Search,
    pub log: Option<Log>,
}

fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    if !path.starts_with("${exe_dir}") {
        return Ok(path);
    }

    let cur_exe = env::current_exe()?;
    let exe_dir = cur_exe.parent()
        .ok_or_else(|| io::Error::new(ErrorKind::NotFound, "Executable has no parent directory"))?;
    let rest = path.strip_prefix("${exe_dir}")
        .map_err(|e| io::Error::new(ErrorKind::InvalidInput, e))?;
    Ok(exe_dir.join(rest))
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        posts_file: parse_path(cfg.paths.posts_file)?,
        tags_file: cfg.paths.tags_file.map(parse_path).transpose()?,
        users_file: cfg.paths.users_file.map(parse_path).transpose()?,
    };

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}
