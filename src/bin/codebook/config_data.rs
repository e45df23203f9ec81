use std::fs::File;
use std::io;
use std::io::Write;
use std::path::Path;

const CONFIG_SAMPLE: &str = r#"# For the file locations, If you want it to be relative to the executable directory
# use ${exe_dir}/location
[paths]
posts_file = "data/posts.json"
# Optional catalogs used to show tag colors and author names
tags_file = "data/tags.json"
users_file = "data/users.json"

[search]
page_size = 10
suggestion_limit = 10
popular_tag_count = 20
latest_count = 10

# Remove this section to log to the console only
[log]
level = "Info"
log_to_console = false
"#;

pub(crate) fn write_sample_cfg(file_path: &Path) -> io::Result<()> {
    let mut file = File::create(file_path)?;
    file.write_all(CONFIG_SAMPLE.as_bytes())
}

#[cfg(test)]
mod tests {
    use codebook::config::parse_config;

    use super::*;

    #[test]
    fn test_sample_is_valid() {
        let cfg = parse_config(CONFIG_SAMPLE).unwrap();
        assert_eq!(cfg.search.popular_tag_count, 20);
        assert!(cfg.paths.tags_file.is_some());
        assert!(cfg.paths.users_file.is_some());
        assert!(cfg.log.is_some());
    }
}
