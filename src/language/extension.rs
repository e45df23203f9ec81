use std::collections::HashMap;

use lazy_static::lazy_static;

lazy_static! {
    // Keys are lower-cased extensions without the leading dot
    static ref EXTENSION_MAP: HashMap<&'static str, &'static str> = {
        let entries: &[(&str, &str)] = &[
            // JavaScript/TypeScript
            ("js", "javascript"),
            ("jsx", "javascript"),
            ("mjs", "javascript"),
            ("cjs", "javascript"),
            ("ts", "typescript"),
            ("tsx", "typescript"),
            // Python
            ("py", "python"),
            ("pyw", "python"),
            ("pyi", "python"),
            ("pyx", "python"),
            // JVM
            ("java", "java"),
            ("kt", "kotlin"),
            ("kts", "kotlin"),
            // C family
            ("c", "c"),
            ("h", "c"),
            ("cpp", "c++"),
            ("cxx", "c++"),
            ("cc", "c++"),
            ("hpp", "c++"),
            ("hxx", "c++"),
            ("cs", "c#"),
            // Systems and mobile
            ("go", "go"),
            ("rs", "rust"),
            ("swift", "swift"),
            ("dart", "dart"),
            // Scripting
            ("php", "php"),
            ("phtml", "php"),
            ("php3", "php"),
            ("php4", "php"),
            ("php5", "php"),
            ("php7", "php"),
            ("rb", "ruby"),
            ("rbw", "ruby"),
            // Web
            ("html", "html"),
            ("htm", "html"),
            ("css", "css"),
            ("scss", "css"),
            ("sass", "css"),
            ("less", "css"),
            // SQL
            ("sql", "sql"),
            ("mysql", "sql"),
            ("pgsql", "sql"),
            // Shell
            ("sh", "shell"),
            ("bash", "shell"),
            ("zsh", "shell"),
            ("fish", "shell"),
            // Config and data
            ("json", "json"),
            ("jsonc", "json"),
            ("xml", "xml"),
            ("svg", "xml"),
            ("yaml", "yaml"),
            ("yml", "yaml"),
            ("toml", "toml"),
            ("ini", "ini"),
            // Documentation
            ("md", "markdown"),
            ("markdown", "markdown"),
            ("txt", "markdown"),
            // Docker
            ("dockerfile", "docker"),
        ];
        entries.iter().copied().collect()
    };
}

/// Files recognised by their whole name when they carry no extension
const BARE_NAMES: &[&str] = &["dockerfile"];

/// Returns the lower-cased extension of `filename` including the leading dot,
/// e.g. `.py`. Extensionless files whose name is a known bare name return the
/// name itself (`dockerfile`); anything else returns `None`.
pub fn file_extension(filename: &str) -> Option<String> {
    match filename.rfind('.') {
        Some(pos) => Some(filename[pos..].to_lowercase()),
        None => {
            let lower = filename.to_lowercase();
            if BARE_NAMES.contains(&lower.as_str()) {
                Some(lower)
            } else {
                None
            }
        }
    }
}

/// Maps an extension as returned by [`file_extension`] (a leading dot is
/// optional) to its canonical language.
pub fn language_from_extension(extension: &str) -> Option<&'static str> {
    let key = extension.trim_start_matches('.').to_lowercase();
    EXTENSION_MAP.get(key.as_str()).copied()
}

/// Canonical language for a filename, or `None` if the table has no entry.
pub fn language_from_filename(filename: &str) -> Option<&'static str> {
    file_extension(filename).and_then(|ext| language_from_extension(&ext))
}
