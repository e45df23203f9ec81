use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::language::extension::language_from_extension;
use crate::post::{Post, SourceCode};

lazy_static! {
    static ref ALIASES: HashMap<&'static str, &'static str> = {
        let entries: &[(&str, &str)] = &[
            ("js", "javascript"),
            ("jsx", "javascript"),
            ("node", "javascript"),
            ("ts", "typescript"),
            ("tsx", "typescript"),
            ("py", "python"),
            ("python3", "python"),
            ("rb", "ruby"),
            ("kt", "kotlin"),
            ("rs", "rust"),
            ("golang", "go"),
            ("cpp", "c++"),
            ("cxx", "c++"),
            ("cs", "c#"),
            ("csharp", "c#"),
            ("sh", "shell"),
            ("bash", "shell"),
            ("zsh", "shell"),
            ("yml", "yaml"),
            ("md", "markdown"),
            ("dockerfile", "docker"),
        ];
        entries.iter().copied().collect()
    };
}

/// Lower-cases and trims `language`, then resolves known aliases.
/// Labels outside the alias table come back as they are (after the trim).
pub fn normalize_language_name(language: &str) -> String {
    let normalized = language.trim().to_lowercase();
    match ALIASES.get(normalized.as_str()) {
        Some(canonical) => canonical.to_string(),
        None => normalized,
    }
}

/// True when any of the stored language, the detected language or the
/// language implied by the file extension equals `target` after normalization.
pub fn is_source_matching_language(source: &SourceCode, target: &str) -> bool {
    let target = normalize_language_name(target);

    if normalize_language_name(&source.language) == target {
        return true;
    }

    if let Some(ref detected) = source.detected_language {
        if normalize_language_name(detected) == target {
            return true;
        }
    }

    source.file_extension.as_deref()
        .and_then(language_from_extension)
        .map(|lang| normalize_language_name(lang) == target)
        .unwrap_or(false)
}

pub fn is_post_matching_language(post: &Post, target: &str) -> bool {
    is_source_matching_language(&post.source_code, target)
}
