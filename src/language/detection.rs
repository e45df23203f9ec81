use serde::de::IgnoredAny;
use spdlog::trace;

use crate::language::extension::language_from_filename;

/// Language reported when neither the filename nor the content is conclusive
pub const DEFAULT_LANGUAGE: &str = "typescript";

/// What the filename says about the language of a file.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FilenameSignal {
    /// The extension table resolved the filename
    Known(&'static str),
    /// No table entry, the detector falls back to [`DEFAULT_LANGUAGE`]
    Unknown,
}

impl FilenameSignal {
    pub fn from_filename(filename: &str) -> Self {
        match language_from_filename(filename) {
            Some(lang) => FilenameSignal::Known(lang),
            None => FilenameSignal::Unknown,
        }
    }

    pub fn language(&self) -> &'static str {
        match *self {
            FilenameSignal::Known(lang) => lang,
            FilenameSignal::Unknown => DEFAULT_LANGUAGE,
        }
    }

    /// True when the filename points somewhere other than the fallback value.
    /// A `.ts` file resolves to the fallback too and is therefore not conclusive.
    pub fn is_conclusive(&self) -> bool {
        self.language() != DEFAULT_LANGUAGE
    }
}

/// Which signal decided the result of [`detect`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Evidence {
    Filename,
    Content,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Detection {
    pub language: &'static str,
    pub evidence: Evidence,
}

/// Filename-only detection, `DEFAULT_LANGUAGE` when the table has no entry.
pub fn detect_language_from_filename(filename: &str) -> &'static str {
    FilenameSignal::from_filename(filename).language()
}

fn contains_any(content: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| content.contains(m))
}

fn looks_like_script(content: &str) -> bool {
    contains_any(content, &["import ", "export ", "const ", "let ", "function ", "=>", "interface ", "type "])
}

fn looks_like_typescript(content: &str) -> bool {
    contains_any(content, &["interface ", "type ", ": string", ": number"])
        || (content.contains('<') && content.contains('>'))
}

fn looks_like_python(content: &str) -> bool {
    contains_any(content, &["def ", "import ", "from ", "class ", "if __name__", "print("])
}

fn looks_like_html(content: &str) -> bool {
    contains_any(content, &["<html", "<!doctype", "<div", "<script", "<style"])
}

fn looks_like_css(content: &str) -> bool {
    content.contains('{') && content.contains('}')
        && (content.contains(':') || content.contains(';'))
        && !content.contains("function") && !content.contains("const")
}

/// Bracket check runs on the lower-cased text, the parse on the code as given.
/// A failed parse is not a verdict, later rules still get their turn.
///
/// The document is only validated, never built, so lone surrogate escapes
/// pass. Nesting deeper than serde_json's recursion limit (128) fails the parse.
fn looks_like_json(content: &str, code: &str) -> bool {
    let bracketed = (content.starts_with('{') && content.ends_with('}'))
        || (content.starts_with('[') && content.ends_with(']'));
    bracketed && serde_json::from_str::<IgnoredAny>(code).is_ok()
}

fn looks_like_shell(content: &str) -> bool {
    content.starts_with("#!") || contains_any(content, &["#!/bin/", "echo ", "cd ", "ls ", "grep "])
}

fn looks_like_markdown(content: &str) -> bool {
    contains_any(content, &["# ", "## ", "```", "- ", "* "])
        || (content.contains('[') && content.contains("]("))
}

/// Guesses the language from the code alone. Rules are checked in order and
/// the first hit wins.
pub fn detect_language_from_content(code: &str) -> &'static str {
    if code.trim().is_empty() {
        return DEFAULT_LANGUAGE;
    }

    let content = code.to_lowercase();

    if looks_like_script(&content) {
        return if looks_like_typescript(&content) { "typescript" } else { "javascript" };
    }
    if looks_like_python(&content) {
        return "python";
    }
    if looks_like_html(&content) {
        return "html";
    }
    if looks_like_css(&content) {
        return "css";
    }
    if looks_like_json(&content, code) {
        return "json";
    }
    if looks_like_shell(&content) {
        return "shell";
    }
    if looks_like_markdown(&content) {
        return "markdown";
    }

    DEFAULT_LANGUAGE
}

/// Combines both signals.
///
/// | filename signal       | code      | result   |
/// |-----------------------|-----------|----------|
/// | any                   | blank     | filename |
/// | conclusive            | non-blank | filename |
/// | fallback / unknown    | non-blank | content  |
///
/// Filename evidence wins even when the content disagrees, so a `.txt` file
/// holding Python is reported as `markdown`.
pub fn detect(filename: &str, code: &str) -> Detection {
    let signal = FilenameSignal::from_filename(filename);
    let blank = code.trim().is_empty();

    let detection = if blank || signal.is_conclusive() {
        Detection { language: signal.language(), evidence: Evidence::Filename }
    } else {
        Detection { language: detect_language_from_content(code), evidence: Evidence::Content }
    };

    trace!("Detected {} for '{}' from {:?}", detection.language, filename, detection.evidence);
    detection
}

pub fn detect_language(filename: &str, code: &str) -> &'static str {
    detect(filename, code).language
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_wins_for_empty_code() {
        for (file, lang) in [("a.py", "python"), ("b.rs", "rust"), ("c.json", "json"), ("d.sh", "shell"),
            ("e.txt", "markdown"), ("Dockerfile", "docker"), ("f.yml", "yaml")] {
            assert_eq!(detect_language(file, ""), lang);
            assert_eq!(detect_language(file, "   \n"), lang);
        }
        assert_eq!(detect_language("unknown.bin", ""), DEFAULT_LANGUAGE);
    }

    #[test]
    fn test_known_pairs() {
        assert_eq!(detect_language("app.py", "def f(): pass"), "python");
        assert_eq!(detect_language("app.ts", "interface X {}"), "typescript");
    }

    #[test]
    fn test_filename_overrides_content() {
        let res = detect("script.txt", "def main():\n    print('hi')\n");
        assert_eq!(res, Detection { language: "markdown", evidence: Evidence::Filename });

        let res = detect("app.js", "def f(): pass");
        assert_eq!(res.language, "javascript");
    }

    #[test]
    fn test_fallback_filename_defers_to_content() {
        let res = detect("snippet", "def f():\n    return 1\n");
        assert_eq!(res, Detection { language: "python", evidence: Evidence::Content });

        // .ts resolves to the fallback value, so content decides
        assert_eq!(detect_language("weird.ts", "print('hello')"), "python");
    }

    #[test]
    fn test_script_markers() {
        assert_eq!(detect_language_from_content("const x = 1;"), "javascript");
        assert_eq!(detect_language_from_content("const x: number = 1;"), "typescript");
        assert_eq!(detect_language_from_content("function f(a) { return a }"), "javascript");
        assert_eq!(detect_language_from_content("let xs = new Map<string, number>();"), "typescript");
    }

    #[test]
    fn test_python_markers() {
        assert_eq!(detect_language_from_content("def add(a, b):\n    return a + b"), "python");
        assert_eq!(detect_language_from_content("print(42)"), "python");
    }

    #[test]
    fn test_html_and_css() {
        assert_eq!(detect_language_from_content("<html><body><div>hi</div></body></html>"), "html");
        // "doctype " carries the "type " marker and is claimed by the script rule first
        assert_eq!(detect_language_from_content("<!DOCTYPE html>"), "typescript");
        assert_eq!(detect_language_from_content(".grid { display: grid; }"), "css");
    }

    #[test]
    fn test_json_probe() {
        assert_eq!(detect_language_from_content("[1, 2, 3]"), "json");
        assert_eq!(detect_language_from_content("[\"echo \", 2]"), "json");
        // Looks bracketed but does not parse, falls through to the shell rule
        assert_eq!(detect_language_from_content("[echo hi]"), "shell");
        assert_eq!(detect_language_from_content("[1, 2.5e400, null]"), "json");
    }

    #[test]
    fn test_json_lone_surrogate() {
        assert_eq!(detect_language_from_content(r#"["\ud800"]"#), "json");
        assert_eq!(detect_language_from_content(r#"["a", "\udc00 tail", true]"#), "json");
    }

    #[test]
    fn test_shell_and_markdown() {
        assert_eq!(detect_language_from_content("#!/usr/bin/env zsh\nexit 0"), "shell");
        assert_eq!(detect_language_from_content("echo hello"), "shell");
        assert_eq!(detect_language_from_content("# Title\n\nSome text"), "markdown");
        assert_eq!(detect_language_from_content("see [docs](http://x)"), "markdown");
    }

    #[test]
    fn test_default() {
        assert_eq!(detect_language_from_content(""), DEFAULT_LANGUAGE);
        assert_eq!(detect_language_from_content("plain words only"), DEFAULT_LANGUAGE);
    }
}
