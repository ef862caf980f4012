//! Code-block language classification.
//!
//! Given a code block's text, its class attributes, and surrounding text,
//! infers the most likely language tag for the Markdown fence. Pure
//! function over ordered pattern tables; no external state.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

/// Supported language tags. Closed set: classification never invents a tag
/// outside this list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Solidity,
    TypeScript,
    JavaScript,
    Bash,
    Html,
    Css,
    Json,
    Yaml,
    Plaintext,
}

impl Language {
    /// The fence annotation for this language.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Solidity => "solidity",
            Self::TypeScript => "typescript",
            Self::JavaScript => "javascript",
            Self::Bash => "bash",
            Self::Html => "html",
            Self::Css => "css",
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Plaintext => "plaintext",
        }
    }

    /// Map a class token or file extension to a language.
    ///
    /// Returns `None` for tokens outside the supported set so the caller
    /// can fall through to content-based rules.
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "solidity" | "sol" => Some(Self::Solidity),
            "typescript" | "ts" | "tsx" => Some(Self::TypeScript),
            "javascript" | "js" | "jsx" | "mjs" => Some(Self::JavaScript),
            "bash" | "sh" | "shell" | "zsh" | "console" => Some(Self::Bash),
            "html" | "xhtml" | "markup" => Some(Self::Html),
            "css" => Some(Self::Css),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Everything known about a code block at classification time.
///
/// Transient: built per block during Markdown conversion and discarded
/// after the language decision.
#[derive(Debug, Clone, Default)]
pub struct CodeBlockContext {
    /// Cleaned code text (see `markdown::clean_code_text`).
    pub code: String,
    /// Lowercased CSS classes on the `code` node.
    pub classes: Vec<String>,
    /// Bounded window of text preceding the block in the document.
    pub preceding: String,
    /// Raw text of the block's parent node.
    pub parent_text: String,
}

/// Filename-like token ending in a known extension, e.g. `Counter.sol`.
static FILENAME_EXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\w@/.-]*\.(sol|tsx?|jsx?|mjs|sh|bash|html|css|json|ya?ml)$")
        .expect("FILENAME_EXT regex")
});

/// Ordered per-language content signatures. First language with any
/// matching pattern wins, so more specific languages come first
/// (Solidity before TypeScript before JavaScript).
static CONTENT_SIGNATURES: LazyLock<Vec<(Language, Vec<Regex>)>> = LazyLock::new(|| {
    let table: &[(Language, &[&str])] = &[
        (
            Language::Solidity,
            &[
                r"pragma\s+solidity",
                r"\bcontract\s+[A-Z]\w*",
                r"\bfunction\s+\w+\s*\([^)]*\)\s+(?:external|public|internal|private)\b",
                r"\bmapping\s*\(",
                r"\bemit\s+[A-Z]\w*\s*\(",
            ],
        ),
        (
            Language::TypeScript,
            &[
                r"\binterface\s+[A-Z]\w*\s*\{",
                r"\btype\s+[A-Z]\w*\s*=",
                r":\s*(?:string|number|boolean|void)\b",
                r"\benum\s+[A-Z]\w*",
            ],
        ),
        (
            Language::JavaScript,
            &[
                r"\b(?:const|let|var)\s+\w+\s*=",
                r"\bfunction\s+\w*\s*\(",
                r"=>\s*[{(]?",
                r"\brequire\s*\(",
                r"\bconsole\.log\s*\(",
                r#"\bimport\s+.+\bfrom\s+['"]"#,
            ],
        ),
        (
            Language::Bash,
            &[
                r"(?m)^\s*\$\s+\S",
                r"(?m)^(?:npm|yarn|pnpm|npx|git|curl|wget|cd|mkdir|forge|cast|anvil|sudo|apt|brew)\b",
                r"^#!/bin/(?:ba|z)?sh",
            ],
        ),
        (
            Language::Html,
            &[
                r"(?i)<!doctype\s+html",
                r"(?i)</?(?:html|head|body|div|span|section|article)\b",
            ],
        ),
        (
            Language::Css,
            &[r"@media[^{]*\{", r"(?m)^\s*[.#][\w-]+[^{]*\{", r"[{;]\s*[\w-]+\s*:\s*[^;{}]+;"],
        ),
        (
            Language::Json,
            &[r#"(?s)^\s*\{\s*"[^"]+"\s*:"#, r#"(?s)^\s*\[\s*\{\s*"[^"]+"\s*:"#],
        ),
        (Language::Yaml, &[r"(?m)^\w[\w-]*:\s+\S", r"(?m)^\s*-\s+\w[\w-]*:\s"]),
    ];

    table
        .iter()
        .map(|(language, patterns)| {
            let compiled = patterns
                .iter()
                .map(|p| Regex::new(p).expect("content signature regex"))
                .collect();
            (*language, compiled)
        })
        .collect()
});

/// Contextual keywords consulted only when no content pattern matched.
static CONTEXT_SIGNATURES: LazyLock<Vec<(Language, Regex)>> = LazyLock::new(|| {
    let table: &[(Language, &str)] = &[
        (
            Language::Solidity,
            r"(?i)\b(?:solidity|ethereum|smart contract|foundry|hardhat|evm)\b",
        ),
        (Language::TypeScript, r"(?i)\btypescript\b"),
        (Language::JavaScript, r"(?i)\b(?:javascript|node\.js|nodejs)\b"),
        (
            Language::Bash,
            r"(?i)\b(?:terminal|command line|shell|run the following)\b",
        ),
        (Language::Html, r"(?i)\bhtml\b"),
        (Language::Css, r"(?i)\bcss\b"),
        (Language::Json, r"(?i)\bjson\b"),
        (Language::Yaml, r"(?i)\byaml\b"),
    ];
    table
        .iter()
        .map(|(language, pattern)| (*language, Regex::new(pattern).expect("context signature regex")))
        .collect()
});

/// Single-token line: something that could be a bare command name.
static ONE_WORD_COMMAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w./-]+$").expect("ONE_WORD_COMMAND regex"));

/// Classify a code block. Decision order (first match wins):
///
/// 1. explicit `language-<lang>` class (ignored when literally `plaintext`);
/// 2. trailing filename-like token with a known extension;
/// 3. per-language content patterns;
/// 4. contextual keywords in the preceding/parent text;
/// 5. shell-marker heuristic;
/// 6. `Plaintext`.
#[must_use]
pub fn classify(ctx: &CodeBlockContext) -> Language {
    if let Some(language) = class_language(&ctx.classes) {
        return language;
    }

    if let Some(language) = filename_language(ctx) {
        return language;
    }

    for (language, patterns) in CONTENT_SIGNATURES.iter() {
        if patterns.iter().any(|p| p.is_match(&ctx.code)) {
            return *language;
        }
    }

    for (language, pattern) in CONTEXT_SIGNATURES.iter() {
        if pattern.is_match(&ctx.preceding) || pattern.is_match(&ctx.parent_text) {
            return *language;
        }
    }

    if looks_like_shell(&ctx.code) {
        return Language::Bash;
    }

    Language::Plaintext
}

/// Rule 1: `language-*` / `lang-*` classes.
fn class_language(classes: &[String]) -> Option<Language> {
    for class in classes {
        let Some(token) = class
            .strip_prefix("language-")
            .or_else(|| class.strip_prefix("lang-"))
        else {
            continue;
        };
        if token == "plaintext" {
            continue;
        }
        if let Some(language) = Language::from_token(token) {
            return Some(language);
        }
    }
    None
}

/// Rule 2: a trailing filename such as `// contracts/Counter.sol` on the
/// first code line, or a filename ending the preceding sentence.
fn filename_language(ctx: &CodeBlockContext) -> Option<Language> {
    let first_line_token = ctx
        .code
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().last());
    let preceding_token = ctx
        .preceding
        .split_whitespace()
        .last()
        .map(|t| t.trim_end_matches([':', '.', ',']));

    for token in [first_line_token, preceding_token].into_iter().flatten() {
        if let Some(caps) = FILENAME_EXT.captures(token) {
            if let Some(language) = Language::from_token(&caps[1]) {
                return Some(language);
            }
        }
    }
    None
}

/// Rule 5: shell markers, or every line a bare one-word command.
fn looks_like_shell(code: &str) -> bool {
    let lines: Vec<&str> = code.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    if lines.is_empty() {
        return false;
    }
    if lines.iter().any(|l| l.starts_with('$') || l.starts_with('#')) {
        return true;
    }
    lines.iter().all(|l| ONE_WORD_COMMAND.is_match(l))
}
