//! Syntax highlighting for document bodies shown as JSON

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

use crate::render::escape;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Key,
    String,
    Number,
    Boolean,
    Null,
    /// Whitespace and punctuation between the other tokens
    Plain,
}

impl TokenKind {
    /// CSS class used in the HTML rendering
    pub fn class(self) -> &'static str {
        match self {
            TokenKind::Key => "key",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Boolean => "boolean",
            TokenKind::Null => "null",
            TokenKind::Plain => "plain",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r#"("(\\u[a-zA-Z0-9]{4}|\\[^u]|[^\\"])*"(\s*:)?|\b(true|false|null)\b|-?\d+(?:\.\d*)?(?:[eE][+\-]?\d+)?)"#,
        )
        .expect("JSON token pattern compiles")
    })
}

/// Pretty-print `value` and split it into highlightable tokens
pub fn highlight(value: &Value) -> Vec<Token> {
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    tokenize(&pretty)
}

pub fn tokenize(json: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut last = 0;

    for m in token_pattern().find_iter(json) {
        if m.start() > last {
            tokens.push(Token {
                kind: TokenKind::Plain,
                text: json[last..m.start()].to_string(),
            });
        }
        tokens.push(Token {
            kind: classify(m.as_str()),
            text: m.as_str().to_string(),
        });
        last = m.end();
    }

    if last < json.len() {
        tokens.push(Token {
            kind: TokenKind::Plain,
            text: json[last..].to_string(),
        });
    }
    tokens
}

fn classify(text: &str) -> TokenKind {
    if text.starts_with('"') {
        if text.ends_with(':') {
            TokenKind::Key
        } else {
            TokenKind::String
        }
    } else if text == "true" || text == "false" {
        TokenKind::Boolean
    } else if text == "null" {
        TokenKind::Null
    } else {
        TokenKind::Number
    }
}

/// `<span class="…">` markup, escaped
pub fn to_html(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| match token.kind {
            TokenKind::Plain => escape(&token.text),
            kind => format!(r#"<span class="{}">{}</span>"#, kind.class(), escape(&token.text)),
        })
        .collect()
}
