use std::sync::Arc;

use serde_json::Value;

use super::traits::{BoxedHandler, Handler};
use crate::chain::{BoxError, Descriptor, HandlerFactory, Initializer};

/// Namespace the built-in handlers register into
pub const BUILTIN_NAMESPACE: &str = "corchain::builtin";

const DEFAULT_KEYWORDS: &[&str] = &["help", "version", "quit"];

crate::chain_element!(BUILTIN_NAMESPACE, "blank", priority = 0);
crate::chain_element!(BUILTIN_NAMESPACE, "integer", priority = 10);
crate::chain_element!(BUILTIN_NAMESPACE, "url", priority = 20);
crate::chain_element!(BUILTIN_NAMESPACE, "keyword", priority = 30, initializer = "keywords");
crate::chain_element!(BUILTIN_NAMESPACE, "catch_all", priority = i32::MAX);

/// Whitespace-only input
#[derive(Debug, Default)]
pub struct BlankHandler;

impl Handler<str, String> for BlankHandler {
    fn is_responsible(&self, input: &str) -> bool {
        input.trim().is_empty()
    }

    fn execute(&self, _input: &str) -> Option<String> {
        Some("blank".to_string())
    }
}

/// Input that parses as a signed 64-bit integer
#[derive(Debug, Default)]
pub struct IntegerHandler;

impl Handler<str, String> for IntegerHandler {
    fn is_responsible(&self, input: &str) -> bool {
        input.trim().parse::<i64>().is_ok()
    }

    fn execute(&self, input: &str) -> Option<String> {
        let value: i64 = input.trim().parse().ok()?;
        Some(format!("integer {value}"))
    }
}

/// `http://` and `https://` URLs
#[derive(Debug, Default)]
pub struct UrlHandler;

impl UrlHandler {
    fn strip_scheme(input: &str) -> Option<&str> {
        let input = input.trim();
        input
            .strip_prefix("https://")
            .or_else(|| input.strip_prefix("http://"))
    }
}

impl Handler<str, String> for UrlHandler {
    fn is_responsible(&self, input: &str) -> bool {
        Self::strip_scheme(input).is_some_and(|rest| !rest.is_empty())
    }

    fn execute(&self, input: &str) -> Option<String> {
        let rest = Self::strip_scheme(input)?;
        let host = rest.split(['/', '?', '#']).next().unwrap_or(rest);
        Some(format!("url host={host}"))
    }
}

/// Case-insensitive match against a fixed keyword list
#[derive(Debug)]
pub struct KeywordHandler {
    keywords: Vec<String>,
}

impl KeywordHandler {
    pub fn new<S: Into<String>>(keywords: impl IntoIterator<Item = S>) -> Self {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.into().to_lowercase())
                .collect(),
        }
    }

    /// Build from `options.keywords`, or the default list when absent
    pub fn from_options(options: &Value) -> Result<Self, BoxError> {
        let Some(keywords) = options.get("keywords") else {
            return Ok(Self::new(DEFAULT_KEYWORDS.iter().copied()));
        };

        let keywords = keywords
            .as_array()
            .ok_or("'keywords' must be an array of strings")?
            .iter()
            .map(|k| k.as_str().ok_or("'keywords' must be an array of strings"))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(keywords))
    }

    fn matching(&self, input: &str) -> Option<&str> {
        let needle = input.trim().to_lowercase();
        self.keywords
            .iter()
            .find(|keyword| **keyword == needle)
            .map(String::as_str)
    }
}

impl Handler<str, String> for KeywordHandler {
    fn is_responsible(&self, input: &str) -> bool {
        self.matching(input).is_some()
    }

    fn execute(&self, input: &str) -> Option<String> {
        self.matching(input).map(|keyword| format!("keyword {keyword}"))
    }
}

/// Accepts everything; register it last
#[derive(Debug, Default)]
pub struct CatchAllHandler;

impl Handler<str, String> for CatchAllHandler {
    fn is_responsible(&self, _input: &str) -> bool {
        true
    }

    fn execute(&self, input: &str) -> Option<String> {
        Some(format!("text ({} chars)", input.chars().count()))
    }
}

fn keywords_initializer() -> Result<Initializer<str, String>, BoxError> {
    Ok(Arc::new(
        |descriptor: &Descriptor| -> Result<BoxedHandler<str, String>, BoxError> {
            Ok(Box::new(KeywordHandler::from_options(&descriptor.options)?))
        },
    ))
}

/// Factory table for the built-in handler types
pub fn builtin_factory() -> HandlerFactory<str, String> {
    let mut factory = HandlerFactory::new();
    factory
        .register_default::<BlankHandler>("blank")
        .register_default::<IntegerHandler>("integer")
        .register_default::<UrlHandler>("url")
        .register_initializer("keyword", "keywords", keywords_initializer)
        .register_default::<CatchAllHandler>("catch_all");
    factory
}
