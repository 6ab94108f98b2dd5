use bon::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Description of one handler to be built into a chain
///
/// Descriptors come out of a [`Discovery`](crate::discovery::Discovery) and
/// are consumed by the builder. Lower `priority` values land earlier in the
/// chain. `initializer` names a per-type initializer accessor registered in a
/// [`HandlerFactory`](super::HandlerFactory); an empty name means none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
pub struct Descriptor {
    #[builder(into)]
    pub type_id: String,
    #[serde(default)]
    #[builder(default)]
    pub priority: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub initializer: Option<String>,
    /// Free-form data handed to initializers
    #[serde(default, skip_serializing_if = "Value::is_null")]
    #[builder(default)]
    pub options: Value,
}

impl Descriptor {
    /// Descriptor with default priority, no initializer and no options
    pub fn new(type_id: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
            priority: 0,
            initializer: None,
            options: Value::Null,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Initializer accessor name, treating `""` as absent
    pub fn initializer(&self) -> Option<&str> {
        self.initializer.as_deref().filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_defaults() {
        let descriptor = Descriptor::builder().type_id("integer").build();

        assert_eq!(descriptor.type_id, "integer");
        assert_eq!(descriptor.priority, 0);
        assert_eq!(descriptor.initializer(), None);
        assert!(descriptor.options.is_null());
        assert_eq!(descriptor, Descriptor::new("integer"));
    }

    #[test]
    fn test_empty_initializer_is_none() {
        let descriptor = Descriptor::builder()
            .type_id("keyword")
            .initializer("")
            .build();

        assert_eq!(descriptor.initializer(), None);

        let named = Descriptor::builder()
            .type_id("keyword")
            .initializer("keywords")
            .priority(4)
            .build();
        assert_eq!(named.initializer(), Some("keywords"));
        assert_eq!(named.priority, 4);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let descriptor: Descriptor = toml::from_str(
            r#"
type_id = "keyword"
initializer = "keywords"
options = { keywords = ["help", "quit"] }
            "#,
        )
        .unwrap();

        assert_eq!(descriptor.priority, 0);
        assert_eq!(descriptor.initializer(), Some("keywords"));
        assert_eq!(descriptor.options, json!({ "keywords": ["help", "quit"] }));
    }
}
