use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::script::ScriptSpec;

/// Serializable metadata wrapper around one SQL query, consumed by the report
/// exporters. Richer than [`ScriptSpec`]: it carries a free-form description,
/// named parameters, and a creation timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryDescriptor {
    pub name: String,
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<BTreeMap<String, serde_json::Value>>,
    pub created_at: DateTime<Utc>,
}

impl QueryDescriptor {
    /// Anonymous descriptor; the name is derived from the creation timestamp.
    pub fn new(query: impl Into<String>) -> Self {
        let created_at = Utc::now();
        Self {
            name: format!("query_{}", created_at.format("%Y%m%d_%H%M%S")),
            query: query.into(),
            description: None,
            parameters: None,
            created_at,
        }
    }

    pub fn named(name: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            query: query.into(),
            description: None,
            parameters: None,
            created_at: Utc::now(),
        }
    }

    pub fn from_script(spec: &ScriptSpec) -> Self {
        Self::named(spec.name.clone(), spec.query.clone())
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_parameters(mut self, parameters: BTreeMap<String, serde_json::Value>) -> Self {
        self.parameters = Some(parameters);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_descriptor_derives_timestamped_name() {
        let descriptor = QueryDescriptor::new("SELECT 1");

        assert!(descriptor.name.starts_with("query_"));
        assert_eq!(descriptor.query, "SELECT 1");
        assert!(descriptor.description.is_none());
    }

    #[test]
    fn from_script_copies_name_and_query() {
        let spec = ScriptSpec::new("create_tables", "CREATE TABLE t (id INT)");
        let descriptor = QueryDescriptor::from_script(&spec);

        assert_eq!(descriptor.name, "create_tables");
        assert_eq!(descriptor.query, spec.query);
    }

    #[test]
    fn builder_attaches_description_and_parameters() {
        let mut params = BTreeMap::new();
        params.insert("limit".to_string(), serde_json::json!(100));

        let descriptor = QueryDescriptor::named("analytics", "SELECT * FROM users LIMIT 100")
            .with_description("User analytics")
            .with_parameters(params);

        assert_eq!(descriptor.description.as_deref(), Some("User analytics"));
        assert_eq!(
            descriptor.parameters.as_ref().and_then(|p| p.get("limit")),
            Some(&serde_json::json!(100))
        );
    }
}
