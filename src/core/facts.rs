//! Per-file facts extracted by the class processors.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "public" => Some(Visibility::Public),
            "protected" => Some(Visibility::Protected),
            "private" => Some(Visibility::Private),
            _ => None,
        }
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Visibility::Public)
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        })
    }
}

/// What a `$this->load->...` call (or a G4 helper function) brought into scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    Model,
    Library,
    Helper,
    Unknown,
}

impl DependencyKind {
    pub fn from_loader(method: &str) -> Option<Self> {
        match method {
            "model" => Some(DependencyKind::Model),
            "library" => Some(DependencyKind::Library),
            "helper" => Some(DependencyKind::Helper),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyUsage {
    #[serde(rename = "type")]
    pub kind: DependencyKind,
    pub alias: String,
    pub name: Option<String>,
}

impl DependencyUsage {
    pub fn dedup_key(&self) -> String {
        format!("{}|{}", self.name.as_deref().unwrap_or(""), self.alias)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodFact {
    pub name: String,
    pub visibility: Visibility,
    pub params: Vec<String>,
    pub dependencies: Vec<DependencyUsage>,
    pub views: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<String>,
    pub summary: String,
    pub class: Option<String>,
    pub extends: Option<String>,
}

impl MethodFact {
    pub fn uses(&self, alias: &str) -> Option<&DependencyUsage> {
        self.dependencies.iter().find(|dep| dep.alias == alias)
    }

    pub fn renders(&self, view: &str) -> bool {
        self.views.iter().any(|v| v == view)
    }
}

/// Everything a controller or model processor learned about one file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassFacts {
    pub name: Option<String>,
    pub extends: Option<String>,
    pub methods: Vec<MethodFact>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<String>,
}

impl ClassFacts {
    pub fn method(&self, name: &str) -> Option<&MethodFact> {
        self.methods.iter().find(|m| m.name == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpVerb {
    /// Guess the verb from a method name prefix. Case sensitive.
    pub fn infer(method: &str) -> Self {
        const TABLE: &[(&str, HttpVerb)] = &[
            ("get", HttpVerb::Get),
            ("post", HttpVerb::Post),
            ("store", HttpVerb::Post),
            ("create", HttpVerb::Post),
            ("put", HttpVerb::Put),
            ("update", HttpVerb::Put),
            ("delete", HttpVerb::Delete),
        ];
        TABLE
            .iter()
            .find(|(prefix, _)| method.starts_with(prefix))
            .map(|(_, verb)| *verb)
            .unwrap_or(HttpVerb::Get)
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
            HttpVerb::Put => "PUT",
            HttpVerb::Delete => "DELETE",
        })
    }
}

/// Route guessed from a public controller method. Best effort only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteFact {
    pub uri: String,
    pub controller: String,
    pub method: String,
    pub http: HttpVerb,
}

impl RouteFact {
    pub fn infer(controller: &str, method: &str) -> Self {
        Self {
            uri: format!("{}/{}", controller.to_lowercase(), method.to_lowercase()),
            controller: controller.to_string(),
            method: method.to_string(),
            http: HttpVerb::infer(method),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_verb_prefix_table() {
        assert_eq!(HttpVerb::infer("getIndex"), HttpVerb::Get);
        assert_eq!(HttpVerb::infer("storeOrder"), HttpVerb::Post);
        assert_eq!(HttpVerb::infer("create"), HttpVerb::Post);
        assert_eq!(HttpVerb::infer("updateUser"), HttpVerb::Put);
        assert_eq!(HttpVerb::infer("deleteAll"), HttpVerb::Delete);
        assert_eq!(HttpVerb::infer("index"), HttpVerb::Get);
        // prefixes are case sensitive
        assert_eq!(HttpVerb::infer("PostComment"), HttpVerb::Get);
    }

    #[test]
    fn test_route_uri_is_lowercased() {
        let route = RouteFact::infer("Blog", "getIndex");
        assert_eq!(route.uri, "blog/getindex");
        assert_eq!(route.http.to_string(), "GET");
    }

    #[test]
    fn test_dependency_usage_serializes_kind_as_type() {
        let usage = DependencyUsage {
            kind: DependencyKind::Model,
            alias: "users".into(),
            name: Some("user_model".into()),
        };
        let json = serde_json::to_value(&usage).unwrap();
        assert_eq!(json["type"], "model");
        assert_eq!(usage.dedup_key(), "user_model|users");
    }
}
