//! In-memory shape of a Swagger/OpenAPI document.
//!
//! Only the parts the route generator reads are modelled. Every mapping keeps
//! the order in which the source document declares its keys, so traversals
//! over paths, methods, status codes and content types are reproducible.

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;

/// HTTP methods that may appear as keys of a path item.
pub const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Root of a parsed schema document
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    /// API metadata
    pub info: Info,
    /// URL template -> path item, in declaration order
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
}

/// API metadata
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// All operations declared for one URL template.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathItem {
    /// Parameters shared by every operation on this path
    #[serde(default, deserialize_with = "lenient_parameters")]
    pub parameters: Vec<ParameterDescriptor>,
    /// Remaining keys, methods and otherwise, in declaration order
    #[serde(flatten)]
    entries: IndexMap<String, serde_yaml::Value>,
}

/// A declared parameter; only `in` and `name` matter here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParameterDescriptor {
    #[serde(rename = "in")]
    pub location: String,
    pub name: String,
}

/// A single HTTP operation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OperationObject {
    #[serde(default)]
    pub description: Option<String>,
    /// Status code -> response, in declaration order
    #[serde(default, deserialize_with = "status_keyed")]
    pub responses: IndexMap<String, ResponseObject>,
}

/// A response for one status code
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseObject {
    #[serde(default)]
    pub description: Option<String>,
    /// MIME type -> schema; the schema itself is never inspected
    #[serde(default)]
    pub content: IndexMap<String, serde_yaml::Value>,
}

impl ParameterDescriptor {
    pub fn is_path(&self) -> bool {
        self.location == "path"
    }
}

impl PathItem {
    /// Builds a path item from already-typed operations, keeping their order.
    pub fn new(
        parameters: Vec<ParameterDescriptor>,
        operations: Vec<(&str, OperationObject)>,
    ) -> Self {
        let entries = operations
            .into_iter()
            .map(|(method, op)| (method.to_lowercase(), op.into_value()))
            .collect();
        Self { parameters, entries }
    }

    /// Returns the operations of this path item in declaration order.
    ///
    /// Keys that are not HTTP methods are skipped. A method whose value does
    /// not deserialize as an operation contributes nothing.
    pub fn operations(&self) -> Vec<(&str, OperationObject)> {
        self.entries
            .iter()
            .filter(|(key, _)| HTTP_METHODS.contains(&key.as_str()))
            .filter_map(|(method, value)| {
                match serde_yaml::from_value::<OperationObject>(value.clone()) {
                    Ok(op) => Some((method.as_str(), op)),
                    Err(e) => {
                        debug!("Ignoring unusable {} operation: {}", method, e);
                        None
                    }
                }
            })
            .collect()
    }

    /// Finds the declared path parameter called `name`.
    pub fn path_parameter(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.parameters
            .iter()
            .find(|p| p.is_path() && p.name == name)
    }
}

impl OperationObject {
    fn into_value(self) -> serde_yaml::Value {
        let mut responses = serde_yaml::Mapping::new();
        for (code, response) in self.responses {
            let mut content = serde_yaml::Mapping::new();
            for (mime, schema) in response.content {
                content.insert(mime.into(), schema);
            }
            let mut entry = serde_yaml::Mapping::new();
            if let Some(desc) = response.description {
                entry.insert("description".into(), desc.into());
            }
            entry.insert("content".into(), content.into());
            responses.insert(code.into(), entry.into());
        }

        let mut op = serde_yaml::Mapping::new();
        if let Some(desc) = self.description {
            op.insert("description".into(), desc.into());
        }
        op.insert("responses".into(), responses.into());
        op.into()
    }
}

/// Keeps the well-formed `{in, name}` entries and drops the rest (`$ref`s etc).
fn lenient_parameters<'de, D>(deserializer: D) -> Result<Vec<ParameterDescriptor>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Vec<serde_yaml::Value> = Vec::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|value| serde_yaml::from_value(value).ok())
        .collect())
}

/// YAML reads an unquoted `200:` as an integer key; status codes are kept as text.
#[derive(PartialEq, Eq, Hash)]
struct StatusKey(String);

impl<'de> Deserialize<'de> for StatusKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct KeyVisitor;

        impl serde::de::Visitor<'_> for KeyVisitor {
            type Value = StatusKey;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a status code")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<StatusKey, E> {
                Ok(StatusKey(v.to_string()))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<StatusKey, E> {
                Ok(StatusKey(v.to_string()))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<StatusKey, E> {
                Ok(StatusKey(v.to_string()))
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}

fn status_keyed<'de, D>(deserializer: D) -> Result<IndexMap<String, ResponseObject>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: IndexMap<StatusKey, ResponseObject> = IndexMap::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|(key, value)| (key.0, value)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"
info:
  title: Sample
paths:
  /pets:
    summary: ignored
    post:
      responses:
        "201":
          content:
            application/json: {}
    get:
      description: List pets
      responses:
        "200":
          description: OK
          content:
            text/plain: {}
            application/json: {}
  /pets/{petId}:
    parameters:
      - $ref: "#/components/parameters/Trace"
      - in: path
        name: petId
    delete: 42
"##;

    fn sample() -> Document {
        serde_yaml::from_str(SAMPLE).unwrap()
    }

    #[test]
    fn test_paths_keep_declaration_order() {
        let doc = sample();
        let keys: Vec<_> = doc.paths.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["/pets", "/pets/{petId}"]);
    }

    #[test]
    fn test_operations_follow_declaration_order() {
        let doc = sample();
        let ops = doc.paths["/pets"].operations();
        let methods: Vec<_> = ops.iter().map(|(m, _)| *m).collect();
        assert_eq!(methods, vec!["post", "get"]);

        let get = &ops[1].1;
        assert_eq!(get.description.as_deref(), Some("List pets"));
        let mimes: Vec<_> = get.responses["200"].content.keys().collect();
        assert_eq!(mimes, vec!["text/plain", "application/json"]);
    }

    #[test]
    fn test_malformed_operation_is_skipped() {
        let doc = sample();
        assert!(doc.paths["/pets/{petId}"].operations().is_empty());
    }

    #[test]
    fn test_reference_parameters_are_dropped() {
        let doc = sample();
        let item = &doc.paths["/pets/{petId}"];
        assert_eq!(item.parameters.len(), 1);
        assert!(item.path_parameter("petId").is_some());
        assert!(item.path_parameter("trace").is_none());
    }

    #[test]
    fn test_unquoted_status_codes_become_text() {
        let doc: Document = serde_yaml::from_str(
            "info: {}\npaths:\n  /a:\n    get:\n      responses:\n        404:\n          content:\n            text/html: {}\n",
        )
        .unwrap();
        let ops = doc.paths["/a"].operations();
        assert!(ops[0].1.responses.contains_key("404"));
    }

    #[test]
    fn test_new_round_trips_operations() {
        let mut op = OperationObject::default();
        let mut response = ResponseObject::default();
        response
            .content
            .insert("application/json".to_string(), serde_yaml::Value::Null);
        op.responses.insert("204".to_string(), response);

        let item = PathItem::new(vec![], vec![("PATCH", op)]);
        let ops = item.operations();
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].0, "patch");
        assert!(ops[0].1.responses["204"].content.contains_key("application/json"));
    }
}
