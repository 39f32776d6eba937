use crate::classifier::{base_segment, effective_name, Segment};
use crate::document::PathItem;
use log::debug;

/// One generated handler: a single (path, method, status, content type) leaf.
///
/// Route blocks are the unit of generation. They are created by
/// [`expand_operations`] and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteBlock {
    /// The URL template the block was generated from
    pub route_path: String,
    /// Declared name of the trailing path parameter.
    ///
    /// `None` when the template ends in a literal segment, `Some("")` when it
    /// ends in a parameter the path item does not declare.
    pub param_name: Option<String>,
    /// Lower-case HTTP method
    pub method: String,
    pub operation_desc: Option<String>,
    pub response_desc: Option<String>,
    pub mime_type: String,
    pub status_code: String,
}

impl RouteBlock {
    /// The parameter to thread through the handler, if there is a usable one.
    pub fn handler_param(&self) -> Option<&str> {
        self.param_name.as_deref().filter(|name| !name.is_empty())
    }
}

/// Produces one [`RouteBlock`] per method, status code and content type.
///
/// Blocks are ordered method-major, then by status code, then by content type,
/// each in document declaration order. Missing responses or content simply
/// produce no blocks for that branch.
pub fn expand_operations(pattern: &str, item: &PathItem) -> Vec<RouteBlock> {
    let param_name = match Segment::parse(base_segment(pattern)) {
        Segment::Param(_) => Some(effective_name(pattern, item)),
        Segment::Literal(_) => None,
    };

    let mut blocks = Vec::new();

    for (method, operation) in item.operations() {
        if operation.responses.is_empty() {
            debug!("{} {} declares no responses", method, pattern);
        }

        for (code, response) in &operation.responses {
            for mime_type in response.content.keys() {
                blocks.push(RouteBlock {
                    route_path: pattern.to_string(),
                    param_name: param_name.clone(),
                    method: method.to_string(),
                    operation_desc: operation.description.clone(),
                    response_desc: response.description.clone(),
                    mime_type: mime_type.clone(),
                    status_code: code.clone(),
                });
            }
        }
    }

    debug!("Expanded {} into {} route blocks", pattern, blocks.len());
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{OperationObject, ParameterDescriptor, ResponseObject};

    fn response(mimes: &[&str]) -> ResponseObject {
        let mut response = ResponseObject {
            description: Some("described".to_string()),
            ..Default::default()
        };
        for mime in mimes {
            response
                .content
                .insert(mime.to_string(), serde_yaml::Value::Null);
        }
        response
    }

    fn operation(responses: &[(&str, &[&str])]) -> OperationObject {
        let mut op = OperationObject {
            description: Some("an operation".to_string()),
            ..Default::default()
        };
        for (code, mimes) in responses {
            op.responses.insert(code.to_string(), response(mimes));
        }
        op
    }

    #[test]
    fn test_two_codes_two_types_give_four_blocks() {
        let item = PathItem::new(
            vec![],
            vec![(
                "get",
                operation(&[
                    ("200", &["application/json", "text/plain"]),
                    ("404", &["application/json", "text/html"]),
                ]),
            )],
        );

        let blocks = expand_operations("/things", &item);

        let leaves: Vec<_> = blocks
            .iter()
            .map(|b| (b.status_code.as_str(), b.mime_type.as_str()))
            .collect();
        assert_eq!(
            leaves,
            vec![
                ("200", "application/json"),
                ("200", "text/plain"),
                ("404", "application/json"),
                ("404", "text/html"),
            ]
        );
        assert!(blocks.iter().all(|b| b.param_name.is_none()));
        assert!(blocks.iter().all(|b| b.method == "get"));
    }

    #[test]
    fn test_methods_keep_declaration_order() {
        let item = PathItem::new(
            vec![],
            vec![
                ("post", operation(&[("201", &["application/json"])])),
                ("get", operation(&[("200", &["application/json"])])),
                ("delete", operation(&[("204", &["text/plain"])])),
            ],
        );

        let methods: Vec<_> = expand_operations("/things", &item)
            .into_iter()
            .map(|b| b.method)
            .collect();
        assert_eq!(methods, vec!["post", "get", "delete"]);
    }

    #[test]
    fn test_empty_branches_produce_nothing() {
        let item = PathItem::new(
            vec![],
            vec![
                ("get", operation(&[])),
                ("put", operation(&[("200", &[])])),
            ],
        );

        assert!(expand_operations("/things", &item).is_empty());
        assert!(expand_operations("/things", &PathItem::default()).is_empty());
    }

    #[test]
    fn test_declared_path_parameter_is_carried() {
        let item = PathItem::new(
            vec![ParameterDescriptor {
                location: "path".to_string(),
                name: "itemId".to_string(),
            }],
            vec![("get", operation(&[("200", &["application/json"])]))],
        );

        let blocks = expand_operations("/items/{itemId}", &item);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].param_name.as_deref(), Some("itemId"));
        assert_eq!(blocks[0].handler_param(), Some("itemId"));
        assert_eq!(blocks[0].operation_desc.as_deref(), Some("an operation"));
        assert_eq!(blocks[0].response_desc.as_deref(), Some("described"));
    }

    #[test]
    fn test_undeclared_path_parameter_is_empty() {
        let item = PathItem::new(
            vec![],
            vec![("get", operation(&[("200", &["application/json"])]))],
        );

        let blocks = expand_operations("/items/{itemId}", &item);

        assert_eq!(blocks[0].param_name.as_deref(), Some(""));
        assert_eq!(blocks[0].handler_param(), None);
    }
}
