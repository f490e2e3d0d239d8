//! Static description of the node and its credential, as shown to the host.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

pub const NODE_NAME: &str = "notionSetIcon";
pub const CREDENTIAL_NAME: &str = "notionSetIconApi";
pub const RESOURCE_PAGE: &str = "page";
pub const OPERATION_SET_ICON: &str = "setIcon";

pub const PARAM_RESOURCE: &str = "resource";
pub const PARAM_OPERATION: &str = "operation";
pub const PARAM_PAGE_ID: &str = "pageId";
pub const PARAM_ICON_SOURCE: &str = "iconSource";
pub const PARAM_ICON_URL: &str = "iconUrl";
pub const PARAM_BINARY_PROPERTY: &str = "binaryPropertyName";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    String,
    Options,
}

/// One choice of an `options` parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionValue {
    pub name: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl OptionValue {
    fn new(name: &str, value: &str, description: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            description: description.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSpec {
    pub name: String,
    pub display_name: String,
    #[serde(rename = "type")]
    pub kind: ParameterKind,
    pub required: bool,
    pub default: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionValue>,
    /// Parameter is only shown (and only required) when every listed
    /// parameter has one of the listed values.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub show_when: BTreeMap<String, Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub description: String,
}

impl ParameterSpec {
    /// Returns true if the parameter applies given the other parameters' values.
    pub fn is_shown(&self, lookup: impl Fn(&str) -> Option<String>) -> bool {
        self.show_when.iter().all(|(name, allowed)| {
            lookup(name).is_some_and(|value| allowed.iter().any(|a| *a == value))
        })
    }
}

/// Everything the host needs to render and wire up the node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescription {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub version: u32,
    pub credentials: Vec<String>,
    pub properties: Vec<ParameterSpec>,
}

impl NodeDescription {
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Default value of a parameter as a string, if it has a non-empty one.
    #[must_use]
    pub fn default_str(&self, name: &str) -> Option<&str> {
        self.parameter(name)
            .and_then(|p| p.default.as_str())
            .filter(|s| !s.is_empty())
    }
}

/// `show_when` map with one allowed value per parameter.
fn show(pairs: &[(&str, &str)]) -> BTreeMap<String, Vec<String>> {
    pairs
        .iter()
        .map(|(name, value)| ((*name).to_string(), vec![(*value).to_string()]))
        .collect()
}

/// Describes the `setIcon` node.
#[must_use]
pub fn node_description() -> NodeDescription {
    let set_icon = [
        (PARAM_RESOURCE, RESOURCE_PAGE),
        (PARAM_OPERATION, OPERATION_SET_ICON),
    ];

    NodeDescription {
        name: NODE_NAME.to_string(),
        display_name: "Notion Set Icon".to_string(),
        description: "Set custom icons for Notion pages".to_string(),
        version: 1,
        credentials: vec![CREDENTIAL_NAME.to_string()],
        properties: vec![
            ParameterSpec {
                name: PARAM_RESOURCE.to_string(),
                display_name: "Resource".to_string(),
                kind: ParameterKind::Options,
                required: false,
                default: Value::from(RESOURCE_PAGE),
                options: vec![OptionValue::new("Page", RESOURCE_PAGE, None)],
                show_when: BTreeMap::new(),
                placeholder: None,
                description: String::new(),
            },
            ParameterSpec {
                name: PARAM_OPERATION.to_string(),
                display_name: "Operation".to_string(),
                kind: ParameterKind::Options,
                required: false,
                default: Value::from(OPERATION_SET_ICON),
                options: vec![OptionValue::new(
                    "Set Icon",
                    OPERATION_SET_ICON,
                    Some("Set a custom icon for a Notion page"),
                )],
                show_when: show(&[(PARAM_RESOURCE, RESOURCE_PAGE)]),
                placeholder: None,
                description: String::new(),
            },
            ParameterSpec {
                name: PARAM_PAGE_ID.to_string(),
                display_name: "Page ID".to_string(),
                kind: ParameterKind::String,
                required: true,
                default: Value::from(""),
                options: Vec::new(),
                show_when: show(&set_icon),
                placeholder: Some("214c413b-2a68-800f-9f9a-d234e37d1380".to_string()),
                description: "The ID of the Notion page. Can be extracted from the page URL."
                    .to_string(),
            },
            ParameterSpec {
                name: PARAM_ICON_SOURCE.to_string(),
                display_name: "Icon Source".to_string(),
                kind: ParameterKind::Options,
                required: true,
                default: Value::from("url"),
                options: vec![
                    OptionValue::new("URL", "url", Some("Use an external image URL")),
                    OptionValue::new("Upload File", "upload", Some("Upload a local image file")),
                ],
                show_when: show(&set_icon),
                placeholder: None,
                description: "Choose whether to use an external URL or upload a local file"
                    .to_string(),
            },
            ParameterSpec {
                name: PARAM_ICON_URL.to_string(),
                display_name: "Icon URL".to_string(),
                kind: ParameterKind::String,
                required: true,
                default: Value::from(""),
                options: Vec::new(),
                show_when: show(&[
                    (PARAM_RESOURCE, RESOURCE_PAGE),
                    (PARAM_OPERATION, OPERATION_SET_ICON),
                    (PARAM_ICON_SOURCE, "url"),
                ]),
                placeholder: Some("https://example.com/icon.png".to_string()),
                description: "URL of the image to use as the page icon".to_string(),
            },
            ParameterSpec {
                name: PARAM_BINARY_PROPERTY.to_string(),
                display_name: "Input Binary Field".to_string(),
                kind: ParameterKind::String,
                required: true,
                default: Value::from("data"),
                options: Vec::new(),
                show_when: show(&[
                    (PARAM_RESOURCE, RESOURCE_PAGE),
                    (PARAM_OPERATION, OPERATION_SET_ICON),
                    (PARAM_ICON_SOURCE, "upload"),
                ]),
                placeholder: None,
                description: "Name of the binary property containing the image file".to_string(),
            },
        ],
    }
}

/// A field of the credential form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialField {
    pub name: String,
    pub display_name: String,
    pub secret: bool,
    pub required: bool,
    pub description: String,
}

/// Request the host can issue to check a credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialTest {
    pub method: String,
    /// Path relative to the API base URL.
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialDescription {
    pub name: String,
    pub display_name: String,
    pub properties: Vec<CredentialField>,
    pub test: CredentialTest,
}

/// Describes the `notionSetIconApi` credential.
#[must_use]
pub fn credential_description() -> CredentialDescription {
    let field = |name: &str, display_name: &str, secret: bool, description: &str| CredentialField {
        name: name.to_string(),
        display_name: display_name.to_string(),
        secret,
        required: true,
        description: description.to_string(),
    };

    CredentialDescription {
        name: CREDENTIAL_NAME.to_string(),
        display_name: "Notion Set Icon API".to_string(),
        properties: vec![
            field(
                "tokenV2",
                "Token V2",
                true,
                "Your Notion token_v2 cookie value, from the browser's developer tools while logged in.",
            ),
            field("spaceId", "Space ID", false, "Your Notion workspace space ID."),
            field("userId", "User ID", false, "Your Notion user ID."),
        ],
        test: CredentialTest {
            method: "POST".to_string(),
            path: "/loadUserContent".to_string(),
        },
    }
}
