//! Workflow host adapter for the page icon node.
//!
//! The node declares one resource (`page`) and one operation (`setIcon`).
//! Hosts expose their runtime through the narrow [`NodeHost`] capability:
//! parameter lookup, a named credential, binary attachments, the lenient
//! "continue on fail" flag and an HTTP transport. [`NotionSetIconNode`]
//! turns each input record into an [`IconRequest`], runs it through the
//! pipeline and returns one [`OutputItem`] per record, in input order.
//!
//! [`IconRequest`]: notion_icon_types::IconRequest

mod description;
mod error;
mod host;
mod memory;
mod node;

pub use description::{
    credential_description, node_description, CredentialDescription, CredentialField,
    CredentialTest, NodeDescription, OptionValue, ParameterKind, ParameterSpec, CREDENTIAL_NAME,
    NODE_NAME, OPERATION_SET_ICON, PARAM_BINARY_PROPERTY, PARAM_ICON_SOURCE, PARAM_ICON_URL,
    PARAM_OPERATION, PARAM_PAGE_ID, PARAM_RESOURCE, RESOURCE_PAGE,
};
pub use error::{HostError, ItemError, NodeError, NodeResult};
pub use host::NodeHost;
pub use memory::{MemoryHost, MemoryItem};
pub use node::{NotionSetIconNode, OutputItem, PairedItem};
