//! This library provides:
//! - JsonNode: An ordered JSON document model which can be parsed from and rendered back to text
//! - JsonTag: A low-level JSON tag parser which reads JSON tags from an instance which implements trait std::io::Read
//! - JsonEditor: Reads, writes, renames or deletes values addressed by dot-separated paths such as `address.city`
//!
//! Every leaf written through the editor is stored as a string with its double quotes escaped.
//! Key order is preserved by all edits, renames included.
//!
//! Note: Path segments are object keys only, array indexes are not supported.

mod peekable_codepoints;
mod json_tag;
mod json_node;
mod json_path;
mod escape;
mod error;
mod options;
mod editor;
mod accessor;
mod rename;
mod mutation;

pub use crate::json_tag::JsonTag;
pub use crate::json_node::{
    JsonNode,
    JsonObjProp,
    MAX_NESTING_DEPTH,
};
pub use crate::json_path::JsonPath;
pub use crate::escape::escape;
pub use crate::error::{
    EditError,
    EditResult,
};
pub use crate::options::{
    EditOptions,
    RenameCollision,
    WritePolicy,
};
pub use crate::editor::JsonEditor;
