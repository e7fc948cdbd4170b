//! update / add / delete on top of the path accessor.

use crate::accessor::{
    resolve,
    resolve_mut,
};
use crate::editor::JsonEditor;
use crate::error::*;
use crate::escape::escape;
use crate::json_node::*;
use crate::json_path::JsonPath;

impl JsonEditor {
    /// Overwrites the value at `path` only if something is already there.
    pub fn update_value(&self, doc: &mut JsonNode, path: &str, new_value: &str) -> EditResult<()> {
        let json_path = JsonPath::parse(path);
        if resolve(doc, json_path.segments()).is_none() {
            return Err(EditError::PathNotFound { path: path.to_string() });
        }

        self.write_node(doc, &json_path, JsonNode::PlainString(escape(new_value)))
    }

    /// Adds `key` to the object at `path`, the document itself when `path` is empty.
    pub fn add_key_value(&self, doc: &mut JsonNode, path: &str, key: &str, new_value: &str) -> EditResult<()> {
        let target = if path.is_empty() {
            Some(doc)
        } else {
            resolve_mut(doc, JsonPath::parse(path).segments())
        };

        let target = match target {
            None => return Err(EditError::PathNotFound { path: path.to_string() }),
            Some(node) if node.is_array() => return Err(EditError::TargetIsArray { path: path.to_string() }),
            Some(node) => node,
        };
        if target.contains_key(key) {
            return Err(EditError::KeyExists { path: path.to_string(), key: key.to_string() });
        }

        let props = target
            .as_object_mut()
            .ok_or_else(|| EditError::NotAnObject { path: path.to_string() })?;
        props.push(JsonObjProp::new(key, JsonNode::PlainString(escape(new_value))));
        Ok(())
    }

    pub fn delete_key(&self, doc: &mut JsonNode, path: &str) -> EditResult<()> {
        if self.read(doc, path).is_none() {
            return Err(EditError::PathNotFound { path: path.to_string() });
        }

        self.delete_nested(doc, path)
    }
}
