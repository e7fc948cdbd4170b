//! Order preserving key rename.

use tracing::debug;

use crate::accessor::resolve_mut;
use crate::editor::JsonEditor;
use crate::error::*;
use crate::json_node::*;
use crate::json_path::JsonPath;
use crate::options::RenameCollision;

impl JsonEditor {
    /// Renames the last key of `path` inside its parent object.
    ///
    /// The entry stays where it was among its siblings and keeps its value.
    /// The parent is edited in place, the same way at the root as anywhere
    /// deeper. A sibling that already uses `new_key` is handled according to
    /// `EditOptions::rename_collision`.
    pub fn rename(&self, doc: &mut JsonNode, path: &str, new_key: &str) -> EditResult<()> {
        let json_path = JsonPath::parse(path);
        let (parents, old_key) = json_path.split_last();
        let not_found = || EditError::PathNotFound { path: path.to_string() };

        let props = resolve_mut(doc, parents)
            .and_then(JsonNode::as_object_mut)
            .ok_or_else(not_found)?;
        let mut i = JsonObjProp::find(props, old_key).ok_or_else(not_found)?;

        if old_key == new_key {
            return Ok(());
        }

        if let Some(taken_i) = JsonObjProp::find(props, new_key) {
            match self.options().rename_collision {
                RenameCollision::Reject => {
                    return Err(EditError::KeyExists { path: json_path.parent(), key: new_key.to_string() });
                }
                RenameCollision::Overwrite => {
                    debug!(path, new_key, "rename drops the sibling already using the new key");
                    props.remove(taken_i);
                    if taken_i < i {
                        i -= 1;
                    }
                }
            }
        }

        props[i].name = new_key.to_string();
        Ok(())
    }
}
