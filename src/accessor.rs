//! Path based read, write and delete.

use tracing::trace;

use crate::editor::JsonEditor;
use crate::error::*;
use crate::escape::escape;
use crate::json_node::*;
use crate::json_path::JsonPath;
use crate::options::WritePolicy;

pub(crate) fn resolve<'a>(doc: &'a JsonNode, segments: &[String]) -> Option<&'a JsonNode> {
    segments.iter().try_fold(doc, |node, segment| node.get(segment))
}

pub(crate) fn resolve_mut<'a>(doc: &'a mut JsonNode, segments: &[String]) -> Option<&'a mut JsonNode> {
    segments.iter().try_fold(doc, |node, segment| node.get_mut(segment))
}

impl JsonEditor {
    pub fn read<'a>(&self, doc: &'a JsonNode, path: &str) -> Option<&'a JsonNode> {
        resolve(doc, JsonPath::parse(path).segments())
    }

    pub fn write(&self, doc: &mut JsonNode, path: &str, value: &str) -> EditResult<()> {
        self.write_node(doc, &JsonPath::parse(path), JsonNode::PlainString(escape(value)))
    }

    pub fn delete_nested(&self, doc: &mut JsonNode, path: &str) -> EditResult<()> {
        let json_path = JsonPath::parse(path);
        let (parents, key) = json_path.split_last();
        let removed = resolve_mut(doc, parents)
            .and_then(JsonNode::as_object_mut)
            .and_then(|props| JsonObjProp::remove(props, key));

        match removed {
            Some(_) => Ok(()),
            None => Err(EditError::PathNotFound { path: path.to_string() }),
        }
    }

    /// Stores `value` as is, walking and creating parents per the write policy.
    pub(crate) fn write_node(&self, doc: &mut JsonNode, json_path: &JsonPath, value: JsonNode) -> EditResult<()> {
        if self.options().write_policy == WritePolicy::Strict {
            self.check_writable(doc, json_path)?;
        }

        let (parents, key) = json_path.split_last();
        let mut current = self.ensure_object(doc, json_path, 0)?;
        for (depth, segment) in parents.iter().enumerate() {
            let i = match JsonObjProp::find(current, segment) {
                Some(i) => i,
                None => {
                    current.push(JsonObjProp::new(segment.as_str(), JsonNode::object()));
                    current.len() - 1
                }
            };
            current = self.ensure_object(&mut current[i].value, json_path, depth + 1)?;
        }

        JsonObjProp::upsert(current, key, value);
        Ok(())
    }

    /// Fails on the first existing non-object along the parents, before anything is touched.
    fn check_writable(&self, doc: &JsonNode, json_path: &JsonPath) -> EditResult<()> {
        let (parents, _) = json_path.split_last();
        let mut current = doc;
        for depth in 0..=parents.len() {
            if !current.is_object() {
                return Err(EditError::NotAnObject { path: json_path.prefix(depth) });
            }
            current = match parents.get(depth).and_then(|segment| current.get(segment)) {
                Some(child) => child,
                None => break,
            };
        }

        Ok(())
    }

    fn ensure_object<'a>(&self, node: &'a mut JsonNode, json_path: &JsonPath, depth: usize) -> EditResult<&'a mut Vec<JsonObjProp>> {
        if !node.is_object() {
            trace!(path = %json_path.prefix(depth), "replacing non-object with an empty object");
            *node = JsonNode::object();
        }

        node.as_object_mut()
            .ok_or_else(|| EditError::NotAnObject { path: json_path.prefix(depth) })
    }
}
