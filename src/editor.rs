//! The editor and the bool/`Option` shorthand on `JsonNode`.
//!
//! `JsonEditor` reports every failure as an `EditError`. The shorthand
//! methods run a default editor and fold the result: only `add_key_value`
//! and `delete_key` log a diagnostic, the rest fail silently.

use tracing::{
    debug,
    warn,
};

use crate::json_node::*;
use crate::options::*;

/// Applies dot-path edits to a document under a set of `EditOptions`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEditor {
    options: EditOptions,
}

impl JsonEditor {
    pub fn new(options: EditOptions) -> Self {
        JsonEditor {
            options
        }
    }

    pub fn options(&self) -> &EditOptions {
        &self.options
    }
}

impl JsonNode {
    /// Value at `path`, or `None` as soon as a segment is missing or not an object.
    pub fn read(&self, path: &str) -> Option<&JsonNode> {
        JsonEditor::default().read(self, path)
    }

    /// Stores the escaped `value` at `path`, creating intermediate objects.
    pub fn write(&mut self, path: &str, value: &str) {
        if let Err(err) = JsonEditor::default().write(self, path, value) {
            debug!(%err, "write skipped");
        }
    }

    /// Removes the key at `path`; no-op when absent.
    pub fn delete_nested(&mut self, path: &str) {
        if let Err(err) = JsonEditor::default().delete_nested(self, path) {
            debug!(%err, "nothing to delete");
        }
    }

    pub fn rename(&mut self, path: &str, new_key: &str) -> bool {
        JsonEditor::default().rename(self, path, new_key).is_ok()
    }

    pub fn update_value(&mut self, path: &str, new_value: &str) -> bool {
        JsonEditor::default().update_value(self, path, new_value).is_ok()
    }

    pub fn add_key_value(&mut self, path: &str, key: &str, new_value: &str) -> bool {
        match JsonEditor::default().add_key_value(self, path, key, new_value) {
            Ok(()) => true,
            Err(err) => {
                warn!(%err, "cannot add key {:?}", key);
                false
            }
        }
    }

    pub fn delete_key(&mut self, path: &str) -> bool {
        match JsonEditor::default().delete_key(self, path) {
            Ok(()) => true,
            Err(err) => {
                warn!(%err, "cannot delete key");
                false
            }
        }
    }
}

#[cfg(test)]
mod editor_tests {
    use std::fmt;
    use std::sync::{
        Arc,
        Mutex,
    };

    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use tracing::field::{
        Field,
        Visit,
    };
    use tracing::{
        Event,
        Level,
        Subscriber,
    };
    use tracing_subscriber::layer::{
        Context,
        Layer,
        SubscriberExt,
    };

    use super::*;

    /// Records the level and rendered fields of every event.
    #[derive(Clone, Default)]
    struct CapturedEvents(Arc<Mutex<Vec<(Level, String)>>>);

    struct FieldsVisitor(String);

    impl Visit for FieldsVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            if !self.0.is_empty() {
                self.0.push(' ');
            }
            self.0.push_str(&format!("{}={:?}", field.name(), value));
        }
    }

    impl<S: Subscriber> Layer<S> for CapturedEvents {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut visitor = FieldsVisitor(String::new());
            event.record(&mut visitor);
            self.0.lock().expect("events lock").push((*event.metadata().level(), visitor.0));
        }
    }

    fn warnings_from<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
        let events = CapturedEvents::default();
        let subscriber = tracing_subscriber::registry().with(events.clone());
        let out = tracing::subscriber::with_default(subscriber, f);

        let captured = events.0.lock().expect("events lock");
        let warnings = captured
            .iter()
            .filter(|(level, _)| *level == Level::WARN)
            .map(|(_, fields)| fields.clone())
            .collect();
        (out, warnings)
    }

    fn john() -> Result<JsonNode> {
        r#"{"name": "John", "address": {"street": "123 Main St", "city": "Anytown"}}"#.parse()
    }

    #[test]
    fn test_rename_scenario() -> Result<()> {
        let mut doc = john()?;
        assert!(doc.rename("address.street", "streetAddress"));
        assert_eq!(
            doc.read("address").map(JsonNode::to_string),
            Some(String::from(r#"{"streetAddress":"123 Main St","city":"Anytown"}"#))
        );
        Ok(())
    }

    #[test]
    fn test_add_key_value_scenario() -> Result<()> {
        let mut doc = john()?;
        assert!(doc.add_key_value("address", "zip", "123\"45"));
        assert_eq!(doc.read("address.zip").and_then(JsonNode::as_str), Some("123\\\"45"));
        Ok(())
    }

    #[test]
    fn test_add_key_value_at_root_once() -> Result<()> {
        let mut doc = john()?;
        assert!(doc.add_key_value("", "newKey", "v"));
        assert_eq!(doc.keys(), vec!["name", "address", "newKey"]);

        let before = doc.clone();
        assert!(!doc.add_key_value("", "newKey", "other"));
        assert_eq!(doc, before);
        Ok(())
    }

    #[test]
    fn test_update_value_only_when_present() -> Result<()> {
        let mut doc = john()?;
        assert!(doc.update_value("address.city", "Other \"Town\""));
        assert_eq!(doc.read("address.city").and_then(JsonNode::as_str), Some("Other \\\"Town\\\""));

        let before = doc.clone();
        assert!(!doc.update_value("address.zip", "12345"));
        assert!(!doc.update_value("phone.home", "555"));
        assert_eq!(doc, before);
        Ok(())
    }

    #[test]
    fn test_delete_key() -> Result<()> {
        let mut doc = john()?;
        assert!(doc.delete_key("address.street"));
        assert_eq!(doc.read("address.street"), None);
        assert_eq!(doc.read("address").map(JsonNode::keys), Some(vec!["city"]));

        let before = doc.clone();
        assert!(!doc.delete_key("address.street"));
        assert_eq!(doc, before);
        Ok(())
    }

    #[test]
    fn test_write_then_read() {
        let mut doc = JsonNode::object();
        doc.write("a.b.c", "v\"1");
        assert_eq!(doc.read("a.b.c").and_then(JsonNode::as_str), Some("v\\\"1"));
        assert!(doc.read("a").map_or(false, JsonNode::is_object));
        assert!(doc.read("a.b").map_or(false, JsonNode::is_object));
    }

    #[test]
    fn test_delete_nested_absent_is_noop() -> Result<()> {
        let mut doc = john()?;
        let before = doc.clone();
        doc.delete_nested("address.zip");
        doc.delete_nested("phone.home");
        assert_eq!(doc, before);

        doc.delete_nested("name");
        assert_eq!(doc.keys(), vec!["address"]);
        Ok(())
    }

    #[test]
    fn test_rename_missing_leaves_doc_unchanged() -> Result<()> {
        let mut doc = john()?;
        let before = doc.clone();
        assert!(!doc.rename("address.zip", "postcode"));
        assert!(!doc.rename("phone.home", "landline"));
        assert_eq!(doc, before);
        Ok(())
    }

    #[test]
    fn test_add_and_delete_failures_warn() -> Result<()> {
        let mut doc = john()?;

        let (added, warnings) = warnings_from(|| doc.add_key_value("address", "city", "Elsewhere"));
        assert!(!added);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains(r#"key "city" already exists at "address""#), "{}", warnings[0]);

        let (added, warnings) = warnings_from(|| doc.add_key_value("name", "first", "John"));
        assert!(!added);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("is not an object"), "{}", warnings[0]);

        let (deleted, warnings) = warnings_from(|| doc.delete_key("address.zip"));
        assert!(!deleted);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains(r#"path not found: "address.zip""#), "{}", warnings[0]);
        Ok(())
    }

    #[test]
    fn test_other_failures_stay_quiet() -> Result<()> {
        let mut doc = john()?;

        let (results, warnings) = warnings_from(|| {
            let renamed = doc.rename("address.zip", "postcode");
            let updated = doc.update_value("address.zip", "12345");
            doc.delete_nested("address.zip");
            (renamed, updated, doc.read("address.zip").is_some())
        });
        assert_eq!(results, (false, false, false));
        assert!(warnings.is_empty(), "{:?}", warnings);

        let (added, warnings) = warnings_from(|| doc.add_key_value("address", "zip", "12345"));
        assert!(added);
        assert!(warnings.is_empty(), "{:?}", warnings);
        Ok(())
    }

    #[test]
    fn test_editor_options_are_kept() {
        let editor = JsonEditor::new(EditOptions::strict());
        assert_eq!(editor.options(), &EditOptions::strict());
        assert_eq!(JsonEditor::default().options(), &EditOptions::new());
    }
}
