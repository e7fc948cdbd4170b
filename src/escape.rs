/// Prefixes every double quote with a backslash.
///
/// Every leaf written through the editor is stored in this form.
pub fn escape(raw: &str) -> String {
    raw.replace('"', "\\\"")
}
