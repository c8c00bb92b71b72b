//! Ordered metadata records and their object-notation serializer.
//!
//! [`Record`] is an explicit insertion-ordered mapping from string keys to
//! tagged values (string, boolean or nested record), built field by field —
//! including fields whose names come from data, like per-dependency
//! constraints. Serialization order equals insertion order, so re-serializing
//! the same record is byte-identical across runs.
//!
//! String values are emitted without internal escaping; the caller must make
//! sure values contain no unescaped quote or control characters. This is a
//! deliberate minimalism of the format, kept as-is.

use std::fmt::Write as _;

/// A tagged record value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A string, emitted wrapped in double quotes.
    Str(String),
    /// A boolean, emitted as literal `true`/`false`.
    Bool(bool),
    /// A nested record, emitted on its own line, indented one step deeper.
    Record(Record),
}

/// An insertion-ordered string-keyed record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a string field.
    pub fn insert_str(&mut self, key: &str, value: impl Into<String>) {
        self.fields.push((key.to_owned(), Value::Str(value.into())));
    }

    /// Append a boolean field.
    pub fn insert_bool(&mut self, key: &str, value: bool) {
        self.fields.push((key.to_owned(), Value::Bool(value)));
    }

    /// Append a nested record field.
    pub fn insert_record(&mut self, key: &str, value: Record) {
        self.fields.push((key.to_owned(), Value::Record(value)));
    }

    /// Whether the record holds no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Serialize the record with no outer indentation.
    ///
    /// No trailing newline is appended; an empty record serializes to a
    /// brace pair with no field lines.
    #[must_use]
    pub fn serialize(&self) -> String {
        self.serialize_indented("")
    }

    /// Serialize the record with the given indentation prefix.
    ///
    /// The opening brace starts in place; each field line is indented two
    /// spaces deeper than `indent`; the closing brace aligns with the
    /// opening one.
    #[must_use]
    pub fn serialize_indented(&self, indent: &str) -> String {
        let mut out = String::from("{");
        let field_indent = format!("{indent}  ");
        let count = self.fields.len();
        for (i, (key, value)) in self.fields.iter().enumerate() {
            out.push('\n');
            out.push_str(&field_indent);
            let _ = write!(out, "\"{key}\":");
            match value {
                Value::Str(s) => {
                    let _ = write!(out, " \"{s}\"");
                }
                Value::Bool(b) => {
                    let _ = write!(out, " {b}");
                }
                Value::Record(record) => {
                    out.push('\n');
                    out.push_str(&field_indent);
                    out.push_str(&record.serialize_indented(&field_indent));
                }
            }
            if i + 1 < count {
                out.push(',');
            }
        }
        out.push('\n');
        out.push_str(indent);
        out.push('}');
        out
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_record_is_a_bare_brace_pair() {
        assert_eq!(Record::new().serialize(), "{\n}");
    }

    #[test]
    fn single_string_field() {
        let mut record = Record::new();
        record.insert_str("name", "signal");
        assert_eq!(record.serialize(), "{\n  \"name\": \"signal\"\n}");
    }

    #[test]
    fn booleans_are_bare_literals() {
        let mut record = Record::new();
        record.insert_bool("has_news", true);
        record.insert_bool("has_demos", false);
        assert_eq!(
            record.serialize(),
            "{\n  \"has_news\": true,\n  \"has_demos\": false\n}"
        );
    }

    #[test]
    fn fields_emit_in_insertion_order() {
        let mut record = Record::new();
        record.insert_str("zeta", "1");
        record.insert_str("alpha", "2");
        let serialized = record.serialize();
        assert!(serialized.find("zeta").unwrap() < serialized.find("alpha").unwrap());
    }

    #[test]
    fn nested_record_opens_on_its_own_line() {
        let mut deps = Record::new();
        deps.insert_str("core", ">= 7.1.0");
        deps.insert_str("control", "");
        let mut record = Record::new();
        record.insert_str("name", "signal");
        record.insert_record("depends", deps);
        record.insert_bool("has_news", false);

        let expected = "{\n\
                        \x20 \"name\": \"signal\",\n\
                        \x20 \"depends\":\n\
                        \x20 {\n\
                        \x20   \"core\": \">= 7.1.0\",\n\
                        \x20   \"control\": \"\"\n\
                        \x20 },\n\
                        \x20 \"has_news\": false\n\
                        }";
        assert_eq!(record.serialize(), expected);
    }

    #[test]
    fn nested_empty_record_keeps_alignment() {
        let mut record = Record::new();
        record.insert_record("depends", Record::new());
        assert_eq!(record.serialize(), "{\n  \"depends\":\n  {\n  }\n}");
    }

    #[test]
    fn double_nesting_indents_two_spaces_per_level() {
        let mut inner = Record::new();
        inner.insert_str("version", "1.0");
        let mut middle = Record::new();
        middle.insert_record("core", inner);
        let mut record = Record::new();
        record.insert_record("depends", middle);

        let serialized = record.serialize();
        assert!(serialized.contains("\n      \"version\": \"1.0\"\n"));
    }

    #[test]
    fn serialization_is_idempotent() {
        let mut record = Record::new();
        record.insert_str("name", "signal");
        record.insert_bool("has_index", true);
        assert_eq!(record.serialize(), record.serialize());
    }

    #[test]
    fn serializer_output_parses_as_json() {
        let mut deps = Record::new();
        deps.insert_str("core", ">= 7.1.0");
        let mut record = Record::new();
        record.insert_str("name", "signal");
        record.insert_record("depends", deps);
        record.insert_bool("has_license", true);

        let parsed: serde_json::Value = serde_json::from_str(&record.serialize()).unwrap();
        assert_eq!(parsed["name"], "signal");
        assert_eq!(parsed["depends"]["core"], ">= 7.1.0");
        assert_eq!(parsed["has_license"], true);
    }

    #[test]
    fn no_trailing_newline() {
        let mut record = Record::new();
        record.insert_str("name", "signal");
        assert!(!record.serialize().ends_with('\n'));
    }
}
