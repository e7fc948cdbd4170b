use std::fmt;
use std::io::Read;
use std::str::{
    Chars,
    FromStr,
};

use anyhow::{
    Result,
    bail,
};

use crate::json_tag::*;

/// Deepest bracket nesting the parser accepts.
pub const MAX_NESTING_DEPTH: usize = 128;

#[derive(Debug, Clone, PartialEq)]
pub struct JsonObjProp {
    pub name: String,
    pub value: JsonNode,
}

impl JsonObjProp {
    pub fn new(name: impl Into<String>, value: JsonNode) -> Self {
        JsonObjProp {
            name: name.into(),
            value,
        }
    }

    pub fn find(props: &[JsonObjProp], name: &str) -> Option<usize> {
        props.iter().position(|prop| prop.name == name)
    }

    /// Replaces the value of an existing prop in place, or appends a new one.
    pub fn upsert(props: &mut Vec<JsonObjProp>, name: &str, value: JsonNode) -> Option<JsonNode> {
        match JsonObjProp::find(props, name) {
            Some(i) => Some(std::mem::replace(&mut props[i].value, value)),
            None => {
                props.push(JsonObjProp::new(name, value));
                None
            }
        }
    }

    pub fn remove(props: &mut Vec<JsonObjProp>, name: &str) -> Option<JsonNode> {
        let i = JsonObjProp::find(props, name)?;
        Some(props.remove(i).value)
    }
}

/// A JSON value. Objects keep their props in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonNode {
    PlainNull,
    PlainString(String),
    PlainNumber(String),
    PlainBoolean(bool),
    Array(Vec<JsonNode>),
    Object(Vec<JsonObjProp>),
}

impl Default for JsonNode {
    fn default() -> Self {
        JsonNode::object()
    }
}

impl JsonNode {
    pub fn object() -> Self {
        JsonNode::Object(Vec::new())
    }

    pub fn string(value: impl Into<String>) -> Self {
        JsonNode::PlainString(value.into())
    }

    pub fn is_object(&self) -> bool {
        matches!(self, JsonNode::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, JsonNode::Array(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonNode::PlainString(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&[JsonObjProp]> {
        match self {
            JsonNode::Object(props) => Some(props),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Vec<JsonObjProp>> {
        match self {
            JsonNode::Object(props) => Some(props),
            _ => None,
        }
    }

    /// Looks up a direct child by key. Anything but an object has no children.
    pub fn get(&self, name: &str) -> Option<&JsonNode> {
        let props = self.as_object()?;
        let i = JsonObjProp::find(props, name)?;
        Some(&props[i].value)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut JsonNode> {
        let props = self.as_object_mut()?;
        let i = JsonObjProp::find(props, name)?;
        Some(&mut props[i].value)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.as_object()
            .map(|props| props.iter().map(|prop| prop.name.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn from_reader<R>(reader: R) -> Result<JsonNode>
        where R: Read
    {
        let json_tags = JsonTag::tokenize(reader)?;
        JsonNode::parse_single(&json_tags, 0)
    }

    /// Parses every top level value found in the tags.
    pub fn parse(json_tags: &[JsonTag]) -> Result<Vec<JsonNode>> {
        JsonNode::parse_nodes(json_tags, 0)
    }

    fn parse_nodes(json_tags: &[JsonTag], depth: usize) -> Result<Vec<JsonNode>> {
        let mut i = 0;
        let mut json_nodes = Vec::new();
        while i < json_tags.len() {
            match &json_tags[i] {
                JsonTag::Literal(literal) => {
                    json_nodes.push(JsonNode::parse_plain(literal)?);
                    i += 1;
                }

                JsonTag::LeftCurly | JsonTag::LeftSquare if depth >= MAX_NESTING_DEPTH => {
                    bail!("json nested deeper than {} levels", MAX_NESTING_DEPTH)
                }

                JsonTag::LeftCurly => {
                    let right_curly_i = JsonNode::find_match_tag(json_tags, i, &JsonTag::LeftCurly, &JsonTag::RightCurly)?;
                    json_nodes.push(JsonNode::parse_object(&json_tags[i + 1..right_curly_i], depth + 1)?);
                    i = right_curly_i + 1;
                }

                JsonTag::LeftSquare => {
                    let right_square_i = JsonNode::find_match_tag(json_tags, i, &JsonTag::LeftSquare, &JsonTag::RightSquare)?;
                    json_nodes.push(JsonNode::parse_array(&json_tags[i + 1..right_square_i], depth + 1)?);
                    i = right_square_i + 1;
                }

                other => bail!("unexpected {} in json: {}", other, JsonTag::render(json_tags)),
            }
        }

        Ok(json_nodes)
    }

    fn parse_single(json_tags: &[JsonTag], depth: usize) -> Result<JsonNode> {
        let mut json_nodes = JsonNode::parse_nodes(json_tags, depth)?;
        match json_nodes.len() {
            1 => Ok(json_nodes.remove(0)),
            0 => bail!("expected a json value but found nothing"),
            n => bail!("expected a single json value but found {} in: {}", n, JsonTag::render(json_tags)),
        }
    }

    fn find_match_tag(json_tags: &[JsonTag], start: usize, left_pair_tag: &JsonTag, right_pair_tag: &JsonTag) -> Result<usize> {
        let mut depth = 0;
        for (i, json_tag) in json_tags.iter().enumerate().skip(start) {
            if json_tag == left_pair_tag {
                depth += 1;
            } else if json_tag == right_pair_tag {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            }
        }

        bail!("matching {} not found for json: {}", right_pair_tag, JsonTag::render(&json_tags[start..]))
    }

    /// Splits at commas that are not nested inside brackets.
    fn split_top_level(json_tags: &[JsonTag]) -> Vec<&[JsonTag]> {
        let mut parts = Vec::new();
        let mut depth = 0i32;
        let mut part_start = 0;
        for (i, json_tag) in json_tags.iter().enumerate() {
            match json_tag {
                JsonTag::LeftCurly | JsonTag::LeftSquare => depth += 1,
                JsonTag::RightCurly | JsonTag::RightSquare => depth -= 1,
                JsonTag::Comma if depth == 0 => {
                    parts.push(&json_tags[part_start..i]);
                    part_start = i + 1;
                }
                _ => (),
            }
        }
        parts.push(&json_tags[part_start..]);

        parts
    }

    fn parse_plain(plain_literal: &str) -> Result<JsonNode> {
        match plain_literal {
            "null" => Ok(JsonNode::PlainNull),
            "true" => Ok(JsonNode::PlainBoolean(true)),
            "false" => Ok(JsonNode::PlainBoolean(false)),
            _ if plain_literal.starts_with('"') || plain_literal.starts_with('\'') => {
                Ok(JsonNode::PlainString(JsonNode::unquote(plain_literal)?))
            }
            _ if JsonNode::is_json_number(plain_literal) => {
                Ok(JsonNode::PlainNumber(plain_literal.to_string()))
            }
            _ => bail!("invalid json literal: {}", plain_literal),
        }
    }

    /// `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`
    fn is_json_number(literal: &str) -> bool {
        let bytes = literal.as_bytes();
        let digits = |i: &mut usize| {
            let start = *i;
            while *i < bytes.len() && bytes[*i].is_ascii_digit() {
                *i += 1;
            }
            *i - start
        };

        let mut i = 0;
        if bytes.first() == Some(&b'-') {
            i += 1;
        }
        match bytes.get(i) {
            Some(b'0') => i += 1,
            Some(b'1'..=b'9') => {
                digits(&mut i);
            }
            _ => return false,
        }
        if bytes.get(i) == Some(&b'.') {
            i += 1;
            if digits(&mut i) == 0 {
                return false;
            }
        }
        if matches!(bytes.get(i), Some(b'e') | Some(b'E')) {
            i += 1;
            if matches!(bytes.get(i), Some(b'+') | Some(b'-')) {
                i += 1;
            }
            if digits(&mut i) == 0 {
                return false;
            }
        }

        i == bytes.len()
    }

    fn parse_array(json_tags: &[JsonTag], depth: usize) -> Result<JsonNode> {
        if json_tags.is_empty() {
            return Ok(JsonNode::Array(Vec::new()));
        }

        let mut items = Vec::new();
        for item_tags in JsonNode::split_top_level(json_tags) {
            items.push(JsonNode::parse_single(item_tags, depth)?);
        }

        Ok(JsonNode::Array(items))
    }

    fn parse_object(json_tags: &[JsonTag], depth: usize) -> Result<JsonNode> {
        let mut props = Vec::new();
        if json_tags.is_empty() {
            return Ok(JsonNode::Object(props));
        }

        for prop_tags in JsonNode::split_top_level(json_tags) {
            let name = match prop_tags {
                [JsonTag::Literal(name), JsonTag::Colon, ..] => match JsonNode::parse_plain(name)? {
                    JsonNode::PlainString(name) => name,
                    _ => bail!("object key must be a string: {}", name),
                },
                _ => bail!("expected \"key\": value but found: {}", JsonTag::render(prop_tags)),
            };
            let value = JsonNode::parse_single(&prop_tags[2..], depth)?;

            // duplicate keys: first position, last value
            JsonObjProp::upsert(&mut props, &name, value);
        }

        Ok(JsonNode::Object(props))
    }

    fn unquote(quoted: &str) -> Result<String> {
        let mut chars = quoted.chars();
        let quote = match chars.next() {
            Some(c) => c,
            None => bail!("empty string literal"),
        };

        let mut unquoted = String::new();
        let mut closed = false;
        while let Some(c) = chars.next() {
            if closed {
                bail!("unexpected characters after closing quote in: {}", quoted);
            }

            match c {
                '\\' => {
                    let escaped = match chars.next() {
                        Some('"') => '"',
                        Some('\'') => '\'',
                        Some('\\') => '\\',
                        Some('/') => '/',
                        Some('b') => '\u{8}',
                        Some('f') => '\u{c}',
                        Some('n') => '\n',
                        Some('r') => '\r',
                        Some('t') => '\t',
                        Some('u') => JsonNode::read_unicode_escape(&mut chars, quoted)?,
                        Some(other) => bail!("invalid escape \\{} in: {}", other, quoted),
                        None => bail!("unterminated string: {}", quoted),
                    };
                    unquoted.push(escaped);
                }
                c if c == quote => closed = true,
                c => unquoted.push(c),
            }
        }

        if !closed {
            bail!("unterminated string: {}", quoted);
        }

        Ok(unquoted)
    }

    fn read_hex4(chars: &mut Chars, quoted: &str) -> Result<u32> {
        let mut code = 0;
        for _ in 0..4 {
            match chars.next().and_then(|c| c.to_digit(16)) {
                Some(digit) => code = code * 16 + digit,
                None => bail!("invalid \\u escape in: {}", quoted),
            }
        }

        Ok(code)
    }

    fn read_unicode_escape(chars: &mut Chars, quoted: &str) -> Result<char> {
        let high = JsonNode::read_hex4(chars, quoted)?;
        let code = if (0xD800..0xDC00).contains(&high) {
            if chars.next() != Some('\\') || chars.next() != Some('u') {
                bail!("unpaired surrogate in: {}", quoted);
            }
            let low = JsonNode::read_hex4(chars, quoted)?;
            if !(0xDC00..0xE000).contains(&low) {
                bail!("unpaired surrogate in: {}", quoted);
            }
            0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
        } else {
            high
        };

        match char::from_u32(code) {
            Some(c) => Ok(c),
            None => bail!("invalid code point {:#x} in: {}", code, quoted),
        }
    }

    fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
        f.write_str("\"")?;
        for c in s.chars() {
            match c {
                '"' => f.write_str("\\\"")?,
                '\\' => f.write_str("\\\\")?,
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                '\t' => f.write_str("\\t")?,
                '\u{8}' => f.write_str("\\b")?,
                '\u{c}' => f.write_str("\\f")?,
                c if c.is_control() => write!(f, "\\u{:04x}", c as u32)?,
                c => write!(f, "{}", c)?,
            }
        }
        f.write_str("\"")
    }

    fn write_json(&self, f: &mut fmt::Formatter<'_>, indent: Option<usize>) -> fmt::Result {
        let newline = |f: &mut fmt::Formatter<'_>, depth: usize| -> fmt::Result {
            match indent {
                Some(_) => write!(f, "\n{}", "  ".repeat(depth)),
                None => Ok(()),
            }
        };
        let depth = indent.unwrap_or(0);
        let child_indent = indent.map(|depth| depth + 1);

        match self {
            JsonNode::PlainNull => f.write_str("null"),
            JsonNode::PlainBoolean(b) => write!(f, "{}", b),
            JsonNode::PlainNumber(n) => f.write_str(n),
            JsonNode::PlainString(s) => JsonNode::write_quoted(f, s),
            JsonNode::Array(items) if items.is_empty() => f.write_str("[]"),
            JsonNode::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    newline(f, depth + 1)?;
                    item.write_json(f, child_indent)?;
                }
                newline(f, depth)?;
                f.write_str("]")
            }
            JsonNode::Object(props) if props.is_empty() => f.write_str("{}"),
            JsonNode::Object(props) => {
                f.write_str("{")?;
                for (i, prop) in props.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    newline(f, depth + 1)?;
                    JsonNode::write_quoted(f, &prop.name)?;
                    f.write_str(if indent.is_some() { ": " } else { ":" })?;
                    prop.value.write_json(f, child_indent)?;
                }
                newline(f, depth)?;
                f.write_str("}")
            }
        }
    }

    /// Renders with two space indentation.
    pub fn to_pretty_string(&self) -> String {
        struct Pretty<'a>(&'a JsonNode);

        impl fmt::Display for Pretty<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.write_json(f, Some(0))
            }
        }

        Pretty(self).to_string()
    }
}

impl fmt::Display for JsonNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_json(f, None)
    }
}

impl FromStr for JsonNode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        JsonNode::from_reader(s.as_bytes())
    }
}
