use std::fmt;
use std::io::Read;

use anyhow::Result;

use crate::peekable_codepoints::*;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum JsonTag {
    LeftCurly,
    RightCurly,
    LeftSquare,
    RightSquare,
    Colon,
    Comma,
    Literal(String),
}

impl JsonTag {
    fn punctuation(c: char) -> Option<JsonTag> {
        match c {
            '{' => Some(JsonTag::LeftCurly),
            '}' => Some(JsonTag::RightCurly),
            '[' => Some(JsonTag::LeftSquare),
            ']' => Some(JsonTag::RightSquare),
            ',' => Some(JsonTag::Comma),
            ':' => Some(JsonTag::Colon),
            _ => None,
        }
    }

    /// Counts the chars of the literal starting at the head of the buffer.
    fn literal_len<R>(peekable_cp: &mut PeekableCodePoints<R>) -> Result<usize>
        where R: Read
    {
        let mut end = 0;
        let mut quote = None;
        let mut is_escape = false;
        let mut quote_as_literal = false;
        while let Some(c) = peekable_cp.peek_char(end)? {
            match c {
                '\\' if !is_escape => {
                    is_escape = true;

                    end += 1;
                    continue;
                }

                '\'' | '"' if !is_escape && !quote_as_literal => {
                    match quote {
                        None => quote = Some(c),
                        Some(q) if q == c => quote = None,
                        _ => (),
                    }
                }

                // unterminated quote: rescan with quotes as plain chars
                '\r' | '\n' if quote.is_some() => {
                    quote_as_literal = true;

                    quote = None;
                    is_escape = false;

                    end = 0;
                    continue;
                }

                c if c.is_whitespace() && quote.is_none() => break,

                '{' | '}' | '[' | ']' | ',' | ':' if !is_escape && quote.is_none() => break,

                _ => (),
            }

            is_escape = false;
            end += 1;
        }

        Ok(end)
    }

    pub fn next_tag<R>(peekable_cp: &mut PeekableCodePoints<R>) -> Result<Option<JsonTag>>
        where R: Read
    {
        loop {
            let c = match peekable_cp.peek_char(0)? {
                None => return Ok(None),
                Some(c) => c,
            };

            if c.is_whitespace() {
                peekable_cp.skip(1)?;
                continue;
            }

            if let Some(json_tag) = JsonTag::punctuation(c) {
                peekable_cp.skip(1)?;
                return Ok(Some(json_tag));
            }

            let len = JsonTag::literal_len(peekable_cp)?;
            let literal = peekable_cp.pop(len)?;
            return Ok(Some(JsonTag::Literal(literal)));
        }
    }

    pub fn tokenize<R>(reader: R) -> Result<Vec<JsonTag>>
        where R: Read
    {
        let mut json_tag_list = Vec::new();
        let mut peekable_cp = PeekableCodePoints::new(reader);
        while let Some(json_tag) = JsonTag::next_tag(&mut peekable_cp)? {
            json_tag_list.push(json_tag);
        }

        Ok(json_tag_list)
    }

    /// Joins tags back into text, for error messages.
    pub fn render(json_tags: &[JsonTag]) -> String {
        json_tags
            .iter()
            .map(|json_tag| json_tag.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for JsonTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonTag::LeftCurly => f.write_str("{"),
            JsonTag::RightCurly => f.write_str("}"),
            JsonTag::LeftSquare => f.write_str("["),
            JsonTag::RightSquare => f.write_str("]"),
            JsonTag::Colon => f.write_str(":"),
            JsonTag::Comma => f.write_str(","),
            JsonTag::Literal(literal) => f.write_str(literal),
        }
    }
}
