use std::collections::VecDeque;
use std::io::{
    Bytes,
    Read,
};

use anyhow::{
    Result,
    Error,
};
use unicode_reader::CodePoints;

/// Lookahead buffer over the unicode code points of a reader.
pub struct PeekableCodePoints<R>
    where R: Read
{
    codepoints: CodePoints<Bytes<R>>,
    lookahead: VecDeque<char>,
}

impl<R: Read> PeekableCodePoints<R> {
    pub fn new(reader: R) -> Self {
        PeekableCodePoints {
            codepoints: CodePoints::from(reader),
            lookahead: VecDeque::new(),
        }
    }

    /// Reads until `wanted` chars are buffered or the reader is exhausted.
    fn fill(&mut self, wanted: usize) -> Result<()> {
        while self.lookahead.len() < wanted {
            match self.codepoints.next() {
                None => break,
                Some(Err(e)) => return Err(Error::new(e)),
                Some(Ok(c)) => self.lookahead.push_back(c),
            }
        }

        Ok(())
    }

    pub fn peek_char(&mut self, index: usize) -> Result<Option<char>> {
        self.fill(index + 1)?;

        Ok(self.lookahead.get(index).copied())
    }

    pub fn skip(&mut self, count: usize) -> Result<usize> {
        self.fill(count)?;
        let actual_count = count.min(self.lookahead.len());
        self.lookahead.drain(..actual_count);

        Ok(actual_count)
    }

    pub fn pop(&mut self, count: usize) -> Result<String> {
        self.fill(count)?;
        let actual_count = count.min(self.lookahead.len());

        Ok(self.lookahead.drain(..actual_count).collect())
    }
}
