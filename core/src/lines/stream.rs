use std::borrow::Cow;

use crate::config::NonAsciiPolicy;

use super::{LineError, PathLine, REPORTED_PREFIX_CHARS, is_terminator};

/// Splits decoded text into path lines
///
/// `\r`, `\n` and `\r\n` all end a line. A NUL byte ends the whole stream.
pub struct LineStream<'a> {
    source: &'a [u8],
    index: usize,
    line: usize,
    max_len: usize,
    non_ascii: NonAsciiPolicy,
}

impl<'a> LineStream<'a> {
    pub fn new(source: &'a [u8], max_len: usize, non_ascii: NonAsciiPolicy) -> Self {
        Self {
            source,
            index: 0,
            line: 0,
            max_len,
            non_ascii,
        }
    }
}

impl<'a> LineStream<'a> {
    pub fn parse_next(&mut self) -> Result<Option<PathLine<'a>>, LineError> {
        let start = self.index;
        match self.source.get(start) {
            None | Some(b'\0') => {
                self.index = self.source.len();
                return Ok(None);
            }
            Some(_) => {}
        }
        let end = self.source[start..]
            .iter()
            .position(|&b| is_terminator(b))
            .map_or(self.source.len(), |offset| start + offset);
        self.index = match self.source.get(end) {
            Some(b'\r') if self.source.get(end + 1) == Some(&b'\n') => end + 2,
            Some(b'\r' | b'\n') => end + 1,
            // NUL or end of input, nothing follows
            _ => self.source.len(),
        };
        self.line += 1;
        let raw = &self.source[start..end];
        let text = self.line_text(raw);
        if text.len() > self.max_len {
            return Err(LineError::TooLong {
                line: self.line,
                len: text.len(),
                max: self.max_len,
                start: text.chars().take(REPORTED_PREFIX_CHARS).collect(),
            });
        }
        Ok(Some(PathLine {
            number: self.line,
            text,
        }))
    }

    /// Drops stray bytes, the line itself is always kept
    fn line_text(&self, raw: &'a [u8]) -> Cow<'a, str> {
        match self.non_ascii {
            NonAsciiPolicy::Passthrough => match std::str::from_utf8(raw) {
                Ok(text) => Cow::Borrowed(text),
                // Keep valid sequences, drop whatever isn't UTF-8
                Err(_) => Cow::Owned(raw.utf8_chunks().map(|chunk| chunk.valid()).collect()),
            },
            NonAsciiPolicy::Strip if raw.is_ascii() => String::from_utf8_lossy(raw),
            NonAsciiPolicy::Strip => Cow::Owned(
                raw.iter()
                    .filter(|b| b.is_ascii())
                    .map(|&b| char::from(b))
                    .collect(),
            ),
        }
    }
}

impl<'a> Iterator for LineStream<'a> {
    type Item = Result<PathLine<'a>, LineError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.parse_next().transpose()
    }
}
