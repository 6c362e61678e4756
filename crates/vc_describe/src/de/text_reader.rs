use crate::error::{Found, ReadError};

// -----------------------------------------------------------------------------
// TextReader

/// A recursive-descent tokenizer over JSON-like text.
///
/// Space, tab, carriage return and line feed are skipped between tokens.
/// Strings have no escape sequences: a backslash inside a string is an
/// error. Numbers are returned as text and parsed by the target type.
///
/// # Examples
///
/// ```
/// use vc_describe::TextReader;
///
/// let mut reader = TextReader::new(r#"{ "a": 1, "b": [2, 3] }"#);
/// let mut seen = Vec::new();
///
/// reader
///     .read_map(|reader, key| {
///         match key {
///             "a" => seen.push(reader.read_number()?),
///             _ => reader.read_sequence(|reader| {
///                 seen.push(reader.read_number()?);
///                 Ok(())
///             })?,
///         }
///         Ok(())
///     })
///     .unwrap();
///
/// reader.finish().unwrap();
/// assert_eq!(seen, ["1", "2", "3"]);
/// ```
#[derive(Debug, Clone)]
pub struct TextReader<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> TextReader<'a> {
    #[inline]
    pub const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Returns the byte offset of the next unread character.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.pos
    }

    /// Returns the unread input.
    #[inline]
    pub fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    pub fn skip_whitespace(&mut self) {
        let rest = self.remaining();
        let trimmed = rest.trim_start_matches([' ', '\t', '\r', '\n']);
        self.pos += rest.len() - trimmed.len();
    }

    /// Returns the next non-whitespace character without consuming it.
    pub fn peek(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.remaining().chars().next()
    }

    /// Consumes `expected` if it is the next non-whitespace character.
    pub fn consume_if(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consumes `expected`, failing if anything else comes next.
    pub fn expect(&mut self, expected: char) -> Result<(), ReadError> {
        if self.consume_if(expected) {
            Ok(())
        } else {
            Err(ReadError::Expected {
                expected,
                found: Found::from(self.peek()),
                offset: self.pos,
            })
        }
    }

    /// Reads a quoted string and returns its contents.
    pub fn read_str(&mut self) -> Result<&'a str, ReadError> {
        self.expect('"')?;
        let start = self.pos;
        let rest = self.remaining();

        match rest.find(['"', '\\']) {
            Some(len) if rest[len..].starts_with('"') => {
                self.pos += len + 1;
                Ok(&rest[..len])
            }
            Some(len) => Err(ReadError::EscapeSequence { offset: start + len }),
            None => Err(ReadError::UnterminatedString { offset: start - 1 }),
        }
    }

    /// Reads the text of a number literal.
    ///
    /// The literal is the longest run of digits, signs, `.`, `e` and `E`;
    /// whether it is a valid number is up to the caller.
    pub fn read_number(&mut self) -> Result<&'a str, ReadError> {
        self.skip_whitespace();
        let rest = self.remaining();
        let len = rest
            .find(|c: char| !matches!(c, '0'..='9' | '+' | '-' | '.' | 'e' | 'E'))
            .unwrap_or(rest.len());

        if len == 0 {
            return Err(ReadError::ExpectedNumber {
                found: Found::from(rest.chars().next()),
                offset: self.pos,
            });
        }

        self.pos += len;
        Ok(&rest[..len])
    }

    /// Reads a map, calling `member` with each key.
    ///
    /// `member` must consume exactly the value that follows the key.
    pub fn read_map<F>(&mut self, mut member: F) -> Result<(), ReadError>
    where
        F: FnMut(&mut Self, &'a str) -> Result<(), ReadError>,
    {
        self.expect('{')?;
        let mut first = true;
        while !self.consume_if('}') {
            if !first {
                self.expect(',')?;
            }
            let key = self.read_str()?;
            self.expect(':')?;
            member(self, key)?;
            first = false;
        }
        Ok(())
    }

    /// Reads a sequence, calling `element` once per element.
    pub fn read_sequence<F>(&mut self, mut element: F) -> Result<(), ReadError>
    where
        F: FnMut(&mut Self) -> Result<(), ReadError>,
    {
        self.expect('[')?;
        let mut first = true;
        while !self.consume_if(']') {
            if !first {
                self.expect(',')?;
            }
            element(self)?;
            first = false;
        }
        Ok(())
    }

    /// Checks that nothing but whitespace is left.
    pub fn finish(&mut self) -> Result<(), ReadError> {
        self.skip_whitespace();
        if self.pos == self.input.len() {
            Ok(())
        } else {
            Err(ReadError::TrailingCharacters { offset: self.pos })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TextReader;
    use crate::error::{Found, ReadError};

    #[test]
    fn whitespace_is_insignificant() {
        let mut reader = TextReader::new(" \t\r\n\"a\" \n");
        assert_eq!(reader.peek(), Some('"'));
        assert_eq!(reader.offset(), 4);
        assert_eq!(reader.read_str(), Ok("a"));
        assert_eq!(reader.finish(), Ok(()));
    }

    #[test]
    fn strings() {
        let mut reader = TextReader::new(r#""" "ünï" "#);
        assert_eq!(reader.read_str(), Ok(""));
        assert_eq!(reader.read_str(), Ok("ünï"));

        let mut reader = TextReader::new(r#""foo\"bar""#);
        assert_eq!(
            reader.read_str(),
            Err(ReadError::EscapeSequence { offset: 4 })
        );

        let mut reader = TextReader::new(r#"  "open"#);
        assert_eq!(
            reader.read_str(),
            Err(ReadError::UnterminatedString { offset: 2 })
        );

        let mut reader = TextReader::new("foo");
        assert_eq!(
            reader.read_str(),
            Err(ReadError::Expected {
                expected: '"',
                found: Found::Char('f'),
                offset: 0,
            })
        );
    }

    #[test]
    fn numbers() {
        let mut reader = TextReader::new("-12,3.5e-2]");
        assert_eq!(reader.read_number(), Ok("-12"));
        reader.expect(',').unwrap();
        assert_eq!(reader.read_number(), Ok("3.5e-2"));
        assert_eq!(reader.peek(), Some(']'));

        let mut reader = TextReader::new("  ");
        assert_eq!(
            reader.read_number(),
            Err(ReadError::ExpectedNumber {
                found: Found::End,
                offset: 2,
            })
        );
    }

    #[test]
    fn maps_and_sequences() {
        let mut reader = TextReader::new(r#"{"k": [], "l": [1 , 2]} {}"#);
        let mut keys = alloc::vec::Vec::new();
        reader
            .read_map(|reader, key| {
                keys.push(key);
                reader.read_sequence(|reader| reader.read_number().map(drop))
            })
            .unwrap();
        assert_eq!(keys, ["k", "l"]);

        reader.read_map(|_, _| unreachable!()).unwrap();
        assert_eq!(reader.finish(), Ok(()));
    }

    #[test]
    fn structural_errors() {
        let err = TextReader::new(r#"{"a" 1}"#)
            .read_map(|r, _| r.read_number().map(drop))
            .unwrap_err();
        assert_eq!(
            err,
            ReadError::Expected {
                expected: ':',
                found: Found::Char('1'),
                offset: 5,
            }
        );

        let err = TextReader::new(r#"{"a": 1 "b": 2}"#)
            .read_map(|r, _| r.read_number().map(drop))
            .unwrap_err();
        assert!(matches!(err, ReadError::Expected { expected: ',', .. }));

        let err = TextReader::new(r#"{"a": 1,}"#)
            .read_map(|r, _| r.read_number().map(drop))
            .unwrap_err();
        assert!(matches!(err, ReadError::Expected { expected: '"', .. }));

        let err = TextReader::new("[1, 2").read_sequence(|r| r.read_number().map(drop));
        assert!(matches!(
            err,
            Err(ReadError::Expected {
                expected: ',',
                found: Found::End,
                ..
            })
        ));

        let mut reader = TextReader::new("1 2");
        reader.read_number().unwrap();
        assert_eq!(
            reader.finish(),
            Err(ReadError::TrailingCharacters { offset: 2 })
        );
    }
}
