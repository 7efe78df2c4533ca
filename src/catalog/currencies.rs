//! Country → currency lookup table.
//!
//! The source file holds a single mapping literal keyed by upper-case
//! country name, e.g. `{'PORTUGAL': 'Euro', 'JAPAN': 'Yen'}`. Both quote
//! styles, `#` comments and a trailing comma are accepted. Values are
//! taken as-is; unquoted scalars keep their literal text.

use super::CatalogError;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct CurrencyTable {
    entries: HashMap<String, String>,
}

impl CurrencyTable {
    /// Parse the text of a currency file.
    pub fn parse(text: &str) -> Result<Self, CatalogError> {
        let entries = LiteralParser::new(text).mapping()?;
        Ok(entries.into_iter().collect())
    }

    /// Read and parse a currency file, surfacing read and parse errors.
    pub fn try_load(path: &Path) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Read a currency file, degrading to an empty table on failure.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(table) => {
                tracing::debug!(path = %path.display(), entries = table.len(), "currency table loaded");
                table
            }
            Err(e) => {
                tracing::warn!(error = %e, "currency table unavailable, relying on reference data only");
                Self::default()
            }
        }
    }

    /// Case-insensitive lookup by country name.
    pub fn get(&self, country: &str) -> Option<&str> {
        self.entries
            .get(&country.trim().to_uppercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CurrencyTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(k, v)| (k.into().to_uppercase(), v.into()))
            .collect();
        Self { entries }
    }
}

// ─── Mapping literal parser ──────────────────────────────────────

struct LiteralParser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> LiteralParser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn error(&self, reason: impl Into<String>) -> CatalogError {
        CatalogError::Parse {
            offset: self.pos,
            reason: reason.into(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_trivia(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
            } else if c == '#' {
                while let Some(c) = self.bump() {
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn expect(&mut self, want: char) -> Result<(), CatalogError> {
        self.skip_trivia();
        match self.peek() {
            Some(c) if c == want => {
                self.bump();
                Ok(())
            }
            Some(c) => Err(self.error(format!("expected '{}', found '{}'", want, c))),
            None => Err(self.error(format!("expected '{}', found end of input", want))),
        }
    }

    fn mapping(mut self) -> Result<Vec<(String, String)>, CatalogError> {
        let mut out = Vec::new();
        self.expect('{')?;
        loop {
            self.skip_trivia();
            if self.peek() == Some('}') {
                self.bump();
                break;
            }
            let key = self.string()?;
            self.expect(':')?;
            let value = self.value()?;
            out.push((key, value));

            self.skip_trivia();
            match self.bump() {
                Some(',') => continue,
                Some('}') => break,
                Some(c) => return Err(self.error(format!("expected ',' or '}}', found '{}'", c))),
                None => return Err(self.error("unterminated mapping")),
            }
        }
        self.skip_trivia();
        if self.pos < self.src.len() {
            return Err(self.error("trailing content after mapping"));
        }
        Ok(out)
    }

    fn value(&mut self) -> Result<String, CatalogError> {
        self.skip_trivia();
        match self.peek() {
            Some('\'') | Some('"') => self.string(),
            Some(_) => {
                let start = self.pos;
                while let Some(c) = self.peek() {
                    if c == ',' || c == '}' || c.is_whitespace() {
                        break;
                    }
                    self.bump();
                }
                if self.pos == start {
                    return Err(self.error("empty value"));
                }
                Ok(self.src[start..self.pos].to_string())
            }
            None => Err(self.error("expected value, found end of input")),
        }
    }

    fn string(&mut self) -> Result<String, CatalogError> {
        self.skip_trivia();
        let quote = match self.bump() {
            Some(q @ ('\'' | '"')) => q,
            Some(c) => return Err(self.error(format!("expected string, found '{}'", c))),
            None => return Err(self.error("expected string, found end of input")),
        };
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some(c) => out.push(c),
                    None => return Err(self.error("unterminated escape")),
                },
                Some(c) if c == quote => return Ok(out),
                Some('\n') | None => return Err(self.error("unterminated string")),
                Some(c) => out.push(c),
            }
        }
    }
}
