use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::token::TT;
use memchr::memchr_iter;
use serde::Serialize;

/// A location within the current source file expressed as UTF-8 byte offsets.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize)]
pub struct Loc(pub usize, pub usize);

impl Loc {
  pub fn error(self, typ: SyntaxErrorType, actual_token: Option<TT>) -> SyntaxError {
    SyntaxError::new(typ, self, actual_token)
  }

  pub fn is_empty(&self) -> bool {
    self.0 >= self.1
  }

  pub fn len(&self) -> usize {
    self.1.saturating_sub(self.0)
  }
}

/// A human-facing position: 1-based line, 0-based column counted in characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize)]
pub struct LineCol {
  pub line: usize,
  pub column: usize,
}

/// Byte offsets of every line start in a source file, for converting offsets into [`LineCol`].
#[derive(Clone, Debug, Default)]
pub struct LineIndex {
  // Always starts with 0 once built from a source.
  line_starts: Vec<usize>,
}

impl LineIndex {
  pub fn new(source: &str) -> LineIndex {
    let mut line_starts = vec![0];
    // Only `\n` starts a line; `\r\n` works because the `\r` stays on the line it ends.
    line_starts.extend(memchr_iter(b'\n', source.as_bytes()).map(|pos| pos + 1));
    LineIndex { line_starts }
  }

  /// Offsets past the end of `source` are clamped to it.
  pub fn line_col(&self, source: &str, offset: usize) -> LineCol {
    let offset = offset.min(source.len());
    let line = match self.line_starts.binary_search(&offset) {
      Ok(exact) => exact,
      Err(next) => next.saturating_sub(1),
    };
    let line_start = self.line_starts.get(line).copied().unwrap_or(0);
    let column = source
      .get(line_start..offset)
      .map(|text| text.chars().count())
      .unwrap_or(offset - line_start);
    LineCol {
      line: line + 1,
      column,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn line_col_counts_lines_from_one_and_columns_from_zero() {
    let source = "let a;\nfoo(a);\n\n  bar";
    let index = LineIndex::new(source);
    assert_eq!(index.line_count(), 4);
    assert_eq!(index.line_col(source, 0), LineCol { line: 1, column: 0 });
    assert_eq!(index.line_col(source, 4), LineCol { line: 1, column: 4 });
    assert_eq!(index.line_col(source, 7), LineCol { line: 2, column: 0 });
    assert_eq!(index.line_col(source, 11), LineCol { line: 2, column: 4 });
    assert_eq!(index.line_col(source, 18), LineCol { line: 4, column: 2 });
    assert_eq!(index.line_col(source, 1000), LineCol { line: 4, column: 5 });
  }

  #[test]
  fn line_col_columns_are_in_characters() {
    let source = "'é'; x";
    let index = LineIndex::new(source);
    assert_eq!(index.line_col(source, source.len() - 1), LineCol { line: 1, column: 5 });
  }
}
