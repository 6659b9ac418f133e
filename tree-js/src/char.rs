//! Character classes shared by the lexer and by identifier validation in analysis passes.
//!
//! Non-ASCII characters are classified with Unicode's alphabetic/alphanumeric properties, which is
//! looser than ID_Start/ID_Continue but never rejects a valid identifier.

pub fn is_dec_digit(c: char) -> bool {
  c.is_ascii_digit()
}

pub fn is_bin_digit(c: char) -> bool {
  matches!(c, '0' | '1')
}

pub fn is_oct_digit(c: char) -> bool {
  matches!(c, '0'..='7')
}

pub fn is_hex_digit(c: char) -> bool {
  c.is_ascii_hexdigit()
}

/// Whether `c` may begin an identifier.
pub fn is_id_start(c: char) -> bool {
  match c {
    'a'..='z' | 'A'..='Z' | '$' | '_' => true,
    c if c.is_ascii() => false,
    c => c.is_alphabetic(),
  }
}

/// Whether `c` may appear after the first character of an identifier.
pub fn is_id_continue(c: char) -> bool {
  is_id_start(c) || c.is_ascii_digit() || (!c.is_ascii() && c.is_alphanumeric())
}

pub fn is_line_terminator(c: char) -> bool {
  matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Whitespace other than line terminators.
pub fn is_whitespace(c: char) -> bool {
  matches!(
    c,
    '\t'
      | '\u{0b}'
      | '\u{0c}'
      | ' '
      | '\u{a0}'
      | '\u{1680}'
      | '\u{2000}'..='\u{200a}'
      | '\u{202f}'
      | '\u{205f}'
      | '\u{3000}'
      | '\u{feff}'
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn identifier_characters() {
    assert!(is_id_start('$'));
    assert!(is_id_start('é'));
    assert!(!is_id_start('1'));
    assert!(is_id_continue('1'));
    assert!(!is_id_continue('-'));
  }

  #[test]
  fn whitespace_excludes_line_terminators() {
    assert!(is_whitespace('\u{feff}'));
    assert!(!is_whitespace('\n'));
    assert!(is_line_terminator('\u{2028}'));
  }
}
