use crate::char::is_bin_digit;
use crate::char::is_dec_digit;
use crate::char::is_hex_digit;
use crate::char::is_id_continue;
use crate::char::is_id_start;
use crate::char::is_line_terminator;
use crate::char::is_oct_digit;
use crate::char::is_whitespace;
use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;
use ahash::HashMap;
use aho_corasick::AhoCorasick;
use aho_corasick::AhoCorasickBuilder;
use aho_corasick::AhoCorasickKind;
use aho_corasick::Anchored;
use aho_corasick::Input;
use aho_corasick::MatchKind;
use aho_corasick::StartKind;
use core::ops::Index;
use memchr::memchr3;
use memchr::memmem;
use once_cell::sync::Lazy;


/// How to interpret characters that are ambiguous without parser context.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum LexMode {
  SlashIsRegex,
  Standard,
  /// Resume a template literal after the `}` closing a substitution.
  TemplateStrContinue,
}

pub struct Lexer<'a> {
  source: &'a str,
  next: usize,
}

impl<'a> Lexer<'a> {
  pub fn new(source: &'a str) -> Lexer<'a> {
    Lexer { source, next: 0 }
  }

  pub fn source(&self) -> &'a str {
    self.source
  }

  /// Moves to an arbitrary byte offset, which must be a token boundary.
  pub fn set_next(&mut self, next: usize) {
    self.next = next;
  }

  pub fn source_range(&self) -> Loc {
    Loc(0, self.source.len())
  }

  fn rest(&self) -> &'a str {
    &self.source[self.next..]
  }

  fn char_at(&self, n: usize) -> Option<char> {
    self.rest().chars().nth(n)
  }

  fn advance(&mut self, bytes: usize) {
    self.next = (self.next + bytes).min(self.source.len());
  }

  fn advance_char(&mut self) -> Option<char> {
    let c = self.char_at(0)?;
    self.next += c.len_utf8();
    Some(c)
  }

  fn eat(&mut self, c: char) -> bool {
    let matched = self.rest().starts_with(c);
    if matched {
      self.next += c.len_utf8();
    }
    matched
  }

  /// Returns the number of bytes consumed.
  fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
    let rest = self.rest();
    let len = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
    self.next += len;
    len
  }

  /// Skips whitespace and comments. Returns whether a line terminator was skipped.
  fn skip_trivia(&mut self) -> bool {
    let mut crossed_line = false;
    loop {
      let rest = self.rest();
      if rest.starts_with("//") {
        self.eat_while(|c| !is_line_terminator(c));
      } else if let Some(body) = rest.strip_prefix("/*") {
        // An unterminated comment swallows the rest of the source.
        let len = memmem::find(body.as_bytes(), b"*/").map_or(body.len(), |end| end + 2);
        crossed_line |= body[..len].contains(is_line_terminator);
        self.advance(2 + len);
      } else {
        match rest.chars().next() {
          Some(c) if is_line_terminator(c) => {
            crossed_line = true;
            self.advance(c.len_utf8());
          }
          Some(c) if is_whitespace(c) => self.advance(c.len_utf8()),
          _ => return crossed_line,
        }
      }
    }
  }

  fn scan_token(&mut self, mode: LexMode) -> Option<TT> {
    let c = self.char_at(0)?;
    match c {
      c if is_id_start(c) => Some(self.scan_identifier()),
      '0'..='9' => Some(self.scan_number()),
      '.' if self.char_at(1).is_some_and(is_dec_digit) => Some(self.scan_number()),
      '"' | '\'' => self.scan_string(c),
      '`' => {
        self.advance(1);
        self.scan_template_part()
      }
      '/' if mode == LexMode::SlashIsRegex => self.scan_regex(),
      _ => self.scan_punctuator().or_else(|| {
        // Includes `#`, as private names are not part of the supported grammar.
        self.advance(c.len_utf8());
        Some(TT::Invalid)
      }),
    }
  }

  fn scan_identifier(&mut self) -> TT {
    let start = self.next;
    self.eat_while(is_id_continue);
    keyword(&self.source[start..self.next]).unwrap_or(TT::Identifier)
  }

  fn scan_number(&mut self) -> TT {
    let radix_digit: Option<fn(char) -> bool> = match (self.char_at(0), self.char_at(1)) {
      (Some('0'), Some('b' | 'B')) => Some(is_bin_digit),
      (Some('0'), Some('o' | 'O')) => Some(is_oct_digit),
      (Some('0'), Some('x' | 'X')) => Some(is_hex_digit),
      _ => None,
    };
    if let Some(is_digit) = radix_digit {
      self.advance(2);
      if self.eat_while(is_digit) == 0 {
        return TT::Invalid;
      }
      return if self.eat('n') {
        TT::LiteralBigInt
      } else {
        TT::LiteralNumber
      };
    }

    self.eat_while(is_dec_digit);
    if self.eat('n') {
      return TT::LiteralBigInt;
    }
    if self.eat('.') {
      self.eat_while(is_dec_digit);
    }
    if self.eat('e') || self.eat('E') {
      if !self.eat('+') {
        self.eat('-');
      }
      if self.eat_while(is_dec_digit) == 0 {
        return TT::Invalid;
      }
    }
    TT::LiteralNumber
  }

  fn scan_string(&mut self, quote: char) -> Option<TT> {
    self.advance(1);
    loop {
      let rest = self.rest().as_bytes();
      let stop = memchr3(b'\\', b'\n', quote as u8, rest).unwrap_or(rest.len());
      self.advance(stop);
      match self.advance_char()? {
        '\\' => {
          // Covers line continuations too.
          self.advance_char()?;
        }
        '\n' => return Some(TT::Invalid),
        _ => return Some(TT::LiteralString),
      }
    }
  }

  /// Scans up to and including the next `${` or closing backtick.
  fn scan_template_part(&mut self) -> Option<TT> {
    loop {
      let rest = self.rest().as_bytes();
      let stop = memchr3(b'\\', b'`', b'$', rest).unwrap_or(rest.len());
      self.advance(stop);
      match self.advance_char()? {
        '\\' => {
          self.advance_char()?;
        }
        '`' => return Some(TT::LiteralTemplatePartStringEnd),
        _ => {
          if self.eat('{') {
            return Some(TT::LiteralTemplatePartString);
          }
        }
      }
    }
  }

  // TODO Reject unknown and repeated flags.
  fn scan_regex(&mut self) -> Option<TT> {
    self.advance(1);
    let mut in_class = false;
    loop {
      match self.advance_char()? {
        '\\' => {
          if is_line_terminator(self.advance_char()?) {
            return Some(TT::Invalid);
          }
        }
        '/' if !in_class => break,
        '[' => in_class = true,
        ']' => in_class = false,
        c if is_line_terminator(c) => return Some(TT::Invalid),
        _ => {}
      }
    }
    self.eat_while(is_id_continue);
    Some(TT::LiteralRegex)
  }

  fn scan_punctuator(&mut self) -> Option<TT> {
    let m = PUNCTUATOR_MATCHER.find(Input::new(self.rest()).anchored(Anchored::Yes))?;
    let (_, mut typ) = PUNCTUATORS[m.pattern().as_usize()];
    let mut len = m.end();
    // `a?.5:b` is a conditional with a decimal, not an optional chain.
    if typ == TT::QuestionDot && self.char_at(2).is_some_and(is_dec_digit) {
      typ = TT::Question;
      len = 1;
    }
    self.advance(len);
    Some(typ)
  }
}

impl<'a> Index<Loc> for Lexer<'a> {
  type Output = str;

  fn index(&self, index: Loc) -> &Self::Output {
    &self.source[index.0..index.1]
  }
}

#[rustfmt::skip]
static PUNCTUATORS: &[(&str, TT)] = &[
  ("&", TT::Ampersand), ("&&", TT::AmpersandAmpersand), ("&&=", TT::AmpersandAmpersandEquals),
  ("&=", TT::AmpersandEquals), ("*", TT::Asterisk), ("**", TT::AsteriskAsterisk),
  ("**=", TT::AsteriskAsteriskEquals), ("*=", TT::AsteriskEquals), ("|", TT::Bar),
  ("||", TT::BarBar), ("||=", TT::BarBarEquals), ("|=", TT::BarEquals), ("}", TT::BraceClose),
  ("{", TT::BraceOpen), ("]", TT::BracketClose), ("[", TT::BracketOpen), ("^", TT::Caret),
  ("^=", TT::CaretEquals), ("<", TT::ChevronLeft), ("<<", TT::ChevronLeftChevronLeft),
  ("<<=", TT::ChevronLeftChevronLeftEquals), ("<=", TT::ChevronLeftEquals),
  (">", TT::ChevronRight), (">>", TT::ChevronRightChevronRight),
  (">>>", TT::ChevronRightChevronRightChevronRight),
  (">>>=", TT::ChevronRightChevronRightChevronRightEquals),
  (">>=", TT::ChevronRightChevronRightEquals), (">=", TT::ChevronRightEquals), (":", TT::Colon),
  (",", TT::Comma), (".", TT::Dot), ("...", TT::DotDotDot), ("=", TT::Equals),
  ("=>", TT::EqualsChevronRight), ("==", TT::EqualsEquals), ("===", TT::EqualsEqualsEquals),
  ("!", TT::Exclamation), ("!=", TT::ExclamationEquals), ("!==", TT::ExclamationEqualsEquals),
  ("-", TT::Hyphen), ("-=", TT::HyphenEquals), ("--", TT::HyphenHyphen),
  (")", TT::ParenthesisClose), ("(", TT::ParenthesisOpen), ("%", TT::Percent),
  ("%=", TT::PercentEquals), ("+", TT::Plus), ("+=", TT::PlusEquals), ("++", TT::PlusPlus),
  ("?", TT::Question), ("?.", TT::QuestionDot), ("?.[", TT::QuestionDotBracketOpen),
  ("?.(", TT::QuestionDotParenthesisOpen), ("??", TT::QuestionQuestion),
  ("??=", TT::QuestionQuestionEquals), (";", TT::Semicolon), ("/", TT::Slash),
  ("/=", TT::SlashEquals), ("~", TT::Tilde),
];

static PUNCTUATOR_MATCHER: Lazy<AhoCorasick> = Lazy::new(|| {
  AhoCorasickBuilder::new()
    .start_kind(StartKind::Anchored)
    .kind(Some(AhoCorasickKind::DFA))
    .match_kind(MatchKind::LeftmostLongest)
    .build(PUNCTUATORS.iter().map(|&(text, _)| text))
    .expect("punctuator table must compile")
});

#[rustfmt::skip]
static KEYWORDS: &[(&str, TT)] = &[
  ("as", TT::KeywordAs), ("async", TT::KeywordAsync), ("await", TT::KeywordAwait),
  ("break", TT::KeywordBreak), ("case", TT::KeywordCase), ("catch", TT::KeywordCatch),
  ("class", TT::KeywordClass), ("const", TT::KeywordConst), ("continue", TT::KeywordContinue),
  ("debugger", TT::KeywordDebugger), ("default", TT::KeywordDefault),
  ("delete", TT::KeywordDelete), ("do", TT::KeywordDo), ("else", TT::KeywordElse),
  ("enum", TT::KeywordEnum), ("export", TT::KeywordExport), ("extends", TT::KeywordExtends),
  ("finally", TT::KeywordFinally), ("for", TT::KeywordFor), ("from", TT::KeywordFrom),
  ("function", TT::KeywordFunction), ("get", TT::KeywordGet), ("if", TT::KeywordIf),
  ("import", TT::KeywordImport), ("in", TT::KeywordIn), ("instanceof", TT::KeywordInstanceof),
  ("let", TT::KeywordLet), ("new", TT::KeywordNew), ("of", TT::KeywordOf),
  ("return", TT::KeywordReturn), ("set", TT::KeywordSet), ("static", TT::KeywordStatic),
  ("super", TT::KeywordSuper), ("switch", TT::KeywordSwitch), ("this", TT::KeywordThis),
  ("throw", TT::KeywordThrow), ("try", TT::KeywordTry), ("typeof", TT::KeywordTypeof),
  ("var", TT::KeywordVar), ("void", TT::KeywordVoid), ("while", TT::KeywordWhile),
  ("with", TT::KeywordWith), ("yield", TT::KeywordYield), ("false", TT::LiteralFalse),
  ("null", TT::LiteralNull), ("true", TT::LiteralTrue),
];

static KEYWORD_LOOKUP: Lazy<HashMap<&'static str, TT>> =
  Lazy::new(|| KEYWORDS.iter().copied().collect());

/// The keyword token spelled by `name`, if any.
pub fn keyword(name: &str) -> Option<TT> {
  KEYWORD_LOOKUP.get(name).copied()
}

pub fn is_keyword(typ: TT) -> bool {
  KEYWORDS.iter().any(|&(_, kw)| kw == typ)
}

/// Whether `name` is a keyword that can never be used as a variable name.
pub fn is_reserved_word(name: &str) -> bool {
  keyword(name).is_some_and(|tt| !tt.is_binding_identifier())
}

pub fn lex_next(lexer: &mut Lexer<'_>, mode: LexMode) -> Token {
  let preceded_by_line_terminator = mode != LexMode::TemplateStrContinue && lexer.skip_trivia();
  let start = lexer.next;
  let typ = if mode == LexMode::TemplateStrContinue {
    lexer.scan_template_part().unwrap_or(TT::Invalid)
  } else if lexer.next >= lexer.source.len() {
    TT::EOF
  } else {
    lexer.scan_token(mode).unwrap_or(TT::Invalid)
  };
  Token {
    loc: Loc(start, lexer.next),
    typ,
    preceded_by_line_terminator,
  }
}
