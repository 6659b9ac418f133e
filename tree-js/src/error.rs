use crate::loc::Loc;
use crate::token::TT;
use core::fmt;
use core::fmt::Debug;
use core::fmt::Display;
use core::fmt::Formatter;
use std::error::Error;

/// What went wrong during parsing. Every variant has a stable `PS` code, see [`Self::code`].
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SyntaxErrorType {
  /// Carries a description of what was expected, e.g. "identifier".
  ExpectedSyntax(&'static str),
  InvalidAssignmentTarget,
  LineTerminatorAfterArrowFunctionParameters,
  LineTerminatorAfterThrow,
  LineTerminatorInRegex,
  LineTerminatorInString,
  RequiredTokenNotFound(TT),
  TryStatementHasNoCatchOrFinally,
  UnexpectedEnd,
  /// Valid JS outside the grammar this parser accepts, e.g. `with`.
  UnsupportedSyntax(&'static str),
}

impl SyntaxErrorType {
  pub fn code(self) -> &'static str {
    use SyntaxErrorType::*;
    match self {
      ExpectedSyntax(_) => "PS0001",
      InvalidAssignmentTarget => "PS0002",
      LineTerminatorAfterArrowFunctionParameters => "PS0003",
      LineTerminatorAfterThrow => "PS0004",
      LineTerminatorInRegex => "PS0005",
      LineTerminatorInString => "PS0006",
      RequiredTokenNotFound(_) => "PS0007",
      TryStatementHasNoCatchOrFinally => "PS0008",
      UnexpectedEnd => "PS0009",
      UnsupportedSyntax(_) => "PS0010",
    }
  }

  fn describe(self, f: &mut Formatter<'_>, actual_token: Option<TT>) -> fmt::Result {
    use SyntaxErrorType::*;
    match self {
      ExpectedSyntax(expected) => write!(f, "expected {expected}"),
      InvalidAssignmentTarget => f.write_str("invalid assignment target"),
      LineTerminatorAfterArrowFunctionParameters => {
        f.write_str("arrow function parameters must be followed by `=>` on the same line")
      }
      LineTerminatorAfterThrow => f.write_str("`throw` must be followed by an expression on the same line"),
      LineTerminatorInRegex => f.write_str("unterminated regular expression literal"),
      LineTerminatorInString => f.write_str("unterminated string literal"),
      RequiredTokenNotFound(typ) => write!(f, "expected token {typ:?}"),
      TryStatementHasNoCatchOrFinally => f.write_str("`try` needs a `catch` or `finally` block"),
      UnexpectedEnd => match actual_token {
        Some(typ) => write!(f, "unexpected end before {typ:?}"),
        None => f.write_str("unexpected end of input"),
      },
      UnsupportedSyntax(what) => write!(f, "{what} is not supported"),
    }
  }
}

/// A parse failure at `loc`. `actual_token` is the token found there, if any.
#[derive(Clone)]
pub struct SyntaxError {
  pub typ: SyntaxErrorType,
  pub loc: Loc,
  pub actual_token: Option<TT>,
}

struct Message<'e>(&'e SyntaxError);

impl Display for Message<'_> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    self.0.typ.describe(f, self.0.actual_token)
  }
}

impl SyntaxError {
  pub fn new(typ: SyntaxErrorType, loc: Loc, actual_token: Option<TT>) -> SyntaxError {
    SyntaxError {
      typ,
      loc,
      actual_token,
    }
  }

  pub fn code(&self) -> &'static str {
    self.typ.code()
  }

  pub fn message(&self) -> String {
    Message(self).to_string()
  }
}

impl Display for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.code(), Message(self))
  }
}

impl Debug for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{self} at bytes {}..{}", self.loc.0, self.loc.1)
  }
}

impl Error for SyntaxError {}

pub type SyntaxResult<T> = Result<T, SyntaxError>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn codes_are_stable() {
    assert_eq!(SyntaxErrorType::ExpectedSyntax("x").code(), "PS0001");
    assert_eq!(
      SyntaxErrorType::RequiredTokenNotFound(TT::Semicolon).code(),
      "PS0007"
    );
    assert_eq!(SyntaxErrorType::UnsupportedSyntax("x").code(), "PS0010");
  }

  #[test]
  fn display_includes_code_and_message() {
    let err = Loc(3, 4).error(
      SyntaxErrorType::RequiredTokenNotFound(TT::ParenthesisClose),
      Some(TT::Semicolon),
    );
    assert_eq!(err.to_string(), "PS0007: expected token ParenthesisClose");
    assert_eq!(format!("{err:?}"), "PS0007: expected token ParenthesisClose at bytes 3..4");
    let err = Loc(0, 0).error(SyntaxErrorType::UnexpectedEnd, None);
    assert_eq!(err.message(), "unexpected end of input");
  }
}
