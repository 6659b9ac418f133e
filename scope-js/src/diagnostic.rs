use core::fmt;
use core::fmt::Display;
use core::fmt::Formatter;
use std::error::Error;
use tree_js::loc::Loc;

/// Problems found while building scopes. None of them stop analysis.
///
/// Codes (prefix `SC`) are stable:
/// - `SC0001`: [`ScopeDiagnosticType::DuplicateDeclaration`]
/// - `SC0002`: [`ScopeDiagnosticType::MalformedDeclaration`]
/// - `SC0003`: [`ScopeDiagnosticType::ImportInScript`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeDiagnosticType {
  DuplicateDeclaration,
  /// A declarator whose pattern declares no name, such as `let {} = x`.
  MalformedDeclaration,
  ImportInScript,
}

impl ScopeDiagnosticType {
  pub fn code(&self) -> &'static str {
    match self {
      ScopeDiagnosticType::DuplicateDeclaration => "SC0001",
      ScopeDiagnosticType::MalformedDeclaration => "SC0002",
      ScopeDiagnosticType::ImportInScript => "SC0003",
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopeDiagnostic {
  pub typ: ScopeDiagnosticType,
  pub loc: Loc,
  /// The declared name involved, if there is one.
  pub name: Option<String>,
}

impl ScopeDiagnostic {
  pub fn new(typ: ScopeDiagnosticType, loc: Loc, name: Option<String>) -> ScopeDiagnostic {
    ScopeDiagnostic { typ, loc, name }
  }

  pub fn code(&self) -> &'static str {
    self.typ.code()
  }

  pub fn message(&self) -> String {
    let name = self.name.as_deref().unwrap_or_default();
    match self.typ {
      ScopeDiagnosticType::DuplicateDeclaration => {
        format!("Duplicate declaration of `{name}`")
      }
      ScopeDiagnosticType::MalformedDeclaration => "Declaration binds no name".to_string(),
      ScopeDiagnosticType::ImportInScript => {
        format!("Import of `{name}` outside a module")
      }
    }
  }
}

impl Display for ScopeDiagnostic {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.code(), self.message())
  }
}

impl Error for ScopeDiagnostic {}
