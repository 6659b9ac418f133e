//! Lexical scopes and bindings for JavaScript syntax trees.
//!
//! [`analyze`] walks a [`tree_js::ast::Ast`] once and builds a [`ScopeTree`]:
//! - every scope-introducing construct (program, functions, blocks, `switch`,
//!   `catch`, loops with heads, classes) gets a [`ScopeData`];
//! - every declaration becomes a [`Binding`] in the scope its kind hoists to;
//! - every identifier read or written is attached to the binding it resolves
//!   to, or recorded as a global of the program.
//!
//! The tree can then be queried (`get_binding`, `get_label`), mutated safely
//! (`rename`), and asked for fresh names (`generate_uid`). [`Program`] bundles an
//! [`Ast`] with its scopes for callers that don't need to hold them separately.
use serde::Serialize;
use std::str::FromStr;
use tree_js::ast::Ast;
use tree_js::ast::NodeId;
use tree_js::error::SyntaxResult;

pub mod binding;
pub mod diagnostic;
pub mod purity;
pub mod rename;
pub mod resolve;
pub mod scope;
pub mod snapshot;
pub mod uid;

pub use binding::Binding;
pub use binding::BindingId;
pub use binding::BindingKind;
pub use binding::Label;
pub use binding::LabelId;
pub use diagnostic::ScopeDiagnostic;
pub use diagnostic::ScopeDiagnosticType;
pub use scope::ScopeData;
pub use scope::ScopeId;
pub use scope::ScopeKind;
pub use scope::ScopeTree;
pub use snapshot::ProgramSnapshot;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TopLevelMode {
  Global,
  Module,
}

impl FromStr for TopLevelMode {
  type Err = ();

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "global" | "Global" => Ok(TopLevelMode::Global),
      "module" | "Module" => Ok(TopLevelMode::Module),
      _ => Err(()),
    }
  }
}

#[derive(Clone, Copy, Debug)]
pub struct ScopeOptions {
  /// Whether the input is a script or a module. Imports in a script are reported but still bound.
  pub top_level_mode: TopLevelMode,
  /// Bind function declarations in their enclosing block. When false they hoist to the
  /// enclosing function like `var`.
  pub block_scoped_functions: bool,
}

impl Default for ScopeOptions {
  fn default() -> Self {
    ScopeOptions {
      top_level_mode: TopLevelMode::Module,
      block_scoped_functions: true,
    }
  }
}

pub fn analyze(ast: &Ast, options: &ScopeOptions) -> ScopeTree {
  resolve::resolve(ast, options)
}

/// A syntax tree together with its scopes, so mutating operations can update both.
pub struct Program {
  ast: Ast,
  scopes: ScopeTree,
}

impl Program {
  pub fn parse(source: &str, options: &ScopeOptions) -> SyntaxResult<Program> {
    let ast = tree_js::parse(source)?;
    Ok(Program::analyze(ast, options))
  }

  pub fn analyze(ast: Ast, options: &ScopeOptions) -> Program {
    let scopes = analyze(&ast, options);
    Program { ast, scopes }
  }

  pub fn ast(&self) -> &Ast {
    &self.ast
  }

  pub fn scopes(&self) -> &ScopeTree {
    &self.scopes
  }

  pub fn into_parts(self) -> (Ast, ScopeTree) {
    (self.ast, self.scopes)
  }

  /// The scope the node at `id` belongs to.
  pub fn scope_of(&self, id: NodeId) -> Option<ScopeId> {
    self.scopes.scope_of(id)
  }

  pub fn rename(&mut self, scope: ScopeId, old: &str, new: Option<&str>) -> Option<String> {
    self.scopes.rename(&mut self.ast, scope, old, new)
  }

  pub fn generate_uid(&mut self, scope: ScopeId, base: &str) -> String {
    self.scopes.generate_uid(scope, base)
  }

  pub fn is_pure(&self, id: NodeId) -> bool {
    self.scopes.is_pure(&self.ast, id)
  }

  pub fn snapshot(&self) -> ProgramSnapshot {
    self.scopes.snapshot(&self.ast)
  }
}
