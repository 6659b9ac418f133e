use crate::scope::ScopeId;
use serde::Serialize;
use tree_js::ast::NodeId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BindingId(u32);

impl BindingId {
  pub fn raw(self) -> u32 {
    self.0
  }

  pub fn from_raw(raw: u32) -> Self {
    BindingId(raw)
  }

  pub(crate) fn index(self) -> usize {
    self.0 as usize
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct LabelId(u32);

impl LabelId {
  pub fn raw(self) -> u32 {
    self.0
  }

  pub fn from_raw(raw: u32) -> Self {
    LabelId(raw)
  }

  pub(crate) fn index(self) -> usize {
    self.0 as usize
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BindingKind {
  Var,
  Let,
  Const,
  FunctionDeclaration,
  Parameter,
  CatchParameter,
  /// The name of a function or class expression, visible only inside it.
  Local,
  /// An import.
  Module,
}

impl BindingKind {
  pub fn is_immutable(self) -> bool {
    matches!(
      self,
      BindingKind::Const | BindingKind::Local | BindingKind::Module
    )
  }

  /// Whether declaring `self` where `existing` is already bound is a duplicate declaration.
  pub fn collides_with(self, existing: BindingKind) -> bool {
    if self == BindingKind::Parameter || existing == BindingKind::Local {
      return false;
    }
    if self == BindingKind::FunctionDeclaration && existing == BindingKind::Let {
      return false;
    }
    self == BindingKind::Let
      || matches!(
        existing,
        BindingKind::Let | BindingKind::Const | BindingKind::Module
      )
      || (existing == BindingKind::Parameter && self == BindingKind::Const)
  }
}

/// A declared name and every occurrence that resolves to it.
///
/// Occurrence lists hold identifier nodes in source order. Only the resolver appends to them;
/// only rename changes the name.
#[derive(Clone, Debug)]
pub struct Binding {
  pub(crate) name: String,
  pub(crate) kind: BindingKind,
  pub(crate) scope: ScopeId,
  pub(crate) path: NodeId,
  pub(crate) identifier: NodeId,
  pub(crate) references: Vec<NodeId>,
  pub(crate) constant_violations: Vec<NodeId>,
  pub(crate) redeclarations: Vec<NodeId>,
}

impl Binding {
  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn kind(&self) -> BindingKind {
    self.kind
  }

  pub fn scope(&self) -> ScopeId {
    self.scope
  }

  /// The declaring construct: a declarator, function, class, import, or the identifier of a parameter.
  pub fn path(&self) -> NodeId {
    self.path
  }

  /// The identifier node carrying the declared name.
  pub fn identifier(&self) -> NodeId {
    self.identifier
  }

  pub fn reference_paths(&self) -> &[NodeId] {
    &self.references
  }

  pub fn references(&self) -> usize {
    self.references.len()
  }

  pub fn is_referenced(&self) -> bool {
    !self.references.is_empty()
  }

  pub fn constant_violations(&self) -> &[NodeId] {
    &self.constant_violations
  }

  pub fn redeclarations(&self) -> &[NodeId] {
    &self.redeclarations
  }

  pub fn is_constant(&self) -> bool {
    self.kind.is_immutable() && self.constant_violations.is_empty()
  }
}

#[derive(Clone, Debug)]
pub struct Label {
  pub(crate) name: String,
  pub(crate) scope: ScopeId,
  pub(crate) declaration: NodeId,
}

impl Label {
  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn scope(&self) -> ScopeId {
    self.scope
  }

  /// The labeled statement.
  pub fn declaration(&self) -> NodeId {
    self.declaration
  }
}
