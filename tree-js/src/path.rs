use crate::ast::Ast;
use crate::ast::NodeId;
use crate::ast::Slot;
use crate::ast::Syntax;
use crate::loc::LineCol;
use crate::loc::Loc;
use std::fmt;
use std::fmt::Debug;
use std::fmt::Formatter;

/// A cursor over one node of an [`Ast`], giving structural access to its surroundings.
#[derive(Clone, Copy)]
pub struct NodePath<'a> {
  ast: &'a Ast,
  id: NodeId,
}

impl<'a> NodePath<'a> {
  pub fn new(ast: &'a Ast, id: NodeId) -> NodePath<'a> {
    NodePath { ast, id }
  }

  pub fn ast(&self) -> &'a Ast {
    self.ast
  }

  pub fn id(&self) -> NodeId {
    self.id
  }

  /// # Panics
  ///
  /// If the id does not belong to this tree.
  pub fn stx(&self) -> &'a Syntax {
    self.ast[self.id].stx()
  }

  pub fn kind(&self) -> &'static str {
    self.stx().kind_name()
  }

  pub fn loc(&self) -> Loc {
    self.ast[self.id].loc
  }

  pub fn start(&self) -> LineCol {
    self.ast.line_col(self.loc().0)
  }

  pub fn parent(&self) -> Option<NodePath<'a>> {
    self.ast.parent(self.id).map(|p| NodePath::new(self.ast, p))
  }

  pub fn slot(&self) -> Option<Slot> {
    self.ast.slot(self.id)
  }

  pub fn children(&self) -> Vec<NodePath<'a>> {
    self
      .stx()
      .children()
      .into_iter()
      .map(|(_, c)| NodePath::new(self.ast, c))
      .collect()
  }

  /// Children held by the named field, in order.
  pub fn get(&self, field: &str) -> Vec<NodePath<'a>> {
    self
      .stx()
      .children()
      .into_iter()
      .filter(|(slot, _)| slot.field == field)
      .map(|(_, c)| NodePath::new(self.ast, c))
      .collect()
  }

  /// The single child of a non-list field.
  pub fn get_one(&self, field: &str) -> Option<NodePath<'a>> {
    self.get(field).into_iter().next()
  }

  /// Proper ancestors, nearest first.
  pub fn ancestors(&self) -> impl Iterator<Item = NodePath<'a>> {
    let ast = self.ast;
    std::iter::successors(self.parent(), move |p| {
      ast.parent(p.id).map(|id| NodePath::new(ast, id))
    })
  }

  /// The nearest ancestor (excluding this node) that satisfies `pred`.
  pub fn find_ancestor(&self, pred: impl Fn(&NodePath<'a>) -> bool) -> Option<NodePath<'a>> {
    self.ancestors().find(|p| pred(p))
  }

  pub fn identifier_name(&self) -> Option<&'a str> {
    self.stx().identifier_name()
  }

  /// Whether this node is the direct `field` child of a node of kind `parent_kind`.
  pub fn is_in(&self, parent_kind: &str, field: &str) -> bool {
    self.parent().is_some_and(|p| p.kind() == parent_kind)
      && self.slot().is_some_and(|s| s.field == field)
  }
}

impl PartialEq for NodePath<'_> {
  fn eq(&self, other: &Self) -> bool {
    std::ptr::eq(self.ast, other.ast) && self.id == other.id
  }
}

impl Debug for NodePath<'_> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}{}", self.kind(), self.id)
  }
}
