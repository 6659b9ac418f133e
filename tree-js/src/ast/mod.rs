use crate::loc::LineCol;
use crate::loc::LineIndex;
use crate::loc::Loc;
use crate::path::NodePath;
use core::fmt;
use core::fmt::Display;
use core::fmt::Formatter;
use core::ops::Index;
use serde::Serialize;
use std::error::Error;
use syntax::ChildFieldMut;

pub mod syntax;

pub use syntax::*;

/// Stable handle to a node in an [`Ast`]. Ids are never reused, even after the node is detached.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(u32);

impl NodeId {
  pub fn from_raw(raw: u32) -> NodeId {
    NodeId(raw)
  }

  pub fn raw(self) -> u32 {
    self.0
  }

  fn index(self) -> usize {
    self.0 as usize
  }
}

impl Display for NodeId {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "#{}", self.0)
  }
}

#[derive(Clone, Debug)]
pub struct Node {
  pub loc: Loc,
  parent: Option<NodeId>,
  stx: Syntax,
}

impl Node {
  pub fn parent(&self) -> Option<NodeId> {
    self.parent
  }

  pub fn stx(&self) -> &Syntax {
    &self.stx
  }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TreeError {
  /// The node has no parent (it is the root or already detached).
  Detached(NodeId),
  /// The node fills a slot its parent cannot do without.
  RequiredChild(NodeId),
  UnknownNode(NodeId),
}

impl Display for TreeError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      TreeError::Detached(id) => write!(f, "node {} is not attached to a parent", id),
      TreeError::RequiredChild(id) => write!(f, "node {} fills a required slot", id),
      TreeError::UnknownNode(id) => write!(f, "node {} does not exist", id),
    }
  }
}

impl Error for TreeError {}

/// An arena of syntax nodes. Children refer to each other by [`NodeId`] and every node records its parent.
#[derive(Clone, Debug, Default)]
pub struct Ast {
  nodes: Vec<Node>,
  root: Option<NodeId>,
  source: String,
  lines: LineIndex,
}

impl Ast {
  pub fn new(source: impl Into<String>) -> Ast {
    let source = source.into();
    let lines = LineIndex::new(&source);
    Ast {
      nodes: Vec::new(),
      root: None,
      source,
      lines,
    }
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  pub fn source(&self) -> &str {
    &self.source
  }

  /// The root node. Before [`Ast::set_root`] is called this is the most recently allocated node.
  pub fn root(&self) -> NodeId {
    self
      .root
      .unwrap_or_else(|| NodeId(self.nodes.len().saturating_sub(1) as u32))
  }

  pub fn set_root(&mut self, root: NodeId) {
    self.root = Some(root);
  }

  /// Adds a node and adopts every child it refers to.
  pub fn alloc(&mut self, loc: Loc, stx: impl Into<Syntax>) -> NodeId {
    let stx = stx.into();
    let id = NodeId(self.nodes.len() as u32);
    for (_, child) in stx.children() {
      if let Some(node) = self.nodes.get_mut(child.index()) {
        node.parent = Some(id);
      }
    }
    self.nodes.push(Node {
      loc,
      parent: None,
      stx,
    });
    id
  }

  /// Drops every node allocated at or after `len`, releasing children they had adopted.
  pub(crate) fn truncate(&mut self, len: usize) {
    self.nodes.truncate(len);
    for node in self.nodes.iter_mut() {
      if node.parent.is_some_and(|p| p.index() >= len) {
        node.parent = None;
      }
    }
  }

  pub fn get(&self, id: NodeId) -> Option<&Node> {
    self.nodes.get(id.index())
  }

  pub fn stx(&self, id: NodeId) -> Option<&Syntax> {
    self.get(id).map(|n| &n.stx)
  }

  pub fn loc(&self, id: NodeId) -> Option<Loc> {
    self.get(id).map(|n| n.loc)
  }

  pub fn parent(&self, id: NodeId) -> Option<NodeId> {
    self.get(id).and_then(|n| n.parent)
  }

  pub fn children(&self, id: NodeId) -> Vec<NodeId> {
    self
      .stx(id)
      .map(|stx| stx.children().into_iter().map(|(_, c)| c).collect())
      .unwrap_or_default()
  }

  /// The position of `id` within its parent.
  pub fn slot(&self, id: NodeId) -> Option<Slot> {
    let parent = self.parent(id)?;
    self
      .stx(parent)?
      .children()
      .into_iter()
      .find(|(_, child)| *child == id)
      .map(|(slot, _)| slot)
  }

  pub fn path(&self, id: NodeId) -> NodePath<'_> {
    NodePath::new(self, id)
  }

  pub fn identifier_name(&self, id: NodeId) -> Option<&str> {
    self.stx(id)?.identifier_name()
  }

  /// Rewrites the text of an identifier-like node. Returns false if `id` is not one.
  pub fn set_identifier_name(&mut self, id: NodeId, name: &str) -> bool {
    match self
      .nodes
      .get_mut(id.index())
      .and_then(|n| n.stx.identifier_name_mut())
    {
      Some(slot) => {
        name.clone_into(slot);
        true
      }
      None => false,
    }
  }

  pub fn line_col(&self, offset: usize) -> LineCol {
    self.lines.line_col(&self.source, offset)
  }

  /// Swaps the content of `id` in place, keeping its id, location and parent.
  /// Children of the new content are adopted; former children that are not reused become detached.
  pub fn replace(&mut self, id: NodeId, stx: impl Into<Syntax>) -> Result<(), TreeError> {
    let stx = stx.into();
    let node = self
      .nodes
      .get_mut(id.index())
      .ok_or(TreeError::UnknownNode(id))?;
    let old = std::mem::replace(&mut node.stx, stx);
    for (_, child) in old.children() {
      if let Some(child) = self.nodes.get_mut(child.index()) {
        // Children already re-adopted elsewhere keep their new parent.
        if child.parent == Some(id) {
          child.parent = None;
        }
      }
    }
    let adopted: Vec<NodeId> = self.nodes[id.index()]
      .stx
      .children()
      .into_iter()
      .map(|(_, c)| c)
      .collect();
    for child in adopted {
      if let Some(child) = self.nodes.get_mut(child.index()) {
        child.parent = Some(id);
      }
    }
    Ok(())
  }

  /// Detaches `id` from its parent. List entries are removed, optional slots cleared and
  /// array holes left behind; required slots cannot be emptied.
  pub fn remove(&mut self, id: NodeId) -> Result<(), TreeError> {
    let node = self.get(id).ok_or(TreeError::UnknownNode(id))?;
    let parent = node.parent.ok_or(TreeError::Detached(id))?;
    let mut removed = false;
    for field in self.nodes[parent.index()].stx.child_fields_mut() {
      match field {
        ChildFieldMut::Required(child) if *child == id => {
          return Err(TreeError::RequiredChild(id));
        }
        ChildFieldMut::Key(PropKey::Computed(child)) if *child == id => {
          return Err(TreeError::RequiredChild(id));
        }
        ChildFieldMut::Optional(child) if *child == Some(id) => {
          *child = None;
          removed = true;
        }
        ChildFieldMut::List(children) => {
          if let Some(pos) = children.iter().position(|c| *c == id) {
            children.remove(pos);
            removed = true;
          }
        }
        ChildFieldMut::Holes(children) => {
          for child in children.iter_mut().filter(|c| **c == Some(id)) {
            *child = None;
            removed = true;
          }
        }
        ChildFieldMut::Elements(elements) => {
          for elem in elements.iter_mut() {
            if matches!(elem, ArrElem::Single(c) | ArrElem::Rest(c) if *c == id) {
              *elem = ArrElem::Empty;
              removed = true;
            }
          }
        }
        ChildFieldMut::Parts(parts) => {
          if parts
            .iter()
            .any(|p| matches!(p, TemplatePart::Substitution(c) if *c == id))
          {
            return Err(TreeError::RequiredChild(id));
          }
        }
        _ => {}
      }
    }
    if !removed {
      return Err(TreeError::Detached(id));
    }
    self.nodes[id.index()].parent = None;
    Ok(())
  }

  /// Points whichever parent slot holds `old` at `new` instead, detaching `old`.
  pub fn replace_child(&mut self, old: NodeId, new: NodeId) -> Result<(), TreeError> {
    if self.get(new).is_none() {
      return Err(TreeError::UnknownNode(new));
    }
    let parent = self.parent(old).ok_or(TreeError::Detached(old))?;
    for field in self.nodes[parent.index()].stx.child_fields_mut() {
      match field {
        ChildFieldMut::Required(child) => {
          if *child == old {
            *child = new;
          }
        }
        ChildFieldMut::Optional(Some(child)) | ChildFieldMut::Key(PropKey::Computed(child)) => {
          if *child == old {
            *child = new;
          }
        }
        ChildFieldMut::List(children) => {
          for child in children.iter_mut().filter(|c| **c == old) {
            *child = new;
          }
        }
        ChildFieldMut::Holes(children) => {
          for child in children.iter_mut().filter(|c| **c == Some(old)) {
            *child = Some(new);
          }
        }
        ChildFieldMut::Elements(elements) => {
          for elem in elements.iter_mut() {
            match elem {
              ArrElem::Single(c) | ArrElem::Rest(c) if *c == old => *c = new,
              _ => {}
            }
          }
        }
        ChildFieldMut::Parts(parts) => {
          for part in parts.iter_mut() {
            match part {
              TemplatePart::Substitution(c) if *c == old => *c = new,
              _ => {}
            }
          }
        }
        _ => {}
      }
    }
    self.nodes[old.index()].parent = None;
    self.nodes[new.index()].parent = Some(parent);
    Ok(())
  }
}

impl Index<NodeId> for Ast {
  type Output = Node;

  fn index(&self, id: NodeId) -> &Self::Output {
    &self.nodes[id.index()]
  }
}
