use crate::binding::Binding;
use crate::binding::BindingId;
use crate::binding::BindingKind;
use crate::binding::Label;
use crate::binding::LabelId;
use crate::diagnostic::ScopeDiagnostic;
use crate::TopLevelMode;
use ahash::HashMap;
use ahash::HashMapExt;
use ahash::HashSet;
use ahash::HashSetExt;
use serde::Serialize;
use std::collections::BTreeMap;
use tree_js::ast::NodeId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ScopeId(u32);

impl ScopeId {
  pub fn raw(self) -> u32 {
    self.0
  }

  pub fn from_raw(raw: u32) -> Self {
    ScopeId(raw)
  }

  pub(crate) fn index(self) -> usize {
    self.0 as usize
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ScopeKind {
  Program,
  /// Function declarations and expressions, arrow functions and methods.
  Function,
  Block,
  /// A `switch` statement. Its discriminant and all cases share this scope.
  Switch,
  Catch,
  /// `for`, `for-in` and `for-of` loops, covering the head and body.
  For,
  Class,
}

impl ScopeKind {
  /// Whether `var` declarations hoist to scopes of this kind.
  pub fn is_var_scope(self) -> bool {
    matches!(self, ScopeKind::Program | ScopeKind::Function)
  }
}

#[derive(Clone, Debug)]
pub struct ScopeData {
  pub(crate) owner: NodeId,
  pub(crate) kind: ScopeKind,
  pub(crate) parent: Option<ScopeId>,
  pub(crate) children: Vec<ScopeId>,
  pub(crate) bindings: HashMap<String, BindingId>,
  pub(crate) labels: HashMap<String, LabelId>,
  pub(crate) uids: HashSet<String>,
}

impl ScopeData {
  /// The node that introduces this scope.
  pub fn owner(&self) -> NodeId {
    self.owner
  }

  pub fn kind(&self) -> ScopeKind {
    self.kind
  }

  pub fn parent(&self) -> Option<ScopeId> {
    self.parent
  }

  /// Child scopes in creation order.
  pub fn children(&self) -> &[ScopeId] {
    &self.children
  }

  /// Own bindings, sorted by name.
  pub fn bindings(&self) -> Vec<(&str, BindingId)> {
    let mut bindings: Vec<_> = self
      .bindings
      .iter()
      .map(|(name, id)| (name.as_str(), *id))
      .collect();
    bindings.sort_unstable();
    bindings
  }

  /// Own labels, sorted by name.
  pub fn labels(&self) -> Vec<(&str, LabelId)> {
    let mut labels: Vec<_> = self
      .labels
      .iter()
      .map(|(name, id)| (name.as_str(), *id))
      .collect();
    labels.sort_unstable();
    labels
  }

  /// Names minted in this scope by the uid generator, sorted.
  pub fn uids(&self) -> Vec<&str> {
    let mut uids: Vec<_> = self.uids.iter().map(String::as_str).collect();
    uids.sort_unstable();
    uids
  }
}

/// Every scope, binding and label of one program, addressed by id.
#[derive(Clone, Debug)]
pub struct ScopeTree {
  pub(crate) scopes: Vec<ScopeData>,
  pub(crate) bindings: Vec<Binding>,
  pub(crate) labels: Vec<Label>,
  pub(crate) node_scopes: HashMap<NodeId, ScopeId>,
  pub(crate) globals: BTreeMap<String, Vec<NodeId>>,
  pub(crate) diagnostics: Vec<ScopeDiagnostic>,
  pub(crate) top_level_mode: TopLevelMode,
}

impl ScopeTree {
  pub(crate) fn new(top_level_mode: TopLevelMode, node_count: usize) -> ScopeTree {
    ScopeTree {
      scopes: Vec::new(),
      bindings: Vec::new(),
      labels: Vec::new(),
      node_scopes: HashMap::with_capacity(node_count),
      globals: BTreeMap::new(),
      diagnostics: Vec::new(),
      top_level_mode,
    }
  }

  pub(crate) fn add_scope(
    &mut self,
    owner: NodeId,
    kind: ScopeKind,
    parent: Option<ScopeId>,
  ) -> ScopeId {
    let id = ScopeId(self.scopes.len() as u32);
    self.scopes.push(ScopeData {
      owner,
      kind,
      parent,
      children: Vec::new(),
      bindings: HashMap::new(),
      labels: HashMap::new(),
      uids: HashSet::new(),
    });
    if let Some(parent) = parent {
      self.scopes[parent.index()].children.push(id);
    }
    id
  }

  pub(crate) fn add_binding(
    &mut self,
    scope: ScopeId,
    name: &str,
    kind: BindingKind,
    path: NodeId,
    identifier: NodeId,
  ) -> BindingId {
    let id = BindingId::from_raw(self.bindings.len() as u32);
    self.bindings.push(Binding {
      name: name.to_string(),
      kind,
      scope,
      path,
      identifier,
      references: Vec::new(),
      constant_violations: Vec::new(),
      redeclarations: Vec::new(),
    });
    self.scopes[scope.index()]
      .bindings
      .insert(name.to_string(), id);
    id
  }

  pub(crate) fn add_label(&mut self, scope: ScopeId, name: &str, declaration: NodeId) -> LabelId {
    let id = LabelId::from_raw(self.labels.len() as u32);
    self.labels.push(Label {
      name: name.to_string(),
      scope,
      declaration,
    });
    self.scopes[scope.index()]
      .labels
      .entry(name.to_string())
      .or_insert(id);
    id
  }

  pub fn root(&self) -> ScopeId {
    ScopeId(0)
  }

  pub fn top_level_mode(&self) -> TopLevelMode {
    self.top_level_mode
  }

  /// # Panics
  ///
  /// If `id` does not belong to this tree.
  pub fn scope(&self, id: ScopeId) -> &ScopeData {
    &self.scopes[id.index()]
  }

  pub fn scopes(&self) -> impl Iterator<Item = (ScopeId, &ScopeData)> {
    self
      .scopes
      .iter()
      .enumerate()
      .map(|(i, s)| (ScopeId(i as u32), s))
  }

  /// The scope a node belongs to. A scope-introducing node belongs to the scope it introduces.
  pub fn scope_of(&self, node: NodeId) -> Option<ScopeId> {
    self.node_scopes.get(&node).copied()
  }

  /// `scope` followed by its ancestors, innermost first.
  pub fn ancestors(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
    std::iter::successors(Some(scope), move |s| self.scopes[s.index()].parent)
  }

  /// The nearest scope, starting at `scope`, that `var` declarations hoist to.
  pub fn var_scope(&self, scope: ScopeId) -> ScopeId {
    self
      .ancestors(scope)
      .find(|s| self.scope(*s).kind.is_var_scope())
      .unwrap_or_else(|| self.root())
  }

  /// # Panics
  ///
  /// If `id` does not belong to this tree.
  pub fn binding(&self, id: BindingId) -> &Binding {
    &self.bindings[id.index()]
  }

  pub fn bindings(&self) -> impl Iterator<Item = (BindingId, &Binding)> {
    self
      .bindings
      .iter()
      .enumerate()
      .map(|(i, b)| (BindingId::from_raw(i as u32), b))
  }

  /// # Panics
  ///
  /// If `id` does not belong to this tree.
  pub fn label(&self, id: LabelId) -> &Label {
    &self.labels[id.index()]
  }

  pub fn get_own_binding(&self, scope: ScopeId, name: &str) -> Option<BindingId> {
    self.scope(scope).bindings.get(name).copied()
  }

  /// Resolves `name` through `scope` and its ancestors.
  pub fn get_binding(&self, scope: ScopeId, name: &str) -> Option<BindingId> {
    self
      .ancestors(scope)
      .find_map(|s| self.get_own_binding(s, name))
  }

  pub fn has_own_binding(&self, scope: ScopeId, name: &str) -> bool {
    self.get_own_binding(scope, name).is_some()
  }

  pub fn has_binding(&self, scope: ScopeId, name: &str) -> bool {
    self.get_binding(scope, name).is_some()
  }

  pub fn parent_has_binding(&self, scope: ScopeId, name: &str) -> bool {
    self
      .scope(scope)
      .parent
      .is_some_and(|p| self.has_binding(p, name))
  }

  /// Every binding visible from `scope`, innermost first. Shadowed bindings are omitted.
  pub fn binding_ids_in_chain(&self, scope: ScopeId) -> Vec<BindingId> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    for s in self.ancestors(scope) {
      for (name, id) in self.scope(s).bindings() {
        if seen.insert(name) {
          ids.push(id);
        }
      }
    }
    ids
  }

  /// Labels are looked up in `scope` only.
  pub fn get_label(&self, scope: ScopeId, name: &str) -> Option<LabelId> {
    self.scope(scope).labels.get(name).copied()
  }

  pub fn has_label_in_chain(&self, scope: ScopeId, name: &str) -> bool {
    self
      .ancestors(scope)
      .any(|s| self.scope(s).labels.contains_key(name))
  }

  pub fn has_uid(&self, scope: ScopeId, name: &str) -> bool {
    self
      .ancestors(scope)
      .any(|s| self.scope(s).uids.contains(name))
  }

  /// Unresolved names and every occurrence of each, in source order.
  pub fn globals(&self) -> &BTreeMap<String, Vec<NodeId>> {
    &self.globals
  }

  pub fn has_global(&self, name: &str) -> bool {
    self.globals.contains_key(name)
  }

  pub fn diagnostics(&self) -> &[ScopeDiagnostic] {
    &self.diagnostics
  }
}
