use crate::binding::BindingId;
use crate::binding::BindingKind;
use crate::diagnostic::ScopeDiagnostic;
use crate::diagnostic::ScopeDiagnosticType;
use crate::scope::ScopeId;
use crate::scope::ScopeKind;
use crate::scope::ScopeTree;
use crate::ScopeOptions;
use crate::TopLevelMode;
use ahash::HashSet;
use ahash::HashSetExt;
use tracing::debug_span;
use tracing::warn;
use tree_js::ast::Ast;
use tree_js::ast::NodeId;
use tree_js::ast::Syntax;
use tree_js::ast::VarDeclMode;
use tree_js::path::NodePath;
use tree_js::visit::walk;
use tree_js::visit::VisitControl;
use tree_js::visit::Visitor;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Access {
  Read,
  Write,
}

/// An identifier use waiting for every declaration to be known.
struct Occurrence {
  node: NodeId,
  scope: ScopeId,
  access: Access,
  // Set when the occurrence is known to belong to a binding already, e.g. a redeclaring `var a = 1`.
  target: Option<BindingId>,
}

/// The identifiers a binding pattern declares, in source order. Default values and computed keys
/// are expressions and declare nothing.
pub fn binding_identifiers(ast: &Ast, pattern: NodeId) -> Vec<NodeId> {
  let mut out = Vec::new();
  collect_binding_identifiers(ast, pattern, &mut out);
  out
}

fn collect_binding_identifiers(ast: &Ast, id: NodeId, out: &mut Vec<NodeId>) {
  let Some(stx) = ast.stx(id) else {
    return;
  };
  match stx {
    Syntax::IdPat(_) => out.push(id),
    Syntax::ArrPat(n) => {
      for elem in n.elements.iter().flatten() {
        collect_binding_identifiers(ast, *elem, out);
      }
      if let Some(rest) = n.rest {
        collect_binding_identifiers(ast, rest, out);
      }
    }
    Syntax::ArrPatElem(n) => collect_binding_identifiers(ast, n.target, out),
    Syntax::ObjPat(n) => {
      for prop in n.properties.iter() {
        collect_binding_identifiers(ast, *prop, out);
      }
      if let Some(rest) = n.rest {
        collect_binding_identifiers(ast, rest, out);
      }
    }
    Syntax::ObjPatProp(n) => collect_binding_identifiers(ast, n.target, out),
    Syntax::Param(n) => collect_binding_identifiers(ast, n.pattern, out),
    _ => {}
  }
}

struct Resolver<'a> {
  ast: &'a Ast,
  options: ScopeOptions,
  tree: ScopeTree,
  // Scope-owning nodes currently entered, with the scope each one opened.
  stack: Vec<(NodeId, ScopeId)>,
  // Identifier patterns already bound by their declaration; the walk must not treat them as writes.
  declared: HashSet<NodeId>,
  pending: Vec<Occurrence>,
}

impl<'a> Resolver<'a> {
  fn current(&self) -> ScopeId {
    self
      .stack
      .last()
      .map(|(_, scope)| *scope)
      .unwrap_or_else(|| self.tree.root())
  }

  fn push_scope(&mut self, owner: NodeId, kind: ScopeKind) -> ScopeId {
    let parent = self.current();
    let scope = self.tree.add_scope(owner, kind, Some(parent));
    self.stack.push((owner, scope));
    scope
  }

  fn diagnostic(&mut self, typ: ScopeDiagnosticType, at: NodeId, name: Option<&str>) {
    let loc = self.ast.loc(at).unwrap_or_default();
    self
      .tree
      .diagnostics
      .push(ScopeDiagnostic::new(typ, loc, name.map(str::to_string)));
  }

  /// Binds the name carried by `identifier` in `scope`. A second declaration of a name already in
  /// the table joins the existing binding; the name of a function or class expression is shadowed.
  fn declare(
    &mut self,
    scope: ScopeId,
    kind: BindingKind,
    path: NodeId,
    identifier: NodeId,
    assigns: bool,
  ) {
    let ast = self.ast;
    let Some(name) = ast.identifier_name(identifier) else {
      return;
    };
    self.declared.insert(identifier);
    let Some(existing) = self.tree.get_own_binding(scope, name) else {
      self.tree.add_binding(scope, name, kind, path, identifier);
      return;
    };
    let existing_kind = self.tree.binding(existing).kind;
    if kind.collides_with(existing_kind) {
      self.diagnostic(
        ScopeDiagnosticType::DuplicateDeclaration,
        identifier,
        Some(name),
      );
    }
    if existing_kind == BindingKind::Local {
      self.tree.add_binding(scope, name, kind, path, identifier);
      return;
    }
    self.tree.bindings[existing.index()]
      .redeclarations
      .push(identifier);
    if assigns {
      self.pending.push(Occurrence {
        node: identifier,
        scope,
        access: Access::Write,
        target: Some(existing),
      });
    }
  }

  /// Parameters and catch parameters: each identifier is its own declaring path.
  fn declare_pattern(&mut self, scope: ScopeId, kind: BindingKind, pattern: NodeId) {
    for identifier in binding_identifiers(self.ast, pattern) {
      self.declare(scope, kind, identifier, identifier, false);
    }
  }

  fn declare_var_decl(&mut self, mode: VarDeclMode, declarators: &[NodeId]) {
    let (scope, kind) = match mode {
      VarDeclMode::Var => (self.tree.var_scope(self.current()), BindingKind::Var),
      VarDeclMode::Let => (self.current(), BindingKind::Let),
      VarDeclMode::Const => (self.current(), BindingKind::Const),
    };
    let ast = self.ast;
    for &declarator in declarators {
      let Some(Syntax::VarDeclarator(decl)) = ast.stx(declarator) else {
        continue;
      };
      let identifiers = binding_identifiers(ast, decl.pattern);
      if identifiers.is_empty() {
        let loc = ast.loc(declarator).unwrap_or_default();
        warn!(start = loc.0, end = loc.1, "declarator binds no name");
        self.diagnostic(ScopeDiagnosticType::MalformedDeclaration, declarator, None);
        continue;
      }
      let assigns = decl.initializer.is_some();
      for identifier in identifiers {
        let param = match mode {
          VarDeclMode::Var if assigns => self.enclosing_catch_parameter(identifier),
          _ => None,
        };
        match param {
          Some(param) => {
            self.declare(scope, kind, declarator, identifier, false);
            self.pending.push(Occurrence {
              node: identifier,
              scope: self.current(),
              access: Access::Write,
              target: Some(param),
            });
          }
          None => self.declare(scope, kind, declarator, identifier, assigns),
        }
      }
    }
  }

  /// The catch parameter of the same name that an initialized `var` inside the catch body writes to.
  fn enclosing_catch_parameter(&self, identifier: NodeId) -> Option<BindingId> {
    let name = self.ast.identifier_name(identifier)?;
    let binding = self.tree.get_binding(self.current(), name)?;
    (self.tree.binding(binding).kind == BindingKind::CatchParameter).then_some(binding)
  }

  fn function_decl_scope(&self) -> ScopeId {
    if self.options.block_scoped_functions {
      self.current()
    } else {
      self.tree.var_scope(self.current())
    }
  }

  fn import_binding(&mut self, path: NodeId, identifier: NodeId) {
    if self.options.top_level_mode == TopLevelMode::Global {
      let name = self.ast.identifier_name(identifier).map(str::to_string);
      self.diagnostic(
        ScopeDiagnosticType::ImportInScript,
        identifier,
        name.as_deref(),
      );
    }
    let root = self.tree.root();
    self.declare(root, BindingKind::Module, path, identifier, false);
  }

  fn finish(mut self) -> ScopeTree {
    let ast = self.ast;
    for occurrence in std::mem::take(&mut self.pending) {
      let Some(name) = ast.identifier_name(occurrence.node) else {
        continue;
      };
      let target = occurrence
        .target
        .or_else(|| self.tree.get_binding(occurrence.scope, name));
      match target {
        Some(binding) => {
          let binding = &mut self.tree.bindings[binding.index()];
          match occurrence.access {
            Access::Read => binding.references.push(occurrence.node),
            Access::Write => binding.constant_violations.push(occurrence.node),
          };
        }
        None => self
          .tree
          .globals
          .entry(name.to_string())
          .or_default()
          .push(occurrence.node),
      };
    }
    self.tree
  }
}

impl<'a> Visitor<'a> for Resolver<'a> {
  fn enter(&mut self, path: NodePath<'a>) -> VisitControl {
    let id = path.id();
    let mut control = VisitControl::Continue;
    match path.stx() {
      // The program scope is opened before the walk starts.
      Syntax::TopLevel(_) => {}
      Syntax::FuncDecl(n) => {
        if let Some(name) = n.name {
          let scope = self.function_decl_scope();
          self.declare(scope, BindingKind::FunctionDeclaration, id, name, true);
        }
        self.push_scope(id, ScopeKind::Function);
      }
      Syntax::FuncExpr(n) => {
        let scope = self.push_scope(id, ScopeKind::Function);
        if let Some(name) = n.name {
          self.declare(scope, BindingKind::Local, id, name, false);
        }
      }
      Syntax::ArrowFuncExpr(_) => {
        self.push_scope(id, ScopeKind::Function);
      }
      Syntax::Param(n) => {
        let scope = self.current();
        self.declare_pattern(scope, BindingKind::Parameter, n.pattern);
      }
      Syntax::ClassDecl(n) => {
        if let Some(name) = n.name {
          let scope = self.current();
          self.declare(scope, BindingKind::Let, id, name, false);
        }
        self.push_scope(id, ScopeKind::Class);
      }
      Syntax::ClassExpr(n) => {
        let scope = self.push_scope(id, ScopeKind::Class);
        if let Some(name) = n.name {
          self.declare(scope, BindingKind::Local, id, name, false);
        }
      }
      Syntax::BlockStmt(_) => {
        self.push_scope(id, ScopeKind::Block);
      }
      Syntax::ForTripleStmt(_) | Syntax::ForInStmt(_) | Syntax::ForOfStmt(_) => {
        self.push_scope(id, ScopeKind::For);
      }
      Syntax::SwitchStmt(_) => {
        self.push_scope(id, ScopeKind::Switch);
      }
      Syntax::CatchBlock(n) => {
        let scope = self.push_scope(id, ScopeKind::Catch);
        if let Some(param) = n.parameter {
          self.declare_pattern(scope, BindingKind::CatchParameter, param);
        }
      }
      Syntax::VarDecl(n) => self.declare_var_decl(n.mode, &n.declarators),
      Syntax::ImportStmt(n) => {
        for local in n.default.iter().chain(n.namespace.iter()) {
          self.import_binding(id, *local);
        }
      }
      Syntax::ImportSpecifier(n) => self.import_binding(id, n.local),
      Syntax::LabelStmt(n) => {
        let scope = self.current();
        self.tree.add_label(scope, &n.name, id);
      }
      // Names re-exported from another module are not local references.
      Syntax::ExportListStmt(n) if n.from.is_some() => control = VisitControl::Skip,
      Syntax::IdExpr(_) => self.pending.push(Occurrence {
        node: id,
        scope: self.current(),
        access: Access::Read,
        target: None,
      }),
      Syntax::IdPat(_) if !self.declared.contains(&id) => self.pending.push(Occurrence {
        node: id,
        scope: self.current(),
        access: Access::Write,
        target: None,
      }),
      _ => {}
    };
    let scope = self.current();
    self.tree.node_scopes.insert(id, scope);
    control
  }

  fn exit(&mut self, path: NodePath<'a>) {
    if self.stack.last().is_some_and(|(owner, _)| *owner == path.id()) {
      self.stack.pop();
    }
  }
}

/// Builds every scope of `ast` in one walk, then resolves identifier uses against the finished tables.
pub(crate) fn resolve(ast: &Ast, options: &ScopeOptions) -> ScopeTree {
  let span = debug_span!("scope_js::analyze", nodes = ast.len());
  let _guard = span.enter();

  let mut tree = ScopeTree::new(options.top_level_mode, ast.len());
  let root = ast.root();
  let program = tree.add_scope(root, ScopeKind::Program, None);
  let mut resolver = Resolver {
    ast,
    options: *options,
    tree,
    stack: vec![(root, program)],
    declared: HashSet::new(),
    pending: Vec::new(),
  };
  walk(ast, root, &mut resolver);
  resolver.finish()
}
