use crate::binding::BindingKind;
use crate::scope::ScopeKind;
use crate::scope::ScopeTree;
use serde::Serialize;
use std::collections::BTreeMap;
use tree_js::ast::Ast;
use tree_js::ast::NodeId;
use tree_js::loc::LineCol;

/// A position-based view of a [`ScopeTree`], stable enough to compare in tests and print from tools.
#[derive(Clone, Debug, Serialize)]
pub struct ProgramSnapshot {
  pub scopes: Vec<ScopeSnapshot>,
  pub globals: BTreeMap<String, Vec<LineCol>>,
  pub diagnostics: Vec<DiagnosticSnapshot>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeSnapshot {
  pub id: u32,
  pub kind: ScopeKind,
  pub parent: Option<u32>,
  /// Node kind of the scope's owner.
  pub owner: &'static str,
  pub start: LineCol,
  pub bindings: Vec<BindingSnapshot>,
  pub labels: Vec<String>,
  pub uids: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingSnapshot {
  pub name: String,
  pub kind: BindingKind,
  /// Node kind of the declaring construct.
  pub declaration: &'static str,
  pub declared_at: LineCol,
  pub constant: bool,
  pub references: Vec<LineCol>,
  pub constant_violations: Vec<LineCol>,
}

#[derive(Clone, Debug, Serialize)]
pub struct DiagnosticSnapshot {
  pub code: &'static str,
  pub message: String,
  pub start: LineCol,
}

fn start_of(ast: &Ast, node: NodeId) -> LineCol {
  ast.line_col(ast.loc(node).unwrap_or_default().0)
}

fn kind_of(ast: &Ast, node: NodeId) -> &'static str {
  ast.stx(node).map(|stx| stx.kind_name()).unwrap_or("Unknown")
}

impl ScopeTree {
  pub fn snapshot(&self, ast: &Ast) -> ProgramSnapshot {
    let positions = |nodes: &[NodeId]| nodes.iter().map(|n| start_of(ast, *n)).collect::<Vec<_>>();
    let scopes = self
      .scopes()
      .map(|(id, scope)| ScopeSnapshot {
        id: id.raw(),
        kind: scope.kind(),
        parent: scope.parent().map(|p| p.raw()),
        owner: kind_of(ast, scope.owner()),
        start: start_of(ast, scope.owner()),
        bindings: scope
          .bindings()
          .into_iter()
          .map(|(_, binding)| {
            let binding = self.binding(binding);
            BindingSnapshot {
              name: binding.name().to_string(),
              kind: binding.kind(),
              declaration: kind_of(ast, binding.path()),
              declared_at: start_of(ast, binding.identifier()),
              constant: binding.is_constant(),
              references: positions(binding.reference_paths()),
              constant_violations: positions(binding.constant_violations()),
            }
          })
          .collect(),
        labels: scope
          .labels()
          .into_iter()
          .map(|(name, _)| name.to_string())
          .collect(),
        uids: scope.uids().into_iter().map(str::to_string).collect(),
      })
      .collect();
    let globals = self
      .globals()
      .iter()
      .map(|(name, nodes)| (name.clone(), positions(nodes)))
      .collect();
    let diagnostics = self
      .diagnostics()
      .iter()
      .map(|d| DiagnosticSnapshot {
        code: d.code(),
        message: d.message(),
        start: ast.line_col(d.loc.0),
      })
      .collect();
    ProgramSnapshot {
      scopes,
      globals,
      diagnostics,
    }
  }
}
