use crate::scope::ScopeTree;
use tree_js::ast::ArrElem;
use tree_js::ast::Ast;
use tree_js::ast::NodeId;
use tree_js::ast::ObjMemberType;
use tree_js::ast::PropKey;
use tree_js::ast::Syntax;
use tree_js::ast::TemplatePart;
use tree_js::operator::OperatorName;

/// Globals that can't be reassigned, so reading them has no observable effect.
fn is_immutable_global(name: &str) -> bool {
  matches!(name, "undefined" | "NaN" | "Infinity")
}

impl ScopeTree {
  /// Whether evaluating `node` can have no side effects and always yields the same value. The
  /// answer is conservative: anything not known to be pure is reported impure.
  pub fn is_pure(&self, ast: &Ast, node: NodeId) -> bool {
    let Some(stx) = ast.stx(node) else {
      return false;
    };
    match stx {
      Syntax::LitNumExpr(_)
      | Syntax::LitBigIntExpr(_)
      | Syntax::LitStrExpr(_)
      | Syntax::LitBoolExpr(_)
      | Syntax::LitNullExpr(_)
      | Syntax::LitRegexExpr(_)
      | Syntax::FuncExpr(_)
      | Syntax::ArrowFuncExpr(_) => true,
      Syntax::IdExpr(n) => {
        let Some(scope) = self.scope_of(node) else {
          return false;
        };
        match self.get_binding(scope, &n.name) {
          Some(binding) => self.binding(binding).is_constant(),
          None => is_immutable_global(&n.name),
        }
      }
      Syntax::LitTemplateExpr(n) => n.parts.iter().all(|part| match part {
        TemplatePart::String(_) => true,
        TemplatePart::Substitution(expr) => self.is_pure(ast, *expr),
      }),
      Syntax::LitArrExpr(n) => n.elements.iter().all(|elem| match elem {
        ArrElem::Single(value) => self.is_pure(ast, *value),
        ArrElem::Rest(_) => false,
        ArrElem::Empty => true,
      }),
      Syntax::LitObjExpr(n) => n.members.iter().all(|m| self.is_pure(ast, *m)),
      Syntax::ObjMember(n) => match &n.typ {
        ObjMemberType::Valued { key, value } => {
          self.is_key_pure(ast, key) && self.is_pure(ast, *value)
        }
        ObjMemberType::Shorthand { id, initializer } => {
          initializer.is_none() && self.is_pure(ast, *id)
        }
        // Defining a method, getter or setter runs nothing.
        ObjMemberType::Method { key, .. } => self.is_key_pure(ast, key),
        ObjMemberType::Rest { .. } => false,
      },
      Syntax::UnaryExpr(n) => {
        matches!(
          n.operator,
          OperatorName::Void | OperatorName::Typeof | OperatorName::LogicalNot
        ) && self.is_pure(ast, n.argument)
      }
      Syntax::CondExpr(n) => {
        self.is_pure(ast, n.test)
          && self.is_pure(ast, n.consequent)
          && self.is_pure(ast, n.alternate)
      }
      Syntax::BinaryExpr(n) if n.operator == OperatorName::Comma => {
        self.is_pure(ast, n.left) && self.is_pure(ast, n.right)
      }
      _ => false,
    }
  }

  fn is_key_pure(&self, ast: &Ast, key: &PropKey) -> bool {
    match key {
      PropKey::Direct(_) => true,
      PropKey::Computed(expr) => self.is_pure(ast, *expr),
    }
  }
}
