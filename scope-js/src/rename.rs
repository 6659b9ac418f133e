use crate::scope::ScopeId;
use crate::scope::ScopeTree;
use tracing::debug;
use tracing::warn;
use tree_js::ast::Ast;
use tree_js::ast::NodeId;
use tree_js::ast::ObjMember;
use tree_js::ast::ObjMemberType;
use tree_js::ast::ObjPatProp;
use tree_js::ast::PropKey;
use tree_js::ast::Syntax;

/// Expands shorthand syntax whose key and value are both `node`, so the key keeps the old text
/// once the identifier is renamed.
fn expand_shorthand(ast: &mut Ast, node: NodeId, old: &str) {
  let Some(parent) = ast.parent(node) else {
    return;
  };
  let expanded: Syntax = match ast.stx(parent) {
    Some(Syntax::ObjMember(ObjMember {
      typ: ObjMemberType::Shorthand {
        id,
        initializer: None,
      },
    })) if *id == node => ObjMember {
      typ: ObjMemberType::Valued {
        key: PropKey::Direct(old.to_string()),
        value: node,
      },
    }
    .into(),
    Some(Syntax::ObjPatProp(prop)) if prop.shorthand && prop.target == node => ObjPatProp {
      shorthand: false,
      ..prop.clone()
    }
    .into(),
    _ => return,
  };
  if let Err(err) = ast.replace(parent, expanded) {
    warn!(%err, "could not expand shorthand property");
  }
}

impl ScopeTree {
  /// Renames the binding `old` resolves to from `scope`, rewriting its declarations and every
  /// occurrence in `ast`. With no `new` name a fresh uid based on `old` is used.
  ///
  /// Returns the name now in use, or `None` if `old` doesn't resolve.
  pub fn rename(
    &mut self,
    ast: &mut Ast,
    scope: ScopeId,
    old: &str,
    new: Option<&str>,
  ) -> Option<String> {
    let id = self.get_binding(scope, old)?;
    let new = match new {
      Some(new) => new.to_string(),
      None => self.generate_uid(scope, old),
    };
    if new == old {
      return Some(new);
    }

    let binding = &self.bindings[id.index()];
    let nodes: Vec<NodeId> = std::iter::once(binding.identifier)
      .chain(binding.redeclarations.iter().copied())
      .chain(binding.references.iter().copied())
      .chain(binding.constant_violations.iter().copied())
      .collect();
    for node in nodes {
      expand_shorthand(ast, node, old);
      ast.set_identifier_name(node, &new);
    }

    let owner = binding.scope;
    let table = &mut self.scopes[owner.index()].bindings;
    table.remove(old);
    if let Some(displaced) = table.insert(new.clone(), id) {
      warn!(
        old,
        new = %new,
        displaced = displaced.raw(),
        "rename target already bound in scope; the other binding is no longer reachable by name"
      );
    }
    self.bindings[id.index()].name.clone_from(&new);
    debug!(old, new = %new, scope = owner.raw(), "renamed binding");
    Some(new)
  }
}
