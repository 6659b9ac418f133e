use crate::ast::Ast;
use crate::ast::NodeId;
use crate::ast::Syntax;
use crate::path::NodePath;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VisitControl {
  Continue,
  /// Don't descend into this node's children. `exit` is still called.
  Skip,
  /// Abort the whole traversal.
  Stop,
}

pub trait Visitor<'a> {
  fn enter(&mut self, path: NodePath<'a>) -> VisitControl;

  fn exit(&mut self, _path: NodePath<'a>) {}
}

/// Depth-first pre/post-order traversal from `root`, visiting children in source order.
/// Returns false if a visitor stopped the traversal.
pub fn walk<'a, V: Visitor<'a>>(ast: &'a Ast, root: NodeId, visitor: &mut V) -> bool {
  if ast.get(root).is_none() {
    return true;
  }
  // Explicit stack so deeply nested trees don't overflow the call stack.
  enum Step {
    Enter(NodeId),
    Exit(NodeId),
  }
  let mut stack = vec![Step::Enter(root)];
  while let Some(step) = stack.pop() {
    match step {
      Step::Enter(id) => {
        let path = NodePath::new(ast, id);
        match visitor.enter(path) {
          VisitControl::Stop => return false,
          VisitControl::Skip => stack.push(Step::Exit(id)),
          VisitControl::Continue => {
            stack.push(Step::Exit(id));
            let children = path.stx().children();
            stack.extend(children.into_iter().rev().map(|(_, c)| Step::Enter(c)));
          }
        };
      }
      Step::Exit(id) => visitor.exit(NodePath::new(ast, id)),
    }
  }
  true
}

struct Collector<F> {
  pred: F,
  found: Vec<NodeId>,
}

impl<'a, F: FnMut(&Syntax) -> bool> Visitor<'a> for Collector<F> {
  fn enter(&mut self, path: NodePath<'a>) -> VisitControl {
    if (self.pred)(path.stx()) {
      self.found.push(path.id());
    }
    VisitControl::Continue
  }
}

/// Every node under `root` (inclusive) matching `pred`, in traversal order.
pub fn collect(ast: &Ast, root: NodeId, pred: impl FnMut(&Syntax) -> bool) -> Vec<NodeId> {
  let mut collector = Collector {
    pred,
    found: Vec::new(),
  };
  walk(ast, root, &mut collector);
  collector.found
}
