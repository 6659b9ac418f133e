#![allow(dead_code)]

use scope_js::Program;
use scope_js::ScopeOptions;
use serde_json::to_string_pretty;
use serde_json::Value;
use similar::ChangeTag;
use similar::TextDiff;
use tree_js::ast::NodeId;
use tree_js::ast::Syntax;
use tree_js::visit::collect;

pub fn program(source: &str) -> Program {
  Program::parse(source, &ScopeOptions::default()).unwrap()
}

/// Identifier-like nodes (`IdExpr`, `IdPat`, `ClassOrFuncName`) named `name`, in source order.
pub fn ids(program: &Program, name: &str) -> Vec<NodeId> {
  let ast = program.ast();
  collect(ast, ast.root(), |stx| stx.identifier_name() == Some(name))
}

/// Nodes matching `pred`, in source order.
pub fn nodes(program: &Program, pred: impl FnMut(&Syntax) -> bool) -> Vec<NodeId> {
  let ast = program.ast();
  collect(ast, ast.root(), pred)
}

/// Compares two JSON values, printing a line diff of their pretty forms on mismatch.
pub fn assert_json_eq(actual: &Value, expected: &Value) {
  if actual == expected {
    return;
  }
  let expected_fmt = to_string_pretty(expected).unwrap();
  let actual_fmt = to_string_pretty(actual).unwrap();
  let mut msg = "JSON mismatch:\n".to_string();
  let diff = TextDiff::from_lines(&expected_fmt, &actual_fmt);
  for change in diff.iter_all_changes() {
    let sign = match change.tag() {
      ChangeTag::Delete => "-",
      ChangeTag::Insert => "+",
      ChangeTag::Equal => " ",
    };
    msg.push_str(sign);
    msg.push_str(change.as_str().unwrap());
    if !change.as_str().unwrap().ends_with('\n') {
      msg.push('\n');
    }
  }
  panic!("{}", msg);
}
