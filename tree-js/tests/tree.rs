use tree_js::ast::Ast;
use tree_js::ast::IdExpr;
use tree_js::ast::NodeId;
use tree_js::ast::Slot;
use tree_js::ast::Syntax;
use tree_js::ast::TreeError;
use tree_js::parse;
use tree_js::path::NodePath;
use tree_js::visit::collect;
use tree_js::visit::walk;
use tree_js::visit::VisitControl;
use tree_js::visit::Visitor;

fn find_ids(ast: &Ast, name: &str) -> Vec<NodeId> {
  collect(ast, ast.root(), |stx| stx.identifier_name() == Some(name))
}

#[test]
fn cursor_reports_parent_and_slot() {
  let ast = parse("function square(n) { return n * n; }").unwrap();
  let refs: Vec<_> = collect(&ast, ast.root(), |stx| matches!(stx, Syntax::IdExpr(_)));
  assert_eq!(refs.len(), 2);

  let left = ast.path(refs[0]);
  assert_eq!(left.kind(), "IdExpr");
  assert_eq!(left.slot(), Some(Slot::field("left")));
  assert!(left.is_in("BinaryExpr", "left"));
  assert_eq!(left.start().line, 1);
  assert_eq!(left.start().column, 28);
  assert_eq!(ast.path(refs[1]).start().column, 32);

  let func = left
    .find_ancestor(|p| p.kind() == "FuncDecl")
    .expect("function ancestor");
  assert_eq!(func.get_one("name").and_then(|n| n.identifier_name()), Some("square"));
  assert_eq!(func.get("params").len(), 1);
  let body = func.get("body");
  assert_eq!(body[0].slot(), Some(Slot::indexed("body", 0)));

  let kinds: Vec<_> = left.ancestors().map(|p| p.kind()).collect();
  assert_eq!(kinds, vec!["BinaryExpr", "ReturnStmt", "FuncDecl", "TopLevel"]);
}

#[test]
fn children_follow_source_order() {
  let ast = parse("function f(a) { b }").unwrap();
  let func = ast.path(ast.children(ast.root())[0]);
  let kinds: Vec<_> = func.children().iter().map(|c| c.kind()).collect();
  assert_eq!(kinds, vec!["ClassOrFuncName", "Param", "ExprStmt"]);
}

struct Recorder {
  events: Vec<String>,
}

impl<'a> Visitor<'a> for Recorder {
  fn enter(&mut self, path: NodePath<'a>) -> VisitControl {
    self.events.push(format!("enter {}", path.kind()));
    match path.kind() {
      "FuncExpr" => VisitControl::Skip,
      "LitNumExpr" => VisitControl::Stop,
      _ => VisitControl::Continue,
    }
  }

  fn exit(&mut self, path: NodePath<'a>) {
    self.events.push(format!("exit {}", path.kind()));
  }
}

#[test]
fn walk_honours_skip_and_stop() {
  let ast = parse("a(function () { b }); 1; c").unwrap();
  let mut recorder = Recorder { events: Vec::new() };
  let completed = walk(&ast, ast.root(), &mut recorder);
  assert!(!completed);
  assert_eq!(recorder.events, vec![
    "enter TopLevel",
    "enter ExprStmt",
    "enter CallExpr",
    "enter IdExpr",
    "exit IdExpr",
    "enter CallArg",
    "enter FuncExpr",
    "exit FuncExpr",
    "exit CallArg",
    "exit CallExpr",
    "exit ExprStmt",
    "enter ExprStmt",
    "enter LitNumExpr",
  ]);
}

#[test]
fn set_identifier_name_mutates_in_place() {
  let mut ast = parse("a + a").unwrap();
  let ids = find_ids(&ast, "a");
  assert!(ast.set_identifier_name(ids[0], "b"));
  assert_eq!(ast.identifier_name(ids[0]), Some("b"));
  assert_eq!(find_ids(&ast, "a"), vec![ids[1]]);
  assert!(!ast.set_identifier_name(ast.root(), "x"));
}

#[test]
fn replace_keeps_id_and_parent() {
  let mut ast = parse("f(a)").unwrap();
  let a = find_ids(&ast, "a")[0];
  let parent = ast.parent(a);
  ast
    .replace(a, IdExpr {
      name: "z".to_string(),
    })
    .unwrap();
  assert_eq!(ast.parent(a), parent);
  assert_eq!(ast.identifier_name(a), Some("z"));
}

#[test]
fn remove_detaches_list_entries_and_rejects_required_slots() {
  let mut ast = parse("a; b; c").unwrap();
  let stmts = ast.children(ast.root());
  ast.remove(stmts[1]).unwrap();
  assert_eq!(ast.children(ast.root()), vec![stmts[0], stmts[2]]);
  assert_eq!(ast.parent(stmts[1]), None);
  assert_eq!(ast.remove(stmts[1]), Err(TreeError::Detached(stmts[1])));

  let a = find_ids(&ast, "a")[0];
  assert_eq!(ast.remove(a), Err(TreeError::RequiredChild(a)));

  let mut ast = parse("[x, y]").unwrap();
  let x = find_ids(&ast, "x")[0];
  ast.remove(x).unwrap();
  let Some(Syntax::ExprStmt(stmt)) = ast.stx(ast.children(ast.root())[0]) else {
    panic!("expected expression statement");
  };
  let Some(Syntax::LitArrExpr(arr)) = ast.stx(stmt.expr) else {
    panic!("expected array");
  };
  // Removing an element leaves a hole so later indices stay put.
  assert_eq!(arr.elements.len(), 2);
}

#[test]
fn syntax_serializes_with_kind_tag() {
  let ast = parse("x").unwrap();
  let x = find_ids(&ast, "x")[0];
  let json = serde_json::to_value(ast.stx(x).unwrap()).unwrap();
  assert_eq!(json, serde_json::json!({ "$t": "IdExpr", "name": "x" }));
}
