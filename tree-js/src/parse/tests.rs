use crate::ast::ArrElem;
use crate::ast::Ast;
use crate::ast::FuncBody;
use crate::ast::NodeId;
use crate::ast::ObjMemberType;
use crate::ast::PropKey;
use crate::ast::Syntax;
use crate::ast::TemplatePart;
use crate::ast::VarDeclMode;
use crate::error::SyntaxErrorType;
use crate::operator::OperatorName;
use crate::parse;
use crate::token::TT;

fn parse_ok(code: &str) -> Ast {
  match parse(code) {
    Ok(ast) => ast,
    Err(err) => panic!("failed to parse {:?}: {:?}", code, err),
  }
}

fn body(ast: &Ast) -> Vec<NodeId> {
  match ast.stx(ast.root()) {
    Some(Syntax::TopLevel(n)) => n.body.clone(),
    other => panic!("unexpected root {:?}", other),
  }
}

/// The expression of the only statement, which must be an expression statement.
fn only_expr(ast: &Ast) -> &Syntax {
  let stmts = body(ast);
  assert_eq!(stmts.len(), 1);
  match ast.stx(stmts[0]) {
    Some(Syntax::ExprStmt(n)) => ast[n.expr].stx(),
    other => panic!("expected expression statement, got {:?}", other),
  }
}

fn kind(ast: &Ast, id: NodeId) -> &'static str {
  ast[id].stx().kind_name()
}

#[test]
fn test_parse_var_decls() {
  let ast = parse_ok("var a = 1, b; let [c, , ...d] = e; const {f, g: h = 2, ...i} = j;");
  let stmts = body(&ast);
  assert_eq!(stmts.len(), 3);
  let Some(Syntax::VarDecl(var)) = ast.stx(stmts[0]) else {
    panic!("expected var decl");
  };
  assert_eq!(var.mode, VarDeclMode::Var);
  assert_eq!(var.declarators.len(), 2);

  let Some(Syntax::VarDecl(let_)) = ast.stx(stmts[1]) else {
    panic!("expected let decl");
  };
  assert_eq!(let_.mode, VarDeclMode::Let);
  let Some(Syntax::VarDeclarator(decl)) = ast.stx(let_.declarators[0]) else {
    panic!("expected declarator");
  };
  let Some(Syntax::ArrPat(arr)) = ast.stx(decl.pattern) else {
    panic!("expected array pattern");
  };
  assert_eq!(arr.elements.len(), 2);
  assert!(arr.elements[1].is_none());
  assert_eq!(ast.identifier_name(arr.rest.unwrap()), Some("d"));

  let Some(Syntax::VarDecl(const_)) = ast.stx(stmts[2]) else {
    panic!("expected const decl");
  };
  let Some(Syntax::VarDeclarator(decl)) = ast.stx(const_.declarators[0]) else {
    panic!("expected declarator");
  };
  let Some(Syntax::ObjPat(obj)) = ast.stx(decl.pattern) else {
    panic!("expected object pattern");
  };
  assert_eq!(obj.properties.len(), 2);
  let Some(Syntax::ObjPatProp(g)) = ast.stx(obj.properties[1]) else {
    panic!("expected property");
  };
  assert_eq!(g.key, PropKey::Direct("g".to_string()));
  assert!(!g.shorthand);
  assert_eq!(ast.identifier_name(g.target), Some("h"));
  assert!(g.default_value.is_some());
}

#[test]
fn test_parse_let_as_identifier() {
  let ast = parse_ok("let = 1");
  let Syntax::BinaryExpr(assign) = only_expr(&ast) else {
    panic!("expected assignment");
  };
  assert_eq!(assign.operator, OperatorName::Assignment);
  assert_eq!(kind(&ast, assign.left), "IdPat");
}

#[test]
fn test_parse_operator_precedence() {
  let ast = parse_ok("a + b * c ** d ** e");
  let Syntax::BinaryExpr(add) = only_expr(&ast) else {
    panic!("expected binary");
  };
  assert_eq!(add.operator, OperatorName::Addition);
  let Some(Syntax::BinaryExpr(mul)) = ast.stx(add.right) else {
    panic!("expected multiplication");
  };
  assert_eq!(mul.operator, OperatorName::Multiplication);
  let Some(Syntax::BinaryExpr(exp)) = ast.stx(mul.right) else {
    panic!("expected exponentiation");
  };
  // Right associative.
  assert_eq!(kind(&ast, exp.left), "IdExpr");
  assert_eq!(kind(&ast, exp.right), "BinaryExpr");
}

#[test]
fn test_parse_assignment_targets() {
  let ast = parse_ok("[a, b = 1, ...c] = d");
  let Syntax::BinaryExpr(assign) = only_expr(&ast) else {
    panic!("expected assignment");
  };
  let Some(Syntax::ArrPat(arr)) = ast.stx(assign.left) else {
    panic!("expected array pattern");
  };
  assert_eq!(arr.elements.len(), 2);
  let Some(Syntax::ArrPatElem(b)) = ast.stx(arr.elements[1].unwrap()) else {
    panic!("expected element");
  };
  assert_eq!(kind(&ast, b.target), "IdPat");
  assert!(b.default_value.is_some());
  assert_eq!(ast.parent(b.target), arr.elements[1]);
  assert_eq!(kind(&ast, arr.rest.unwrap()), "IdPat");

  let ast = parse_ok("({ a, b: c.d } = e)");
  let Syntax::BinaryExpr(assign) = only_expr(&ast) else {
    panic!("expected assignment");
  };
  let Some(Syntax::ObjPat(obj)) = ast.stx(assign.left) else {
    panic!("expected object pattern");
  };
  let Some(Syntax::ObjPatProp(a)) = ast.stx(obj.properties[0]) else {
    panic!("expected property");
  };
  assert!(a.shorthand);
  assert_eq!(kind(&ast, a.target), "IdPat");
  let Some(Syntax::ObjPatProp(b)) = ast.stx(obj.properties[1]) else {
    panic!("expected property");
  };
  assert_eq!(kind(&ast, b.target), "MemberExpr");
}

#[test]
fn test_parse_invalid_assignment_target() {
  let err = parse("a + b = c").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::InvalidAssignmentTarget);
  let err = parse("f()++").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::InvalidAssignmentTarget);
}

#[test]
fn test_parse_arrow_functions() {
  let ast = parse_ok("(a, [b], {c} = {}) => a");
  let Syntax::ArrowFuncExpr(arrow) = only_expr(&ast) else {
    panic!("expected arrow");
  };
  assert_eq!(arrow.params.len(), 3);
  assert!(matches!(arrow.body, FuncBody::Expression(_)));

  let ast = parse_ok("async x => { return x }");
  let Syntax::ArrowFuncExpr(arrow) = only_expr(&ast) else {
    panic!("expected arrow");
  };
  assert!(arrow.async_);
  assert!(matches!(arrow.body, FuncBody::Block(ref b) if b.len() == 1));

  // Parenthesised expressions aren't mistaken for parameter lists.
  let ast = parse_ok("(a, b)");
  let Syntax::BinaryExpr(comma) = only_expr(&ast) else {
    panic!("expected comma expression");
  };
  assert_eq!(comma.operator, OperatorName::Comma);

  let ast = parse_ok("async(a)");
  assert_eq!(only_expr(&ast).kind_name(), "CallExpr");
}

#[test]
fn test_parse_functions_and_classes() {
  let ast = parse_ok(
    "async function* f(a, b = 1, ...c) {}\nclass A extends B { static x = 1; get y() { return 1 } m() {} }",
  );
  let stmts = body(&ast);
  let Some(Syntax::FuncDecl(f)) = ast.stx(stmts[0]) else {
    panic!("expected function");
  };
  assert!(f.async_ && f.generator);
  assert_eq!(ast.identifier_name(f.name.unwrap()), Some("f"));
  assert_eq!(f.params.len(), 3);
  let Some(Syntax::Param(rest)) = ast.stx(f.params[2]) else {
    panic!("expected param");
  };
  assert!(rest.rest);

  let Some(Syntax::ClassDecl(class)) = ast.stx(stmts[1]) else {
    panic!("expected class");
  };
  assert!(class.extends.is_some());
  assert_eq!(class.members.len(), 3);
}

#[test]
fn test_parse_object_literal() {
  let ast = parse_ok("({ a, b: 1, [c]: 2, get d() {}, e() {}, ...f, 'g': 3 })");
  let Syntax::LitObjExpr(obj) = only_expr(&ast) else {
    panic!("expected object literal");
  };
  let typs: Vec<&ObjMemberType> = obj
    .members
    .iter()
    .map(|m| match ast.stx(*m) {
      Some(Syntax::ObjMember(m)) => &m.typ,
      other => panic!("expected member, got {:?}", other),
    })
    .collect();
  assert!(matches!(typs[0], ObjMemberType::Shorthand { .. }));
  assert!(matches!(typs[1], ObjMemberType::Valued { key: PropKey::Direct(k), .. } if k == "b"));
  assert!(matches!(typs[2], ObjMemberType::Valued { key: PropKey::Computed(_), .. }));
  assert!(matches!(typs[3], ObjMemberType::Method { .. }));
  assert!(matches!(typs[4], ObjMemberType::Method { .. }));
  assert!(matches!(typs[5], ObjMemberType::Rest { .. }));
  assert!(matches!(typs[6], ObjMemberType::Valued { key: PropKey::Direct(k), .. } if k == "g"));
}

#[test]
fn test_parse_templates_and_regex() {
  let ast = parse_ok("`a${b}c${d}`");
  let Syntax::LitTemplateExpr(tpl) = only_expr(&ast) else {
    panic!("expected template");
  };
  assert_eq!(tpl.parts.len(), 5);
  assert_eq!(tpl.parts[0], TemplatePart::String("a".to_string()));
  assert_eq!(tpl.parts[2], TemplatePart::String("c".to_string()));
  assert_eq!(tpl.parts[4], TemplatePart::String("".to_string()));

  let ast = parse_ok("x = /a+/g.test(y) / 2");
  let Syntax::BinaryExpr(assign) = only_expr(&ast) else {
    panic!("expected assignment");
  };
  let Some(Syntax::BinaryExpr(div)) = ast.stx(assign.right) else {
    panic!("expected division");
  };
  assert_eq!(div.operator, OperatorName::Division);
}

#[test]
fn test_parse_array_holes() {
  let ast = parse_ok("[1, , ...a]");
  let Syntax::LitArrExpr(arr) = only_expr(&ast) else {
    panic!("expected array");
  };
  assert!(matches!(arr.elements[0], ArrElem::Single(_)));
  assert_eq!(arr.elements[1], ArrElem::Empty);
  assert!(matches!(arr.elements[2], ArrElem::Rest(_)));
}

#[test]
fn test_parse_statements() {
  let ast = parse_ok(
    r#"
      outer: for (let i = 0; i < 1; i++) { continue outer; }
      for (const k in o) {}
      for (x of xs) ;
      switch (a) { case 0: b; break; default: c }
      try { f() } catch ({ message }) {} finally {}
      do x--; while (x)
      if (a) b; else c;
    "#,
  );
  let kinds: Vec<_> = body(&ast).into_iter().map(|s| kind(&ast, s)).collect();
  assert_eq!(kinds, vec![
    "LabelStmt",
    "ForInStmt",
    "ForOfStmt",
    "SwitchStmt",
    "TryStmt",
    "DoWhileStmt",
    "IfStmt",
  ]);
  let stmts = body(&ast);
  let Some(Syntax::LabelStmt(label)) = ast.stx(stmts[0]) else {
    panic!("expected label");
  };
  assert_eq!(label.name, "outer");
  assert_eq!(kind(&ast, label.statement), "ForTripleStmt");
}

#[test]
fn test_parse_modules() {
  let ast = parse_ok(
    "import a, { b as c, d } from 'm';\nimport * as ns from \"n\";\nexport const e = 1;\nexport { e as f };\nexport default function () {}\nexport * from 'o';",
  );
  let stmts = body(&ast);
  let Some(Syntax::ImportStmt(import)) = ast.stx(stmts[0]) else {
    panic!("expected import");
  };
  assert_eq!(import.module, "m");
  assert_eq!(import.names.len(), 2);
  assert!(import.default.is_some());
  let Some(Syntax::ImportStmt(import)) = ast.stx(stmts[1]) else {
    panic!("expected import");
  };
  assert_eq!(ast.identifier_name(import.namespace.unwrap()), Some("ns"));
  let kinds: Vec<_> = stmts[2..].iter().map(|s| kind(&ast, *s)).collect();
  assert_eq!(kinds, vec![
    "ExportDeclStmt",
    "ExportListStmt",
    "ExportDefaultStmt",
    "ExportAllStmt",
  ]);
}

#[test]
fn test_parse_asi() {
  let ast = parse_ok("a\nb\n++c");
  assert_eq!(body(&ast).len(), 3);
  let err = parse("a b").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::ExpectedSyntax("`;` or line break"));
}

#[test]
fn test_parse_errors() {
  let err = parse("try {}").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::TryStatementHasNoCatchOrFinally);
  assert_eq!(err.code(), "PS0008");

  let err = parse("let x = (").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::UnexpectedEnd);

  let err = parse("f(a").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::RequiredTokenNotFound(TT::ParenthesisClose));

  let err = parse("with (a) {}").unwrap_err();
  assert_eq!(err.code(), "PS0010");
}

#[test]
fn test_parse_locations() {
  let ast = parse_ok("let x = 1;\nfoo(x);");
  let stmts = body(&ast);
  assert_eq!(ast.loc(stmts[0]).map(|l| (l.0, l.1)), Some((0, 10)));
  let start = ast.line_col(ast.loc(stmts[1]).unwrap().0);
  assert_eq!((start.line, start.column), (2, 0));
}
