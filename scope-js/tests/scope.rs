mod common;

use common::ids;
use common::nodes;
use common::program;
use scope_js::BindingKind;
use scope_js::Program;
use scope_js::ScopeDiagnosticType;
use scope_js::ScopeKind;
use scope_js::ScopeOptions;
use scope_js::TopLevelMode;
use tree_js::ast::ObjMemberType;
use tree_js::ast::PropKey;
use tree_js::ast::Syntax;

#[test]
fn rename_var_and_reference() {
  let mut p = program("var a; a;");
  let root = p.scopes().root();
  let a = p.scopes().get_binding(root, "a").unwrap();
  assert_eq!(p.scopes().binding(a).references(), 1);

  assert_eq!(p.rename(root, "a", Some("b")), Some("b".to_string()));
  assert_eq!(p.scopes().get_binding(root, "a"), None);
  assert_eq!(p.scopes().get_binding(root, "b"), Some(a));
  assert_eq!(p.scopes().binding(a).name(), "b");
  assert!(ids(&p, "a").is_empty());
  assert_eq!(ids(&p, "b").len(), 2);
}

#[test]
fn rename_from_switch_scope() {
  let mut p = program("var a; switch (a) { case 0: a; }");
  let uses = ids(&p, "a");
  assert_eq!(uses.len(), 3);
  let switch = p.scope_of(uses[2]).unwrap();
  assert_eq!(p.scopes().scope(switch).kind(), ScopeKind::Switch);
  // The discriminant belongs to the switch scope too.
  assert_eq!(p.scope_of(uses[1]), Some(switch));

  let a = p.scopes().get_binding(switch, "a").unwrap();
  assert_eq!(p.scopes().binding(a).scope(), p.scopes().root());
  assert_eq!(p.scopes().binding(a).references(), 2);

  assert_eq!(p.rename(switch, "a", Some("b")), Some("b".to_string()));
  assert!(ids(&p, "a").is_empty());
  assert_eq!(ids(&p, "b").len(), 3);

  let mut p = program("var a; switch (a) { case 0: a; }");
  let switch = p.scope_of(ids(&p, "a")[2]).unwrap();
  assert_eq!(p.rename(switch, "a", None), Some("_a".to_string()));
  let root = p.scopes().root();
  assert_eq!(p.scopes().get_binding(root, "a"), None);
  assert!(p.scopes().get_binding(root, "_a").is_some());
  assert!(ids(&p, "a").is_empty());
  assert_eq!(ids(&p, "_a").len(), 3);
}

#[test]
fn rename_onto_bound_name_takes_over_the_entry() {
  let mut p = program("var a, b;");
  let root = p.scopes().root();
  let a = p.scopes().get_binding(root, "a").unwrap();
  assert_eq!(p.rename(root, "a", Some("b")), Some("b".to_string()));
  assert_eq!(p.scopes().get_binding(root, "a"), None);
  assert_eq!(p.scopes().get_binding(root, "b"), Some(a));
  assert_eq!(ids(&p, "b").len(), 2);
}

#[test]
fn parameter_references_have_positions() {
  let p = program("function square(n) { return n * n; }");
  let refs = nodes(&p, |stx| matches!(stx, Syntax::IdExpr(_)));
  let scope = p.scope_of(refs[0]).unwrap();
  let n = p.scopes().get_binding(scope, "n").unwrap();
  let binding = p.scopes().binding(n);
  assert_eq!(binding.kind(), BindingKind::Parameter);
  assert_eq!(binding.reference_paths(), refs.as_slice());
  let columns: Vec<_> = binding
    .reference_paths()
    .iter()
    .map(|r| p.ast().path(*r).start().column)
    .collect();
  assert_eq!(columns, vec![28, 32]);
}

#[test]
fn inherited_object_keys_are_not_found() {
  let p = program("x: for (;;) break x;");
  let root = p.scopes().root();
  assert_eq!(p.scopes().get_binding(root, "toString"), None);
  assert_eq!(p.scopes().get_label(root, "toString"), None);
  assert_eq!(p.scopes().get_binding(root, "constructor"), None);
  assert_eq!(p.scopes().get_label(root, "__proto__"), None);
}

#[test]
fn generate_uid_skips_taken_names() {
  let mut p = program("");
  let root = p.scopes().root();
  assert_eq!(p.generate_uid(root, "foo"), "_foo");
  assert_eq!(p.generate_uid(root, "foo"), "_foo2");
  assert_eq!(p.generate_uid(root, "_foo2"), "_foo3");
  assert!(p.scopes().has_uid(root, "_foo"));

  let mut p = program("var _foo;");
  let root = p.scopes().root();
  assert_eq!(p.generate_uid(root, "foo"), "_foo2");

  let mut p = program("var _foo, _foo1, _foo2;");
  let root = p.scopes().root();
  assert_eq!(p.generate_uid(root, "foo"), "_foo3");

  let mut p = program("_foo: {} _foo1: {} _foo2: {}");
  let root = p.scopes().root();
  assert_eq!(p.generate_uid(root, "foo"), "_foo3");

  let mut p = program("foo: {}");
  let root = p.scopes().root();
  assert_eq!(p.generate_uid(root, "foo"), "_foo");

  // Globals and labels are taken too.
  let mut p = program("_foo; _bar: ;");
  let root = p.scopes().root();
  assert_eq!(p.generate_uid(root, "foo"), "_foo2");
  assert_eq!(p.generate_uid(root, "bar"), "_bar2");

  let mut p = program("");
  let root = p.scopes().root();
  assert_eq!(p.generate_uid(root, "foo-bar"), "_fooBar");
  assert_eq!(p.generate_uid(root, ""), "_temp");
}

#[test]
fn uids_from_inner_scopes_are_seen_everywhere() {
  let mut p = program("function f() { x; }");
  let x = ids(&p, "x")[0];
  let inner = p.scope_of(x).unwrap();
  let root = p.scopes().root();
  assert_eq!(p.generate_uid(inner, "ref"), "_ref");
  assert_eq!(p.generate_uid(root, "ref"), "_ref2");
  assert_eq!(p.scopes().scope(root).uids(), vec!["_ref", "_ref2"]);
}

#[test]
fn var_hoists_past_blocks() {
  let p = program("a; { var a = 1; let b; } if (1) { var c; }");
  let root = p.scopes().root();
  let a = p.scopes().get_own_binding(root, "a").unwrap();
  let binding = p.scopes().binding(a);
  assert_eq!(binding.kind(), BindingKind::Var);
  assert_eq!(binding.references(), 1);
  assert!(binding.constant_violations().is_empty());
  assert!(p.scopes().has_own_binding(root, "c"));
  assert!(!p.scopes().has_own_binding(root, "b"));

  let b = ids(&p, "b")[0];
  let block = p.scope_of(b).unwrap();
  assert_eq!(p.scopes().scope(block).kind(), ScopeKind::Block);
  assert!(p.scopes().has_own_binding(block, "b"));
  assert!(p.scopes().parent_has_binding(block, "a"));
}

#[test]
fn var_hoists_past_switch_catch_and_for() {
  let p = program(
    "function f() { switch (1) { case 0: var s; let t; } try {} catch (e) { var c; } for (var i of []) { var j; } t; }",
  );
  let switch = p.scope_of(ids(&p, "s")[0]).unwrap();
  assert_eq!(p.scopes().scope(switch).kind(), ScopeKind::Switch);
  let func = p.scopes().scope(switch).parent().unwrap();
  assert_eq!(p.scopes().scope(func).kind(), ScopeKind::Function);
  for name in ["s", "c", "i", "j"] {
    assert!(p.scopes().has_own_binding(func, name), "{name}");
  }

  assert!(p.scopes().has_own_binding(switch, "t"));
  assert!(!p.scopes().has_own_binding(func, "t"));
  let globals: Vec<_> = p.scopes().globals().keys().map(String::as_str).collect();
  assert_eq!(globals, vec!["t"]);
  assert_eq!(p.scopes().globals()["t"], vec![ids(&p, "t")[1]]);
}

#[test]
fn initialized_var_in_catch_writes_to_parameter() {
  let p = program("try {} catch (e) { var e = 1; }");
  let e = ids(&p, "e");
  let catch = p
    .scopes()
    .scopes()
    .find(|(_, s)| s.kind() == ScopeKind::Catch)
    .map(|(id, _)| id)
    .unwrap();
  let param = p.scopes().get_own_binding(catch, "e").unwrap();
  assert_eq!(p.scopes().binding(param).constant_violations(), &[e[1]]);

  let root = p.scopes().root();
  let var = p.scopes().get_own_binding(root, "e").unwrap();
  assert_eq!(p.scopes().binding(var).kind(), BindingKind::Var);
  assert!(p.scopes().binding(var).constant_violations().is_empty());
}

#[test]
fn shadowing_resolves_to_innermost() {
  let p = program("let x = 1; function f() { let x = 2; return x; } x; { let y; } y;");
  let root = p.scopes().root();
  let outer = p.scopes().get_own_binding(root, "x").unwrap();
  let uses = ids(&p, "x");
  assert_eq!(uses.len(), 4);
  let func = p.scope_of(uses[2]).unwrap();
  assert_eq!(p.scopes().scope(func).kind(), ScopeKind::Function);
  let inner = p.scopes().get_own_binding(func, "x").unwrap();
  assert_ne!(outer, inner);
  assert_eq!(p.scopes().binding(inner).reference_paths(), &[uses[2]]);
  assert_eq!(p.scopes().binding(outer).reference_paths(), &[uses[3]]);

  // `y` is only visible inside its block.
  assert!(p.scopes().has_global("y"));
  assert_eq!(p.scopes().globals()["y"].len(), 1);
  assert!(!p.scopes().has_global("x"));
}

#[test]
fn scopes_follow_constructs() {
  let p = program(
    "function f() { let x; }\nfor (let i = 0; i < 1; i++) { let j; }\ntry {} catch (e) { e; }\nclass C {}",
  );
  let kinds: Vec<_> = p.scopes().scopes().map(|(_, s)| s.kind()).collect();
  assert_eq!(kinds, vec![
    ScopeKind::Program,
    ScopeKind::Function,
    ScopeKind::For,
    ScopeKind::Block,
    ScopeKind::Block,
    ScopeKind::Catch,
    ScopeKind::Class,
  ]);

  // Function bodies share the function's scope.
  let x = ids(&p, "x")[0];
  let func = p.scope_of(x).unwrap();
  assert_eq!(p.scopes().scope(func).kind(), ScopeKind::Function);
  assert!(p.scopes().has_own_binding(func, "x"));
  assert_eq!(
    p.ast().path(p.scopes().scope(func).owner()).kind(),
    "FuncDecl"
  );

  let j = ids(&p, "j")[0];
  let body = p.scope_of(j).unwrap();
  let for_scope = p.scopes().scope(body).parent().unwrap();
  assert_eq!(p.scopes().scope(for_scope).kind(), ScopeKind::For);
  assert!(p.scopes().has_own_binding(for_scope, "i"));
  assert_eq!(p.scopes().binding(p.scopes().get_binding(body, "i").unwrap()).references(), 1);

  let e = ids(&p, "e");
  let catch = p.scope_of(e[1]).unwrap();
  let e = p.scopes().get_own_binding(catch, "e").unwrap();
  assert_eq!(p.scopes().binding(e).kind(), BindingKind::CatchParameter);
  assert_eq!(p.scopes().binding(e).references(), 1);
}

#[test]
fn binding_paths_point_at_declaring_constructs() {
  let p = program(
    "var { a, b: [c] } = o;\nfunction f(p, { q } = {}) { (function g() { g; }); }\nclass C {}\nlet d = class D {};",
  );
  let root = p.scopes().root();
  let kind_of = |id| p.ast().path(id).kind();
  let binding = |scope, name| {
    let id = p.scopes().get_binding(scope, name).unwrap();
    p.scopes().binding(id)
  };

  for name in ["a", "c"] {
    let b = binding(root, name);
    assert_eq!(b.kind(), BindingKind::Var);
    assert_eq!(kind_of(b.path()), "VarDeclarator");
    assert_eq!(kind_of(b.identifier()), "IdPat");
  }
  assert!(!p.scopes().has_binding(root, "b"));

  let f = binding(root, "f");
  assert_eq!(f.kind(), BindingKind::FunctionDeclaration);
  assert_eq!(kind_of(f.path()), "FuncDecl");
  assert_eq!(kind_of(f.identifier()), "ClassOrFuncName");

  let g_ref = ids(&p, "g")[1];
  let g_scope = p.scope_of(g_ref).unwrap();
  let g = binding(g_scope, "g");
  assert_eq!(g.kind(), BindingKind::Local);
  assert_eq!(kind_of(g.path()), "FuncExpr");
  assert_eq!(g.reference_paths(), &[g_ref]);
  assert!(g.is_constant());
  assert!(!p.scopes().has_binding(root, "g"));

  let func = p.scopes().scope(g_scope).parent().unwrap();
  for name in ["p", "q"] {
    let param = binding(func, name);
    assert_eq!(param.kind(), BindingKind::Parameter);
    assert_eq!(param.path(), param.identifier());
    assert_eq!(kind_of(param.path()), "IdPat");
  }

  let c = binding(root, "C");
  assert_eq!(c.kind(), BindingKind::Let);
  assert_eq!(kind_of(c.path()), "ClassDecl");
  assert!(!p.scopes().has_binding(root, "D"));
  let class_expr = nodes(&p, |stx| matches!(stx, Syntax::ClassExpr(_)))[0];
  let class_scope = p.scope_of(class_expr).unwrap();
  assert_eq!(binding(class_scope, "D").kind(), BindingKind::Local);
}

#[test]
fn writes_are_constant_violations() {
  let p = program(
    "let a = 1; a = 2; a++; a += 1; [a] = [3]; ({ a } = {}); for (a of []) ; a;\nconst k = 1; k;",
  );
  let root = p.scopes().root();
  let a = p.scopes().binding(p.scopes().get_binding(root, "a").unwrap());
  assert_eq!(a.constant_violations().len(), 6);
  assert_eq!(a.references(), 1);
  assert!(!a.is_constant());

  let k = p.scopes().binding(p.scopes().get_binding(root, "k").unwrap());
  assert!(k.is_constant());
  assert!(k.is_referenced());
}

#[test]
fn redeclarations_join_the_first_binding() {
  let mut p = program("var a = 1; var a = 2; var a; a;");
  let root = p.scopes().root();
  let a = p.scopes().get_binding(root, "a").unwrap();
  let binding = p.scopes().binding(a);
  assert_eq!(binding.redeclarations().len(), 2);
  assert_eq!(binding.constant_violations().len(), 1);
  assert!(p.scopes().diagnostics().is_empty());

  p.rename(root, "a", Some("z"));
  assert!(ids(&p, "a").is_empty());
  assert_eq!(ids(&p, "z").len(), 4);
}

#[test]
fn rename_without_new_name_uses_uid() {
  let mut p = program("var a; a; var _a2;");
  let root = p.scopes().root();
  assert_eq!(p.rename(root, "a", None), Some("_a".to_string()));
  assert_eq!(ids(&p, "_a").len(), 2);
  assert!(p.scopes().has_binding(root, "_a"));
}

#[test]
fn rename_of_unknown_name_is_a_no_op() {
  let mut p = program("var a; b;");
  let root = p.scopes().root();
  assert_eq!(p.rename(root, "b", Some("c")), None);
  assert_eq!(p.rename(root, "toString", Some("c")), None);
  assert_eq!(ids(&p, "b").len(), 1);
  assert!(ids(&p, "c").is_empty());
}

#[test]
fn rename_only_touches_resolved_binding() {
  let mut p = program("var a; function f() { var a; a; } a;");
  let root = p.scopes().root();
  p.rename(root, "a", Some("b"));
  assert_eq!(ids(&p, "a").len(), 2);
  assert_eq!(ids(&p, "b").len(), 2);

  let inner_ref = ids(&p, "a")[1];
  let inner = p.scope_of(inner_ref).unwrap();
  assert_eq!(p.rename(inner, "a", Some("c")), Some("c".to_string()));
  assert!(ids(&p, "a").is_empty());
  assert_eq!(ids(&p, "b").len(), 2);
  assert_eq!(ids(&p, "c").len(), 2);
}

#[test]
fn rename_expands_shorthand_properties() {
  let mut p = program("let a = 1; ({ a }); function f({ a }) { return a; }");
  let root = p.scopes().root();
  p.rename(root, "a", Some("b"));
  let member = nodes(&p, |stx| matches!(stx, Syntax::ObjMember(_)))[0];
  let Some(Syntax::ObjMember(member)) = p.ast().stx(member) else {
    panic!("expected object member");
  };
  let ObjMemberType::Valued { key, value } = &member.typ else {
    panic!("expected valued member, got {:?}", member.typ);
  };
  assert_eq!(key, &PropKey::Direct("a".to_string()));
  assert_eq!(p.ast().identifier_name(*value), Some("b"));

  // The parameter's own `a` is a different binding.
  let inner_ref = *ids(&p, "a").last().unwrap();
  let func = p.scope_of(inner_ref).unwrap();
  p.rename(func, "a", Some("c"));
  let prop = nodes(&p, |stx| matches!(stx, Syntax::ObjPatProp(_)))[0];
  let Some(Syntax::ObjPatProp(prop)) = p.ast().stx(prop) else {
    panic!("expected pattern property");
  };
  assert!(!prop.shorthand);
  assert_eq!(prop.key, PropKey::Direct("a".to_string()));
  assert_eq!(p.ast().identifier_name(prop.target), Some("c"));
  assert!(ids(&p, "a").is_empty());
}

#[test]
fn module_bindings() {
  let mut p = program(
    "import d, { a as b, c } from \"m\";\nimport * as ns from \"n\";\nb(ns, d);\nlet e = 1;\nexport { e, c as f };",
  );
  let root = p.scopes().root();
  let kind_of = |p: &Program, name| {
    let id = p.scopes().get_own_binding(root, name).unwrap();
    let binding = p.scopes().binding(id);
    (binding.kind(), p.ast().path(binding.path()).kind())
  };
  assert_eq!(kind_of(&p, "d"), (BindingKind::Module, "ImportStmt"));
  assert_eq!(kind_of(&p, "ns"), (BindingKind::Module, "ImportStmt"));
  assert_eq!(kind_of(&p, "b"), (BindingKind::Module, "ImportSpecifier"));
  assert_eq!(kind_of(&p, "c"), (BindingKind::Module, "ImportSpecifier"));
  assert!(!p.scopes().has_binding(root, "a"));
  assert!(p.scopes().globals().is_empty());
  let c = p.scopes().get_binding(root, "c").unwrap();
  assert_eq!(p.scopes().binding(c).references(), 1);
  assert!(p.scopes().binding(c).is_constant());

  p.rename(root, "b", Some("x"));
  p.rename(root, "e", Some("y"));
  let specifier = nodes(&p, |stx| matches!(stx, Syntax::ImportSpecifier(_)))[0];
  let Some(Syntax::ImportSpecifier(specifier)) = p.ast().stx(specifier) else {
    panic!("expected import specifier");
  };
  assert_eq!(specifier.imported, "a");
  assert_eq!(p.ast().identifier_name(specifier.local), Some("x"));
  let export = nodes(&p, |stx| matches!(stx, Syntax::ExportSpecifier(_)))[0];
  let Some(Syntax::ExportSpecifier(export)) = p.ast().stx(export) else {
    panic!("expected export specifier");
  };
  assert_eq!(export.exported, "e");
  assert_eq!(p.ast().identifier_name(export.local), Some("y"));
}

#[test]
fn reexports_are_not_references() {
  let p = program("export { a } from \"m\";");
  assert!(p.scopes().globals().is_empty());
}

#[test]
fn labels_do_not_chain() {
  let p = program("outer: for (;;) { inner: { break outer; } }");
  let root = p.scopes().root();
  let outer = p.scopes().get_label(root, "outer").unwrap();
  assert_eq!(p.ast().path(p.scopes().label(outer).declaration()).kind(), "LabelStmt");
  assert_eq!(p.scopes().get_label(root, "inner"), None);

  let block = nodes(&p, |stx| matches!(stx, Syntax::BlockStmt(_)))[1];
  let scope = p.scope_of(block).unwrap();
  assert_eq!(p.scopes().get_label(scope, "outer"), None);
  assert!(p.scopes().has_label_in_chain(scope, "outer"));
  assert!(!p.scopes().has_binding(root, "outer"));
}

#[test]
fn duplicate_declarations_are_reported() {
  let cases = [
    ("let a; var a;", 1),
    ("let a; let a;", 1),
    ("const a = 1; var a;", 1),
    ("function f(a) { let a; }", 1),
    ("import a from \"m\"; var a;", 1),
    ("var a; var a;", 0),
    ("function f(a) { var a; }", 0),
    ("let a; function a() {}", 0),
    ("var a; function a() {}", 0),
    ("(function a() { let a; });", 0),
  ];
  for (source, count) in cases {
    let p = program(source);
    let diagnostics = p.scopes().diagnostics();
    assert_eq!(diagnostics.len(), count, "{}", source);
    for d in diagnostics {
      assert_eq!(d.typ, ScopeDiagnosticType::DuplicateDeclaration);
      assert_eq!(d.code(), "SC0001");
      assert_eq!(d.name.as_deref(), Some("a"));
    }
  }
}

#[test]
fn malformed_declarators_are_skipped() {
  let p = program("var {} = x, y = 1; y;");
  let diagnostics = p.scopes().diagnostics();
  assert_eq!(diagnostics.len(), 1);
  assert_eq!(diagnostics[0].code(), "SC0002");
  assert_eq!(diagnostics[0].to_string(), "SC0002: Declaration binds no name");
  let root = p.scopes().root();
  let y = p.scopes().get_binding(root, "y").unwrap();
  assert_eq!(p.scopes().binding(y).references(), 1);
  assert!(p.scopes().has_global("x"));
}

#[test]
fn imports_in_scripts_are_reported_but_bound() {
  let options = ScopeOptions {
    top_level_mode: TopLevelMode::Global,
    ..ScopeOptions::default()
  };
  let p = Program::parse("import a from \"m\"; a;", &options).unwrap();
  assert_eq!(p.scopes().top_level_mode(), TopLevelMode::Global);
  let diagnostics = p.scopes().diagnostics();
  assert_eq!(diagnostics.len(), 1);
  assert_eq!(diagnostics[0].typ, ScopeDiagnosticType::ImportInScript);
  assert_eq!(diagnostics[0].to_string(), "SC0003: Import of `a` outside a module");
  let root = p.scopes().root();
  let a = p.scopes().get_binding(root, "a").unwrap();
  assert_eq!(p.scopes().binding(a).references(), 1);
}

#[test]
fn block_function_hoisting_is_configurable() {
  let source = "{ function f() {} } f;";
  let p = program(source);
  assert!(p.scopes().has_global("f"));

  let options = ScopeOptions {
    block_scoped_functions: false,
    ..ScopeOptions::default()
  };
  let p = Program::parse(source, &options).unwrap();
  let root = p.scopes().root();
  let f = p.scopes().get_own_binding(root, "f").unwrap();
  assert_eq!(p.scopes().binding(f).references(), 1);
  assert!(p.scopes().globals().is_empty());
}

#[test]
fn every_occurrence_resolves_back_to_its_binding() {
  let source = r#"
    var total = 0;
    function add(items, { scale = 1 } = {}) {
      for (let i = 0; i < items.length; i++) {
        const item = items[i];
        total += item * scale;
      }
      try {
        return total;
      } catch (err) {
        let total = err;
        return total;
      }
    }
    const run = (values) => add(values, { scale: 2 });
    switch (run([1])) {
      case 1:
        let total = 2;
        total;
    }
    class Box { get(value) { return value ?? total; } }
  "#;
  let p = program(source);
  let scopes = p.scopes();
  assert!(scopes.diagnostics().is_empty());
  let mut checked = 0;
  for (id, binding) in scopes.bindings() {
    for node in binding
      .reference_paths()
      .iter()
      .chain(binding.constant_violations())
    {
      let name = p.ast().identifier_name(*node).unwrap();
      assert_eq!(name, binding.name());
      let scope = p.scope_of(*node).unwrap();
      assert_eq!(scopes.get_binding(scope, name), Some(id), "{}", name);
      checked += 1;
    }
  }
  assert!(checked > 15);
  // Every identifier expression was either resolved or recorded as a global.
  let id_exprs = nodes(&p, |stx| matches!(stx, Syntax::IdExpr(_))).len();
  let referenced: usize = scopes.bindings().map(|(_, b)| b.references()).sum();
  let globals: usize = scopes.globals().values().map(Vec::len).sum();
  assert_eq!(id_exprs, referenced + globals);
}

#[test]
fn binding_ids_in_chain_omits_shadowed() {
  let p = program("let a, b; function f(a) { c; }");
  let c = ids(&p, "c")[0];
  let scope = p.scope_of(c).unwrap();
  let visible: Vec<_> = p
    .scopes()
    .binding_ids_in_chain(scope)
    .into_iter()
    .map(|id| {
      let b = p.scopes().binding(id);
      (b.name().to_string(), b.kind())
    })
    .collect();
  assert_eq!(visible, vec![
    ("a".to_string(), BindingKind::Parameter),
    ("b".to_string(), BindingKind::Let),
    ("f".to_string(), BindingKind::FunctionDeclaration),
  ]);
}
