mod common;

use common::assert_json_eq;
use common::program;
use serde_json::json;
use serde_json::to_value;

#[test]
fn snapshot_describes_scopes_bindings_and_globals() {
  let p = program("let x = 1;\nfunction f(y) { return x + y; }\nf(z);");
  let actual = to_value(p.snapshot()).unwrap();
  assert_json_eq(
    &actual,
    &json!({
      "scopes": [
        {
          "id": 0,
          "kind": "program",
          "parent": null,
          "owner": "TopLevel",
          "start": { "line": 1, "column": 0 },
          "bindings": [
            {
              "name": "f",
              "kind": "functionDeclaration",
              "declaration": "FuncDecl",
              "declaredAt": { "line": 2, "column": 9 },
              "constant": false,
              "references": [{ "line": 3, "column": 0 }],
              "constantViolations": [],
            },
            {
              "name": "x",
              "kind": "let",
              "declaration": "VarDeclarator",
              "declaredAt": { "line": 1, "column": 4 },
              "constant": false,
              "references": [{ "line": 2, "column": 23 }],
              "constantViolations": [],
            },
          ],
          "labels": [],
          "uids": [],
        },
        {
          "id": 1,
          "kind": "function",
          "parent": 0,
          "owner": "FuncDecl",
          "start": { "line": 2, "column": 0 },
          "bindings": [
            {
              "name": "y",
              "kind": "parameter",
              "declaration": "IdPat",
              "declaredAt": { "line": 2, "column": 11 },
              "constant": false,
              "references": [{ "line": 2, "column": 27 }],
              "constantViolations": [],
            },
          ],
          "labels": [],
          "uids": [],
        },
      ],
      "globals": { "z": [{ "line": 3, "column": 2 }] },
      "diagnostics": [],
    }),
  );
}

#[test]
fn snapshot_reflects_renames_and_uids() {
  let mut p = program("const x = 1;\nloop: x;");
  let root = p.scopes().root();
  assert_eq!(p.rename(root, "x", None), Some("_x".to_string()));
  let actual = to_value(p.snapshot()).unwrap();
  assert_json_eq(
    &actual["scopes"][0],
    &json!({
      "id": 0,
      "kind": "program",
      "parent": null,
      "owner": "TopLevel",
      "start": { "line": 1, "column": 0 },
      "bindings": [
        {
          "name": "_x",
          "kind": "const",
          "declaration": "VarDeclarator",
          "declaredAt": { "line": 1, "column": 6 },
          "constant": true,
          "references": [{ "line": 2, "column": 6 }],
          "constantViolations": [],
        },
      ],
      "labels": ["loop"],
      "uids": ["_x"],
    }),
  );
}

#[test]
fn snapshot_lists_diagnostics() {
  let p = program("let a; let a;");
  let actual = to_value(p.snapshot()).unwrap();
  assert_json_eq(
    &actual["diagnostics"],
    &json!([
      {
        "code": "SC0001",
        "message": "Duplicate declaration of `a`",
        "start": { "line": 1, "column": 11 },
      },
    ]),
  );
}
