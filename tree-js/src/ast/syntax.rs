use super::NodeId;
use crate::operator::OperatorName;
use derive_more::From;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum VarDeclMode {
  Const,
  Let,
  Var,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum MethodKind {
  Method,
  Getter,
  Setter,
}

/// A property name. Computed keys are child nodes; direct keys are plain text.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum PropKey {
  Direct(String),
  Computed(NodeId),
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum TemplatePart {
  String(String),
  Substitution(NodeId),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum ArrElem {
  Single(NodeId),
  Rest(NodeId),
  Empty,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum FuncBody {
  Block(Vec<NodeId>),
  Expression(NodeId),
}

// Statements.

#[derive(Clone, Debug, Serialize)]
pub struct TopLevel {
  pub body: Vec<NodeId>,
}

#[derive(Clone, Debug, Serialize)]
pub struct BlockStmt {
  pub body: Vec<NodeId>,
}

#[derive(Clone, Debug, Serialize)]
pub struct BreakStmt {
  pub label: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ContinueStmt {
  pub label: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct DebuggerStmt {}

#[derive(Clone, Debug, Serialize)]
pub struct DoWhileStmt {
  pub body: NodeId,
  pub condition: NodeId,
}

#[derive(Clone, Debug, Serialize)]
pub struct EmptyStmt {}

#[derive(Clone, Debug, Serialize)]
pub struct ExprStmt {
  pub expr: NodeId,
}

#[derive(Clone, Debug, Serialize)]
pub struct ForTripleStmt {
  pub init: Option<NodeId>,
  pub cond: Option<NodeId>,
  pub post: Option<NodeId>,
  pub body: NodeId,
}

/// `lhs` is either a single-declarator `VarDecl` or an assignment target.
#[derive(Clone, Debug, Serialize)]
pub struct ForInStmt {
  pub lhs: NodeId,
  pub rhs: NodeId,
  pub body: NodeId,
}

#[derive(Clone, Debug, Serialize)]
pub struct ForOfStmt {
  pub await_: bool,
  pub lhs: NodeId,
  pub rhs: NodeId,
  pub body: NodeId,
}

#[derive(Clone, Debug, Serialize)]
pub struct IfStmt {
  pub test: NodeId,
  pub consequent: NodeId,
  pub alternate: Option<NodeId>,
}

#[derive(Clone, Debug, Serialize)]
pub struct LabelStmt {
  pub name: String,
  pub statement: NodeId,
}

#[derive(Clone, Debug, Serialize)]
pub struct ReturnStmt {
  pub value: Option<NodeId>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SwitchStmt {
  pub test: NodeId,
  pub branches: Vec<NodeId>,
}

/// A `case` (or `default` when `case` is absent) and its statements.
#[derive(Clone, Debug, Serialize)]
pub struct SwitchBranch {
  pub case: Option<NodeId>,
  pub body: Vec<NodeId>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ThrowStmt {
  pub value: NodeId,
}

#[derive(Clone, Debug, Serialize)]
pub struct TryStmt {
  pub wrapped: NodeId,
  pub catch: Option<NodeId>,
  pub finally: Option<NodeId>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CatchBlock {
  pub parameter: Option<NodeId>,
  pub body: Vec<NodeId>,
}

#[derive(Clone, Debug, Serialize)]
pub struct WhileStmt {
  pub condition: NodeId,
  pub body: NodeId,
}

#[derive(Clone, Debug, Serialize)]
pub struct VarDecl {
  pub mode: VarDeclMode,
  pub declarators: Vec<NodeId>,
}

#[derive(Clone, Debug, Serialize)]
pub struct VarDeclarator {
  pub pattern: NodeId,
  pub initializer: Option<NodeId>,
}

#[derive(Clone, Debug, Serialize)]
pub struct FuncDecl {
  // Only absent for `export default function () {}`.
  pub name: Option<NodeId>,
  pub params: Vec<NodeId>,
  pub body: Vec<NodeId>,
  pub async_: bool,
  pub generator: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct ClassDecl {
  pub name: Option<NodeId>,
  pub extends: Option<NodeId>,
  pub members: Vec<NodeId>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ImportStmt {
  pub default: Option<NodeId>,
  pub namespace: Option<NodeId>,
  pub names: Vec<NodeId>,
  pub module: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct ImportSpecifier {
  pub imported: String,
  pub local: NodeId,
}

#[derive(Clone, Debug, Serialize)]
pub struct ExportDeclStmt {
  pub decl: NodeId,
}

#[derive(Clone, Debug, Serialize)]
pub struct ExportDefaultStmt {
  pub value: NodeId,
}

#[derive(Clone, Debug, Serialize)]
pub struct ExportListStmt {
  pub names: Vec<NodeId>,
  pub from: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ExportSpecifier {
  pub local: NodeId,
  pub exported: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct ExportAllStmt {
  pub alias: Option<String>,
  pub from: String,
}

// Expressions.

#[derive(Clone, Debug, Serialize)]
pub struct IdExpr {
  pub name: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct ThisExpr {}

#[derive(Clone, Debug, Serialize)]
pub struct SuperExpr {}

#[derive(Clone, Debug, Serialize)]
pub struct LitNumExpr {
  pub value: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct LitBigIntExpr {
  pub value: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct LitStrExpr {
  pub value: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct LitBoolExpr {
  pub value: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct LitNullExpr {}

#[derive(Clone, Debug, Serialize)]
pub struct LitRegexExpr {
  pub value: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct LitTemplateExpr {
  pub parts: Vec<TemplatePart>,
}

#[derive(Clone, Debug, Serialize)]
pub struct TaggedTemplateExpr {
  pub function: NodeId,
  pub parts: Vec<TemplatePart>,
}

#[derive(Clone, Debug, Serialize)]
pub struct LitArrExpr {
  pub elements: Vec<ArrElem>,
}

#[derive(Clone, Debug, Serialize)]
pub struct LitObjExpr {
  pub members: Vec<NodeId>,
}

#[derive(Clone, Debug, Serialize)]
pub enum ObjMemberType {
  Valued { key: PropKey, value: NodeId },
  Shorthand { id: NodeId, initializer: Option<NodeId> },
  Method { kind: MethodKind, key: PropKey, func: NodeId },
  Rest { value: NodeId },
}

#[derive(Clone, Debug, Serialize)]
pub struct ObjMember {
  pub typ: ObjMemberType,
}

#[derive(Clone, Debug, Serialize)]
pub struct BinaryExpr {
  pub operator: OperatorName,
  pub left: NodeId,
  pub right: NodeId,
}

#[derive(Clone, Debug, Serialize)]
pub struct UnaryExpr {
  pub operator: OperatorName,
  pub argument: NodeId,
}

#[derive(Clone, Debug, Serialize)]
pub struct UnaryPostfixExpr {
  pub operator: OperatorName,
  pub argument: NodeId,
}

#[derive(Clone, Debug, Serialize)]
pub struct CondExpr {
  pub test: NodeId,
  pub consequent: NodeId,
  pub alternate: NodeId,
}

#[derive(Clone, Debug, Serialize)]
pub struct CallExpr {
  pub optional_chaining: bool,
  pub callee: NodeId,
  pub arguments: Vec<NodeId>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CallArg {
  pub spread: bool,
  pub value: NodeId,
}

#[derive(Clone, Debug, Serialize)]
pub struct NewExpr {
  pub callee: NodeId,
  pub arguments: Vec<NodeId>,
}

#[derive(Clone, Debug, Serialize)]
pub struct MemberExpr {
  pub optional_chaining: bool,
  pub left: NodeId,
  pub right: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct ComputedMemberExpr {
  pub optional_chaining: bool,
  pub object: NodeId,
  pub member: NodeId,
}

#[derive(Clone, Debug, Serialize)]
pub struct FuncExpr {
  pub name: Option<NodeId>,
  pub params: Vec<NodeId>,
  pub body: Vec<NodeId>,
  pub async_: bool,
  pub generator: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct ArrowFuncExpr {
  pub params: Vec<NodeId>,
  pub body: FuncBody,
  pub async_: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct ClassExpr {
  pub name: Option<NodeId>,
  pub extends: Option<NodeId>,
  pub members: Vec<NodeId>,
}

#[derive(Clone, Debug, Serialize)]
pub enum ClassMemberType {
  Method { kind: MethodKind, func: NodeId },
  Field { value: Option<NodeId> },
}

#[derive(Clone, Debug, Serialize)]
pub struct ClassMember {
  pub key: PropKey,
  pub static_: bool,
  pub typ: ClassMemberType,
}

#[derive(Clone, Debug, Serialize)]
pub struct YieldExpr {
  pub argument: Option<NodeId>,
  pub delegate: bool,
}

// Patterns and names.

/// The declared name of a function or class.
#[derive(Clone, Debug, Serialize)]
pub struct ClassOrFuncName {
  pub name: String,
}

/// An identifier in a binding or assignment position.
#[derive(Clone, Debug, Serialize)]
pub struct IdPat {
  pub name: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct ArrPat {
  // `None` is a hole.
  pub elements: Vec<Option<NodeId>>,
  pub rest: Option<NodeId>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ArrPatElem {
  pub target: NodeId,
  pub default_value: Option<NodeId>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ObjPat {
  pub properties: Vec<NodeId>,
  pub rest: Option<NodeId>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ObjPatProp {
  pub key: PropKey,
  pub target: NodeId,
  pub shorthand: bool,
  pub default_value: Option<NodeId>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Param {
  pub pattern: NodeId,
  pub default_value: Option<NodeId>,
  pub rest: bool,
}

#[derive(Clone, Debug, From, Serialize)]
#[serde(tag = "$t")]
pub enum Syntax {
  TopLevel(TopLevel),
  BlockStmt(BlockStmt),
  BreakStmt(BreakStmt),
  ContinueStmt(ContinueStmt),
  DebuggerStmt(DebuggerStmt),
  DoWhileStmt(DoWhileStmt),
  EmptyStmt(EmptyStmt),
  ExprStmt(ExprStmt),
  ForTripleStmt(ForTripleStmt),
  ForInStmt(ForInStmt),
  ForOfStmt(ForOfStmt),
  IfStmt(IfStmt),
  LabelStmt(LabelStmt),
  ReturnStmt(ReturnStmt),
  SwitchStmt(SwitchStmt),
  SwitchBranch(SwitchBranch),
  ThrowStmt(ThrowStmt),
  TryStmt(TryStmt),
  CatchBlock(CatchBlock),
  WhileStmt(WhileStmt),
  VarDecl(VarDecl),
  VarDeclarator(VarDeclarator),
  FuncDecl(FuncDecl),
  ClassDecl(ClassDecl),
  ImportStmt(ImportStmt),
  ImportSpecifier(ImportSpecifier),
  ExportDeclStmt(ExportDeclStmt),
  ExportDefaultStmt(ExportDefaultStmt),
  ExportListStmt(ExportListStmt),
  ExportSpecifier(ExportSpecifier),
  ExportAllStmt(ExportAllStmt),

  IdExpr(IdExpr),
  ThisExpr(ThisExpr),
  SuperExpr(SuperExpr),
  LitNumExpr(LitNumExpr),
  LitBigIntExpr(LitBigIntExpr),
  LitStrExpr(LitStrExpr),
  LitBoolExpr(LitBoolExpr),
  LitNullExpr(LitNullExpr),
  LitRegexExpr(LitRegexExpr),
  LitTemplateExpr(LitTemplateExpr),
  TaggedTemplateExpr(TaggedTemplateExpr),
  LitArrExpr(LitArrExpr),
  LitObjExpr(LitObjExpr),
  ObjMember(ObjMember),
  BinaryExpr(BinaryExpr),
  UnaryExpr(UnaryExpr),
  UnaryPostfixExpr(UnaryPostfixExpr),
  CondExpr(CondExpr),
  CallExpr(CallExpr),
  CallArg(CallArg),
  NewExpr(NewExpr),
  MemberExpr(MemberExpr),
  ComputedMemberExpr(ComputedMemberExpr),
  FuncExpr(FuncExpr),
  ArrowFuncExpr(ArrowFuncExpr),
  ClassExpr(ClassExpr),
  ClassMember(ClassMember),
  YieldExpr(YieldExpr),

  ClassOrFuncName(ClassOrFuncName),
  IdPat(IdPat),
  ArrPat(ArrPat),
  ArrPatElem(ArrPatElem),
  ObjPat(ObjPat),
  ObjPatProp(ObjPatProp),
  Param(Param),
}

/// Where a child sits within its parent: the field name and, for list fields, the position.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
pub struct Slot {
  pub field: &'static str,
  pub index: Option<usize>,
}

impl Slot {
  pub fn field(field: &'static str) -> Slot {
    Slot { field, index: None }
  }

  pub fn indexed(field: &'static str, index: usize) -> Slot {
    Slot {
      field,
      index: Some(index),
    }
  }
}

#[derive(Default)]
struct ChildList(Vec<(Slot, NodeId)>);

impl ChildList {
  fn one(&mut self, field: &'static str, id: NodeId) -> &mut Self {
    self.0.push((Slot::field(field), id));
    self
  }

  fn opt(&mut self, field: &'static str, id: Option<NodeId>) -> &mut Self {
    if let Some(id) = id {
      self.one(field, id);
    }
    self
  }

  fn many(&mut self, field: &'static str, ids: &[NodeId]) -> &mut Self {
    for (i, &id) in ids.iter().enumerate() {
      self.0.push((Slot::indexed(field, i), id));
    }
    self
  }

  fn holes(&mut self, field: &'static str, ids: &[Option<NodeId>]) -> &mut Self {
    for (i, id) in ids.iter().enumerate() {
      if let Some(id) = *id {
        self.0.push((Slot::indexed(field, i), id));
      }
    }
    self
  }

  fn key(&mut self, field: &'static str, key: &PropKey) -> &mut Self {
    if let PropKey::Computed(id) = key {
      self.one(field, *id);
    }
    self
  }

  fn parts(&mut self, field: &'static str, parts: &[TemplatePart]) -> &mut Self {
    for (i, part) in parts.iter().enumerate() {
      if let TemplatePart::Substitution(id) = part {
        self.0.push((Slot::indexed(field, i), *id));
      }
    }
    self
  }

  fn elements(&mut self, field: &'static str, elements: &[ArrElem]) -> &mut Self {
    for (i, elem) in elements.iter().enumerate() {
      match elem {
        ArrElem::Single(id) | ArrElem::Rest(id) => self.0.push((Slot::indexed(field, i), *id)),
        ArrElem::Empty => {}
      }
    }
    self
  }

  fn func_body(&mut self, field: &'static str, body: &FuncBody) -> &mut Self {
    match body {
      FuncBody::Block(stmts) => self.many(field, stmts),
      FuncBody::Expression(expr) => self.one(field, *expr),
    }
  }
}

/// A mutable view of one child-holding field, used to rewire or detach children.
pub(crate) enum ChildFieldMut<'a> {
  Required(&'a mut NodeId),
  Optional(&'a mut Option<NodeId>),
  List(&'a mut Vec<NodeId>),
  Holes(&'a mut Vec<Option<NodeId>>),
  Elements(&'a mut Vec<ArrElem>),
  Parts(&'a mut Vec<TemplatePart>),
  Key(&'a mut PropKey),
}

impl Syntax {
  /// The stable kind name of this node, matching the enum variant.
  pub fn kind_name(&self) -> &'static str {
    match self {
      Syntax::TopLevel(_) => "TopLevel",
      Syntax::BlockStmt(_) => "BlockStmt",
      Syntax::BreakStmt(_) => "BreakStmt",
      Syntax::ContinueStmt(_) => "ContinueStmt",
      Syntax::DebuggerStmt(_) => "DebuggerStmt",
      Syntax::DoWhileStmt(_) => "DoWhileStmt",
      Syntax::EmptyStmt(_) => "EmptyStmt",
      Syntax::ExprStmt(_) => "ExprStmt",
      Syntax::ForTripleStmt(_) => "ForTripleStmt",
      Syntax::ForInStmt(_) => "ForInStmt",
      Syntax::ForOfStmt(_) => "ForOfStmt",
      Syntax::IfStmt(_) => "IfStmt",
      Syntax::LabelStmt(_) => "LabelStmt",
      Syntax::ReturnStmt(_) => "ReturnStmt",
      Syntax::SwitchStmt(_) => "SwitchStmt",
      Syntax::SwitchBranch(_) => "SwitchBranch",
      Syntax::ThrowStmt(_) => "ThrowStmt",
      Syntax::TryStmt(_) => "TryStmt",
      Syntax::CatchBlock(_) => "CatchBlock",
      Syntax::WhileStmt(_) => "WhileStmt",
      Syntax::VarDecl(_) => "VarDecl",
      Syntax::VarDeclarator(_) => "VarDeclarator",
      Syntax::FuncDecl(_) => "FuncDecl",
      Syntax::ClassDecl(_) => "ClassDecl",
      Syntax::ImportStmt(_) => "ImportStmt",
      Syntax::ImportSpecifier(_) => "ImportSpecifier",
      Syntax::ExportDeclStmt(_) => "ExportDeclStmt",
      Syntax::ExportDefaultStmt(_) => "ExportDefaultStmt",
      Syntax::ExportListStmt(_) => "ExportListStmt",
      Syntax::ExportSpecifier(_) => "ExportSpecifier",
      Syntax::ExportAllStmt(_) => "ExportAllStmt",
      Syntax::IdExpr(_) => "IdExpr",
      Syntax::ThisExpr(_) => "ThisExpr",
      Syntax::SuperExpr(_) => "SuperExpr",
      Syntax::LitNumExpr(_) => "LitNumExpr",
      Syntax::LitBigIntExpr(_) => "LitBigIntExpr",
      Syntax::LitStrExpr(_) => "LitStrExpr",
      Syntax::LitBoolExpr(_) => "LitBoolExpr",
      Syntax::LitNullExpr(_) => "LitNullExpr",
      Syntax::LitRegexExpr(_) => "LitRegexExpr",
      Syntax::LitTemplateExpr(_) => "LitTemplateExpr",
      Syntax::TaggedTemplateExpr(_) => "TaggedTemplateExpr",
      Syntax::LitArrExpr(_) => "LitArrExpr",
      Syntax::LitObjExpr(_) => "LitObjExpr",
      Syntax::ObjMember(_) => "ObjMember",
      Syntax::BinaryExpr(_) => "BinaryExpr",
      Syntax::UnaryExpr(_) => "UnaryExpr",
      Syntax::UnaryPostfixExpr(_) => "UnaryPostfixExpr",
      Syntax::CondExpr(_) => "CondExpr",
      Syntax::CallExpr(_) => "CallExpr",
      Syntax::CallArg(_) => "CallArg",
      Syntax::NewExpr(_) => "NewExpr",
      Syntax::MemberExpr(_) => "MemberExpr",
      Syntax::ComputedMemberExpr(_) => "ComputedMemberExpr",
      Syntax::FuncExpr(_) => "FuncExpr",
      Syntax::ArrowFuncExpr(_) => "ArrowFuncExpr",
      Syntax::ClassExpr(_) => "ClassExpr",
      Syntax::ClassMember(_) => "ClassMember",
      Syntax::YieldExpr(_) => "YieldExpr",
      Syntax::ClassOrFuncName(_) => "ClassOrFuncName",
      Syntax::IdPat(_) => "IdPat",
      Syntax::ArrPat(_) => "ArrPat",
      Syntax::ArrPatElem(_) => "ArrPatElem",
      Syntax::ObjPat(_) => "ObjPat",
      Syntax::ObjPatProp(_) => "ObjPatProp",
      Syntax::Param(_) => "Param",
    }
  }

  /// The text of an identifier-like node (`IdExpr`, `IdPat`, `ClassOrFuncName`).
  pub fn identifier_name(&self) -> Option<&str> {
    match self {
      Syntax::IdExpr(n) => Some(&n.name),
      Syntax::IdPat(n) => Some(&n.name),
      Syntax::ClassOrFuncName(n) => Some(&n.name),
      _ => None,
    }
  }

  pub(crate) fn identifier_name_mut(&mut self) -> Option<&mut String> {
    match self {
      Syntax::IdExpr(n) => Some(&mut n.name),
      Syntax::IdPat(n) => Some(&mut n.name),
      Syntax::ClassOrFuncName(n) => Some(&mut n.name),
      _ => None,
    }
  }

  /// Children in source order. A declaration's name precedes its parameters and body.
  pub fn children(&self) -> Vec<(Slot, NodeId)> {
    let mut c = ChildList::default();
    match self {
      Syntax::TopLevel(n) => {
        c.many("body", &n.body);
      }
      Syntax::BlockStmt(n) => {
        c.many("body", &n.body);
      }
      Syntax::BreakStmt(_)
      | Syntax::ContinueStmt(_)
      | Syntax::DebuggerStmt(_)
      | Syntax::EmptyStmt(_)
      | Syntax::ExportAllStmt(_)
      | Syntax::IdExpr(_)
      | Syntax::ThisExpr(_)
      | Syntax::SuperExpr(_)
      | Syntax::LitNumExpr(_)
      | Syntax::LitBigIntExpr(_)
      | Syntax::LitStrExpr(_)
      | Syntax::LitBoolExpr(_)
      | Syntax::LitNullExpr(_)
      | Syntax::LitRegexExpr(_)
      | Syntax::ClassOrFuncName(_)
      | Syntax::IdPat(_) => {}
      Syntax::DoWhileStmt(n) => {
        c.one("body", n.body).one("condition", n.condition);
      }
      Syntax::ExprStmt(n) => {
        c.one("expr", n.expr);
      }
      Syntax::ForTripleStmt(n) => {
        c.opt("init", n.init)
          .opt("cond", n.cond)
          .opt("post", n.post)
          .one("body", n.body);
      }
      Syntax::ForInStmt(n) => {
        c.one("lhs", n.lhs).one("rhs", n.rhs).one("body", n.body);
      }
      Syntax::ForOfStmt(n) => {
        c.one("lhs", n.lhs).one("rhs", n.rhs).one("body", n.body);
      }
      Syntax::IfStmt(n) => {
        c.one("test", n.test)
          .one("consequent", n.consequent)
          .opt("alternate", n.alternate);
      }
      Syntax::LabelStmt(n) => {
        c.one("statement", n.statement);
      }
      Syntax::ReturnStmt(n) => {
        c.opt("value", n.value);
      }
      Syntax::SwitchStmt(n) => {
        c.one("test", n.test).many("branches", &n.branches);
      }
      Syntax::SwitchBranch(n) => {
        c.opt("case", n.case).many("body", &n.body);
      }
      Syntax::ThrowStmt(n) => {
        c.one("value", n.value);
      }
      Syntax::TryStmt(n) => {
        c.one("wrapped", n.wrapped)
          .opt("catch", n.catch)
          .opt("finally", n.finally);
      }
      Syntax::CatchBlock(n) => {
        c.opt("parameter", n.parameter).many("body", &n.body);
      }
      Syntax::WhileStmt(n) => {
        c.one("condition", n.condition).one("body", n.body);
      }
      Syntax::VarDecl(n) => {
        c.many("declarators", &n.declarators);
      }
      Syntax::VarDeclarator(n) => {
        c.one("pattern", n.pattern).opt("initializer", n.initializer);
      }
      Syntax::FuncDecl(n) => {
        c.opt("name", n.name)
          .many("params", &n.params)
          .many("body", &n.body);
      }
      Syntax::ClassDecl(n) => {
        c.opt("name", n.name)
          .opt("extends", n.extends)
          .many("members", &n.members);
      }
      Syntax::ImportStmt(n) => {
        c.opt("default", n.default)
          .opt("namespace", n.namespace)
          .many("names", &n.names);
      }
      Syntax::ImportSpecifier(n) => {
        c.one("local", n.local);
      }
      Syntax::ExportDeclStmt(n) => {
        c.one("decl", n.decl);
      }
      Syntax::ExportDefaultStmt(n) => {
        c.one("value", n.value);
      }
      Syntax::ExportListStmt(n) => {
        c.many("names", &n.names);
      }
      Syntax::ExportSpecifier(n) => {
        c.one("local", n.local);
      }
      Syntax::LitTemplateExpr(n) => {
        c.parts("parts", &n.parts);
      }
      Syntax::TaggedTemplateExpr(n) => {
        c.one("function", n.function).parts("parts", &n.parts);
      }
      Syntax::LitArrExpr(n) => {
        c.elements("elements", &n.elements);
      }
      Syntax::LitObjExpr(n) => {
        c.many("members", &n.members);
      }
      Syntax::ObjMember(n) => match &n.typ {
        ObjMemberType::Valued { key, value } => {
          c.key("key", key).one("value", *value);
        }
        ObjMemberType::Shorthand { id, initializer } => {
          c.one("id", *id).opt("initializer", *initializer);
        }
        ObjMemberType::Method { key, func, .. } => {
          c.key("key", key).one("func", *func);
        }
        ObjMemberType::Rest { value } => {
          c.one("value", *value);
        }
      },
      Syntax::BinaryExpr(n) => {
        c.one("left", n.left).one("right", n.right);
      }
      Syntax::UnaryExpr(n) => {
        c.one("argument", n.argument);
      }
      Syntax::UnaryPostfixExpr(n) => {
        c.one("argument", n.argument);
      }
      Syntax::CondExpr(n) => {
        c.one("test", n.test)
          .one("consequent", n.consequent)
          .one("alternate", n.alternate);
      }
      Syntax::CallExpr(n) => {
        c.one("callee", n.callee).many("arguments", &n.arguments);
      }
      Syntax::CallArg(n) => {
        c.one("value", n.value);
      }
      Syntax::NewExpr(n) => {
        c.one("callee", n.callee).many("arguments", &n.arguments);
      }
      Syntax::MemberExpr(n) => {
        c.one("left", n.left);
      }
      Syntax::ComputedMemberExpr(n) => {
        c.one("object", n.object).one("member", n.member);
      }
      Syntax::FuncExpr(n) => {
        c.opt("name", n.name)
          .many("params", &n.params)
          .many("body", &n.body);
      }
      Syntax::ArrowFuncExpr(n) => {
        c.many("params", &n.params).func_body("body", &n.body);
      }
      Syntax::ClassExpr(n) => {
        c.opt("name", n.name)
          .opt("extends", n.extends)
          .many("members", &n.members);
      }
      Syntax::ClassMember(n) => {
        c.key("key", &n.key);
        match &n.typ {
          ClassMemberType::Method { func, .. } => {
            c.one("func", *func);
          }
          ClassMemberType::Field { value } => {
            c.opt("value", *value);
          }
        };
      }
      Syntax::YieldExpr(n) => {
        c.opt("argument", n.argument);
      }
      Syntax::ArrPat(n) => {
        c.holes("elements", &n.elements).opt("rest", n.rest);
      }
      Syntax::ArrPatElem(n) => {
        c.one("target", n.target)
          .opt("default_value", n.default_value);
      }
      Syntax::ObjPat(n) => {
        c.many("properties", &n.properties).opt("rest", n.rest);
      }
      Syntax::ObjPatProp(n) => {
        c.key("key", &n.key)
          .one("target", n.target)
          .opt("default_value", n.default_value);
      }
      Syntax::Param(n) => {
        c.one("pattern", n.pattern)
          .opt("default_value", n.default_value);
      }
    };
    c.0
  }

  pub(crate) fn child_fields_mut(&mut self) -> Vec<ChildFieldMut<'_>> {
    use ChildFieldMut::*;
    match self {
      Syntax::TopLevel(n) => vec![List(&mut n.body)],
      Syntax::BlockStmt(n) => vec![List(&mut n.body)],
      Syntax::BreakStmt(_)
      | Syntax::ContinueStmt(_)
      | Syntax::DebuggerStmt(_)
      | Syntax::EmptyStmt(_)
      | Syntax::ExportAllStmt(_)
      | Syntax::IdExpr(_)
      | Syntax::ThisExpr(_)
      | Syntax::SuperExpr(_)
      | Syntax::LitNumExpr(_)
      | Syntax::LitBigIntExpr(_)
      | Syntax::LitStrExpr(_)
      | Syntax::LitBoolExpr(_)
      | Syntax::LitNullExpr(_)
      | Syntax::LitRegexExpr(_)
      | Syntax::ClassOrFuncName(_)
      | Syntax::IdPat(_) => Vec::new(),
      Syntax::DoWhileStmt(n) => vec![Required(&mut n.body), Required(&mut n.condition)],
      Syntax::ExprStmt(n) => vec![Required(&mut n.expr)],
      Syntax::ForTripleStmt(n) => vec![
        Optional(&mut n.init),
        Optional(&mut n.cond),
        Optional(&mut n.post),
        Required(&mut n.body),
      ],
      Syntax::ForInStmt(n) => vec![
        Required(&mut n.lhs),
        Required(&mut n.rhs),
        Required(&mut n.body),
      ],
      Syntax::ForOfStmt(n) => vec![
        Required(&mut n.lhs),
        Required(&mut n.rhs),
        Required(&mut n.body),
      ],
      Syntax::IfStmt(n) => vec![
        Required(&mut n.test),
        Required(&mut n.consequent),
        Optional(&mut n.alternate),
      ],
      Syntax::LabelStmt(n) => vec![Required(&mut n.statement)],
      Syntax::ReturnStmt(n) => vec![Optional(&mut n.value)],
      Syntax::SwitchStmt(n) => vec![Required(&mut n.test), List(&mut n.branches)],
      Syntax::SwitchBranch(n) => vec![Optional(&mut n.case), List(&mut n.body)],
      Syntax::ThrowStmt(n) => vec![Required(&mut n.value)],
      Syntax::TryStmt(n) => vec![
        Required(&mut n.wrapped),
        Optional(&mut n.catch),
        Optional(&mut n.finally),
      ],
      Syntax::CatchBlock(n) => vec![Optional(&mut n.parameter), List(&mut n.body)],
      Syntax::WhileStmt(n) => vec![Required(&mut n.condition), Required(&mut n.body)],
      Syntax::VarDecl(n) => vec![List(&mut n.declarators)],
      Syntax::VarDeclarator(n) => vec![Required(&mut n.pattern), Optional(&mut n.initializer)],
      Syntax::FuncDecl(n) => vec![
        Optional(&mut n.name),
        List(&mut n.params),
        List(&mut n.body),
      ],
      Syntax::ClassDecl(n) => vec![
        Optional(&mut n.name),
        Optional(&mut n.extends),
        List(&mut n.members),
      ],
      Syntax::ImportStmt(n) => vec![
        Optional(&mut n.default),
        Optional(&mut n.namespace),
        List(&mut n.names),
      ],
      Syntax::ImportSpecifier(n) => vec![Required(&mut n.local)],
      Syntax::ExportDeclStmt(n) => vec![Required(&mut n.decl)],
      Syntax::ExportDefaultStmt(n) => vec![Required(&mut n.value)],
      Syntax::ExportListStmt(n) => vec![List(&mut n.names)],
      Syntax::ExportSpecifier(n) => vec![Required(&mut n.local)],
      Syntax::LitTemplateExpr(n) => vec![Parts(&mut n.parts)],
      Syntax::TaggedTemplateExpr(n) => vec![Required(&mut n.function), Parts(&mut n.parts)],
      Syntax::LitArrExpr(n) => vec![Elements(&mut n.elements)],
      Syntax::LitObjExpr(n) => vec![List(&mut n.members)],
      Syntax::ObjMember(n) => match &mut n.typ {
        ObjMemberType::Valued { key, value } => vec![Key(key), Required(value)],
        ObjMemberType::Shorthand { id, initializer } => vec![Required(id), Optional(initializer)],
        ObjMemberType::Method { key, func, .. } => vec![Key(key), Required(func)],
        ObjMemberType::Rest { value } => vec![Required(value)],
      },
      Syntax::BinaryExpr(n) => vec![Required(&mut n.left), Required(&mut n.right)],
      Syntax::UnaryExpr(n) => vec![Required(&mut n.argument)],
      Syntax::UnaryPostfixExpr(n) => vec![Required(&mut n.argument)],
      Syntax::CondExpr(n) => vec![
        Required(&mut n.test),
        Required(&mut n.consequent),
        Required(&mut n.alternate),
      ],
      Syntax::CallExpr(n) => vec![Required(&mut n.callee), List(&mut n.arguments)],
      Syntax::CallArg(n) => vec![Required(&mut n.value)],
      Syntax::NewExpr(n) => vec![Required(&mut n.callee), List(&mut n.arguments)],
      Syntax::MemberExpr(n) => vec![Required(&mut n.left)],
      Syntax::ComputedMemberExpr(n) => vec![Required(&mut n.object), Required(&mut n.member)],
      Syntax::FuncExpr(n) => vec![
        Optional(&mut n.name),
        List(&mut n.params),
        List(&mut n.body),
      ],
      Syntax::ArrowFuncExpr(n) => {
        let body = match &mut n.body {
          FuncBody::Block(stmts) => List(stmts),
          FuncBody::Expression(expr) => Required(expr),
        };
        vec![List(&mut n.params), body]
      }
      Syntax::ClassExpr(n) => vec![
        Optional(&mut n.name),
        Optional(&mut n.extends),
        List(&mut n.members),
      ],
      Syntax::ClassMember(n) => {
        let value = match &mut n.typ {
          ClassMemberType::Method { func, .. } => Required(func),
          ClassMemberType::Field { value } => Optional(value),
        };
        vec![Key(&mut n.key), value]
      }
      Syntax::YieldExpr(n) => vec![Optional(&mut n.argument)],
      Syntax::ArrPat(n) => vec![Holes(&mut n.elements), Optional(&mut n.rest)],
      Syntax::ArrPatElem(n) => vec![Required(&mut n.target), Optional(&mut n.default_value)],
      Syntax::ObjPat(n) => vec![List(&mut n.properties), Optional(&mut n.rest)],
      Syntax::ObjPatProp(n) => vec![
        Key(&mut n.key),
        Required(&mut n.target),
        Optional(&mut n.default_value),
      ],
      Syntax::Param(n) => vec![Required(&mut n.pattern), Optional(&mut n.default_value)],
    }
  }
}
