use super::expr::decode_string_literal;
use super::is_identifier_name;
use super::ParseCtx;
use super::Parser;
use crate::ast::ClassDecl;
use crate::ast::ClassExpr;
use crate::ast::ClassMember;
use crate::ast::ClassMemberType;
use crate::ast::ClassOrFuncName;
use crate::ast::FuncDecl;
use crate::ast::FuncExpr;
use crate::ast::IdExpr;
use crate::ast::LitObjExpr;
use crate::ast::MethodKind;
use crate::ast::NodeId;
use crate::ast::ObjMember;
use crate::ast::ObjMemberType;
use crate::ast::Param;
use crate::ast::PropKey;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::operator::OperatorName;
use crate::token::TT;

struct MethodHead {
  kind: MethodKind,
  async_: bool,
  generator: bool,
}

impl<'a> Parser<'a> {
  /// Parses `(params)`, including both parentheses.
  pub fn parse_params(&mut self, ctx: ParseCtx) -> SyntaxResult<Vec<NodeId>> {
    let ctx = ctx.with_no_in(false);
    self.require(TT::ParenthesisOpen)?;
    let mut params = Vec::new();
    loop {
      if self.consume_if(TT::ParenthesisClose).is_match() {
        break;
      }
      params.push(self.with_loc(|p| {
        let rest = p.consume_if(TT::DotDotDot).is_match();
        let pattern = p.parse_pattern(ctx)?;
        let default_value = if rest {
          None
        } else {
          p.parse_pattern_default(ctx)?
        };
        Ok(Param {
          pattern,
          default_value,
          rest,
        })
      })?);
      if !self.consume_if(TT::Comma).is_match() {
        self.require(TT::ParenthesisClose)?;
        break;
      }
    }
    Ok(params)
  }

  fn parse_optional_name(&mut self) -> SyntaxResult<Option<NodeId>> {
    if !self.peek().typ.is_binding_identifier() {
      return Ok(None);
    }
    let (loc, name) = self.require_identifier()?;
    Ok(Some(self.node(loc, ClassOrFuncName { name })))
  }

  /// The name is optional so that `export default function () {}` can reuse this.
  pub fn parse_func_decl(&mut self, ctx: ParseCtx) -> SyntaxResult<NodeId> {
    let ctx = ctx.with_no_in(false);
    self.with_loc(|p| {
      let async_ = p.consume_if(TT::KeywordAsync).is_match();
      p.require(TT::KeywordFunction)?;
      let generator = p.consume_if(TT::Asterisk).is_match();
      let name = p.parse_optional_name()?;
      let params = p.parse_params(ctx)?;
      let body = p.parse_braced_stmts(ctx)?;
      Ok(FuncDecl {
        name,
        params,
        body,
        async_,
        generator,
      })
    })
  }

  pub fn parse_func_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<NodeId> {
    let ctx = ctx.with_no_in(false);
    self.with_loc(|p| {
      let async_ = p.consume_if(TT::KeywordAsync).is_match();
      p.require(TT::KeywordFunction)?;
      let generator = p.consume_if(TT::Asterisk).is_match();
      let name = p.parse_optional_name()?;
      let params = p.parse_params(ctx)?;
      let body = p.parse_braced_stmts(ctx)?;
      Ok(FuncExpr {
        name,
        params,
        body,
        async_,
        generator,
      })
    })
  }

  /// The function of a method or accessor: an anonymous function expression starting at the parameters.
  fn parse_method_func(&mut self, ctx: ParseCtx, head: &MethodHead) -> SyntaxResult<NodeId> {
    let ctx = ctx.with_no_in(false);
    self.with_loc(|p| {
      let params = p.parse_params(ctx)?;
      let body = p.parse_braced_stmts(ctx)?;
      Ok(FuncExpr {
        name: None,
        params,
        body,
        async_: head.async_,
        generator: head.generator,
      })
    })
  }

  pub fn parse_prop_key(&mut self, ctx: ParseCtx) -> SyntaxResult<PropKey> {
    let t = self.peek();
    match t.typ {
      TT::BracketOpen => {
        self.consume();
        let key = self.parse_expr_until_comma(ctx.with_no_in(false))?;
        self.require(TT::BracketClose)?;
        Ok(PropKey::Computed(key))
      }
      TT::LiteralString => {
        self.consume();
        Ok(PropKey::Direct(decode_string_literal(self.str(t.loc))))
      }
      TT::LiteralNumber | TT::LiteralBigInt => {
        self.consume();
        Ok(PropKey::Direct(self.string(t.loc)))
      }
      typ if is_identifier_name(typ) => {
        self.consume();
        Ok(PropKey::Direct(self.string(t.loc)))
      }
      _ => Err(t.error(SyntaxErrorType::ExpectedSyntax("property key"))),
    }
  }

  /// Parses modifiers and the key of an object or class member. Returns a head if the member is a method.
  fn parse_member_head(&mut self, ctx: ParseCtx) -> SyntaxResult<(PropKey, Option<MethodHead>)> {
    let [t0, t1] = self.peek_n::<2>();
    // `get`, `set` and `async` are ordinary keys when followed by anything that ends a key.
    let is_modifier = !matches!(
      t1.typ,
      TT::ParenthesisOpen | TT::Colon | TT::Comma | TT::BraceClose | TT::Equals | TT::Semicolon
    );
    let mut head = MethodHead {
      kind: MethodKind::Method,
      async_: false,
      generator: false,
    };
    match t0.typ {
      TT::KeywordAsync if is_modifier && !t1.preceded_by_line_terminator => {
        self.consume();
        head.async_ = true;
        head.generator = self.consume_if(TT::Asterisk).is_match();
      }
      TT::Asterisk => {
        self.consume();
        head.generator = true;
      }
      TT::KeywordGet if is_modifier => {
        self.consume();
        head.kind = MethodKind::Getter;
      }
      TT::KeywordSet if is_modifier => {
        self.consume();
        head.kind = MethodKind::Setter;
      }
      _ => {}
    };
    let is_plain = head.kind == MethodKind::Method && !head.async_ && !head.generator;
    let key = self.parse_prop_key(ctx)?;
    if is_plain && self.peek().typ != TT::ParenthesisOpen {
      return Ok((key, None));
    }
    Ok((key, Some(head)))
  }

  pub fn parse_object_literal(&mut self, ctx: ParseCtx) -> SyntaxResult<NodeId> {
    let ctx = ctx.with_no_in(false);
    self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let mut members = Vec::new();
      loop {
        if p.consume_if(TT::BraceClose).is_match() {
          break;
        }
        let member = p.with_loc(|p| {
          if p.consume_if(TT::DotDotDot).is_match() {
            let value = p.parse_expr_until_comma(ctx)?;
            return Ok(ObjMember {
              typ: ObjMemberType::Rest { value },
            });
          }
          let [t0, t1] = p.peek_n::<2>();
          if t0.typ.is_binding_identifier()
            && matches!(t1.typ, TT::Comma | TT::BraceClose | TT::Equals)
          {
            let (loc, name) = p.require_identifier()?;
            let id = p.node(loc, IdExpr { name });
            // `{a = 1}` is only valid once the literal is converted to a pattern.
            let initializer = p.parse_pattern_default(ctx)?;
            return Ok(ObjMember {
              typ: ObjMemberType::Shorthand { id, initializer },
            });
          }
          let (key, head) = p.parse_member_head(ctx)?;
          let typ = match head {
            Some(head) => ObjMemberType::Method {
              kind: head.kind,
              key,
              func: p.parse_method_func(ctx, &head)?,
            },
            None => {
              p.require(TT::Colon)?;
              ObjMemberType::Valued {
                key,
                value: p.parse_expr_until_comma(ctx)?,
              }
            }
          };
          Ok(ObjMember { typ })
        })?;
        members.push(member);
        if !p.consume_if(TT::Comma).is_match() {
          p.require(TT::BraceClose)?;
          break;
        }
      }
      Ok(LitObjExpr { members })
    })
  }

  fn parse_class_heritage(&mut self, ctx: ParseCtx) -> SyntaxResult<Option<NodeId>> {
    if !self.consume_if(TT::KeywordExtends).is_match() {
      return Ok(None);
    }
    let min_prec = OperatorName::Call.precedence();
    Ok(Some(self.parse_expr_with_min_prec(ctx, min_prec)?))
  }

  fn parse_class_body(&mut self, ctx: ParseCtx) -> SyntaxResult<Vec<NodeId>> {
    self.require(TT::BraceOpen)?;
    let mut members = Vec::new();
    loop {
      if self.consume_if(TT::BraceClose).is_match() {
        break;
      }
      if self.consume_if(TT::Semicolon).is_match() {
        continue;
      }
      members.push(self.parse_class_member(ctx)?);
    }
    Ok(members)
  }

  fn parse_class_member(&mut self, ctx: ParseCtx) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      let [t0, t1] = p.peek_n::<2>();
      if t0.typ == TT::KeywordStatic && t1.typ == TT::BraceOpen {
        return Err(t0.error(SyntaxErrorType::UnsupportedSyntax("static initialization block")));
      }
      let static_ = t0.typ == TT::KeywordStatic
        && !matches!(
          t1.typ,
          TT::ParenthesisOpen | TT::Equals | TT::Semicolon | TT::BraceClose
        );
      if static_ {
        p.consume();
      }
      let (key, head) = p.parse_member_head(ctx)?;
      let typ = match head {
        Some(head) => ClassMemberType::Method {
          kind: head.kind,
          func: p.parse_method_func(ctx, &head)?,
        },
        None => {
          let value = if p.consume_if(TT::Equals).is_match() {
            Some(p.parse_expr_until_comma(ctx.with_no_in(false))?)
          } else {
            None
          };
          p.require_stmt_end()?;
          ClassMemberType::Field { value }
        }
      };
      Ok(ClassMember { key, static_, typ })
    })
  }

  pub fn parse_class_decl(&mut self, ctx: ParseCtx) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(TT::KeywordClass)?;
      let name = p.parse_optional_name()?;
      let extends = p.parse_class_heritage(ctx)?;
      let members = p.parse_class_body(ctx)?;
      Ok(ClassDecl {
        name,
        extends,
        members,
      })
    })
  }

  pub fn parse_class_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(TT::KeywordClass)?;
      let name = p.parse_optional_name()?;
      let extends = p.parse_class_heritage(ctx)?;
      let members = p.parse_class_body(ctx)?;
      Ok(ClassExpr {
        name,
        extends,
        members,
      })
    })
  }
}
