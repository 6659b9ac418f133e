use super::operator::infix_operator;
use super::operator::prefix_operator;
use super::ParseCtx;
use super::Parser;
use crate::ast::ArrElem;
use crate::ast::ArrowFuncExpr;
use crate::ast::BinaryExpr;
use crate::ast::CallArg;
use crate::ast::CallExpr;
use crate::ast::ComputedMemberExpr;
use crate::ast::CondExpr;
use crate::ast::FuncBody;
use crate::ast::IdExpr;
use crate::ast::IdPat;
use crate::ast::LitArrExpr;
use crate::ast::LitBigIntExpr;
use crate::ast::LitBoolExpr;
use crate::ast::LitNullExpr;
use crate::ast::LitNumExpr;
use crate::ast::LitRegexExpr;
use crate::ast::LitStrExpr;
use crate::ast::LitTemplateExpr;
use crate::ast::MemberExpr;
use crate::ast::NewExpr;
use crate::ast::NodeId;
use crate::ast::Param;
use crate::ast::SuperExpr;
use crate::ast::TaggedTemplateExpr;
use crate::ast::TemplatePart;
use crate::ast::ThisExpr;
use crate::ast::UnaryExpr;
use crate::ast::UnaryPostfixExpr;
use crate::ast::YieldExpr;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::LexMode;
use crate::operator::Associativity;
use crate::operator::OperatorName;
use crate::token::TT;

impl<'a> Parser<'a> {
  /// A full expression, including the comma operator.
  pub fn parse_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<NodeId> {
    self.parse_expr_with_min_prec(ctx, 1)
  }

  /// An assignment expression: stops at a top-level comma, as in arguments, elements and initializers.
  pub fn parse_expr_until_comma(&mut self, ctx: ParseCtx) -> SyntaxResult<NodeId> {
    self.parse_expr_with_min_prec(ctx, OperatorName::Assignment.precedence())
  }

  pub fn parse_expr_with_min_prec(&mut self, ctx: ParseCtx, min_prec: u8) -> SyntaxResult<NodeId> {
    let mut left = self.parse_expr_operand(ctx)?;
    loop {
      let t = self.peek();
      let start = self.node_start(left);
      match t.typ {
        TT::PlusPlus | TT::HyphenHyphen if !t.preceded_by_line_terminator => {
          let operator = if t.typ == TT::PlusPlus {
            OperatorName::PostfixIncrement
          } else {
            OperatorName::PostfixDecrement
          };
          if operator.precedence() < min_prec {
            break;
          }
          self.consume();
          self.to_assignment_target(left, false)?;
          let loc = self.loc_from(start);
          left = self.node(loc, UnaryPostfixExpr {
            operator,
            argument: left,
          });
          continue;
        }
        TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd => {
          if OperatorName::Call.precedence() < min_prec {
            break;
          }
          let parts = self.parse_template_parts(ctx)?;
          let loc = self.loc_from(start);
          left = self.node(loc, TaggedTemplateExpr {
            function: left,
            parts,
          });
          continue;
        }
        _ => {}
      };

      let Some(op) = infix_operator(t.typ) else {
        break;
      };
      if op == OperatorName::In && ctx.no_in {
        break;
      }
      if op.precedence() < min_prec {
        break;
      }
      self.consume();
      left = match op {
        OperatorName::Call | OperatorName::OptionalChainingCall => {
          let arguments = self.parse_call_args(ctx)?;
          let loc = self.loc_from(start);
          self.node(loc, CallExpr {
            optional_chaining: op == OperatorName::OptionalChainingCall,
            callee: left,
            arguments,
          })
        }
        OperatorName::MemberAccess | OperatorName::OptionalChainingMemberAccess => {
          let (_, right) = self.require_identifier_name()?;
          let loc = self.loc_from(start);
          self.node(loc, MemberExpr {
            optional_chaining: op == OperatorName::OptionalChainingMemberAccess,
            left,
            right,
          })
        }
        OperatorName::ComputedMemberAccess | OperatorName::OptionalChainingComputedMemberAccess => {
          let member = self.parse_expr(ctx.with_no_in(false))?;
          self.require(TT::BracketClose)?;
          let loc = self.loc_from(start);
          self.node(loc, ComputedMemberExpr {
            optional_chaining: op == OperatorName::OptionalChainingComputedMemberAccess,
            object: left,
            member,
          })
        }
        OperatorName::Conditional => {
          let consequent = self.parse_expr_until_comma(ctx.with_no_in(false))?;
          self.require(TT::Colon)?;
          let alternate = self.parse_expr_with_min_prec(ctx, op.precedence())?;
          let loc = self.loc_from(start);
          self.node(loc, CondExpr {
            test: left,
            consequent,
            alternate,
          })
        }
        operator => {
          if operator.is_assignment() {
            self.to_assignment_target(left, operator == OperatorName::Assignment)?;
          }
          let next_min_prec = match operator.associativity() {
            Associativity::Left => operator.precedence() + 1,
            Associativity::Right => operator.precedence(),
          };
          let right = self.parse_expr_with_min_prec(ctx, next_min_prec)?;
          let loc = self.loc_from(start);
          self.node(loc, BinaryExpr {
            operator,
            left,
            right,
          })
        }
      };
    }
    Ok(left)
  }

  fn parse_expr_operand(&mut self, ctx: ParseCtx) -> SyntaxResult<NodeId> {
    let t = self.peek_with_mode(LexMode::SlashIsRegex);
    if let Some(operator) = prefix_operator(t.typ) {
      let start = self.consume_with_mode(LexMode::SlashIsRegex).loc.0;
      let argument = self.parse_expr_with_min_prec(ctx, operator.precedence())?;
      if operator.is_update() {
        self.to_assignment_target(argument, false)?;
      }
      let loc = self.loc_from(start);
      return Ok(self.node(loc, UnaryExpr { operator, argument }));
    }
    match t.typ {
      TT::KeywordNew => self.parse_new_expr(ctx),
      TT::KeywordYield => self.parse_yield_expr(ctx),
      TT::KeywordAsync | TT::ParenthesisOpen => match self.try_parse_arrow_head(ctx) {
        Some((async_, params)) => self.parse_arrow_tail(ctx, t.loc.0, async_, params),
        None => self.parse_primary(ctx),
      },
      typ if typ.is_binding_identifier() => {
        let [_, t1] = self.peek_n::<2>();
        if t1.typ == TT::EqualsChevronRight {
          let param = self.parse_single_arrow_param()?;
          self.parse_arrow_tail(ctx, t.loc.0, false, vec![param])
        } else {
          self.parse_primary(ctx)
        }
      }
      _ => self.parse_primary(ctx),
    }
  }

  fn parse_single_arrow_param(&mut self) -> SyntaxResult<NodeId> {
    let (loc, name) = self.require_identifier()?;
    let pattern = self.node(loc, IdPat { name });
    Ok(self.node(loc, Param {
      pattern,
      default_value: None,
      rest: false,
    }))
  }

  fn parse_arrow_head(&mut self, ctx: ParseCtx) -> SyntaxResult<(bool, Vec<NodeId>)> {
    let [t0, t1] = self.peek_n::<2>();
    let async_ = t0.typ == TT::KeywordAsync
      && !t1.preceded_by_line_terminator
      && (t1.typ == TT::ParenthesisOpen || t1.typ.is_binding_identifier());
    if async_ {
      self.consume();
    }
    let params = if self.peek().typ == TT::ParenthesisOpen {
      self.parse_params(ctx)?
    } else {
      vec![self.parse_single_arrow_param()?]
    };
    let arrow = self.peek();
    if arrow.typ != TT::EqualsChevronRight {
      return Err(arrow.error(SyntaxErrorType::RequiredTokenNotFound(TT::EqualsChevronRight)));
    }
    Ok((async_, params))
  }

  /// Tries `async? (params) =>` or `async ident =>`. On mismatch nothing is consumed.
  fn try_parse_arrow_head(&mut self, ctx: ParseCtx) -> Option<(bool, Vec<NodeId>)> {
    let cp = self.checkpoint();
    match self.parse_arrow_head(ctx) {
      Ok(head) => Some(head),
      Err(_) => {
        self.restore_checkpoint(cp);
        None
      }
    }
  }

  fn parse_arrow_tail(
    &mut self,
    ctx: ParseCtx,
    start: usize,
    async_: bool,
    params: Vec<NodeId>,
  ) -> SyntaxResult<NodeId> {
    let arrow = self.require(TT::EqualsChevronRight)?;
    if arrow.preceded_by_line_terminator {
      return Err(arrow.error(SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters));
    }
    let body = if self.peek().typ == TT::BraceOpen {
      FuncBody::Block(self.parse_braced_stmts(ctx.with_no_in(false))?)
    } else {
      FuncBody::Expression(self.parse_expr_until_comma(ctx)?)
    };
    let loc = self.loc_from(start);
    Ok(self.node(loc, ArrowFuncExpr {
      params,
      body,
      async_,
    }))
  }

  fn parse_new_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<NodeId> {
    let start = self.require(TT::KeywordNew)?.loc.0;
    let t = self.peek();
    if t.typ == TT::Dot {
      return Err(t.error(SyntaxErrorType::UnsupportedSyntax("`new.target`")));
    }
    let mut callee = if t.typ == TT::KeywordNew {
      self.parse_new_expr(ctx)?
    } else {
      self.parse_primary(ctx)?
    };
    // Only member accesses bind tighter than `new`; the first call's arguments belong to it.
    loop {
      let callee_start = self.node_start(callee);
      if self.consume_if(TT::Dot).is_match() {
        let (_, right) = self.require_identifier_name()?;
        let loc = self.loc_from(callee_start);
        callee = self.node(loc, MemberExpr {
          optional_chaining: false,
          left: callee,
          right,
        });
      } else if self.consume_if(TT::BracketOpen).is_match() {
        let member = self.parse_expr(ctx.with_no_in(false))?;
        self.require(TT::BracketClose)?;
        let loc = self.loc_from(callee_start);
        callee = self.node(loc, ComputedMemberExpr {
          optional_chaining: false,
          object: callee,
          member,
        });
      } else {
        break;
      }
    }
    let arguments = if self.consume_if(TT::ParenthesisOpen).is_match() {
      self.parse_call_args(ctx)?
    } else {
      Vec::new()
    };
    let loc = self.loc_from(start);
    Ok(self.node(loc, NewExpr { callee, arguments }))
  }

  fn parse_yield_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(TT::KeywordYield)?;
      let delegate = p.consume_if(TT::Asterisk).is_match();
      let t = p.peek();
      let ends_here = t.preceded_by_line_terminator
        || matches!(
          t.typ,
          TT::ParenthesisClose
            | TT::BracketClose
            | TT::BraceClose
            | TT::Comma
            | TT::Semicolon
            | TT::Colon
            | TT::EOF
        );
      let argument = if delegate || !ends_here {
        Some(p.parse_expr_until_comma(ctx)?)
      } else {
        None
      };
      Ok(YieldExpr { argument, delegate })
    })
  }

  /// Parses arguments after the opening parenthesis has been consumed.
  pub fn parse_call_args(&mut self, ctx: ParseCtx) -> SyntaxResult<Vec<NodeId>> {
    let ctx = ctx.with_no_in(false);
    let mut arguments = Vec::new();
    loop {
      if self.consume_if(TT::ParenthesisClose).is_match() {
        break;
      }
      arguments.push(self.with_loc(|p| {
        let spread = p.consume_if(TT::DotDotDot).is_match();
        let value = p.parse_expr_until_comma(ctx)?;
        Ok(CallArg { spread, value })
      })?);
      if !self.consume_if(TT::Comma).is_match() {
        self.require(TT::ParenthesisClose)?;
        break;
      }
    }
    Ok(arguments)
  }

  pub fn parse_primary(&mut self, ctx: ParseCtx) -> SyntaxResult<NodeId> {
    let [t, t1] = self.peek_n::<2>();
    // Regex literals are only recognised in operand position, so re-peek in that mode.
    let t = match t.typ {
      TT::Slash | TT::SlashEquals => self.peek_with_mode(LexMode::SlashIsRegex),
      _ => t,
    };
    match t.typ {
      TT::ParenthesisOpen => {
        self.consume();
        let expr = self.parse_expr(ctx.with_no_in(false))?;
        self.require(TT::ParenthesisClose)?;
        Ok(expr)
      }
      TT::BracketOpen => self.parse_array_literal(ctx),
      TT::BraceOpen => self.parse_object_literal(ctx),
      TT::KeywordFunction => self.parse_func_expr(ctx),
      TT::KeywordAsync if t1.typ == TT::KeywordFunction && !t1.preceded_by_line_terminator => {
        self.parse_func_expr(ctx)
      }
      TT::KeywordClass => self.parse_class_expr(ctx),
      TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd => self.with_loc(|p| {
        let parts = p.parse_template_parts(ctx)?;
        Ok(LitTemplateExpr { parts })
      }),
      TT::LiteralRegex => {
        let t = self.consume_with_mode(LexMode::SlashIsRegex);
        let value = self.string(t.loc);
        Ok(self.node(t.loc, LitRegexExpr { value }))
      }
      TT::LiteralNumber => {
        let t = self.consume();
        let value = self.string(t.loc);
        Ok(self.node(t.loc, LitNumExpr { value }))
      }
      TT::LiteralBigInt => {
        let t = self.consume();
        let value = self.str(t.loc).trim_end_matches('n').to_string();
        Ok(self.node(t.loc, LitBigIntExpr { value }))
      }
      TT::LiteralString => {
        let t = self.consume();
        let value = decode_string_literal(self.str(t.loc));
        Ok(self.node(t.loc, LitStrExpr { value }))
      }
      TT::LiteralTrue | TT::LiteralFalse => {
        let t = self.consume();
        Ok(self.node(t.loc, LitBoolExpr {
          value: t.typ == TT::LiteralTrue,
        }))
      }
      TT::LiteralNull => {
        let t = self.consume();
        Ok(self.node(t.loc, LitNullExpr {}))
      }
      TT::KeywordThis => {
        let t = self.consume();
        Ok(self.node(t.loc, ThisExpr {}))
      }
      TT::KeywordSuper => {
        let t = self.consume();
        Ok(self.node(t.loc, SuperExpr {}))
      }
      TT::KeywordImport => Err(t.error(SyntaxErrorType::UnsupportedSyntax("dynamic `import`"))),
      typ if typ.is_binding_identifier() || typ == TT::KeywordAwait => {
        let t = self.consume();
        let name = self.string(t.loc);
        Ok(self.node(t.loc, IdExpr { name }))
      }
      TT::EOF => Err(t.error(SyntaxErrorType::UnexpectedEnd)),
      TT::Invalid if self.str(t.loc).starts_with(['"', '\'']) => {
        Err(t.error(SyntaxErrorType::LineTerminatorInString))
      }
      TT::Invalid if self.str(t.loc).starts_with('/') => {
        Err(t.error(SyntaxErrorType::LineTerminatorInRegex))
      }
      _ => Err(t.error(SyntaxErrorType::ExpectedSyntax("expression operand"))),
    }
  }

  fn parse_array_literal(&mut self, ctx: ParseCtx) -> SyntaxResult<NodeId> {
    let ctx = ctx.with_no_in(false);
    self.with_loc(|p| {
      p.require(TT::BracketOpen)?;
      let mut elements = Vec::new();
      loop {
        if p.consume_if(TT::BracketClose).is_match() {
          break;
        }
        if p.consume_if(TT::Comma).is_match() {
          elements.push(ArrElem::Empty);
          continue;
        }
        if p.consume_if(TT::DotDotDot).is_match() {
          elements.push(ArrElem::Rest(p.parse_expr_until_comma(ctx)?));
        } else {
          elements.push(ArrElem::Single(p.parse_expr_until_comma(ctx)?));
        }
        if !p.consume_if(TT::Comma).is_match() {
          p.require(TT::BracketClose)?;
          break;
        }
      }
      Ok(LitArrExpr { elements })
    })
  }

  /// Parses a template starting at its first string token, for both plain and tagged templates.
  fn parse_template_parts(&mut self, ctx: ParseCtx) -> SyntaxResult<Vec<TemplatePart>> {
    let mut parts = Vec::new();
    let mut t = self.consume();
    // The first chunk starts with the opening backtick.
    let mut raw = &self.str(t.loc)[1..];
    loop {
      match t.typ {
        TT::LiteralTemplatePartStringEnd => {
          parts.push(TemplatePart::String(raw.trim_end_matches('`').to_string()));
          break;
        }
        TT::LiteralTemplatePartString => {
          parts.push(TemplatePart::String(raw.trim_end_matches("${").to_string()));
        }
        _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("template string"))),
      };
      let substitution = self.parse_expr(ctx.with_no_in(false))?;
      parts.push(TemplatePart::Substitution(substitution));
      self.require(TT::BraceClose)?;
      t = self.consume_with_mode(LexMode::TemplateStrContinue);
      raw = self.str(t.loc);
    }
    Ok(parts)
  }
}

/// Cooks the source text of a string literal, quotes included, into its value.
pub fn decode_string_literal(raw: &str) -> String {
  let inner = raw
    .get(1..raw.len().saturating_sub(1))
    .unwrap_or_default();
  let mut out = String::with_capacity(inner.len());
  let mut chars = inner.chars();
  while let Some(c) = chars.next() {
    if c != '\\' {
      out.push(c);
      continue;
    }
    match chars.next() {
      Some('n') => out.push('\n'),
      Some('t') => out.push('\t'),
      Some('r') => out.push('\r'),
      Some('b') => out.push('\u{8}'),
      Some('f') => out.push('\u{c}'),
      Some('v') => out.push('\u{b}'),
      Some('0') => out.push('\0'),
      Some('x') => {
        let rest = chars.as_str();
        match rest
          .get(..2)
          .and_then(|hex| u32::from_str_radix(hex, 16).ok())
          .and_then(char::from_u32)
        {
          Some(decoded) => {
            out.push(decoded);
            chars = rest[2..].chars();
          }
          None => out.push('x'),
        }
      }
      Some('u') => {
        let rest = chars.as_str();
        let (hex, len) = match rest.strip_prefix('{') {
          Some(braced) => match braced.find('}') {
            Some(end) => (&braced[..end], end + 2),
            None => ("", 0),
          },
          None => (rest.get(..4).unwrap_or_default(), 4),
        };
        match u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
          Some(decoded) if !hex.is_empty() => {
            out.push(decoded);
            chars = rest[len..].chars();
          }
          _ => out.push('u'),
        }
      }
      // Line continuation.
      Some('\r') => {
        let rest = chars.as_str();
        chars = rest.strip_prefix('\n').unwrap_or(rest).chars();
      }
      Some('\n' | '\u{2028}' | '\u{2029}') => {}
      Some(other) => out.push(other),
      None => {}
    }
  }
  out
}
