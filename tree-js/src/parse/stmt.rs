use super::ParseCtx;
use super::Parser;
use crate::ast::BlockStmt;
use crate::ast::BreakStmt;
use crate::ast::CatchBlock;
use crate::ast::ContinueStmt;
use crate::ast::DebuggerStmt;
use crate::ast::DoWhileStmt;
use crate::ast::EmptyStmt;
use crate::ast::ExprStmt;
use crate::ast::ForInStmt;
use crate::ast::ForOfStmt;
use crate::ast::ForTripleStmt;
use crate::ast::IfStmt;
use crate::ast::LabelStmt;
use crate::ast::NodeId;
use crate::ast::ReturnStmt;
use crate::ast::SwitchBranch;
use crate::ast::SwitchStmt;
use crate::ast::Syntax;
use crate::ast::ThrowStmt;
use crate::ast::TryStmt;
use crate::ast::VarDecl;
use crate::ast::VarDeclMode;
use crate::ast::VarDeclarator;
use crate::ast::WhileStmt;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn parse_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<NodeId> {
    let [t0, t1] = self.peek_n::<2>();
    match t0.typ {
      TT::BraceOpen => self.parse_block_stmt(ctx),
      TT::KeywordBreak => self.parse_break_or_continue(true),
      TT::KeywordContinue => self.parse_break_or_continue(false),
      TT::KeywordClass => self.parse_class_decl(ctx),
      TT::KeywordConst | TT::KeywordVar => self.parse_var_decl_stmt(ctx),
      // `let` is only a declaration keyword when followed by something that can start a pattern.
      TT::KeywordLet
        if t1.typ.is_binding_identifier()
          || matches!(t1.typ, TT::BracketOpen | TT::BraceOpen) =>
      {
        self.parse_var_decl_stmt(ctx)
      }
      TT::KeywordDebugger => self.with_loc(|p| {
        p.consume();
        p.require_stmt_end()?;
        Ok(DebuggerStmt {})
      }),
      TT::KeywordDo => self.parse_do_while_stmt(ctx),
      TT::KeywordExport => self.parse_export(ctx),
      TT::KeywordFor => self.parse_for_stmt(ctx),
      TT::KeywordFunction => self.parse_func_decl(ctx),
      TT::KeywordAsync
        if t1.typ == TT::KeywordFunction && !t1.preceded_by_line_terminator =>
      {
        self.parse_func_decl(ctx)
      }
      TT::KeywordIf => self.parse_if_stmt(ctx),
      TT::KeywordImport if t1.typ != TT::ParenthesisOpen && t1.typ != TT::Dot => {
        self.parse_import(ctx)
      }
      TT::KeywordReturn => self.parse_return_stmt(ctx),
      TT::KeywordSwitch => self.parse_switch_stmt(ctx),
      TT::KeywordThrow => self.parse_throw_stmt(ctx),
      TT::KeywordTry => self.parse_try_stmt(ctx),
      TT::KeywordWhile => self.parse_while_stmt(ctx),
      TT::KeywordWith => Err(t0.error(SyntaxErrorType::UnsupportedSyntax("`with` statement"))),
      TT::Semicolon => self.with_loc(|p| {
        p.consume();
        Ok(EmptyStmt {})
      }),
      typ if typ.is_binding_identifier() && t1.typ == TT::Colon => self.parse_label_stmt(ctx),
      _ => self.parse_expr_stmt(ctx),
    }
  }

  pub fn parse_stmts_until(&mut self, ctx: ParseCtx, end: TT) -> SyntaxResult<Vec<NodeId>> {
    let mut body = Vec::new();
    loop {
      let t = self.peek();
      if t.typ == end {
        break;
      }
      if t.typ == TT::EOF {
        return Err(t.error(SyntaxErrorType::UnexpectedEnd));
      }
      body.push(self.parse_stmt(ctx)?);
    }
    Ok(body)
  }

  /// Parses `{ ... }` and returns the statements, for bodies that don't get their own block node.
  pub fn parse_braced_stmts(&mut self, ctx: ParseCtx) -> SyntaxResult<Vec<NodeId>> {
    self.require(TT::BraceOpen)?;
    let body = self.parse_stmts_until(ctx, TT::BraceClose)?;
    self.require(TT::BraceClose)?;
    Ok(body)
  }

  pub fn parse_block_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      let body = p.parse_braced_stmts(ctx)?;
      Ok(BlockStmt { body })
    })
  }

  fn parse_break_or_continue(&mut self, is_break: bool) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.consume();
      let t = p.peek();
      let label = if t.typ.is_binding_identifier() && !t.preceded_by_line_terminator {
        Some(p.require_identifier()?.1)
      } else {
        None
      };
      p.require_stmt_end()?;
      Ok(if is_break {
        Syntax::from(BreakStmt { label })
      } else {
        Syntax::from(ContinueStmt { label })
      })
    })
  }

  fn parse_var_decl_mode(&mut self) -> SyntaxResult<VarDeclMode> {
    let t = self.consume();
    Ok(match t.typ {
      TT::KeywordConst => VarDeclMode::Const,
      TT::KeywordLet => VarDeclMode::Let,
      TT::KeywordVar => VarDeclMode::Var,
      _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("variable declaration"))),
    })
  }

  fn parse_var_declarator(&mut self, ctx: ParseCtx) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      let pattern = p.parse_pattern(ctx)?;
      let initializer = if p.consume_if(TT::Equals).is_match() {
        Some(p.parse_expr_until_comma(ctx)?)
      } else {
        None
      };
      Ok(VarDeclarator {
        pattern,
        initializer,
      })
    })
  }

  fn parse_var_decl_body(&mut self, ctx: ParseCtx) -> SyntaxResult<VarDecl> {
    let mode = self.parse_var_decl_mode()?;
    let mut declarators = vec![self.parse_var_declarator(ctx)?];
    while self.consume_if(TT::Comma).is_match() {
      declarators.push(self.parse_var_declarator(ctx)?);
    }
    Ok(VarDecl { mode, declarators })
  }

  /// Parses a declaration without its terminator, as used by `for` heads.
  pub fn parse_var_decl(&mut self, ctx: ParseCtx) -> SyntaxResult<NodeId> {
    self.with_loc(|p| p.parse_var_decl_body(ctx))
  }

  pub fn parse_var_decl_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      let decl = p.parse_var_decl_body(ctx)?;
      p.require_stmt_end()?;
      Ok(decl)
    })
  }

  fn parse_do_while_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(TT::KeywordDo)?;
      let body = p.parse_stmt(ctx)?;
      p.require(TT::KeywordWhile)?;
      p.require(TT::ParenthesisOpen)?;
      let condition = p.parse_expr(ctx)?;
      p.require(TT::ParenthesisClose)?;
      let _ = p.consume_if(TT::Semicolon);
      Ok(DoWhileStmt { body, condition })
    })
  }

  fn parse_for_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<NodeId> {
    let start = self.require(TT::KeywordFor)?.loc.0;
    let await_ = self.consume_if(TT::KeywordAwait).is_match();
    self.require(TT::ParenthesisOpen)?;
    let head_ctx = ctx.with_no_in(true);
    let [t0, t1] = self.peek_n::<2>();
    let is_decl = match t0.typ {
      TT::KeywordVar | TT::KeywordConst => true,
      TT::KeywordLet => {
        t1.typ.is_binding_identifier() || matches!(t1.typ, TT::BracketOpen | TT::BraceOpen)
      }
      _ => false,
    };
    let init = if is_decl {
      Some(self.parse_var_decl(head_ctx)?)
    } else if t0.typ == TT::Semicolon {
      None
    } else {
      Some(self.parse_expr(head_ctx)?)
    };

    let t = self.peek();
    if let (Some(lhs), TT::KeywordIn | TT::KeywordOf) = (init, t.typ) {
      let is_of = t.typ == TT::KeywordOf;
      self.consume();
      if !is_decl {
        self.to_assignment_target(lhs, true)?;
      }
      let rhs = if is_of {
        self.parse_expr_until_comma(ctx)?
      } else {
        self.parse_expr(ctx)?
      };
      self.require(TT::ParenthesisClose)?;
      let body = self.parse_stmt(ctx)?;
      let loc = self.loc_from(start);
      return Ok(if is_of {
        self.node(loc, ForOfStmt {
          await_,
          lhs,
          rhs,
          body,
        })
      } else {
        self.node(loc, ForInStmt { lhs, rhs, body })
      });
    }

    self.require(TT::Semicolon)?;
    let cond = match self.peek().typ {
      TT::Semicolon => None,
      _ => Some(self.parse_expr(ctx)?),
    };
    self.require(TT::Semicolon)?;
    let post = match self.peek().typ {
      TT::ParenthesisClose => None,
      _ => Some(self.parse_expr(ctx)?),
    };
    self.require(TT::ParenthesisClose)?;
    let body = self.parse_stmt(ctx)?;
    let loc = self.loc_from(start);
    Ok(self.node(loc, ForTripleStmt {
      init,
      cond,
      post,
      body,
    }))
  }

  fn parse_if_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(TT::KeywordIf)?;
      p.require(TT::ParenthesisOpen)?;
      let test = p.parse_expr(ctx)?;
      p.require(TT::ParenthesisClose)?;
      let consequent = p.parse_stmt(ctx)?;
      let alternate = if p.consume_if(TT::KeywordElse).is_match() {
        Some(p.parse_stmt(ctx)?)
      } else {
        None
      };
      Ok(IfStmt {
        test,
        consequent,
        alternate,
      })
    })
  }

  fn parse_label_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      let (_, name) = p.require_identifier()?;
      p.require(TT::Colon)?;
      let statement = p.parse_stmt(ctx)?;
      Ok(LabelStmt { name, statement })
    })
  }

  fn parse_return_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(TT::KeywordReturn)?;
      let t = p.peek();
      let value = match t.typ {
        TT::Semicolon | TT::BraceClose | TT::EOF => None,
        _ if t.preceded_by_line_terminator => None,
        _ => Some(p.parse_expr(ctx)?),
      };
      p.require_stmt_end()?;
      Ok(ReturnStmt { value })
    })
  }

  fn parse_switch_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(TT::KeywordSwitch)?;
      p.require(TT::ParenthesisOpen)?;
      let test = p.parse_expr(ctx)?;
      p.require(TT::ParenthesisClose)?;
      p.require(TT::BraceOpen)?;
      let mut branches = Vec::new();
      while !p.consume_if(TT::BraceClose).is_match() {
        let branch = p.with_loc(|p| {
          let t = p.consume();
          let case = match t.typ {
            TT::KeywordCase => Some(p.parse_expr(ctx)?),
            TT::KeywordDefault => None,
            _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("`case` or `default`"))),
          };
          p.require(TT::Colon)?;
          let mut body = Vec::new();
          loop {
            match p.peek().typ {
              TT::KeywordCase | TT::KeywordDefault | TT::BraceClose => break,
              _ => body.push(p.parse_stmt(ctx)?),
            }
          }
          Ok(SwitchBranch { case, body })
        })?;
        branches.push(branch);
      }
      Ok(SwitchStmt { test, branches })
    })
  }

  fn parse_throw_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(TT::KeywordThrow)?;
      let t = p.peek();
      if t.preceded_by_line_terminator {
        return Err(t.error(SyntaxErrorType::LineTerminatorAfterThrow));
      }
      let value = p.parse_expr(ctx)?;
      p.require_stmt_end()?;
      Ok(ThrowStmt { value })
    })
  }

  fn parse_try_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      let t = p.require(TT::KeywordTry)?;
      let wrapped = p.parse_block_stmt(ctx)?;
      let catch = if p.peek().typ == TT::KeywordCatch {
        Some(p.with_loc(|p| {
          p.consume();
          let parameter = if p.consume_if(TT::ParenthesisOpen).is_match() {
            let param = p.parse_pattern(ctx)?;
            p.require(TT::ParenthesisClose)?;
            Some(param)
          } else {
            None
          };
          let body = p.parse_braced_stmts(ctx)?;
          Ok(CatchBlock { parameter, body })
        })?)
      } else {
        None
      };
      let finally = if p.consume_if(TT::KeywordFinally).is_match() {
        Some(p.parse_block_stmt(ctx)?)
      } else {
        None
      };
      if catch.is_none() && finally.is_none() {
        return Err(t.error(SyntaxErrorType::TryStatementHasNoCatchOrFinally));
      }
      Ok(TryStmt {
        wrapped,
        catch,
        finally,
      })
    })
  }

  fn parse_while_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(TT::KeywordWhile)?;
      p.require(TT::ParenthesisOpen)?;
      let condition = p.parse_expr(ctx)?;
      p.require(TT::ParenthesisClose)?;
      let body = p.parse_stmt(ctx)?;
      Ok(WhileStmt { condition, body })
    })
  }

  fn parse_expr_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<NodeId> {
    let start = self.peek().loc.0;
    let expr = self.parse_expr(ctx)?;
    self.require_stmt_end()?;
    let loc = self.loc_from(start);
    Ok(self.node(loc, ExprStmt { expr }))
  }
}
