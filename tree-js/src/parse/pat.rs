use super::ParseCtx;
use super::Parser;
use crate::ast::ArrElem;
use crate::ast::ArrPat;
use crate::ast::ArrPatElem;
use crate::ast::BinaryExpr;
use crate::ast::ComputedMemberExpr;
use crate::ast::IdExpr;
use crate::ast::IdPat;
use crate::ast::LitArrExpr;
use crate::ast::LitObjExpr;
use crate::ast::MemberExpr;
use crate::ast::NodeId;
use crate::ast::ObjMember;
use crate::ast::ObjMemberType;
use crate::ast::ObjPat;
use crate::ast::ObjPatProp;
use crate::ast::PropKey;
use crate::ast::Syntax;
use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::operator::OperatorName;
use crate::token::TT;

impl<'a> Parser<'a> {
  /// A binding pattern, as found in declarations, parameters and catch clauses.
  pub fn parse_pattern(&mut self, ctx: ParseCtx) -> SyntaxResult<NodeId> {
    let t = self.peek();
    match t.typ {
      TT::BracketOpen => self.parse_arr_pattern(ctx),
      TT::BraceOpen => self.parse_obj_pattern(ctx),
      typ if typ.is_binding_identifier() => {
        let (loc, name) = self.require_identifier()?;
        Ok(self.node(loc, IdPat { name }))
      }
      _ => Err(t.error(SyntaxErrorType::ExpectedSyntax("binding pattern"))),
    }
  }

  pub fn parse_pattern_default(&mut self, ctx: ParseCtx) -> SyntaxResult<Option<NodeId>> {
    if self.consume_if(TT::Equals).is_match() {
      Ok(Some(self.parse_expr_until_comma(ctx.with_no_in(false))?))
    } else {
      Ok(None)
    }
  }

  fn parse_arr_pattern(&mut self, ctx: ParseCtx) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(TT::BracketOpen)?;
      let mut elements = Vec::new();
      let mut rest = None;
      loop {
        if p.consume_if(TT::BracketClose).is_match() {
          break;
        }
        if p.consume_if(TT::Comma).is_match() {
          elements.push(None);
          continue;
        }
        if p.consume_if(TT::DotDotDot).is_match() {
          rest = Some(p.parse_pattern(ctx)?);
          p.require(TT::BracketClose)?;
          break;
        }
        let elem = p.with_loc(|p| {
          let target = p.parse_pattern(ctx)?;
          let default_value = p.parse_pattern_default(ctx)?;
          Ok(ArrPatElem {
            target,
            default_value,
          })
        })?;
        elements.push(Some(elem));
        if !p.consume_if(TT::Comma).is_match() {
          p.require(TT::BracketClose)?;
          break;
        }
      }
      Ok(ArrPat { elements, rest })
    })
  }

  fn parse_obj_pattern(&mut self, ctx: ParseCtx) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let mut properties = Vec::new();
      let mut rest = None;
      loop {
        if p.consume_if(TT::BraceClose).is_match() {
          break;
        }
        if p.consume_if(TT::DotDotDot).is_match() {
          rest = Some(p.parse_pattern(ctx)?);
          p.require(TT::BraceClose)?;
          break;
        }
        let prop = p.with_loc(|p| {
          let [t0, t1] = p.peek_n::<2>();
          if t0.typ.is_binding_identifier() && t1.typ != TT::Colon {
            let (loc, name) = p.require_identifier()?;
            let target = p.node(loc, IdPat { name: name.clone() });
            let default_value = p.parse_pattern_default(ctx)?;
            return Ok(ObjPatProp {
              key: PropKey::Direct(name),
              target,
              shorthand: true,
              default_value,
            });
          }
          let key = p.parse_prop_key(ctx)?;
          p.require(TT::Colon)?;
          let target = p.parse_pattern(ctx)?;
          let default_value = p.parse_pattern_default(ctx)?;
          Ok(ObjPatProp {
            key,
            target,
            shorthand: false,
            default_value,
          })
        })?;
        properties.push(prop);
        if !p.consume_if(TT::Comma).is_match() {
          p.require(TT::BraceClose)?;
          break;
        }
      }
      Ok(ObjPat { properties, rest })
    })
  }

  fn invalid_target(&self, id: NodeId) -> SyntaxError {
    self
      .ast
      .loc(id)
      .unwrap_or_default()
      .error(SyntaxErrorType::InvalidAssignmentTarget, None)
  }

  fn rewrite(&mut self, id: NodeId, stx: impl Into<Syntax>) -> SyntaxResult<()> {
    let err = self.invalid_target(id);
    self.ast.replace(id, stx).map_err(|_| err)
  }

  /// Splits `target = default` into its halves. The assignment's left side has already been converted.
  fn split_default(&self, id: NodeId) -> (NodeId, Option<NodeId>) {
    match self.ast.stx(id) {
      Some(Syntax::BinaryExpr(BinaryExpr {
        operator: OperatorName::Assignment,
        left,
        right,
      })) => (*left, Some(*right)),
      _ => (id, None),
    }
  }

  /// Converts an already parsed expression into the target of an assignment, in place.
  /// Array and object literals become patterns only when `allow_pattern` is set.
  pub fn to_assignment_target(&mut self, id: NodeId, allow_pattern: bool) -> SyntaxResult<()> {
    let Some(stx) = self.ast.stx(id).cloned() else {
      return Err(self.invalid_target(id));
    };
    match stx {
      Syntax::IdExpr(IdExpr { name }) => self.rewrite(id, IdPat { name }),
      Syntax::IdPat(_) => Ok(()),
      Syntax::MemberExpr(MemberExpr {
        optional_chaining: false,
        ..
      })
      | Syntax::ComputedMemberExpr(ComputedMemberExpr {
        optional_chaining: false,
        ..
      }) => Ok(()),
      Syntax::ArrPat(_) | Syntax::ObjPat(_) if allow_pattern => Ok(()),
      Syntax::LitArrExpr(LitArrExpr { elements }) if allow_pattern => {
        let mut pat_elements = Vec::new();
        let mut rest = None;
        for (i, elem) in elements.iter().enumerate() {
          match *elem {
            ArrElem::Empty => pat_elements.push(None),
            ArrElem::Rest(value) => {
              if i + 1 != elements.len() {
                return Err(self.invalid_target(value));
              }
              self.to_assignment_target(value, true)?;
              rest = Some(value);
            }
            ArrElem::Single(value) => {
              let (target, default_value) = self.split_default(value);
              self.to_assignment_target(target, true)?;
              let elem = if default_value.is_some() {
                // Reuse the assignment node so its location still covers the default.
                self.rewrite(value, ArrPatElem {
                  target,
                  default_value,
                })?;
                value
              } else {
                let loc = self.ast.loc(value).unwrap_or_default();
                self.node(loc, ArrPatElem {
                  target,
                  default_value: None,
                })
              };
              pat_elements.push(Some(elem));
            }
          }
        }
        self.rewrite(id, ArrPat {
          elements: pat_elements,
          rest,
        })
      }
      Syntax::LitObjExpr(LitObjExpr { members }) if allow_pattern => {
        let mut properties = Vec::new();
        let mut rest = None;
        for (i, &member) in members.iter().enumerate() {
          let Some(Syntax::ObjMember(ObjMember { typ })) = self.ast.stx(member).cloned() else {
            return Err(self.invalid_target(member));
          };
          match typ {
            ObjMemberType::Valued { key, value } => {
              let (target, default_value) = self.split_default(value);
              self.to_assignment_target(target, true)?;
              self.rewrite(member, ObjPatProp {
                key,
                target,
                shorthand: false,
                default_value,
              })?;
              properties.push(member);
            }
            ObjMemberType::Shorthand { id: name_id, initializer } => {
              let name = self
                .ast
                .identifier_name(name_id)
                .map(str::to_string)
                .ok_or_else(|| self.invalid_target(name_id))?;
              self.to_assignment_target(name_id, false)?;
              self.rewrite(member, ObjPatProp {
                key: PropKey::Direct(name),
                target: name_id,
                shorthand: true,
                default_value: initializer,
              })?;
              properties.push(member);
            }
            ObjMemberType::Rest { value } => {
              if i + 1 != members.len() {
                return Err(self.invalid_target(member));
              }
              self.to_assignment_target(value, false)?;
              rest = Some(value);
            }
            ObjMemberType::Method { .. } => return Err(self.invalid_target(member)),
          }
        }
        self.rewrite(id, ObjPat { properties, rest })
      }
      _ => Err(self.invalid_target(id)),
    }
  }
}
