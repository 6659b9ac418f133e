use super::expr::decode_string_literal;
use super::ParseCtx;
use super::Parser;
use crate::ast::ExportAllStmt;
use crate::ast::ExportDeclStmt;
use crate::ast::ExportDefaultStmt;
use crate::ast::ExportListStmt;
use crate::ast::ExportSpecifier;
use crate::ast::IdExpr;
use crate::ast::IdPat;
use crate::ast::ImportSpecifier;
use crate::ast::ImportStmt;
use crate::ast::NodeId;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::token::TT;

impl<'a> Parser<'a> {
  fn require_module_name(&mut self) -> SyntaxResult<String> {
    let t = self.require(TT::LiteralString)?;
    Ok(decode_string_literal(self.str(t.loc)))
  }

  /// An export or import name: an identifier, a keyword, or a string.
  fn require_module_export_name(&mut self) -> SyntaxResult<(Loc, String)> {
    let t = self.peek();
    if t.typ == TT::LiteralString {
      self.consume();
      return Ok((t.loc, decode_string_literal(self.str(t.loc))));
    }
    self.require_identifier_name()
  }

  fn parse_import_binding(&mut self) -> SyntaxResult<NodeId> {
    let (loc, name) = self.require_identifier()?;
    Ok(self.node(loc, IdPat { name }))
  }

  pub fn parse_import(&mut self, _ctx: ParseCtx) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(TT::KeywordImport)?;
      let mut stmt = ImportStmt {
        default: None,
        namespace: None,
        names: Vec::new(),
        module: String::new(),
      };
      if p.peek().typ == TT::LiteralString {
        stmt.module = p.require_module_name()?;
        p.require_stmt_end()?;
        return Ok(stmt);
      }
      if p.peek().typ.is_binding_identifier() {
        stmt.default = Some(p.parse_import_binding()?);
        if !p.consume_if(TT::Comma).is_match() {
          p.require(TT::KeywordFrom)?;
          stmt.module = p.require_module_name()?;
          p.require_stmt_end()?;
          return Ok(stmt);
        }
      }
      if p.consume_if(TT::Asterisk).is_match() {
        p.require(TT::KeywordAs)?;
        stmt.namespace = Some(p.parse_import_binding()?);
      } else {
        p.require(TT::BraceOpen)?;
        loop {
          if p.consume_if(TT::BraceClose).is_match() {
            break;
          }
          let specifier = p.with_loc(|p| {
            let t = p.peek();
            let (loc, imported) = p.require_module_export_name()?;
            let local = if p.consume_if(TT::KeywordAs).is_match() {
              p.parse_import_binding()?
            } else if t.typ.is_binding_identifier() {
              p.node(loc, IdPat {
                name: imported.clone(),
              })
            } else {
              return Err(t.error(SyntaxErrorType::RequiredTokenNotFound(TT::KeywordAs)));
            };
            Ok(ImportSpecifier { imported, local })
          })?;
          stmt.names.push(specifier);
          if !p.consume_if(TT::Comma).is_match() {
            p.require(TT::BraceClose)?;
            break;
          }
        }
      }
      p.require(TT::KeywordFrom)?;
      stmt.module = p.require_module_name()?;
      p.require_stmt_end()?;
      Ok(stmt)
    })
  }

  pub fn parse_export(&mut self, ctx: ParseCtx) -> SyntaxResult<NodeId> {
    let start = self.require(TT::KeywordExport)?.loc.0;
    let [t0, t1, t2] = self.peek_n::<3>();
    match t0.typ {
      TT::KeywordDefault => {
        self.consume();
        let is_func = t1.typ == TT::KeywordFunction
          || (t1.typ == TT::KeywordAsync
            && t2.typ == TT::KeywordFunction
            && !t2.preceded_by_line_terminator);
        let value = if is_func {
          self.parse_func_decl(ctx)?
        } else if t1.typ == TT::KeywordClass {
          self.parse_class_decl(ctx)?
        } else {
          let value = self.parse_expr_until_comma(ctx)?;
          self.require_stmt_end()?;
          value
        };
        let loc = self.loc_from(start);
        Ok(self.node(loc, ExportDefaultStmt { value }))
      }
      TT::Asterisk => {
        self.consume();
        let alias = if self.consume_if(TT::KeywordAs).is_match() {
          Some(self.require_module_export_name()?.1)
        } else {
          None
        };
        self.require(TT::KeywordFrom)?;
        let from = self.require_module_name()?;
        self.require_stmt_end()?;
        let loc = self.loc_from(start);
        Ok(self.node(loc, ExportAllStmt { alias, from }))
      }
      TT::BraceOpen => {
        self.consume();
        let mut names = Vec::new();
        loop {
          if self.consume_if(TT::BraceClose).is_match() {
            break;
          }
          let specifier = self.with_loc(|p| {
            let (loc, name) = p.require_module_export_name()?;
            let exported = if p.consume_if(TT::KeywordAs).is_match() {
              p.require_module_export_name()?.1
            } else {
              name.clone()
            };
            let local = p.node(loc, IdExpr { name });
            Ok(ExportSpecifier { local, exported })
          })?;
          names.push(specifier);
          if !self.consume_if(TT::Comma).is_match() {
            self.require(TT::BraceClose)?;
            break;
          }
        }
        let from = if self.consume_if(TT::KeywordFrom).is_match() {
          Some(self.require_module_name()?)
        } else {
          None
        };
        self.require_stmt_end()?;
        let loc = self.loc_from(start);
        Ok(self.node(loc, ExportListStmt { names, from }))
      }
      TT::KeywordVar | TT::KeywordLet | TT::KeywordConst => {
        let decl = self.parse_var_decl_stmt(ctx)?;
        let loc = self.loc_from(start);
        Ok(self.node(loc, ExportDeclStmt { decl }))
      }
      TT::KeywordFunction | TT::KeywordAsync => {
        let decl = self.parse_func_decl(ctx)?;
        let loc = self.loc_from(start);
        Ok(self.node(loc, ExportDeclStmt { decl }))
      }
      TT::KeywordClass => {
        let decl = self.parse_class_decl(ctx)?;
        let loc = self.loc_from(start);
        Ok(self.node(loc, ExportDeclStmt { decl }))
      }
      _ => Err(t0.error(SyntaxErrorType::ExpectedSyntax("exportable declaration or list"))),
    }
  }
}
