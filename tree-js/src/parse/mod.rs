use crate::ast::Ast;
use crate::ast::NodeId;
use crate::ast::Syntax;
use crate::ast::TopLevel;
use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::is_keyword;
use crate::lex::lex_next;
use crate::lex::LexMode;
use crate::lex::Lexer;
use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;

pub mod expr;
pub mod func;
pub mod module;
pub mod operator;
pub mod pat;
pub mod stmt;
#[cfg(test)]
mod tests;

// Passed by value to almost every parse_* method. Use the with_* methods to derive an altered copy.
#[derive(Clone, Copy, Default)]
pub struct ParseCtx {
  // Set while parsing the head of a `for` statement, where `in` ends the expression.
  pub no_in: bool,
}

impl ParseCtx {
  pub fn with_no_in(&self, no_in: bool) -> ParseCtx {
    ParseCtx { no_in, ..*self }
  }
}

#[derive(Debug)]
#[must_use]
pub struct MaybeToken {
  typ: TT,
  loc: Loc,
  matched: bool,
}

impl MaybeToken {
  pub fn is_match(&self) -> bool {
    self.matched
  }

  pub fn match_loc(&self) -> Option<Loc> {
    self.matched.then_some(self.loc)
  }

  pub fn error(&self, err: SyntaxErrorType) -> SyntaxError {
    debug_assert!(!self.matched);
    self.loc.error(err, Some(self.typ))
  }
}

/// Restoring also discards every node allocated since the checkpoint was taken.
pub struct ParserCheckpoint {
  cursor: usize,
  node_count: usize,
}

pub struct Parser<'a> {
  lexer: Lexer<'a>,
  /// Every token lexed so far, with the mode it was lexed in. Backtracking rewinds `cursor` only.
  tokens: Vec<(Token, LexMode)>,
  cursor: usize,
  ast: Ast,
}

// Parsing methods live in the submodules as further `impl Parser` blocks.
impl<'a> Parser<'a> {
  pub fn new(lexer: Lexer<'a>) -> Parser<'a> {
    Parser {
      ast: Ast::new(lexer.source()),
      lexer,
      tokens: Vec::new(),
      cursor: 0,
    }
  }

  pub fn source_range(&self) -> Loc {
    self.lexer.source_range()
  }

  pub fn str(&self, loc: Loc) -> &str {
    &self.lexer[loc]
  }

  pub fn string(&self, loc: Loc) -> String {
    self.str(loc).to_owned()
  }

  pub fn ast(&self) -> &Ast {
    &self.ast
  }

  pub fn checkpoint(&self) -> ParserCheckpoint {
    ParserCheckpoint {
      cursor: self.cursor,
      node_count: self.ast.len(),
    }
  }

  pub fn restore_checkpoint(&mut self, checkpoint: ParserCheckpoint) {
    self.cursor = checkpoint.cursor;
    self.ast.truncate(checkpoint.node_count);
  }

  /// End offset of the most recently consumed token.
  fn last_end(&self) -> usize {
    match self.cursor {
      0 => 0,
      n => self.tokens[n - 1].0.loc.1,
    }
  }

  /// The token at the cursor, lexed in `mode`. A token previously lexed in another mode is thrown
  /// away along with everything after it, since `/` and `}` lex differently per mode.
  fn token_at_cursor(&mut self, mode: LexMode) -> Token {
    if self.tokens.get(self.cursor).is_some_and(|&(_, m)| m != mode) {
      self.tokens.truncate(self.cursor);
      let resume = self.last_end();
      self.lexer.set_next(resume);
    }
    if self.tokens.len() == self.cursor {
      let token = lex_next(&mut self.lexer, mode);
      self.tokens.push((token, mode));
    }
    self.tokens[self.cursor].0.clone()
  }

  /// Consumes the next token only if `accept` approves it.
  fn advance_if(&mut self, mode: LexMode, accept: impl FnOnce(&Token) -> bool) -> (bool, Token) {
    let token = self.token_at_cursor(mode);
    let accepted = accept(&token);
    if accepted {
      self.cursor += 1;
    }
    (accepted, token)
  }

  pub fn consume_with_mode(&mut self, mode: LexMode) -> Token {
    let token = self.token_at_cursor(mode);
    self.cursor += 1;
    token
  }

  pub fn consume(&mut self) -> Token {
    self.consume_with_mode(LexMode::Standard)
  }

  pub fn peek_with_mode(&mut self, mode: LexMode) -> Token {
    self.token_at_cursor(mode)
  }

  pub fn peek(&mut self) -> Token {
    self.peek_with_mode(LexMode::Standard)
  }

  pub fn peek_n<const N: usize>(&mut self) -> [Token; N] {
    let saved = self.cursor;
    let tokens = std::array::from_fn(|_| self.consume());
    self.cursor = saved;
    tokens
  }

  pub fn consume_if(&mut self, typ: TT) -> MaybeToken {
    let (matched, t) = self.advance_if(LexMode::Standard, |t| t.typ == typ);
    MaybeToken {
      typ,
      matched,
      loc: t.loc,
    }
  }

  pub fn require_with_mode(&mut self, typ: TT, mode: LexMode) -> SyntaxResult<Token> {
    let t = self.consume_with_mode(mode);
    if t.typ == typ {
      Ok(t)
    } else {
      Err(t.error(SyntaxErrorType::RequiredTokenNotFound(typ)))
    }
  }

  pub fn require(&mut self, typ: TT) -> SyntaxResult<Token> {
    self.require_with_mode(typ, LexMode::Standard)
  }

  /// Consumes the next token, failing with "expected `expected`" unless `pred` accepts its type.
  pub fn require_predicate(
    &mut self,
    pred: impl FnOnce(TT) -> bool,
    expected: &'static str,
  ) -> SyntaxResult<Token> {
    let t = self.consume();
    if pred(t.typ) {
      Ok(t)
    } else {
      Err(t.error(SyntaxErrorType::ExpectedSyntax(expected)))
    }
  }

  /// Consumes an identifier usable as a binding or label name and returns its text.
  pub fn require_identifier(&mut self) -> SyntaxResult<(Loc, String)> {
    let t = self.require_predicate(TT::is_binding_identifier, "identifier")?;
    Ok((t.loc, self.string(t.loc)))
  }

  /// Consumes any identifier or keyword, as allowed after `.` or as a property key.
  pub fn require_identifier_name(&mut self) -> SyntaxResult<(Loc, String)> {
    let t = self.require_predicate(is_identifier_name, "property name")?;
    Ok((t.loc, self.string(t.loc)))
  }

  /// Automatic semicolon insertion: a statement may also end before `}`, at the end of input, or at a line break.
  pub fn require_stmt_end(&mut self) -> SyntaxResult<()> {
    let t = self.peek();
    match t.typ {
      TT::Semicolon => {
        self.consume();
        Ok(())
      }
      TT::BraceClose | TT::EOF => Ok(()),
      _ if t.preceded_by_line_terminator => Ok(()),
      _ => Err(t.error(SyntaxErrorType::ExpectedSyntax("`;` or line break"))),
    }
  }

  pub fn node(&mut self, loc: Loc, stx: impl Into<Syntax>) -> NodeId {
    self.ast.alloc(loc, stx)
  }

  /// Runs `f` and allocates its result with a location spanning every token it consumed.
  pub fn with_loc<S: Into<Syntax>>(
    &mut self,
    f: impl FnOnce(&mut Self) -> SyntaxResult<S>,
  ) -> SyntaxResult<NodeId> {
    let start = self.peek().loc.0;
    let stx = f(self)?;
    let loc = Loc(start, self.last_end().max(start));
    Ok(self.node(loc, stx))
  }

  /// A location from `start` up to the end of the last consumed token.
  pub fn loc_from(&self, start: usize) -> Loc {
    Loc(start, self.last_end().max(start))
  }

  pub fn node_start(&self, id: NodeId) -> usize {
    self.ast.loc(id).map(|l| l.0).unwrap_or(0)
  }

  pub fn parse_top_level(mut self) -> SyntaxResult<Ast> {
    let mut body = Vec::new();
    while self.peek().typ != TT::EOF {
      body.push(self.parse_stmt(ParseCtx::default())?);
    }
    let root = self.node(self.source_range(), TopLevel { body });
    self.ast.set_root(root);
    Ok(self.ast)
  }
}

pub fn is_identifier_name(typ: TT) -> bool {
  typ == TT::Identifier || is_keyword(typ)
}
