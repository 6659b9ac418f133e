use ast::Ast;
use error::SyntaxResult;
use lex::Lexer;
use parse::Parser;

pub mod ast;
pub mod char;
pub mod error;
pub mod lex;
pub mod loc;
pub mod operator;
pub mod parse;
pub mod path;
pub mod token;
pub mod visit;

pub fn parse(source: &str) -> SyntaxResult<Ast> {
  let lexer = Lexer::new(source);
  let parser = Parser::new(lexer);
  parser.parse_top_level()
}
