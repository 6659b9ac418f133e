use crate::operator::OperatorName;
use crate::token::TT;

/// The operator a token introduces when it follows a complete operand. Member access, calls and
/// the conditional are included so one precedence loop handles them all.
pub fn infix_operator(typ: TT) -> Option<OperatorName> {
  use OperatorName::*;
  Some(match typ {
    TT::Comma => Comma,
    TT::Equals => Assignment,
    TT::PlusEquals => AssignmentAddition,
    TT::AmpersandEquals => AssignmentBitwiseAnd,
    TT::ChevronLeftChevronLeftEquals => AssignmentBitwiseLeftShift,
    TT::BarEquals => AssignmentBitwiseOr,
    TT::ChevronRightChevronRightEquals => AssignmentBitwiseRightShift,
    TT::ChevronRightChevronRightChevronRightEquals => AssignmentBitwiseUnsignedRightShift,
    TT::CaretEquals => AssignmentBitwiseXor,
    TT::SlashEquals => AssignmentDivision,
    TT::AsteriskAsteriskEquals => AssignmentExponentiation,
    TT::AmpersandAmpersandEquals => AssignmentLogicalAnd,
    TT::BarBarEquals => AssignmentLogicalOr,
    TT::AsteriskEquals => AssignmentMultiplication,
    TT::QuestionQuestionEquals => AssignmentNullishCoalescing,
    TT::PercentEquals => AssignmentRemainder,
    TT::HyphenEquals => AssignmentSubtraction,
    TT::Question => Conditional,
    TT::BarBar => LogicalOr,
    TT::QuestionQuestion => NullishCoalescing,
    TT::AmpersandAmpersand => LogicalAnd,
    TT::Bar => BitwiseOr,
    TT::Caret => BitwiseXor,
    TT::Ampersand => BitwiseAnd,
    TT::EqualsEquals => Equality,
    TT::ExclamationEquals => Inequality,
    TT::EqualsEqualsEquals => StrictEquality,
    TT::ExclamationEqualsEquals => StrictInequality,
    TT::ChevronLeft => LessThan,
    TT::ChevronLeftEquals => LessThanOrEqual,
    TT::ChevronRight => GreaterThan,
    TT::ChevronRightEquals => GreaterThanOrEqual,
    TT::KeywordIn => In,
    TT::KeywordInstanceof => Instanceof,
    TT::ChevronLeftChevronLeft => BitwiseLeftShift,
    TT::ChevronRightChevronRight => BitwiseRightShift,
    TT::ChevronRightChevronRightChevronRight => BitwiseUnsignedRightShift,
    TT::Plus => Addition,
    TT::Hyphen => Subtraction,
    TT::Asterisk => Multiplication,
    TT::Slash => Division,
    TT::Percent => Remainder,
    TT::AsteriskAsterisk => Exponentiation,
    TT::Dot => MemberAccess,
    TT::BracketOpen => ComputedMemberAccess,
    TT::ParenthesisOpen => Call,
    TT::QuestionDot => OptionalChainingMemberAccess,
    TT::QuestionDotBracketOpen => OptionalChainingComputedMemberAccess,
    TT::QuestionDotParenthesisOpen => OptionalChainingCall,
    _ => return None,
  })
}

/// Prefix operators. `new` and `yield` have their own grammar and aren't listed.
pub fn prefix_operator(typ: TT) -> Option<OperatorName> {
  use OperatorName::*;
  Some(match typ {
    TT::KeywordAwait => Await,
    TT::Tilde => BitwiseNot,
    TT::KeywordDelete => Delete,
    TT::Exclamation => LogicalNot,
    TT::HyphenHyphen => PrefixDecrement,
    TT::PlusPlus => PrefixIncrement,
    TT::Hyphen => UnaryNegation,
    TT::Plus => UnaryPlus,
    TT::KeywordTypeof => Typeof,
    TT::KeywordVoid => Void,
    _ => return None,
  })
}
