use serde::Serialize;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Associativity {
  Left,
  Right,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum OperatorName {
  Addition,
  Assignment,
  AssignmentAddition,
  AssignmentBitwiseAnd,
  AssignmentBitwiseLeftShift,
  AssignmentBitwiseOr,
  AssignmentBitwiseRightShift,
  AssignmentBitwiseUnsignedRightShift,
  AssignmentBitwiseXor,
  AssignmentDivision,
  AssignmentExponentiation,
  AssignmentLogicalAnd,
  AssignmentLogicalOr,
  AssignmentMultiplication,
  AssignmentNullishCoalescing,
  AssignmentRemainder,
  AssignmentSubtraction,
  Await,
  BitwiseAnd,
  BitwiseLeftShift,
  BitwiseNot,
  BitwiseOr,
  BitwiseRightShift,
  BitwiseUnsignedRightShift,
  BitwiseXor,
  Call,
  Comma,
  ComputedMemberAccess,
  Conditional,
  Delete,
  Division,
  Equality,
  Exponentiation,
  GreaterThan,
  GreaterThanOrEqual,
  In,
  Inequality,
  Instanceof,
  LessThan,
  LessThanOrEqual,
  LogicalAnd,
  LogicalNot,
  LogicalOr,
  MemberAccess,
  Multiplication,
  New,
  NullishCoalescing,
  OptionalChainingCall,
  OptionalChainingComputedMemberAccess,
  OptionalChainingMemberAccess,
  PostfixDecrement,
  PostfixIncrement,
  PrefixDecrement,
  PrefixIncrement,
  Remainder,
  StrictEquality,
  StrictInequality,
  Subtraction,
  Typeof,
  UnaryNegation,
  UnaryPlus,
  Void,
}

impl OperatorName {
  pub fn is_assignment(self) -> bool {
    matches!(
      self,
      OperatorName::Assignment
        | OperatorName::AssignmentAddition
        | OperatorName::AssignmentBitwiseAnd
        | OperatorName::AssignmentBitwiseLeftShift
        | OperatorName::AssignmentBitwiseOr
        | OperatorName::AssignmentBitwiseRightShift
        | OperatorName::AssignmentBitwiseUnsignedRightShift
        | OperatorName::AssignmentBitwiseXor
        | OperatorName::AssignmentDivision
        | OperatorName::AssignmentExponentiation
        | OperatorName::AssignmentLogicalAnd
        | OperatorName::AssignmentLogicalOr
        | OperatorName::AssignmentMultiplication
        | OperatorName::AssignmentNullishCoalescing
        | OperatorName::AssignmentRemainder
        | OperatorName::AssignmentSubtraction
    )
  }

  /// Increment and decrement in either position.
  pub fn is_update(self) -> bool {
    matches!(
      self,
      OperatorName::PostfixDecrement
        | OperatorName::PostfixIncrement
        | OperatorName::PrefixDecrement
        | OperatorName::PrefixIncrement
    )
  }
}

impl OperatorName {
  /// Binding strength, from 1 for the comma operator up to 18 for member access and calls.
  pub fn precedence(self) -> u8 {
    use OperatorName::*;
    match self {
      Comma => 1,
      Assignment
      | AssignmentAddition
      | AssignmentBitwiseAnd
      | AssignmentBitwiseLeftShift
      | AssignmentBitwiseOr
      | AssignmentBitwiseRightShift
      | AssignmentBitwiseUnsignedRightShift
      | AssignmentBitwiseXor
      | AssignmentDivision
      | AssignmentExponentiation
      | AssignmentLogicalAnd
      | AssignmentLogicalOr
      | AssignmentMultiplication
      | AssignmentNullishCoalescing
      | AssignmentRemainder
      | AssignmentSubtraction => 2,
      Conditional => 3,
      LogicalOr | NullishCoalescing => 4,
      LogicalAnd => 5,
      BitwiseOr => 6,
      BitwiseXor => 7,
      BitwiseAnd => 8,
      Equality | Inequality | StrictEquality | StrictInequality => 9,
      LessThan | LessThanOrEqual | GreaterThan | GreaterThanOrEqual | In | Instanceof => 10,
      BitwiseLeftShift | BitwiseRightShift | BitwiseUnsignedRightShift => 11,
      Addition | Subtraction => 12,
      Multiplication | Division | Remainder => 13,
      Exponentiation => 14,
      LogicalNot | BitwiseNot | UnaryPlus | UnaryNegation | PrefixIncrement | PrefixDecrement
      | Typeof | Void | Delete | Await => 15,
      PostfixIncrement | PostfixDecrement => 16,
      New => 17,
      MemberAccess
      | ComputedMemberAccess
      | Call
      | OptionalChainingMemberAccess
      | OptionalChainingComputedMemberAccess
      | OptionalChainingCall => 18,
    }
  }

  pub fn associativity(self) -> Associativity {
    match self.precedence() {
      // Assignment, conditional, exponentiation, prefix and `new`.
      2 | 3 | 14 | 15 | 17 => Associativity::Right,
      _ => Associativity::Left,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn precedence_orders_levels() {
    assert_eq!(OperatorName::Comma.precedence(), 1);
    assert_eq!(OperatorName::AssignmentLogicalOr.precedence(), 2);
    assert_eq!(OperatorName::Conditional.precedence(), 3);
    assert!(OperatorName::Multiplication.precedence() > OperatorName::Addition.precedence());
    assert!(OperatorName::Typeof.precedence() > OperatorName::Exponentiation.precedence());
    assert_eq!(OperatorName::OptionalChainingCall.precedence(), 18);
  }

  #[test]
  fn right_associative_operators() {
    assert_eq!(OperatorName::Exponentiation.associativity(), Associativity::Right);
    assert_eq!(OperatorName::AssignmentAddition.associativity(), Associativity::Right);
    assert_eq!(OperatorName::Subtraction.associativity(), Associativity::Left);
    assert_eq!(OperatorName::Comma.associativity(), Associativity::Left);
  }
}
