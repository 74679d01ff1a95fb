use std::fmt;

use thiserror::Error;

use crate::pattern::PatternError;

/// The two halves of a rewrite rule
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuleSide {
  /// The pattern on the left of `->`
  Pattern,
  /// The template on the right of `->`
  Template,
}
impl fmt::Display for RuleSide {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Pattern => write!(f, "pattern"),
      Self::Template => write!(f, "template"),
    }
  }
}

/// Reasons a rewrite rule is rejected
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RuleError {
  /// The text doesn't contain exactly one `->`
  #[error("a rule must have the form `pattern -> template`")]
  Syntax,
  /// One side failed to compile
  #[error("invalid {side}: {error}")]
  Pattern {
    /// The side that failed
    side: RuleSide,
    /// Why it failed
    #[source]
    error: PatternError,
  },
  /// The template names variables that the pattern never binds
  #[error("template uses unbound variables: {}", .0.join(", "))]
  Missing(Vec<String>),
}
