use std::fmt;

use intern_all::{i, Tok};

/// A node of a compiled pattern
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Decl {
  /// Must be equal to the value of the corresponding input node
  Literal(Tok<String>),
  /// Captures the corresponding input subtree under this name
  Variable(Tok<String>),
}
impl Decl {
  /// Classify a pattern token. `<name>` with a non-empty name is a
  /// variable, anything else is a literal.
  #[must_use]
  pub fn from_token(token: &str) -> Self {
    match token.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
      Some(name) if !name.is_empty() => Self::Variable(i(name)),
      _ => Self::Literal(i(token)),
    }
  }

  /// The literal text or the variable name, without angle brackets
  pub fn text(&self) -> &str {
    match self {
      Self::Literal(t) | Self::Variable(t) => t.as_str(),
    }
  }

  /// Whether this is a [Decl::Variable]
  pub fn is_var(&self) -> bool { matches!(self, Self::Variable(_)) }
}

impl fmt::Display for Decl {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Literal(t) => write!(f, "{}", t.as_str()),
      Self::Variable(n) => write!(f, "<{}>", n.as_str()),
    }
  }
}
