//! Parser for the parenthesis tree notation
//!
//! ```text
//! tree  := token [ "(" tree { "," tree } ")" ]
//! token := one or more characters other than whitespace, "(", ")" and ","
//! ```
//!
//! Whitespace is allowed around tokens and punctuation but never inside a
//! token.

use thiserror::Error;

use super::BuildTree;

/// Reasons the parenthesis notation can be rejected. Every position is a
/// byte offset into the parsed text.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
  /// The text contains nothing but whitespace
  #[error("the tree is empty")]
  Empty,
  /// A node has no name, eg. `f(a,)` or `(a)`
  #[error("expected a token at {at}")]
  EmptyToken {
    /// Where the token should start
    at: usize,
  },
  /// The parenthesis opened at the given position is never closed
  #[error("parenthesis opened at {at} is never closed")]
  Unclosed {
    /// The opening parenthesis
    at: usize,
  },
  /// A closing parenthesis without a matching opening one
  #[error("unmatched closing parenthesis at {at}")]
  Unopened {
    /// The closing parenthesis
    at: usize,
  },
  /// Something other than `,` or `)` follows a child
  #[error("expected ',' or ')' at {at}, found {found:?}")]
  Unexpected {
    /// Where the separator was expected
    at: usize,
    /// The character found instead
    found: char,
  },
  /// The tree is complete but the text goes on
  #[error("unexpected input after the tree at {at}")]
  Trailing {
    /// Start of the extra input
    at: usize,
  },
}

/// Parse a tree in parenthesis notation, converting every token to a value
/// with the callback. Tokens are converted in pre-order.
pub fn parse<T: BuildTree>(
  text: &str,
  mut token: impl FnMut(&str) -> T::Value,
) -> Result<T, ParseError> {
  let mut parser = Parser { text, pos: 0 };
  parser.skip_ws();
  if parser.peek().is_none() {
    return Err(ParseError::Empty);
  }
  let tree = parser.tree(&mut token)?;
  match parser.peek() {
    None => Ok(tree),
    Some(')') => Err(ParseError::Unopened { at: parser.pos }),
    Some(_) => Err(ParseError::Trailing { at: parser.pos }),
  }
}

/// Whether the character can be part of a token
pub(crate) fn is_token_char(c: char) -> bool { !c.is_whitespace() && !matches!(c, '(' | ')' | ',') }

struct Parser<'a> {
  text: &'a str,
  pos: usize,
}
impl<'a> Parser<'a> {
  fn peek(&self) -> Option<char> { self.text[self.pos..].chars().next() }

  fn bump(&mut self, c: char) { self.pos += c.len_utf8() }

  fn skip_ws(&mut self) {
    while let Some(c) = self.peek().filter(|c| c.is_whitespace()) {
      self.bump(c)
    }
  }

  fn token(&mut self) -> Result<&'a str, ParseError> {
    let text = self.text;
    let start = self.pos;
    while let Some(c) = self.peek().filter(|c| is_token_char(*c)) {
      self.bump(c)
    }
    match &text[start..self.pos] {
      "" => Err(ParseError::EmptyToken { at: start }),
      tok => Ok(tok),
    }
  }

  /// Parse one node and everything below it, along with any whitespace
  /// around it
  fn tree<T: BuildTree>(
    &mut self,
    f: &mut impl FnMut(&str) -> T::Value,
  ) -> Result<T, ParseError> {
    self.skip_ws();
    let value = f(self.token()?);
    self.skip_ws();
    let mut children = Vec::new();
    if self.peek() == Some('(') {
      let open = self.pos;
      self.bump('(');
      loop {
        children.push(self.tree(f)?);
        match self.peek() {
          Some(',') => self.bump(','),
          Some(')') => {
            self.bump(')');
            self.skip_ws();
            break;
          },
          Some(found) => return Err(ParseError::Unexpected { at: self.pos, found }),
          None => return Err(ParseError::Unclosed { at: open }),
        }
      }
    }
    Ok(T::from_parts(value, children))
  }
}
