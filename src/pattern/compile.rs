use std::fmt::{self, Display};
use std::str::FromStr;

use intern_all::Tok;
use itertools::Itertools;
use substack::Substack;
use thiserror::Error;
use tracing::debug;

use super::decl::Decl;
use crate::tree::{parse, ParseError, Parens, Tree, TreeNode};

/// Reasons a pattern fails to compile
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PatternError {
  /// The text is not a valid parenthesis tree
  #[error("malformed pattern: {0}")]
  Parse(#[from] ParseError),
  /// Variables stand for whole subtrees so they cannot have children. The
  /// path lists child indices from the root to the offending node.
  #[error("variable <{name}> has children (child path {path:?})")]
  VarWithChildren {
    /// Name of the variable
    name: String,
    /// Child indices leading to the variable
    path: Vec<usize>,
  },
}

/// A compiled tree pattern. Immutable, so a single instance can serve any
/// number of concurrent matches.
///
/// Invariant: every [Decl::Variable] node is a leaf.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pattern {
  decls: TreeNode<Decl>,
}
impl Pattern {
  /// Parse and validate a pattern
  pub fn compile(text: &str) -> Result<Self, PatternError> {
    let decls: TreeNode<Decl> = parse(text, Decl::from_token)?;
    check_leaf_vars(Substack::Bottom, &decls)?;
    let pattern = Self { decls };
    debug!(%pattern, "compiled tree pattern");
    Ok(pattern)
  }

  /// The declaration tree
  pub fn decls(&self) -> &TreeNode<Decl> { &self.decls }

  /// Distinct variable names in order of first occurrence (pre-order)
  #[must_use]
  pub fn variables(&self) -> Vec<Tok<String>> {
    let mut names = Vec::new();
    collect_vars(&self.decls, &mut names);
    names.into_iter().unique().collect()
  }
}

/// Compile a pattern string, see [Pattern::compile]
pub fn compile(text: &str) -> Result<Pattern, PatternError> { Pattern::compile(text) }

fn check_leaf_vars(path: Substack<usize>, node: &TreeNode<Decl>) -> Result<(), PatternError> {
  if let Decl::Variable(name) = node.value() {
    if !node.is_leaf() {
      let mut path = path.iter().copied().collect_vec();
      path.reverse();
      return Err(PatternError::VarWithChildren { name: name.as_str().to_owned(), path });
    }
  }
  for (pos, child) in node.children().enumerate() {
    check_leaf_vars(path.push(pos), child)?;
  }
  Ok(())
}

fn collect_vars(node: &TreeNode<Decl>, names: &mut Vec<Tok<String>>) {
  if let Decl::Variable(name) = node.value() {
    names.push(name.clone());
  }
  node.children().for_each(|c| collect_vars(c, names))
}

impl Display for Pattern {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { Parens(&self.decls).fmt(f) }
}

impl FromStr for Pattern {
  type Err = PatternError;
  fn from_str(s: &str) -> Result<Self, Self::Err> { Self::compile(s) }
}

#[cfg(test)]
mod test {
  use intern_all::i;
  use pretty_assertions::assert_eq;

  use super::{compile, Pattern, PatternError};
  use crate::pattern::Decl;
  use crate::tree::{ParseError, Tree};

  #[test]
  fn compiles_nested() {
    let pattern = compile("add(<x>,mul(1,<y>))").unwrap();
    let root = pattern.decls();
    assert_eq!(root.value(), &Decl::Literal(i("add")));
    assert_eq!(root.child(0).unwrap().value(), &Decl::Variable(i("x")));
    let mul = root.child(1).unwrap();
    assert_eq!(mul.child(0).unwrap().value(), &Decl::Literal(i("1")));
    assert_eq!(mul.child(1).unwrap().value(), &Decl::Variable(i("y")));
  }

  #[test]
  fn variable_with_children() {
    assert_eq!(
      compile("<x>(1)"),
      Err(PatternError::VarWithChildren { name: "x".to_string(), path: vec![] })
    );
    assert_eq!(
      compile("f(a,g(<y>(b)))"),
      Err(PatternError::VarWithChildren { name: "y".to_string(), path: vec![1, 0] })
    );
  }

  #[test]
  fn parse_errors_pass_through() {
    assert_eq!(compile("add(<x>,0"), Err(PatternError::Parse(ParseError::Unclosed { at: 3 })));
    assert_eq!(compile("add(,0)"), Err(PatternError::Parse(ParseError::EmptyToken { at: 4 })));
  }

  #[test]
  fn variables_in_first_occurrence_order() {
    let pattern = compile("f(<b>,g(<a>,<b>),<c>)").unwrap();
    assert_eq!(pattern.variables(), vec![i("b"), i("a"), i("c")]);
    assert!(compile("f(x,y)").unwrap().variables().is_empty());
  }

  #[test]
  fn display_roundtrip() {
    let text = "sub(<x>,neg(<y>))";
    let pattern: Pattern = text.parse().unwrap();
    assert_eq!(pattern.to_string(), text);
    assert_eq!(compile(&pattern.to_string()).unwrap(), pattern);
  }
}
