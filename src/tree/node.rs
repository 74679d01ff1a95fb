use std::fmt::{self, Display};
use std::str::FromStr;

use super::parse::{parse, ParseError};
use super::{BuildTree, Parens, Tree};

/// A tree that owns its children in a vector
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TreeNode<V> {
  value: V,
  children: Vec<TreeNode<V>>,
}
impl<V> TreeNode<V> {
  /// Create a node with the given children
  pub fn new(value: V, children: Vec<Self>) -> Self { Self { value, children } }
  /// Create a node without children
  pub fn leaf(value: V) -> Self { Self::new(value, Vec::new()) }
  /// Append a child at the rightmost position
  pub fn push(&mut self, child: Self) { self.children.push(child) }
  /// Builder form of [TreeNode::push]
  #[must_use]
  pub fn with_child(mut self, child: Self) -> Self {
    self.push(child);
    self
  }
  /// The children as a slice
  pub fn child_slice(&self) -> &[Self] { &self.children }
  /// Mutable access to the value
  pub fn value_mut(&mut self) -> &mut V { &mut self.value }
  /// Take the node apart
  pub fn into_parts(self) -> (V, Vec<Self>) { (self.value, self.children) }
}

impl<V> Tree for TreeNode<V> {
  type Value = V;
  fn value(&self) -> &V { &self.value }
  fn child_count(&self) -> usize { self.children.len() }
  fn child(&self, index: usize) -> Option<&Self> { self.children.get(index) }
}

impl<V> BuildTree for TreeNode<V> {
  fn from_parts(value: V, children: Vec<Self>) -> Self { Self::new(value, children) }
}

impl<V: Display> Display for TreeNode<V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { Parens(self).fmt(f) }
}

impl FromStr for TreeNode<String> {
  type Err = ParseError;
  fn from_str(s: &str) -> Result<Self, Self::Err> { parse(s, str::to_string) }
}

#[cfg(test)]
mod test {
  use super::TreeNode;
  use crate::tree::Tree;

  #[test]
  fn builder() {
    let tree = TreeNode::leaf("f")
      .with_child(TreeNode::leaf("a"))
      .with_child(TreeNode::new("g", vec![TreeNode::leaf("b")]));
    assert_eq!(tree.to_string(), "f(a,g(b))");
    assert_eq!(tree.child_slice().len(), 2);
    assert!(tree.child(2).is_none());
  }

  #[test]
  fn display_roundtrip() {
    let text = "if(lt(x,0),neg(x),x)";
    let tree: TreeNode<String> = text.parse().unwrap();
    assert_eq!(tree.to_string(), text);
  }
}
