//! Ordered trees as a capability, so that the pattern machinery works with
//! any concrete representation.
//!
//! [Tree] is the read side that the matcher needs, [BuildTree] the write
//! side used by the parser, [copy_tree] and the template instantiator.
//! [TreeNode] is the vector-backed implementation shipped with the crate.
mod node;
mod parse;

use std::fmt::{self, Display};
use std::iter::FusedIterator;

pub use node::TreeNode;
pub use parse::{parse, ParseError};
pub(crate) use parse::is_token_char;

/// Read access to an ordered tree. Child positions are significant.
pub trait Tree: Sized {
  /// The payload of every node
  type Value;
  /// The value stored in this node
  fn value(&self) -> &Self::Value;
  /// Number of direct children
  fn child_count(&self) -> usize;
  /// The child at the given position, if there is one
  fn child(&self, index: usize) -> Option<&Self>;

  /// Iterate over the direct children left to right
  fn children(&self) -> Children<'_, Self> { Children { tree: self, front: 0, back: self.child_count() } }
  /// Whether the node has no children
  fn is_leaf(&self) -> bool { self.child_count() == 0 }
  /// Number of nodes in the tree, including the root
  fn size(&self) -> usize { 1 + self.children().map(Tree::size).sum::<usize>() }
  /// Number of nodes along the longest root-to-leaf path
  fn depth(&self) -> usize { 1 + self.children().map(Tree::depth).max().unwrap_or(0) }

  /// Deep structural equality: same shape, and equal values at every pair
  /// of corresponding nodes. The two sides may be different
  /// representations.
  fn tree_eq<U>(&self, other: &U) -> bool
  where
    U: Tree<Value = Self::Value>,
    Self::Value: PartialEq,
  {
    self.value() == other.value()
      && self.child_count() == other.child_count()
      && self.children().zip(other.children()).all(|(l, r)| l.tree_eq(r))
  }
}

/// Construction of a tree from a value and an ordered list of children.
pub trait BuildTree: Tree {
  /// Assemble a node
  fn from_parts(value: Self::Value, children: Vec<Self>) -> Self;
  /// Assemble a node without children
  fn leaf(value: Self::Value) -> Self { Self::from_parts(value, Vec::new()) }
}

/// Iterator over the children of a [Tree], see [Tree::children]
pub struct Children<'a, T> {
  tree: &'a T,
  front: usize,
  back: usize,
}
impl<'a, T: Tree> Iterator for Children<'a, T> {
  type Item = &'a T;
  fn next(&mut self) -> Option<Self::Item> {
    if self.front == self.back {
      return None;
    }
    self.front += 1;
    self.tree.child(self.front - 1)
  }
  fn size_hint(&self) -> (usize, Option<usize>) {
    let len = self.back - self.front;
    (len, Some(len))
  }
}
impl<'a, T: Tree> DoubleEndedIterator for Children<'a, T> {
  fn next_back(&mut self) -> Option<Self::Item> {
    if self.front == self.back {
      return None;
    }
    self.back -= 1;
    self.tree.child(self.back)
  }
}
impl<'a, T: Tree> ExactSizeIterator for Children<'a, T> {}
impl<'a, T: Tree> FusedIterator for Children<'a, T> {}

/// Build a tree of a different type (or representation) with the same
/// shape, converting every value with the callback in pre-order.
#[must_use]
pub fn map_tree<S: Tree, T: BuildTree>(
  src: &S,
  f: &mut impl FnMut(&S::Value) -> T::Value,
) -> T {
  let value = f(src.value());
  let children = src.children().map(|c| map_tree(c, f)).collect();
  T::from_parts(value, children)
}

/// Deep copy of a tree. The result shares nothing with the source.
#[must_use]
pub fn copy_tree<S, T>(src: &S) -> T
where
  S: Tree,
  S::Value: Clone,
  T: BuildTree<Value = S::Value>,
{
  map_tree(src, &mut |v: &S::Value| v.clone())
}

/// Displays any tree with displayable values in parenthesis notation, eg.
/// `add(x,mul(y,2))`. Values are printed verbatim, nothing is escaped.
pub struct Parens<'a, T>(pub &'a T);
impl<'a, T: Tree> Display for Parens<'a, T>
where T::Value: Display
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.value())?;
    if self.0.is_leaf() {
      return Ok(());
    }
    f.write_str("(")?;
    for (i, child) in self.0.children().enumerate() {
      if i != 0 {
        f.write_str(",")?;
      }
      write!(f, "{}", Parens(child))?;
    }
    f.write_str(")")
  }
}
