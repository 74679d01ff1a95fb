use std::iter;

use crate::tree::{copy_tree, BuildTree};

/// Traverse the tree in pre-order, calling `f` on every subtree until it
/// returns a replacement. The path from the root to the replaced subtree is
/// rebuilt and every other subtree is copied, so the result is independent
/// of the input. Returns [None] if `f` never produced a replacement.
pub fn update_first<T>(tree: &T, f: &mut impl FnMut(&T) -> Option<T>) -> Option<T>
where
  T: BuildTree,
  T::Value: Clone,
{
  if let Some(new) = f(tree) {
    return Some(new);
  }
  for (pos, child) in tree.children().enumerate() {
    if let Some(new) = update_first(child, f) {
      let children = (tree.children().take(pos).map(copy_tree::<T, T>))
        .chain(iter::once(new))
        .chain(tree.children().skip(pos + 1).map(copy_tree::<T, T>))
        .collect();
      return Some(T::from_parts(tree.value().clone(), children));
    }
  }
  None
}

#[cfg(test)]
mod test {
  use pretty_assertions::assert_eq;

  use super::update_first;
  use crate::tree::{Tree, TreeNode};

  fn tree(text: &str) -> TreeNode<String> { text.parse().unwrap() }

  fn replace_x(node: &TreeNode<String>) -> Option<TreeNode<String>> {
    (node.value() == "x").then(|| tree("y"))
  }

  #[test]
  fn replaces_first_in_preorder() {
    let out = update_first(&tree("f(g(a,x),x)"), &mut replace_x).unwrap();
    assert_eq!(out, tree("f(g(a,y),x)"));
  }

  #[test]
  fn root_first() {
    let mut calls = 0;
    let out = update_first(&tree("x(x)"), &mut |n: &TreeNode<String>| {
      calls += 1;
      replace_x(n)
    });
    assert_eq!(out, Some(tree("y")));
    assert_eq!(calls, 1);
  }

  #[test]
  fn untouched_when_nothing_matches() {
    assert_eq!(update_first(&tree("f(a,g(b))"), &mut replace_x), None);
  }
}
