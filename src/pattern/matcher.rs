use std::fmt::Display;

use hashbrown::hash_map::Entry;
use hashbrown::HashMap;
use intern_all::Tok;
use trait_set::trait_set;
use tracing::trace;

use super::compile::Pattern;
use super::decl::Decl;
use super::state::{Bindings, MatchResult};
use crate::tree::{Tree, TreeNode};

trait_set! {
  /// Decides whether an input value satisfies the text of a literal
  pub trait ValueEq<V> = Fn(&V, &str) -> bool;
  /// Produces the value of a template literal
  pub trait LiteralMapper<V> = FnMut(&str) -> V;
}

/// The default literal comparison: the [Display] form of the value must be
/// exactly the literal text
pub fn display_eq<V: Display>(value: &V, text: &str) -> bool { value.to_string() == text }

impl Pattern {
  /// Test the tree against the pattern, comparing literals by [display_eq]
  pub fn matches<T: Tree>(&self, tree: &T) -> bool
  where T::Value: Display + PartialEq {
    self.matches_with(tree, display_eq::<T::Value>)
  }

  /// Test the tree against the pattern, comparing literals with `eq`
  pub fn matches_with<T: Tree>(&self, tree: &T, eq: impl Fn(&T::Value, &str) -> bool) -> bool
  where T::Value: PartialEq {
    match_rec(self.decls(), tree, &mut HashMap::new(), &eq)
  }

  /// Match the tree against the pattern, comparing literals by
  /// [display_eq]
  pub fn match_tree<'a, T: Tree>(&self, tree: &'a T) -> Option<MatchResult<'a, T>>
  where T::Value: Display + PartialEq {
    self.match_with(tree, display_eq::<T::Value>)
  }

  /// Match the tree against the pattern, comparing literals with `eq`.
  /// Returns the captured subtrees on success.
  ///
  /// Repeated occurrences of a variable must capture structurally equal
  /// subtrees. Child counts must agree exactly at every literal.
  pub fn match_with<'a, T: Tree>(
    &self,
    tree: &'a T,
    eq: impl Fn(&T::Value, &str) -> bool,
  ) -> Option<MatchResult<'a, T>>
  where
    T::Value: PartialEq,
  {
    let mut vars = HashMap::new();
    if !match_rec(self.decls(), tree, &mut vars, &eq) {
      trace!(pattern = %self, "no match");
      return None;
    }
    trace!(pattern = %self, bound = vars.len(), "matched");
    Some(MatchResult::new(tree, Bindings::new(vars)))
  }
}

fn match_rec<'a, T: Tree>(
  pattern: &TreeNode<Decl>,
  node: &'a T,
  vars: &mut HashMap<Tok<String>, &'a T>,
  eq: &impl ValueEq<T::Value>,
) -> bool
where
  T::Value: PartialEq,
{
  match pattern.value() {
    Decl::Variable(name) => match vars.entry(name.clone()) {
      Entry::Vacant(ent) => {
        ent.insert(node);
        true
      },
      Entry::Occupied(ent) => ent.get().tree_eq(node),
    },
    Decl::Literal(text) =>
      eq(node.value(), text.as_str())
        && node.child_count() == pattern.child_count()
        && pattern.children().zip(node.children()).all(|(p, n)| match_rec(p, n, vars, eq)),
  }
}

#[cfg(test)]
mod test {
  use pretty_assertions::assert_eq;

  use crate::pattern::compile;
  use crate::tree::{Tree, TreeNode};

  fn tree(text: &str) -> TreeNode<String> { text.parse().unwrap() }

  #[test]
  fn wildcard_capture() {
    let pattern = compile("add(<x>,0)").unwrap();
    let input = tree("add(5,0)");
    let result = pattern.match_tree(&input).unwrap();
    assert_eq!(result.bindings().len(), 1);
    assert_eq!(result.bindings().get("x").unwrap(), &tree("5"));
    assert!(std::ptr::eq(result.tree(), &input));
    assert!(pattern.match_tree(&tree("add(5,1)")).is_none());
  }

  #[test]
  fn captures_whole_subtrees() {
    let pattern = compile("add(<x>,0)").unwrap();
    let input = tree("add(mul(a,sub(b,c)),0)");
    let result = pattern.match_tree(&input).unwrap();
    let x = result.bindings().get("x").unwrap();
    assert!(std::ptr::eq(x, input.child(0).unwrap()), "bindings borrow from the input");
  }

  #[test]
  fn variable_consistency() {
    let pattern = compile("add(<x>,<x>)").unwrap();
    assert!(pattern.matches(&tree("add(a,a)")));
    assert!(!pattern.matches(&tree("add(a,b)")));
    assert!(pattern.matches(&tree("add(f(a,b),f(a,b))")));
    assert!(!pattern.matches(&tree("add(f(a,b),f(b,a))")));
    assert!(!pattern.matches(&tree("add(f(a),f(a,a))")));
  }

  #[test]
  fn arity_is_strict() {
    let pattern = compile("f(<x>,<y>)").unwrap();
    assert!(!pattern.matches(&tree("f(1,2,3)")));
    assert!(!pattern.matches(&tree("f(1)")));
    assert!(!pattern.matches(&tree("f")));
    assert!(pattern.matches(&tree("f(1,2)")));
    assert!(!compile("f").unwrap().matches(&tree("f(1)")));
  }

  #[test]
  fn literal_mismatch_deep() {
    let pattern = compile("mul(1,<y>)").unwrap();
    let input = tree("mul(1,7)");
    let result = pattern.match_tree(&input).unwrap();
    assert_eq!(result.bindings().get("y").unwrap().to_string(), "7");
    assert!(pattern.match_tree(&tree("mul(2,7)")).is_none());
    assert!(pattern.match_tree(&tree("add(1,7)")).is_none());
  }

  #[test]
  fn bare_variable_matches_anything() {
    let pattern = compile("<any>").unwrap();
    let input = tree("f(g(h),i)");
    let result = pattern.match_tree(&input).unwrap();
    assert_eq!(result.bindings().get("any").unwrap(), &input);
  }

  #[test]
  fn deterministic() {
    let pattern = compile("add(<x>,<x>)").unwrap();
    let input = tree("add(q,q)");
    let first = pattern.matches(&input);
    assert!((0..10).all(|_| pattern.matches(&input) == first));
  }

  #[test]
  fn no_variables() {
    let pattern = compile("f(a,b)").unwrap();
    let input = tree("f(a,b)");
    let result = pattern.match_tree(&input).unwrap();
    assert!(result.bindings().is_empty());
  }

  #[test]
  fn numeric_values() {
    let input = TreeNode::new(10, vec![TreeNode::leaf(2), TreeNode::leaf(2)]);
    assert!(compile("10(<x>,<x>)").unwrap().matches(&input));
    assert!(!compile("10(<x>,3)").unwrap().matches(&input));
  }

  #[test]
  fn custom_equality() {
    let input = tree("ADD(x,0)");
    let pattern = compile("add(<x>,0)").unwrap();
    assert!(!pattern.matches(&input));
    let ci = |v: &String, t: &str| v.eq_ignore_ascii_case(t);
    assert!(pattern.matches_with(&input, ci));
    let result = pattern.match_with(&input, ci).unwrap();
    assert_eq!(result.bindings().get("x").unwrap(), &tree("x"));
  }

  #[test]
  fn shared_across_threads() {
    let pattern = compile("add(<x>,0)").unwrap();
    std::thread::scope(|s| {
      let handles = (0..4)
        .map(|n| {
          let pattern = &pattern;
          s.spawn(move || pattern.matches(&tree(&format!("add({n},0)"))))
        })
        .collect::<Vec<_>>();
      assert!(handles.into_iter().all(|h| h.join().unwrap()));
    });
  }
}
