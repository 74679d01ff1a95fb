//! Rewrite rules of the form `pattern -> template`
//!
//! ```text
//! add(<x>,0) -> <x>
//! sub(<x>,<x>) -> 0
//! add(<x>,<x>) -> mul(<x>,2)
//! ```
//!
//! A rule is one pattern and one template, checked when the rule is built
//! so that applying it can never hit an unbound variable.
mod rule_error;
mod update_first;

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use tracing::{debug, error};

pub use rule_error::{RuleError, RuleSide};
pub use update_first::update_first;

use crate::pattern::{display_eq, instantiate, Bindings, Pattern};
use crate::tree::{is_token_char, BuildTree};

/// A validated pattern/template pair
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RewriteRule {
  pattern: Pattern,
  template: Pattern,
}
impl RewriteRule {
  /// Pair a pattern with a template. Every variable in the template must
  /// also appear in the pattern.
  pub fn new(pattern: Pattern, template: Pattern) -> Result<Self, RuleError> {
    let bound = pattern.variables();
    let missing = (template.variables().into_iter())
      .filter(|v| !bound.contains(v))
      .map(|v| v.as_str().to_owned())
      .collect_vec();
    if !missing.is_empty() {
      return Err(RuleError::Missing(missing));
    }
    debug!(%pattern, %template, "prepared rewrite rule");
    Ok(Self { pattern, template })
  }

  /// Parse a rule written as `pattern -> template`. The arrow must stand
  /// alone as a token outside any parentheses, so `->` may also appear
  /// inside tokens such as `<x->`, and `a->b` is a single token rather
  /// than a rule.
  pub fn compile(text: &str) -> Result<Self, RuleError> {
    let &[at] = arrows(text).as_slice() else { return Err(RuleError::Syntax) };
    let (lhs, rhs) = (&text[..at], &text[at + 2..]);
    let pattern = (Pattern::compile(lhs))
      .map_err(|error| RuleError::Pattern { side: RuleSide::Pattern, error })?;
    let template = (Pattern::compile(rhs))
      .map_err(|error| RuleError::Pattern { side: RuleSide::Template, error })?;
    Self::new(pattern, template)
  }

  /// The left hand side
  pub fn pattern(&self) -> &Pattern { &self.pattern }

  /// The right hand side
  pub fn template(&self) -> &Pattern { &self.template }

  /// Rewrite the tree if its root matches the pattern, comparing literals
  /// by [display_eq]
  pub fn apply<T>(&self, tree: &T, literal_mapper: impl FnMut(&str) -> T::Value) -> Option<T>
  where
    T: BuildTree,
    T::Value: Clone + fmt::Display + PartialEq,
  {
    self.apply_with(tree, display_eq::<T::Value>, literal_mapper)
  }

  /// Rewrite the tree if its root matches the pattern, comparing literals
  /// with `eq`
  pub fn apply_with<T>(
    &self,
    tree: &T,
    eq: impl Fn(&T::Value, &str) -> bool,
    mut literal_mapper: impl FnMut(&str) -> T::Value,
  ) -> Option<T>
  where
    T: BuildTree,
    T::Value: Clone + PartialEq,
  {
    let result = self.pattern.match_with(tree, eq)?;
    self.build(result.bindings(), &mut literal_mapper)
  }

  /// Rewrite the first subtree in pre-order that matches the pattern,
  /// comparing literals by [display_eq]
  pub fn apply_first<T>(
    &self,
    tree: &T,
    literal_mapper: impl FnMut(&str) -> T::Value,
  ) -> Option<T>
  where
    T: BuildTree,
    T::Value: Clone + fmt::Display + PartialEq,
  {
    self.apply_first_with(tree, display_eq::<T::Value>, literal_mapper)
  }

  /// Rewrite the first subtree in pre-order that matches the pattern,
  /// comparing literals with `eq`
  pub fn apply_first_with<T>(
    &self,
    tree: &T,
    eq: impl Fn(&T::Value, &str) -> bool,
    mut literal_mapper: impl FnMut(&str) -> T::Value,
  ) -> Option<T>
  where
    T: BuildTree,
    T::Value: Clone + PartialEq,
  {
    update_first(tree, &mut |node| {
      let result = self.pattern.match_with(node, &eq)?;
      self.build(result.bindings(), &mut literal_mapper)
    })
  }

  fn build<T>(
    &self,
    bindings: &Bindings<'_, T>,
    literal_mapper: &mut impl FnMut(&str) -> T::Value,
  ) -> Option<T>
  where
    T: BuildTree,
    T::Value: Clone,
  {
    match instantiate(&self.template, bindings, literal_mapper) {
      Ok(tree) => Some(tree),
      Err(e) => {
        error!(rule = %self, "{e}");
        None
      },
    }
  }
}

/// Byte offsets of every `->` that is a whole token at nesting depth 0
fn arrows(text: &str) -> Vec<usize> {
  let mut found = Vec::new();
  let mut depth = 0usize;
  let mut start = None;
  for (pos, c) in text.char_indices().chain([(text.len(), ' ')]) {
    if is_token_char(c) {
      start.get_or_insert(pos);
      continue;
    }
    if let Some(s) = start.take() {
      if depth == 0 && &text[s..pos] == "->" {
        found.push(s)
      }
    }
    match c {
      '(' => depth += 1,
      ')' => depth = depth.saturating_sub(1),
      _ => (),
    }
  }
  found
}

impl fmt::Display for RewriteRule {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} -> {}", self.pattern, self.template)
  }
}

impl FromStr for RewriteRule {
  type Err = RuleError;
  fn from_str(s: &str) -> Result<Self, Self::Err> { Self::compile(s) }
}
