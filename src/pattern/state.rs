use hashbrown::HashMap;
use intern_all::{i, Tok};

use super::compile::Pattern;
use super::instantiate::{instantiate, InstantiateError};
use crate::tree::BuildTree;

/// The subtrees captured by the variables of a pattern during one match.
/// Every entry borrows from the input tree; nothing is copied until the
/// bindings are used to instantiate a template.
#[derive(Debug)]
pub struct Bindings<'a, T> {
  vars: HashMap<Tok<String>, &'a T>,
}
impl<'a, T> Bindings<'a, T> {
  pub(super) fn new(vars: HashMap<Tok<String>, &'a T>) -> Self { Self { vars } }

  /// The subtree bound to the variable, if any. Unknown names are not
  /// interned.
  pub fn get(&self, name: &str) -> Option<&'a T> {
    self.vars.iter().find(|(k, _)| k.as_str() == name).map(|(_, v)| *v)
  }

  /// Same as [Bindings::get], for an already interned name
  pub fn get_tok(&self, name: &Tok<String>) -> Option<&'a T> { self.vars.get(name).copied() }

  /// Whether the variable is bound
  pub fn contains(&self, name: &str) -> bool { self.get(name).is_some() }

  /// Number of bound variables
  pub fn len(&self) -> usize { self.vars.len() }

  /// Whether no variable is bound; true for patterns without variables
  pub fn is_empty(&self) -> bool { self.vars.is_empty() }

  /// Iterate over the bindings in no particular order
  pub fn iter(&self) -> impl Iterator<Item = (&Tok<String>, &'a T)> + '_ {
    self.vars.iter().map(|(k, v)| (k, *v))
  }
}

impl<'a, 'b, T> FromIterator<(&'b str, &'a T)> for Bindings<'a, T> {
  fn from_iter<I: IntoIterator<Item = (&'b str, &'a T)>>(iter: I) -> Self {
    Self::new(iter.into_iter().map(|(k, v)| (i(k), v)).collect())
  }
}

/// A successful match: the root of the matched input and the bindings of
/// the pattern variables
#[derive(Debug)]
pub struct MatchResult<'a, T> {
  tree: &'a T,
  bindings: Bindings<'a, T>,
}
impl<'a, T> MatchResult<'a, T> {
  pub(super) fn new(tree: &'a T, bindings: Bindings<'a, T>) -> Self { Self { tree, bindings } }

  /// The input tree the pattern was matched against
  pub fn tree(&self) -> &'a T { self.tree }

  /// The captured subtrees
  pub fn bindings(&self) -> &Bindings<'a, T> { &self.bindings }

  /// Consume the result, keeping the captured subtrees
  pub fn into_bindings(self) -> Bindings<'a, T> { self.bindings }

  /// Build a new tree from the template using these bindings, see
  /// [instantiate]
  pub fn instantiate(
    &self,
    template: &Pattern,
    literal_mapper: impl FnMut(&str) -> T::Value,
  ) -> Result<T, InstantiateError>
  where
    T: BuildTree,
    T::Value: Clone,
  {
    instantiate(template, &self.bindings, literal_mapper)
  }
}
