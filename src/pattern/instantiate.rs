use thiserror::Error;

use super::compile::Pattern;
use super::decl::Decl;
use super::matcher::LiteralMapper;
use super::state::Bindings;
use crate::tree::{copy_tree, BuildTree, Tree, TreeNode};

/// Reasons a template cannot be instantiated
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InstantiateError {
  /// The template references a variable the bindings don't contain
  #[error("template variable <{0}> is not bound")]
  Unresolved(String),
}

/// Build a new tree from a template pattern.
///
/// Literals become nodes whose value is produced by `literal_mapper`, with
/// the instantiated children of the literal attached in order. Variables
/// are replaced by a deep copy of the subtree they are bound to, so the
/// result never aliases the tree the bindings were captured from, and a
/// variable used twice yields two independent copies.
pub fn instantiate<S, T>(
  template: &Pattern,
  bindings: &Bindings<'_, S>,
  mut literal_mapper: impl FnMut(&str) -> T::Value,
) -> Result<T, InstantiateError>
where
  S: Tree,
  S::Value: Clone,
  T: BuildTree<Value = S::Value>,
{
  instantiate_rec(template.decls(), bindings, &mut literal_mapper)
}

fn instantiate_rec<S, T>(
  template: &TreeNode<Decl>,
  bindings: &Bindings<'_, S>,
  mapper: &mut impl LiteralMapper<T::Value>,
) -> Result<T, InstantiateError>
where
  S: Tree,
  S::Value: Clone,
  T: BuildTree<Value = S::Value>,
{
  match template.value() {
    Decl::Variable(name) => match bindings.get_tok(name) {
      Some(bound) => Ok(copy_tree(bound)),
      None => Err(InstantiateError::Unresolved(name.as_str().to_owned())),
    },
    Decl::Literal(text) => {
      let value = mapper(text.as_str());
      let children = (template.children())
        .map(|c| instantiate_rec(c, bindings, mapper))
        .collect::<Result<Vec<_>, _>>()?;
      Ok(T::from_parts(value, children))
    },
  }
}
