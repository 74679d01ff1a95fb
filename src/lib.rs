#![warn(missing_docs)]
//! Tree patterns with named wildcards, matched against ordered trees and
//! used as templates for rewriting.
//!
//! ```
//! use treepat::pattern::compile;
//! use treepat::rule::RewriteRule;
//! use treepat::tree::TreeNode;
//!
//! let tree: TreeNode<String> = "add(mul(a,b),0)".parse().unwrap();
//! let pattern = compile("add(<x>,0)").unwrap();
//! let result = pattern.match_tree(&tree).unwrap();
//! assert_eq!(result.bindings().get("x").unwrap().to_string(), "mul(a,b)");
//!
//! let rule: RewriteRule = "add(<x>,0) -> <x>".parse().unwrap();
//! let simplified = rule.apply(&tree, str::to_string).unwrap();
//! assert_eq!(simplified.to_string(), "mul(a,b)");
//! ```
pub mod pattern;
pub mod rule;
pub mod tree;
