//! Tree patterns with named wildcards
//!
//! A pattern is written in parenthesis notation, with variables in angle
//! brackets:
//!
//! ```text
//! add(<x>,0)
//! mul(1,<y>)
//! ```
//!
//! [compile] turns the text into a [Pattern], which matches input trees via
//! [Pattern::match_with] and produces [Bindings]. A second pattern can then
//! be used as a template with [instantiate] to build a new tree from those
//! bindings.
mod compile;
mod decl;
mod instantiate;
mod matcher;
mod state;

pub use compile::{compile, Pattern, PatternError};
pub use decl::Decl;
pub use instantiate::{instantiate, InstantiateError};
pub use matcher::{display_eq, LiteralMapper, ValueEq};
pub use state::{Bindings, MatchResult};
