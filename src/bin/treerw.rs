use std::process::ExitCode;

use clap::{Parser, Subcommand};
use itertools::Itertools;
use rayon::prelude::*;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use treepat::pattern::{compile, Pattern};
use treepat::rule::RewriteRule;
use treepat::tree::{ParseError, TreeNode};

/// Match tree patterns and apply rewrite rules to trees written in
/// parenthesis notation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
  /// Log compiled patterns and matching decisions. RUST_LOG overrides this.
  #[arg(short, long)]
  pub verbose: bool,
  #[command(subcommand)]
  pub command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Match every tree against a pattern and print the bindings
  Match {
    /// Pattern such as `add(<x>,0)`
    pattern: String,
    /// Trees such as `add(mul(a,b),0)`
    #[arg(required = true)]
    trees: Vec<String>,
  },
  /// Rewrite every tree with a rule
  Rewrite {
    /// Rule such as `add(<x>,0) -> <x>`
    rule: String,
    /// Trees such as `add(mul(a,b),0)`
    #[arg(required = true)]
    trees: Vec<String>,
    /// Rewrite the first matching subtree instead of only the root
    #[arg(long)]
    anywhere: bool,
  },
}

fn init_tracing(verbose: bool) {
  let fallback = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
  tracing_subscriber::registry()
    .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
    .with(filter)
    .init();
}

fn parse_trees(texts: &[String]) -> Result<Vec<TreeNode<String>>, String> {
  (texts.iter())
    .map(|t| t.parse().map_err(|e: ParseError| format!("invalid tree {t:?}: {e}")))
    .collect()
}

fn describe_match(pattern: &Pattern, tree: &TreeNode<String>) -> String {
  let Some(result) = pattern.match_tree(tree) else { return format!("{tree}: no match") };
  if result.bindings().is_empty() {
    return format!("{tree}: match");
  }
  let bindings = (pattern.variables().iter())
    .filter_map(|v| Some(format!("{} = {}", v.as_str(), result.bindings().get_tok(v)?)))
    .join(", ");
  format!("{tree}: {bindings}")
}

fn run(command: Command) -> Result<Vec<String>, String> {
  match command {
    Command::Match { pattern, trees } => {
      let pattern = compile(&pattern).map_err(|e| e.to_string())?;
      let trees = parse_trees(&trees)?;
      debug!(%pattern, trees = trees.len(), "matching");
      Ok(trees.par_iter().map(|t| describe_match(&pattern, t)).collect())
    },
    Command::Rewrite { rule, trees, anywhere } => {
      let rule = RewriteRule::compile(&rule).map_err(|e| e.to_string())?;
      let trees = parse_trees(&trees)?;
      debug!(%rule, trees = trees.len(), anywhere, "rewriting");
      let rewrite = |t: &TreeNode<String>| match anywhere {
        true => rule.apply_first(t, str::to_string),
        false => rule.apply(t, str::to_string),
      };
      Ok(
        (trees.par_iter())
          .map(|t| match rewrite(t) {
            Some(new) => new.to_string(),
            None => format!("{t} (unchanged)"),
          })
          .collect(),
      )
    },
  }
}

fn main() -> ExitCode {
  let args = Args::parse();
  init_tracing(args.verbose);
  match run(args.command) {
    Ok(lines) => {
      lines.iter().for_each(|l| println!("{l}"));
      ExitCode::SUCCESS
    },
    Err(e) => {
      eprintln!("{e}");
      ExitCode::from(2)
    },
  }
}
