//! Layered annotation walkthrough: a data-access call fails, business logic
//! adds its context, the caller checks the root cause and prints the chain.

use std::io::{self, Write};

use crate::failure::chain::Failure;
use crate::failure::sentinel::{Sentinel, NO_ROWS};
use crate::{with_message, wrap};

/// How the top-level caller recognises the root cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Resolve the root cause and compare it directly.
    #[default]
    Cause,
    /// Walk the source chain comparing every link.
    ChainWalk,
}

impl Strategy {
    pub fn matches(self, failure: &Failure, target: &'static Sentinel) -> bool {
        match self {
            Strategy::Cause => failure.cause_is(target),
            Strategy::ChainWalk => failure.is(target),
        }
    }
}

/// Simulated data-access lookup that finds nothing.
pub fn dao() -> Failure {
    wrap!(&NO_ROWS, "dao failed")
}

/// Simulated business logic: passes the lookup failure up with its own context.
pub fn logic() -> Failure {
    annotate(dao())
}

/// Add the business-logic context to a failure.
pub fn annotate(failure: Failure) -> Failure {
    with_message!(failure, "logic failed")
}

/// Print the full chain to `out` if `failure` is rooted at `target`.
///
/// Returns whether it matched; nothing is written otherwise.
pub fn inspect<W: Write>(failure: &Failure, target: &'static Sentinel, out: &mut W) -> io::Result<bool> {
    inspect_with(Strategy::Cause, failure, target, out)
}

pub fn inspect_with<W: Write>(
    strategy: Strategy,
    failure: &Failure,
    target: &'static Sentinel,
    out: &mut W,
) -> io::Result<bool> {
    if !strategy.matches(failure, target) {
        return Ok(false);
    }
    let rendered = format!("{failure:#}\n");
    out.write_all(rendered.as_bytes())?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    static CONFLICT: Sentinel = Sentinel::new("conflict");

    #[test]
    fn test_dao_roots_at_no_rows() {
        let failure = dao();
        assert!(failure.cause_is(&NO_ROWS));
        assert_eq!(failure.annotations().len(), 1);
        assert_eq!(failure.annotations()[0].message(), "dao failed");
        assert!(failure.annotations()[0].frame().owner().ends_with("layers::dao"));
    }

    #[test]
    fn test_logic_appends_its_frame() {
        let failure = logic();
        let messages: Vec<&str> = failure.annotations().iter().map(|a| a.message()).collect();
        assert_eq!(messages, ["dao failed", "logic failed"]);
        assert!(failure.annotations()[1].frame().owner().ends_with("layers::annotate"));
    }

    #[test]
    fn test_strategies_agree_at_every_depth() {
        let mut failure = dao();
        for _ in 0..10 {
            assert_eq!(
                Strategy::Cause.matches(&failure, &NO_ROWS),
                Strategy::ChainWalk.matches(&failure, &NO_ROWS)
            );
            assert_eq!(
                Strategy::Cause.matches(&failure, &CONFLICT),
                Strategy::ChainWalk.matches(&failure, &CONFLICT)
            );
            failure = annotate(failure);
        }
        assert!(Strategy::ChainWalk.matches(&failure, &NO_ROWS));
    }

    #[test]
    fn test_inspect_prints_chain_in_order() {
        let mut out = Vec::new();
        let matched = inspect(&logic(), &NO_ROWS, &mut out).unwrap();
        assert!(matched);

        let text = String::from_utf8(out).unwrap();
        let root = text.find("sql: no rows in result set").unwrap();
        let dao = text.find("dao failed").unwrap();
        let logic = text.find("logic failed").unwrap();
        assert!(root < dao && dao < logic);
        assert!(text.contains("layers::dao"));
        assert!(text.contains("src/failure/layers.rs:"));
    }

    #[test]
    fn test_inspect_unrelated_root_is_silent() {
        let failure = annotate(wrap!(&CONFLICT, "dao failed"));
        for strategy in [Strategy::Cause, Strategy::ChainWalk] {
            let mut out = Vec::new();
            assert!(!inspect_with(strategy, &failure, &NO_ROWS, &mut out).unwrap());
            assert!(out.is_empty());
        }
    }
}
