use crate::error::{GrammarError, Result};

/// Runs `round` until it reports no change.
///
/// Every closure computed here only grows a set bounded by the number of
/// non-terminals, so at most `bound` rounds can change anything and one more
/// confirms the fixpoint. A closure still changing after that means the
/// grammar's invariants were broken upstream.
pub(crate) fn saturate(
    closure: &'static str,
    bound: usize,
    mut round: impl FnMut() -> bool,
) -> Result<()> {
    for iteration in 0..=bound {
        if !round() {
            log::trace!("{closure} closure stable after {iteration} changing rounds");
            return Ok(());
        }
    }

    Err(GrammarError::ClosureNonTermination { closure, bound })
}
