/// Errors surfaced by [`Engine`](crate::Engine).
///
/// Everything short of these degrades gracefully: empty domains stay unassigned and
/// unresolved cells stay blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum SolverError {
    /// The puzzle has no clues to solve.
    #[display("puzzle has no clues")]
    NoClues,
    /// Every ensemble round finished without producing a solution.
    #[display("no solution found after {rounds} rounds")]
    Unsolved {
        /// Number of ensemble rounds that ran.
        rounds: usize,
    },
}
