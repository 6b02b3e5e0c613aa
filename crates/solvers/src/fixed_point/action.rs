/// Actions an observer can take during fixed-point iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the solver and return the current evaluation.
    StopEarly,
}
