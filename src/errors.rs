use thiserror::Error;

/// A study set that cannot support the drill. Surfaced to the user as a
/// configuration problem; no session can start from such a set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BankError {
    #[error("study set has {0} usable entries, at least 2 are required")]
    TooFewEntries(usize),

    #[error("study set has only one distinct term, false statements need a second")]
    NoOtherTerms,

    #[error("every definition in the study set is identical")]
    NoDefinitionVariety,
}

/// A session operation invoked in a phase that forbids it. This is an
/// adapter programming error, not a user-facing condition.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    #[error("no session is running")]
    NotRunning,

    #[error("the session has not finished")]
    NotFinished,
}

/// The score store could not be read or written. The session summary is not
/// lost when this surfaces; only the save step failed and may be retried.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("score store is not accessible: {0}")]
    Io(#[from] std::io::Error),

    #[error("score store row could not be processed: {0}")]
    Csv(#[from] csv::Error),
}
