/// Outcome of [`crate::Database::transaction`].
///
/// The error that caused a rollback is not carried here; read it back with
/// [`crate::Database::last_transaction_error`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum TxOutcome<T = ()> {
    /// The unit of work succeeded and `COMMIT` went through.
    Committed(T),
    /// The unit of work (or its commit) failed and the transaction was rolled back.
    RolledBack,
}

impl<T> TxOutcome<T> {
    #[must_use]
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }

    #[must_use]
    pub fn is_rolled_back(&self) -> bool {
        matches!(self, Self::RolledBack)
    }

    /// Value returned by the unit of work, if it was committed.
    pub fn into_committed(self) -> Option<T> {
        match self {
            Self::Committed(value) => Some(value),
            Self::RolledBack => None,
        }
    }
}
