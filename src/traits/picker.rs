//! Account picking abstraction.
//!
//! When an exchange does not name an account, one is chosen among the
//! registered ones. The choice goes through this trait so tests can make
//! it deterministic.

/// Chooses one of `len` registered accounts.
pub trait AccountPicker: Send + Sync {
    /// Return an index in `0..len`. Never called with `len == 0`.
    fn pick(&self, len: usize) -> usize;
}
