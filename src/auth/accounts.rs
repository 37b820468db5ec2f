//! In-memory credential registry.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

/// Key an account is registered under.
///
/// Named accounts sort before numbered slots; slots sort numerically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AccountKey {
    Name(String),
    Slot(usize),
}

impl fmt::Display for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountKey::Name(name) => write!(f, "{}", name),
            AccountKey::Slot(slot) => write!(f, "#{}", slot),
        }
    }
}

impl From<usize> for AccountKey {
    fn from(slot: usize) -> Self {
        AccountKey::Slot(slot)
    }
}

impl From<&str> for AccountKey {
    fn from(name: &str) -> Self {
        AccountKey::Name(name.to_string())
    }
}

impl From<String> for AccountKey {
    fn from(name: String) -> Self {
        AccountKey::Name(name)
    }
}

impl Default for AccountKey {
    fn default() -> Self {
        AccountKey::Slot(0)
    }
}

/// A registered access token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub token: String,
    /// Paid-tier accounts are sent with the paid model.
    pub paid: bool,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"***")
            .field("paid", &self.paid)
            .finish()
    }
}

/// Mapping of account keys to credentials.
///
/// Tokens are stored as given; they are validated on every use, not on
/// registration.
#[derive(Debug, Clone, Default)]
pub struct AccountStore {
    accounts: BTreeMap<AccountKey, Credential>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `token` and return the key it was stored under.
    ///
    /// With a name, any earlier account of that name is replaced. Without
    /// one, the account takes the slot after the highest slot in use
    /// (slot 0 for the first).
    pub fn add_account(
        &mut self,
        token: impl Into<String>,
        name: Option<String>,
        paid: bool,
    ) -> AccountKey {
        let key = match name {
            Some(name) => AccountKey::Name(name),
            None => AccountKey::Slot(self.next_slot()),
        };
        debug!(account = %key, paid, "Registered account");
        self.accounts.insert(
            key.clone(),
            Credential {
                token: token.into(),
                paid,
            },
        );
        key
    }

    pub fn account(&self, key: &AccountKey) -> Option<&Credential> {
        self.accounts.get(key)
    }

    /// Accounts in key order.
    pub fn accounts(&self) -> impl Iterator<Item = (&AccountKey, &Credential)> {
        self.accounts.iter()
    }

    /// The `index`-th key in key order.
    pub fn key_at(&self, index: usize) -> Option<&AccountKey> {
        self.accounts.keys().nth(index)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn next_slot(&self) -> usize {
        // Slots sort after names, so the last slot key is the highest.
        match self.accounts.keys().next_back() {
            Some(AccountKey::Slot(slot)) => slot + 1,
            _ => 0,
        }
    }
}
