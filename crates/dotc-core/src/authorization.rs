//! Taker authorization gatekeepers.
//!
//! An offer may name authorization contracts; a taker is admitted if at
//! least one of them vouches for it. Contracts are looked up by address
//! in an [`AuthorizationRegistry`]. An address with nothing registered
//! never authorizes anyone.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use dotc_types::Address;

/// External "is this taker allowed" check.
pub trait TakerAuthorization: Send + Sync {
    fn is_authorized(&self, taker: Address) -> bool;
}

/// Authorizes a fixed set of takers.
#[derive(Debug, Clone, Default)]
pub struct AllowListAuthorization {
    allowed: HashSet<Address>,
}

impl AllowListAuthorization {
    pub fn new(allowed: impl IntoIterator<Item = Address>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }
}

impl TakerAuthorization for AllowListAuthorization {
    fn is_authorized(&self, taker: Address) -> bool {
        self.allowed.contains(&taker)
    }
}

/// Answers the same for every taker.
#[cfg(any(test, feature = "test-helpers"))]
#[derive(Debug, Clone, Copy)]
pub struct StaticAuthorization(pub bool);

#[cfg(any(test, feature = "test-helpers"))]
impl TakerAuthorization for StaticAuthorization {
    fn is_authorized(&self, _taker: Address) -> bool {
        self.0
    }
}

/// Authorization contracts indexed by address.
#[derive(Default, Clone)]
pub struct AuthorizationRegistry {
    contracts: HashMap<Address, Arc<dyn TakerAuthorization>>,
}

impl AuthorizationRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, address: Address, contract: Arc<dyn TakerAuthorization>) {
        self.contracts.insert(address, contract);
    }

    /// Does the contract at `contract` authorize `taker`?
    #[must_use]
    pub fn is_authorized(&self, contract: Address, taker: Address) -> bool {
        self.contracts
            .get(&contract)
            .is_some_and(|c| c.is_authorized(taker))
    }

    /// Does at least one of `contracts` authorize `taker`?
    #[must_use]
    pub fn any_authorizes(&self, contracts: &[Address], taker: Address) -> bool {
        contracts.iter().any(|c| self.is_authorized(*c, taker))
    }
}

impl std::fmt::Debug for AuthorizationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationRegistry")
            .field("contracts", &self.contracts.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_contract_never_authorizes() {
        let registry = AuthorizationRegistry::new();
        assert!(!registry.is_authorized(Address::from_low_u64(1), Address::from_low_u64(2)));
    }

    #[test]
    fn one_yes_is_enough() {
        let mut registry = AuthorizationRegistry::new();
        let deny = Address::from_low_u64(1);
        let allow = Address::from_low_u64(2);
        registry.register(deny, Arc::new(StaticAuthorization(false)));
        registry.register(allow, Arc::new(StaticAuthorization(true)));

        let taker = Address::from_low_u64(9);
        assert!(!registry.any_authorizes(&[deny], taker));
        assert!(registry.any_authorizes(&[deny, allow], taker));
        assert!(!registry.any_authorizes(&[], taker));
    }

    #[test]
    fn allow_list_contract() {
        let alice = Address::from_low_u64(0xa);
        let contract = AllowListAuthorization::new([alice]);
        assert!(contract.is_authorized(alice));
        assert!(!contract.is_authorized(Address::from_low_u64(0xb)));
    }
}
