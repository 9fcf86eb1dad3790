//! Registry lookup: the interface the codec consumes plus an in-memory table.

use std::collections::HashMap;

use camp_types::{Address, ChainId};

use crate::contract::Contract;
use crate::error::RegistryError;
use crate::mainnet;

/// Chain-keyed contract lookup.
///
/// Implementations are read-only; the codec calls them from any thread.
pub trait ContractRegistry: Send + Sync {
    /// Resolve a logical name (`"payer"`, `"weth-token"`, ...) to its contract.
    fn resolve_identifier(
        &self,
        chain: ChainId,
        identifier: &str,
    ) -> Result<Contract, RegistryError>;

    /// Look up the contract deployed at `address`, if it is a known one.
    ///
    /// Fails only when the chain itself is unknown.
    fn resolve_address(
        &self,
        chain: ChainId,
        address: Address,
    ) -> Result<Option<Contract>, RegistryError>;
}

/// In-memory registry of contracts per chain.
#[derive(Clone, Debug)]
pub struct NetworkRegistry {
    networks: HashMap<ChainId, Vec<Contract>>,
}

impl NetworkRegistry {
    /// An empty registry; every lookup fails with [`RegistryError::UnknownChain`].
    pub fn new() -> Self {
        Self {
            networks: HashMap::new(),
        }
    }

    /// A registry holding the built-in mainnet deployment.
    pub fn mainnet() -> Self {
        let mut registry = Self::new();
        for contract in mainnet::contracts() {
            registry.register(ChainId::MAINNET, contract);
        }
        registry
    }

    /// Register a contract, replacing any existing one with the same identifier.
    pub fn register(&mut self, chain: ChainId, contract: Contract) {
        let contracts = self.networks.entry(chain).or_default();
        match contracts
            .iter_mut()
            .find(|c| c.identifier == contract.identifier)
        {
            Some(existing) => {
                tracing::debug!(
                    chain = %chain,
                    identifier = %contract.identifier,
                    address = %contract.address,
                    "replacing registered contract"
                );
                *existing = contract;
            }
            None => contracts.push(contract),
        }
    }

    /// Whether any contract is registered for `chain`.
    pub fn has_chain(&self, chain: ChainId) -> bool {
        self.networks.contains_key(&chain)
    }

    /// List the contracts registered for `chain`.
    pub fn contracts(&self, chain: ChainId) -> &[Contract] {
        self.networks.get(&chain).map(Vec::as_slice).unwrap_or(&[])
    }

    fn network(&self, chain: ChainId) -> Result<&[Contract], RegistryError> {
        self.networks
            .get(&chain)
            .map(Vec::as_slice)
            .ok_or(RegistryError::UnknownChain(chain))
    }
}

impl Default for NetworkRegistry {
    fn default() -> Self {
        Self::mainnet()
    }
}

impl ContractRegistry for NetworkRegistry {
    fn resolve_identifier(
        &self,
        chain: ChainId,
        identifier: &str,
    ) -> Result<Contract, RegistryError> {
        self.network(chain)?
            .iter()
            .find(|c| c.identifier == identifier)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownContract {
                chain,
                identifier: identifier.to_string(),
            })
    }

    fn resolve_address(
        &self,
        chain: ChainId,
        address: Address,
    ) -> Result<Option<Contract>, RegistryError> {
        Ok(self
            .network(chain)?
            .iter()
            .find(|c| c.address == address)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{PAYER, USDC_TOKEN, WETH_TOKEN};
    use alloy_primitives::address;

    #[test]
    fn mainnet_resolves_identifiers() {
        let registry = NetworkRegistry::mainnet();
        let weth = registry
            .resolve_identifier(ChainId::MAINNET, WETH_TOKEN)
            .unwrap();
        assert_eq!(
            weth.address,
            address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2")
        );
        assert_eq!(weth.token.as_deref(), Some("WETH"));
    }

    #[test]
    fn resolve_address_ignores_hex_case() {
        let registry = NetworkRegistry::mainnet();
        let mixed: Address = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48".parse().unwrap();
        let contract = registry
            .resolve_address(ChainId::MAINNET, mixed)
            .unwrap()
            .unwrap();
        assert_eq!(contract.identifier, USDC_TOKEN);
        assert_eq!(contract.token.as_deref(), Some("USDC"));
    }

    #[test]
    fn unknown_address_is_none() {
        let registry = NetworkRegistry::mainnet();
        let result = registry
            .resolve_address(ChainId::MAINNET, Address::repeat_byte(0x11))
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn unknown_chain_is_fatal() {
        let registry = NetworkRegistry::mainnet();
        assert!(matches!(
            registry.resolve_identifier(ChainId::new(999), PAYER),
            Err(RegistryError::UnknownChain(_))
        ));
        assert!(matches!(
            registry.resolve_address(ChainId::new(999), Address::ZERO),
            Err(RegistryError::UnknownChain(_))
        ));
    }

    #[test]
    fn unknown_identifier_is_fatal() {
        let registry = NetworkRegistry::mainnet();
        assert!(matches!(
            registry.resolve_identifier(ChainId::MAINNET, "dai-token"),
            Err(RegistryError::UnknownContract { .. })
        ));
    }

    #[test]
    fn register_replaces_same_identifier() {
        let mut registry = NetworkRegistry::new();
        let chain = ChainId::new(31337);
        registry.register(chain, Contract::new(PAYER, Address::repeat_byte(1)));
        registry.register(chain, Contract::new(PAYER, Address::repeat_byte(2)));
        assert_eq!(registry.contracts(chain).len(), 1);
        assert_eq!(
            registry.resolve_identifier(chain, PAYER).unwrap().address,
            Address::repeat_byte(2)
        );
    }
}
