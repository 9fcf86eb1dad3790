use camp_types::ChainId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no contracts are configured for chain {0}")]
    UnknownChain(ChainId),

    #[error("contract {identifier:?} is not configured for chain {chain}")]
    UnknownContract { chain: ChainId, identifier: String },

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
