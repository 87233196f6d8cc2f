//! Network configuration
//!
//! Endpoint tables for the supported Algorand networks. The pipeline talks to
//! two services per network: an algod node (compilation, transaction params,
//! submission) and an indexer (account and application lookups).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported Algorand networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    /// Service endpoints for this network
    pub fn config(&self) -> &'static NetworkConfig {
        match self {
            Network::Mainnet => &MAINNET,
            Network::Testnet => &TESTNET,
        }
    }
}

impl Default for Network {
    fn default() -> Self {
        Network::Testnet
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Testnet => write!(f, "testnet"),
        }
    }
}

/// Base URLs for the services of one network
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub algod_url: &'static str,
    pub indexer_url: &'static str,
}

static MAINNET: NetworkConfig = NetworkConfig {
    algod_url: "https://node.algoexplorerapi.io",
    indexer_url: "https://algoindexer.algoexplorerapi.io",
};

static TESTNET: NetworkConfig = NetworkConfig {
    algod_url: "https://node.testnet.algoexplorerapi.io",
    indexer_url: "https://algoindexer.testnet.algoexplorerapi.io",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_testnet() {
        assert_eq!(Network::default(), Network::Testnet);
    }

    #[test]
    fn test_endpoints_differ_per_network() {
        let mainnet = Network::Mainnet.config();
        let testnet = Network::Testnet.config();
        assert_ne!(mainnet.algod_url, testnet.algod_url);
        assert!(testnet.algod_url.contains("testnet"));
        assert!(testnet.indexer_url.contains("testnet"));
    }
}
