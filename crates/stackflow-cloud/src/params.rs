//! Stack parameters derived from the discovered network

use serde::{Deserialize, Serialize};

/// Number of subnet slots the stack template declares
pub const SUBNET_SLOTS: usize = 6;

/// Name of the network id parameter
pub const NETWORK_PARAMETER: &str = "VpcId";

/// Network context discovered once per deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkContext {
    pub network_id: String,
    pub subnet_ids: Vec<String>,
}

/// Ordered template parameters
///
/// Always holds the network parameter followed by `Subnet1`..`Subnet6`.
/// The template requires every slot to be present, so unused slots carry an
/// empty string instead of being left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSet {
    entries: Vec<(String, String)>,
}

impl ParameterSet {
    /// Bind the network id and subnets to the fixed parameter schema.
    ///
    /// Subnet order is kept as given. Subnets past the sixth are dropped.
    pub fn build(network_id: &str, subnet_ids: &[String]) -> Self {
        if subnet_ids.len() > SUBNET_SLOTS {
            tracing::warn!(
                "Found {} subnets, only the first {} are passed to the stack",
                subnet_ids.len(),
                SUBNET_SLOTS
            );
        }

        let mut entries = Vec::with_capacity(SUBNET_SLOTS + 1);
        entries.push((NETWORK_PARAMETER.to_string(), network_id.to_string()));
        for slot in 1..=SUBNET_SLOTS {
            let value = subnet_ids.get(slot - 1).cloned().unwrap_or_default();
            entries.push((format!("Subnet{}", slot), value));
        }

        Self { entries }
    }

    pub fn from_network(network: &NetworkContext) -> Self {
        Self::build(&network.network_id, &network.subnet_ids)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
