//! Default network discovery

use crate::error::{CloudError, Result};
use crate::params::NetworkContext;
use crate::provider::{DescribeDefaultNetwork, DescribeSubnets};

/// Find the default network and its subnets.
///
/// A missing default network is reported as [`CloudError::NoDefaultNetwork`],
/// separately from lookup failures.
pub async fn discover_network(
    network: &dyn DescribeDefaultNetwork,
    subnets: &dyn DescribeSubnets,
) -> Result<NetworkContext> {
    let network_id = network
        .describe_default_network()
        .await
        .map_err(|source| CloudError::Network {
            operation: "DescribeVpcs",
            source,
        })?
        .ok_or(CloudError::NoDefaultNetwork)?;

    let subnet_ids = subnets
        .describe_subnets(&network_id)
        .await
        .map_err(|source| CloudError::Network {
            operation: "DescribeSubnets",
            source,
        })?;

    tracing::debug!(
        "Discovered network {} with {} subnets",
        network_id,
        subnet_ids.len()
    );

    Ok(NetworkContext {
        network_id,
        subnet_ids,
    })
}
