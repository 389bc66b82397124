//! Stack template shipped with the binary

/// CloudFormation template for the shared StackFlow infrastructure.
///
/// Declares `VpcId` and `Subnet1`..`Subnet6` as parameters and publishes the
/// four outputs read by [`stackflow_cloud::DeployResult`].
pub const STACK_TEMPLATE: &str = include_str!("../templates/stack.yaml");
