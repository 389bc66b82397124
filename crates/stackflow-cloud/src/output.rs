//! Typed view of the stack outputs

use crate::state::StackOutput;
use serde::{Deserialize, Serialize};

pub const FILE_SYSTEM_ID: &str = "FileSystemId";
pub const SECURITY_GROUP_ID: &str = "SecurityGroupId";
pub const INSTANCE_PROFILE_ARN: &str = "InstanceProfileArn";
pub const PASS_ROLE_POLICY_ARN: &str = "PassRolePolicyArn";

/// Result of a successful deployment
///
/// Fields whose output key is missing stay empty. Output keys not listed
/// here are ignored so the template can grow new outputs freely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployResult {
    pub stack_name: String,
    pub file_system_id: String,
    pub security_group_id: String,
    pub instance_profile_arn: String,
    pub pass_role_policy_arn: String,
}

impl DeployResult {
    pub fn from_outputs(stack_name: impl Into<String>, outputs: &[StackOutput]) -> Self {
        let mut result = Self {
            stack_name: stack_name.into(),
            ..Default::default()
        };

        for output in outputs {
            let field = match output.key.as_str() {
                FILE_SYSTEM_ID => &mut result.file_system_id,
                SECURITY_GROUP_ID => &mut result.security_group_id,
                INSTANCE_PROFILE_ARN => &mut result.instance_profile_arn,
                PASS_ROLE_POLICY_ARN => &mut result.pass_role_policy_arn,
                other => {
                    tracing::trace!("Ignoring stack output {}", other);
                    continue;
                }
            };
            *field = output.value.clone();
        }

        result
    }
}
