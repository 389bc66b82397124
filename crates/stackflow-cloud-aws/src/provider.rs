//! CloudFormation / EC2 backend

use crate::convert::{api_error, stack_event, stack_state};
use crate::error::{AwsError, Result};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_cloudformation::types::{Capability, Parameter};
use aws_sdk_ec2::types::Filter;
use stackflow_cloud::{
    ApiResult, CreateStack, DescribeDefaultNetwork, DescribeStack, DescribeSubnets,
    ListStackEvents, StackCapability, StackEvent, StackRequest, StackState, UpdateStack,
};

/// AWS provider backed by CloudFormation and EC2
pub struct AwsStackProvider {
    cloudformation: aws_sdk_cloudformation::Client,
    ec2: aws_sdk_ec2::Client,
    region: String,
}

impl AwsStackProvider {
    /// Load credentials and region from the standard AWS sources.
    ///
    /// `region` overrides whatever the environment or profile selects.
    pub async fn from_env(region: Option<String>) -> Result<Self> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        let config = loader.load().await;

        if config.region().is_none() {
            return Err(AwsError::MissingRegion);
        }
        Ok(Self::new(&config))
    }

    pub fn new(config: &SdkConfig) -> Self {
        let region = config
            .region()
            .map(|r| r.to_string())
            .unwrap_or_default();
        tracing::debug!("Using AWS region {}", region);

        Self {
            cloudformation: aws_sdk_cloudformation::Client::new(config),
            ec2: aws_sdk_ec2::Client::new(config),
            region,
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

fn parameters(request: &StackRequest<'_>) -> Vec<Parameter> {
    request
        .parameters
        .iter()
        .map(|(key, value)| {
            Parameter::builder()
                .parameter_key(key)
                .parameter_value(value)
                .build()
        })
        .collect()
}

fn capabilities(request: &StackRequest<'_>) -> Vec<Capability> {
    request
        .capabilities()
        .iter()
        .map(|capability| match capability {
            StackCapability::NamedIam => Capability::CapabilityNamedIam,
        })
        .collect()
}

#[async_trait]
impl CreateStack for AwsStackProvider {
    async fn create_stack(&self, request: StackRequest<'_>) -> ApiResult<()> {
        tracing::debug!("CreateStack {}", request.name);
        self.cloudformation
            .create_stack()
            .stack_name(request.name)
            .template_body(request.template)
            .set_parameters(Some(parameters(&request)))
            .set_capabilities(Some(capabilities(&request)))
            .send()
            .await
            .map_err(api_error)?;
        Ok(())
    }
}

#[async_trait]
impl UpdateStack for AwsStackProvider {
    async fn update_stack(&self, request: StackRequest<'_>) -> ApiResult<()> {
        tracing::debug!("UpdateStack {}", request.name);
        self.cloudformation
            .update_stack()
            .stack_name(request.name)
            .template_body(request.template)
            .set_parameters(Some(parameters(&request)))
            .set_capabilities(Some(capabilities(&request)))
            .send()
            .await
            .map_err(api_error)?;
        Ok(())
    }
}

#[async_trait]
impl DescribeStack for AwsStackProvider {
    async fn describe_stack(&self, name: &str) -> ApiResult<Vec<StackState>> {
        let output = self
            .cloudformation
            .describe_stacks()
            .stack_name(name)
            .send()
            .await
            .map_err(api_error)?;

        Ok(output.stacks().iter().map(stack_state).collect())
    }
}

#[async_trait]
impl ListStackEvents for AwsStackProvider {
    /// Only the first page is read: it holds the newest events, which are
    /// the only ones a running deployment can still emit.
    async fn list_stack_events(&self, name: &str) -> ApiResult<Vec<StackEvent>> {
        let output = self
            .cloudformation
            .describe_stack_events()
            .stack_name(name)
            .send()
            .await
            .map_err(api_error)?;

        Ok(output.stack_events().iter().map(stack_event).collect())
    }
}

#[async_trait]
impl DescribeDefaultNetwork for AwsStackProvider {
    async fn describe_default_network(&self) -> ApiResult<Option<String>> {
        let output = self
            .ec2
            .describe_vpcs()
            .filters(Filter::builder().name("isDefault").values("true").build())
            .send()
            .await
            .map_err(api_error)?;

        Ok(output
            .vpcs()
            .iter()
            .find_map(|vpc| vpc.vpc_id())
            .map(str::to_string))
    }
}

#[async_trait]
impl DescribeSubnets for AwsStackProvider {
    async fn describe_subnets(&self, network_id: &str) -> ApiResult<Vec<String>> {
        let output = self
            .ec2
            .describe_subnets()
            .filters(Filter::builder().name("vpc-id").values(network_id).build())
            .send()
            .await
            .map_err(api_error)?;

        Ok(output
            .subnets()
            .iter()
            .filter_map(|subnet| subnet.subnet_id())
            .map(str::to_string)
            .collect())
    }
}
