pub mod deploy;
pub mod outputs;
pub mod plan;

use crate::StackArgs;
use colored::Colorize;
use stackflow_cloud::output::{
    FILE_SYSTEM_ID, INSTANCE_PROFILE_ARN, PASS_ROLE_POLICY_ARN, SECURITY_GROUP_ID,
};
use stackflow_cloud::{DEFAULT_STACK_NAME, DeployConfig, DeployResult, StackBackend, StackDeployer};
use stackflow_cloud_aws::{AwsStackProvider, STACK_TEMPLATE};
use stackflow_config::StackflowConfig;
use std::sync::Arc;

/// 操作対象のスタックと、それを操作するデプロイヤー
pub struct Target {
    pub stack_name: String,
    pub region: String,
    pub deployer: StackDeployer,
}

/// CLI フラグ > 環境変数 > 設定ファイル > 既定値 の順で解決する
pub fn resolve(args: &StackArgs, config: &StackflowConfig) -> (String, Option<String>) {
    let stack_name = args
        .stack_name
        .clone()
        .or_else(|| config.stack_name.clone())
        .unwrap_or_else(|| DEFAULT_STACK_NAME.to_string());
    let region = args.region.clone().or_else(|| config.region.clone());
    (stack_name, region)
}

/// 設定を読み込み、AWS に接続する
pub async fn connect(args: &StackArgs) -> anyhow::Result<Target> {
    let config = StackflowConfig::load()?;
    let (stack_name, region) = resolve(args, &config);

    let provider = AwsStackProvider::from_env(region).await?;
    let region = provider.region().to_string();

    let mut deploy_config = DeployConfig::default();
    if let Some(interval) = config.poll_interval() {
        deploy_config.poll_interval = interval;
    }

    let deployer = StackDeployer::new(
        StackBackend::from_provider(Arc::new(provider)),
        STACK_TEMPLATE,
        deploy_config,
    );

    Ok(Target {
        stack_name,
        region,
        deployer,
    })
}

pub fn print_target(target: &Target) {
    println!("スタック: {}", target.stack_name.cyan());
    println!("リージョン: {}", target.region.cyan());
}

pub fn print_result(result: &DeployResult, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    println!("{}", "出力:".bold());
    let rows = [
        (FILE_SYSTEM_ID, &result.file_system_id),
        (SECURITY_GROUP_ID, &result.security_group_id),
        (INSTANCE_PROFILE_ARN, &result.instance_profile_arn),
        (PASS_ROLE_POLICY_ARN, &result.pass_role_policy_arn),
    ];
    for (key, value) in rows {
        let value = if value.is_empty() {
            "(なし)".dimmed().to_string()
        } else {
            value.cyan().to_string()
        };
        println!("  {:<20} {}", key, value);
    }
    Ok(())
}
