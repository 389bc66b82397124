use crate::StackArgs;
use colored::Colorize;
use stackflow_cloud::LifecycleAction;

pub async fn handle(args: &StackArgs) -> anyhow::Result<()> {
    let target = super::connect(args).await?;
    super::print_target(&target);

    let action = target.deployer.plan(&target.stack_name).await?;
    let label = match action {
        LifecycleAction::Create => "新規作成 (CreateStack)".green(),
        LifecycleAction::Update => "更新 (UpdateStack)".cyan(),
    };
    println!("実行内容: {}", label.bold());
    Ok(())
}
