use crate::StackArgs;

pub async fn handle(args: &StackArgs, json: bool) -> anyhow::Result<()> {
    let target = super::connect(args).await?;
    if !json {
        super::print_target(&target);
    }

    let result = target.deployer.collect(&target.stack_name).await?;
    super::print_result(&result, json)
}
