use crate::StackArgs;
use colored::Colorize;
use stackflow_cloud::{CancellationToken, DeploymentRequest, ProgressLine};
use std::time::Duration;
use tokio::sync::mpsc;

pub async fn handle(args: &StackArgs, timeout: Option<u64>) -> anyhow::Result<()> {
    let target = super::connect(args).await?;

    println!("{}", "デプロイを開始します...".blue().bold());
    super::print_target(&target);
    println!();

    let cancel = CancellationToken::new();
    let watcher = tokio::spawn(watch_for_cancel(cancel.clone(), timeout));

    let (tx, rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(print_progress(rx));

    let request = DeploymentRequest::new(Some(target.stack_name.clone())).with_sink(tx);
    let result = target.deployer.deploy(&request, &cancel).await;

    // 送信側を閉じて残りの進捗を出し切る
    drop(request);
    let _ = printer.await;
    watcher.abort();

    match result {
        Ok(result) => {
            println!();
            println!("{}", "✓ デプロイが完了しました".green().bold());
            super::print_result(&result, false)
        }
        Err(e) if e.is_cancelled() => {
            println!();
            println!("{}", "デプロイの待機を中断しました".yellow());
            println!(
                "{}",
                "スタック側の処理は継続している可能性があります".yellow()
            );
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Ctrl-C かタイムアウトのどちらか早い方でキャンセルする
async fn watch_for_cancel(cancel: CancellationToken, timeout: Option<u64>) {
    let deadline = async {
        match timeout {
            Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
            None => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::warn!("Failed to listen for Ctrl-C: {}", e);
                return;
            }
            eprintln!("{}", "中断を受け付けました".yellow());
        }
        _ = deadline => {
            eprintln!("{}", "タイムアウトしました".yellow());
        }
    }
    cancel.cancel();
}

async fn print_progress(mut rx: mpsc::UnboundedReceiver<ProgressLine>) {
    while let Some(line) = rx.recv().await {
        println!("{}", colorize(&line));
    }
}

fn colorize(line: &ProgressLine) -> String {
    let text = line.to_string();
    match line {
        ProgressLine::Warning(_) => text.yellow().to_string(),
        ProgressLine::Event(event) => {
            let status = event.resource_status.as_str();
            if status.contains("FAILED") || status.contains("ROLLBACK") {
                text.red().to_string()
            } else if status.ends_with("_COMPLETE") {
                text.green().to_string()
            } else {
                text
            }
        }
    }
}
