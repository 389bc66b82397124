mod commands;

use clap::{Args, Parser, Subcommand};
use stackflow_config::{REGION_ENV, STACK_NAME_ENV};

#[derive(Parser)]
#[command(name = "stack")]
#[command(about = "共有ストレージスタックを作成・更新する", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// スタックの指定 (全コマンド共通)
#[derive(Args, Debug, Clone, Default)]
pub struct StackArgs {
    /// スタック名 (省略時は設定ファイル、なければ "stackflow")
    #[arg(long, env = STACK_NAME_ENV)]
    pub stack_name: Option<String>,
    /// AWS リージョン (省略時は設定ファイル、なければ AWS の既定)
    #[arg(long, env = REGION_ENV)]
    pub region: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// スタックを作成または更新し、完了まで待機する
    Deploy {
        #[command(flatten)]
        stack: StackArgs,
        /// この秒数を超えたら待機を中断する
        #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
        timeout: Option<u64>,
    },
    /// 作成と更新のどちらになるかを表示 (変更はしない)
    Plan {
        #[command(flatten)]
        stack: StackArgs,
    },
    /// 既存スタックの出力値を表示
    Outputs {
        #[command(flatten)]
        stack: StackArgs,
        /// 結果を JSON で出力
        #[arg(long)]
        json: bool,
    },
    /// バージョン情報を表示
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 進捗は stdout、ログは stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    match cli.command {
        Commands::Version => {
            println!("stackflow {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Deploy { stack, timeout } => commands::deploy::handle(&stack, timeout).await,
        Commands::Plan { stack } => commands::plan::handle(&stack).await,
        Commands::Outputs { stack, json } => commands::outputs::handle(&stack, json).await,
    }
}
