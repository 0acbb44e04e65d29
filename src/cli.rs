use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "worklist-combine")]
#[command(about = "Work Listシートを集約してCSVに出力するツール", long_about = None)]
pub struct Cli {
    /// 省略時は対話モードで combine を実行
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// フォルダ配下の.xlsxを集約してCSVを出力
    Combine {
        /// 集約するフォルダ（指定すると非対話モード、複数指定可）
        #[arg(short, long = "dir")]
        dirs: Vec<PathBuf>,

        /// CSVの出力先フォルダ（非対話モード、デフォルト: カレント）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 非対話モードでロック中/シートなしのファイルに遭遇したときの動作 (skip/abort)
        #[arg(long, default_value = "skip")]
        on_error: OnError,

        /// Customer列に書き込む顧客名（今回のみ設定を上書き）
        #[arg(long)]
        customer: Option<String>,
    },

    /// 設定を表示/編集
    Config {
        /// 顧客名を設定
        #[arg(long)]
        set_customer: Option<String>,

        /// ヘッダー直後に読み飛ばす行数を設定
        #[arg(long)]
        set_skip_rows: Option<usize>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },

    /// 1ファイルを読み込んで列と有効行数を表示
    Inspect {
        /// 対象の.xlsxファイル
        #[arg(required = true)]
        file: PathBuf,
    },
}

/// 非対話モードでの回復判断
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OnError {
    /// ロック中のファイルは飛ばす、シートなしは次へ
    #[default]
    Skip,
    /// そのフォルダの処理を中止
    Abort,
}

impl std::str::FromStr for OnError {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skip" | "s" => Ok(OnError::Skip),
            "abort" | "a" => Ok(OnError::Abort),
            _ => Err(format!("Unknown action: {}. Use skip or abort", s)),
        }
    }
}

impl std::fmt::Display for OnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OnError::Skip => write!(f, "skip"),
            OnError::Abort => write!(f, "abort"),
        }
    }
}
