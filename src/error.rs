use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    /// 他のプロセス（Excel等）がファイルを開いている
    #[error("ファイルが他のプログラムで開かれています: {}", .0.display())]
    FileLocked(PathBuf),

    #[error("シート '{sheet}' が見つかりません: {}", file.display())]
    SheetNotFound { file: PathBuf, sheet: String },

    #[error("ファイルを読み込めません: {}: {reason}", file.display())]
    UnreadableFile { file: PathBuf, reason: String },

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("CSV出力エラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] worklist_common::Error),
}

impl EtlError {
    /// ユーザーの判断（再試行/中止）で回復できるエラーか
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EtlError::FileLocked(_) | EtlError::SheetNotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
