//! 対話インターフェース
//!
//! セッションが必要とするユーザー操作（フォルダ選択・継続確認・
//! 再試行/中止の判断・出力先選択・メッセージ表示）をまとめたトレイト。
//! ターミナル版（dialoguer）とスクリプト版（テスト・非対話実行用）がある。

mod scripted;
mod terminal;

pub use scripted::ScriptedPrompter;
pub use terminal::TerminalPrompter;

use crate::error::Result;
use std::path::PathBuf;

/// 再試行/中止の判断を求める状況
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryPrompt {
    /// 他のプログラムがファイルを開いている。OK で同じファイルを再試行
    FileLocked { file_name: String },
    /// 対象シートが無い。OK で次のファイルへ進む
    SheetNotFound { file_name: String, sheet: String },
}

/// 再試行/中止の判断結果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecoveryChoice {
    /// 同じファイルを読み直す
    Retry,
    /// このファイルを飛ばして次へ
    Skip,
    /// このフォルダの処理を中止
    #[default]
    Abort,
}

impl RecoveryPrompt {
    /// OK を選んだときの動作
    ///
    /// シートなしは読み直しても結果が変わらないので「次へ」になる。
    pub fn accept_choice(&self) -> RecoveryChoice {
        match self {
            RecoveryPrompt::FileLocked { .. } => RecoveryChoice::Retry,
            RecoveryPrompt::SheetNotFound { .. } => RecoveryChoice::Skip,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            RecoveryPrompt::FileLocked { .. } => "ファイル使用中",
            RecoveryPrompt::SheetNotFound { .. } => "シートなし",
        }
    }

    pub fn message(&self) -> String {
        match self {
            RecoveryPrompt::FileLocked { file_name } => format!(
                "'{}' は他のプログラムで開かれている可能性があります。\n閉じてからOKを選ぶと処理を再開します（キャンセルでこのフォルダの処理を中止）",
                file_name
            ),
            RecoveryPrompt::SheetNotFound { file_name, sheet } => format!(
                "'{}' に '{}' シートがありません。\nシート名を確認してください（OKで次のファイルへ、キャンセルでこのフォルダの処理を中止）",
                file_name, sheet
            ),
        }
    }
}

pub trait Prompter {
    /// 集約するルートフォルダを選択（未選択は None）
    fn select_root_directory(&mut self) -> Result<Option<PathBuf>>;

    /// 別のフォルダも処理するか
    fn confirm_continue(&mut self) -> Result<bool>;

    /// ロック中・シートなしのファイルをどう扱うか
    fn confirm_recovery(&mut self, prompt: &RecoveryPrompt) -> Result<RecoveryChoice>;

    /// CSVの出力先フォルダを選択（未選択は None）
    fn select_output_directory(&mut self) -> Result<Option<PathBuf>>;

    /// お知らせ表示
    fn notify(&mut self, message: &str);
}
