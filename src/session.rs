//! 対話セッション
//!
//! フォルダ選択 → 集約 → 継続確認 を繰り返し、最後に全データを
//! 1つのCSVに書き出す。
//!
//! ```text
//! AwaitingDirectory ─▶ Processing ─▶ AwaitingContinue ─┬─▶ AwaitingDirectory
//!        │                                 ▲           └─▶ Exporting ─▶ Done
//!        └──────────(未選択)───────────────┘
//! ```

use crate::error::{EtlError, Result};
use crate::export;
use crate::prompt::Prompter;
use crate::reader::SheetReader;
use crate::scanner::{Aggregator, ScanOutcome};
use chrono::{Local, NaiveDate};
use std::path::PathBuf;
use worklist_common::Dataset;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    AwaitingDirectory,
    Processing(PathBuf),
    AwaitingContinue,
    Exporting,
    Done,
}

/// セッションの最終結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// CSVを書き出した
    Exported { path: PathBuf, rows: usize },
    /// 出力するデータが無かった
    NothingToExport,
    /// 出力先が選択されなかった
    ExportDeclined,
    /// 書き出しに失敗した（再試行はしない）
    ExportFailed(String),
}

pub struct Session<'a, R: SheetReader + ?Sized> {
    aggregator: Aggregator<'a, R>,
    prompter: &'a mut dyn Prompter,
    combined: Dataset,
    export_date: Option<NaiveDate>,
}

impl<'a, R: SheetReader + ?Sized> Session<'a, R> {
    pub fn new(aggregator: Aggregator<'a, R>, prompter: &'a mut dyn Prompter) -> Self {
        Self {
            aggregator,
            prompter,
            combined: Dataset::new(),
            export_date: None,
        }
    }

    /// 出力ファイル名に使う日付を固定（省略時は実行日）
    pub fn with_export_date(mut self, date: NaiveDate) -> Self {
        self.export_date = Some(date);
        self
    }

    /// これまでに集約したデータ
    pub fn combined(&self) -> &Dataset {
        &self.combined
    }

    pub fn run(&mut self) -> Result<SessionOutcome> {
        let mut state = SessionState::AwaitingDirectory;
        let mut outcome = SessionOutcome::NothingToExport;

        while state != SessionState::Done {
            state = match state {
                SessionState::AwaitingDirectory => self.await_directory()?,
                SessionState::Processing(root) => self.process(root)?,
                SessionState::AwaitingContinue => self.await_continue()?,
                SessionState::Exporting => {
                    outcome = self.export()?;
                    SessionState::Done
                }
                SessionState::Done => SessionState::Done,
            };
        }

        Ok(outcome)
    }

    fn await_directory(&mut self) -> Result<SessionState> {
        match self.prompter.select_root_directory()? {
            Some(root) => Ok(SessionState::Processing(root)),
            None => {
                self.prompter.notify("フォルダが選択されていません");
                Ok(SessionState::AwaitingContinue)
            }
        }
    }

    fn process(&mut self, root: PathBuf) -> Result<SessionState> {
        self.prompter.notify(&format!("\n📂 {}", root.display()));

        match self.aggregator.scan(&root, &mut *self.prompter) {
            Ok(ScanOutcome::Completed(data)) if data.is_empty() => {
                self.prompter.notify("有効なデータが見つかりませんでした");
            }
            Ok(ScanOutcome::Completed(data)) => {
                let rows = data.len();
                self.combined.append(data);
                self.prompter.notify(&format!(
                    "✔ {}行を追加（累計 {}行）",
                    rows,
                    self.combined.len()
                ));
            }
            Ok(ScanOutcome::Cancelled { .. }) => {
                // 中止したフォルダのデータは取り込まない
                self.prompter.notify("ユーザーにより処理を中止しました");
            }
            Err(err @ EtlError::FolderNotFound(_)) => {
                self.prompter.notify(&format!("⚠ {}", err));
            }
            Err(err) => return Err(err),
        }

        Ok(SessionState::AwaitingContinue)
    }

    fn await_continue(&mut self) -> Result<SessionState> {
        if self.prompter.confirm_continue()? {
            Ok(SessionState::AwaitingDirectory)
        } else {
            Ok(SessionState::Exporting)
        }
    }

    fn export(&mut self) -> Result<SessionOutcome> {
        if self.combined.is_empty() {
            self.prompter.notify("出力する有効なデータがありません");
            return Ok(SessionOutcome::NothingToExport);
        }

        let output_dir = match self.prompter.select_output_directory()? {
            Some(dir) => dir,
            None => {
                self.prompter
                    .notify("出力先が選択されていません。CSVは出力しません");
                return Ok(SessionOutcome::ExportDeclined);
            }
        };

        let date = self
            .export_date
            .unwrap_or_else(|| Local::now().date_naive());

        match export::export_dataset(&self.combined, &output_dir, date) {
            Ok(path) => {
                self.prompter.notify(&format!(
                    "✔ 全データをCSVに出力しました: {}",
                    path.display()
                ));
                Ok(SessionOutcome::Exported {
                    path,
                    rows: self.combined.len(),
                })
            }
            Err(err) => {
                self.prompter
                    .notify(&format!("✖ CSVの出力に失敗しました: {}", err));
                Ok(SessionOutcome::ExportFailed(err.to_string()))
            }
        }
    }
}
