//! フォルダ走査・集約モジュール
//!
//! ルートフォルダ配下の `.xlsx` を再帰的に探し、1ファイルずつ
//! 読み込み → 正規化して1つの Dataset にまとめる。
//!
//! - ロック中 / シートなし: 再試行・次へ・中止をユーザーに確認
//! - 中止: このフォルダの残りを処理せず `ScanOutcome::Cancelled` を返す
//! - その他の読み込みエラー: 通知してそのファイルだけスキップ

use crate::error::{EtlError, Result};
use crate::prompt::{Prompter, RecoveryChoice, RecoveryPrompt};
use crate::reader::SheetReader;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use worklist_common::{Dataset, Normalizer};

pub const SPREADSHEET_EXTENSION: &str = "xlsx";

/// Excelが開いているブックの横に作る所有者ファイルの接頭辞
const OWNER_FILE_PREFIX: &str = "~$";

/// 処理対象ファイル
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub file_name: String,
}

impl SourceFile {
    pub fn new(path: &Path) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Self {
            path: path.to_path_buf(),
            file_name,
        }
    }

    pub fn is_owner_file(&self) -> bool {
        self.file_name.starts_with(OWNER_FILE_PREFIX)
    }
}

/// 拡張子が `.xlsx` か（大文字小文字は区別しない）
pub fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(SPREADSHEET_EXTENSION))
        .unwrap_or(false)
}

/// フォルダ1つ分の集約結果
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// 最後まで処理した
    Completed(Dataset),
    /// ユーザーが中止した（中止前に処理したファイル分のデータ）
    Cancelled { partial: Dataset },
}

enum FileOutcome {
    Loaded(Dataset),
    Skipped,
    Abort,
}

pub struct Aggregator<'a, R: SheetReader + ?Sized> {
    reader: &'a R,
    normalizer: &'a Normalizer,
    verbose: bool,
}

impl<'a, R: SheetReader + ?Sized> Aggregator<'a, R> {
    pub fn new(reader: &'a R, normalizer: &'a Normalizer) -> Self {
        Self {
            reader,
            normalizer,
            verbose: false,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// ルートフォルダ配下を集約
    ///
    /// 同じフォルダ内はファイル名順に処理する。
    pub fn scan(&self, root: &Path, prompter: &mut dyn Prompter) -> Result<ScanOutcome> {
        if !root.is_dir() {
            return Err(EtlError::FolderNotFound(root.display().to_string()));
        }

        let mut collected = Dataset::new();

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    prompter.notify(&format!("⚠ 読み込めない項目をスキップ: {}", err));
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_file() || !is_spreadsheet(path) {
                continue;
            }

            let file = SourceFile::new(path);
            if file.is_owner_file() {
                if self.verbose {
                    println!("  - 所有者ファイルをスキップ: {}", file.file_name);
                }
                continue;
            }

            println!("\n処理中: {}", file.file_name);

            match self.process_file(&file, prompter)? {
                FileOutcome::Loaded(data) => {
                    if self.verbose {
                        println!("  ✔ {}行 / {}列", data.len(), data.width());
                    }
                    collected.append(data);
                }
                FileOutcome::Skipped => {}
                FileOutcome::Abort => {
                    return Ok(ScanOutcome::Cancelled { partial: collected });
                }
            }
        }

        Ok(ScanOutcome::Completed(collected))
    }

    fn process_file(&self, file: &SourceFile, prompter: &mut dyn Prompter) -> Result<FileOutcome> {
        loop {
            let result = self
                .reader
                .read(&file.path)
                .and_then(|raw| self.normalizer.normalize(raw).map_err(EtlError::from));

            match result {
                Ok(data) => return Ok(FileOutcome::Loaded(data)),
                Err(EtlError::FileLocked(_)) => {
                    let prompt = RecoveryPrompt::FileLocked {
                        file_name: file.file_name.clone(),
                    };
                    match prompter.confirm_recovery(&prompt)? {
                        RecoveryChoice::Retry => continue,
                        RecoveryChoice::Skip => {
                            prompter.notify(&format!("⚠ 使用中のためスキップ: {}", file.file_name));
                            return Ok(FileOutcome::Skipped);
                        }
                        RecoveryChoice::Abort => return Ok(FileOutcome::Abort),
                    }
                }
                Err(EtlError::SheetNotFound { sheet, .. }) => {
                    let prompt = RecoveryPrompt::SheetNotFound {
                        file_name: file.file_name.clone(),
                        sheet,
                    };
                    // シート名は手で直さない限り変わらないので、再試行も「次へ」
                    match prompter.confirm_recovery(&prompt)? {
                        RecoveryChoice::Retry | RecoveryChoice::Skip => {
                            return Ok(FileOutcome::Skipped)
                        }
                        RecoveryChoice::Abort => return Ok(FileOutcome::Abort),
                    }
                }
                Err(err @ EtlError::Prompt(_)) => return Err(err),
                Err(err) => {
                    prompter.notify(&format!("⚠ {} をスキップ: {}", file.file_name, err));
                    return Ok(FileOutcome::Skipped);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_spreadsheet() {
        assert!(is_spreadsheet(Path::new("a.xlsx")));
        assert!(is_spreadsheet(Path::new("dir/B.XLSX")));
        assert!(!is_spreadsheet(Path::new("a.xls")));
        assert!(!is_spreadsheet(Path::new("a.xlsm")));
        assert!(!is_spreadsheet(Path::new("a.csv")));
        assert!(!is_spreadsheet(Path::new("xlsx")));
    }

    #[test]
    fn test_source_file() {
        let file = SourceFile::new(Path::new("/data/site/report.xlsx"));
        assert_eq!(file.file_name, "report.xlsx");
        assert!(!file.is_owner_file());

        let owner = SourceFile::new(Path::new("/data/site/~$report.xlsx"));
        assert!(owner.is_owner_file());
    }
}
