//! Work Listシート読み込みモジュール
//!
//! 1ファイルを開き、指定名のシートを探して表データに変換する。
//! - 3行目（0始まりで2行目）をヘッダーとし、それ以前の行はデータに含めない
//! - セル位置はシート上の絶対位置（A列 = 位置0）

mod cell;

pub use cell::{format_datetime, is_missing_token};

use crate::error::{EtlError, Result};
use calamine::{Data, Range, Reader, Xlsx, XlsxError};
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use worklist_common::{CellValue, Dataset};

pub const DEFAULT_SHEET_NAME: &str = "Work List";

/// ヘッダー行の位置（0始まり）
pub const HEADER_ROW: u32 = 2;

/// 1ファイル分の表データを返すリーダー
pub trait SheetReader {
    fn read(&self, path: &Path) -> Result<Dataset>;

    /// 対象シート名（メッセージ表示用）
    fn sheet_name(&self) -> &str;
}

/// calamine による `.xlsx` リーダー
#[derive(Debug, Clone)]
pub struct XlsxSheetReader {
    sheet_name: String,
    skip_rows_after_header: usize,
}

impl Default for XlsxSheetReader {
    fn default() -> Self {
        Self::new(DEFAULT_SHEET_NAME)
    }
}

impl XlsxSheetReader {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            skip_rows_after_header: 0,
        }
    }

    /// ヘッダー直後の読み飛ばし行数
    pub fn with_skip_rows_after_header(mut self, rows: usize) -> Self {
        self.skip_rows_after_header = rows;
        self
    }
}

impl SheetReader for XlsxSheetReader {
    fn read(&self, path: &Path) -> Result<Dataset> {
        let file = File::open(path).map_err(|e| open_error(path, e))?;
        let mut workbook = Xlsx::new(BufReader::new(file)).map_err(|e| xlsx_error(path, e))?;

        // シート名は完全一致のみ
        if !workbook.sheet_names().iter().any(|name| name == &self.sheet_name) {
            return Err(EtlError::SheetNotFound {
                file: path.to_path_buf(),
                sheet: self.sheet_name.clone(),
            });
        }

        let range = workbook
            .worksheet_range(&self.sheet_name)
            .map_err(|e| xlsx_error(path, e))?;

        Ok(range_to_dataset(&range, self.skip_rows_after_header))
    }

    fn sheet_name(&self) -> &str {
        &self.sheet_name
    }
}

/// ファイルロックによるエラーか
///
/// Windowsでは他プロセスが開いているファイルは共有違反（32）か
/// ロック違反（33）になる。
pub fn is_lock_error(err: &io::Error) -> bool {
    const ERROR_SHARING_VIOLATION: i32 = 32;
    const ERROR_LOCK_VIOLATION: i32 = 33;

    if err.kind() == io::ErrorKind::PermissionDenied {
        return true;
    }

    cfg!(windows)
        && matches!(
            err.raw_os_error(),
            Some(ERROR_SHARING_VIOLATION) | Some(ERROR_LOCK_VIOLATION)
        )
}

fn open_error(path: &Path, err: io::Error) -> EtlError {
    if is_lock_error(&err) {
        EtlError::FileLocked(path.to_path_buf())
    } else {
        EtlError::UnreadableFile {
            file: path.to_path_buf(),
            reason: err.to_string(),
        }
    }
}

fn xlsx_error(path: &Path, err: XlsxError) -> EtlError {
    match err {
        XlsxError::Io(io_err) => open_error(path, io_err),
        other => EtlError::UnreadableFile {
            file: path.to_path_buf(),
            reason: other.to_string(),
        },
    }
}

/// シート範囲を表データに変換
///
/// ヘッダー行が無いシートは列も行も持たない Dataset になる。
fn range_to_dataset(range: &Range<Data>, skip_rows_after_header: usize) -> Dataset {
    let (end_row, end_col) = match range.end() {
        Some(end) => end,
        None => return Dataset::new(),
    };

    if end_row < HEADER_ROW {
        return Dataset::new();
    }

    let read_row = |row: u32| -> Vec<CellValue> {
        (0..=end_col)
            .map(|col| {
                range
                    .get_value((row, col))
                    .map(cell::to_cell_value)
                    .unwrap_or_default()
            })
            .collect()
    };

    let mut dataset = Dataset::with_columns(header_names(read_row(HEADER_ROW)));

    let rows = (HEADER_ROW + 1..=end_row)
        .map(read_row)
        .filter(|values| values.iter().any(|v| !v.is_missing()))
        .skip(skip_rows_after_header);

    for values in rows {
        dataset.push_row(values);
    }

    dataset
}

/// ヘッダーセルから一意な列名を作る
///
/// - 空セルは `Unnamed: <位置>`
/// - 重複は左から `<名前>.1`, `<名前>.2` …
fn header_names(cells: Vec<CellValue>) -> Vec<String> {
    let mut used = HashSet::new();
    let mut counters: HashMap<String, usize> = HashMap::new();

    cells
        .into_iter()
        .enumerate()
        .map(|(index, cell)| {
            let base = if cell.is_missing() {
                format!("Unnamed: {}", index)
            } else {
                cell.to_string()
            };

            let mut name = base.clone();
            while !used.insert(name.clone()) {
                let counter = counters.entry(base.clone()).or_insert(0);
                *counter += 1;
                name = format!("{}.{}", base, counter);
            }
            name
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<CellValue> {
        values.iter().map(|&v| cell::text_value(v)).collect()
    }

    #[test]
    fn test_header_names_plain() {
        assert_eq!(header_names(cells(&["A", "B", "C"])), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_header_names_unnamed() {
        assert_eq!(
            header_names(cells(&["A", "", "C", ""])),
            vec!["A", "Unnamed: 1", "C", "Unnamed: 3"]
        );
    }

    #[test]
    fn test_header_names_duplicates() {
        assert_eq!(
            header_names(cells(&["A", "A", "B", "A"])),
            vec!["A", "A.1", "B", "A.2"]
        );
    }

    #[test]
    fn test_header_names_duplicate_collides_with_existing() {
        assert_eq!(
            header_names(cells(&["A.1", "A", "A"])),
            vec!["A.1", "A", "A.2"]
        );
    }

    #[test]
    fn test_header_names_numeric() {
        let names = header_names(vec![CellValue::Float(2026.0), CellValue::Int(3)]);
        assert_eq!(names, vec!["2026", "3"]);
    }

    #[test]
    fn test_lock_error_detection() {
        let denied = io::Error::from(io::ErrorKind::PermissionDenied);
        assert!(is_lock_error(&denied));

        let missing = io::Error::from(io::ErrorKind::NotFound);
        assert!(!is_lock_error(&missing));
    }

    #[test]
    fn test_open_error_classification() {
        let path = Path::new("book.xlsx");

        let locked = open_error(path, io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(locked, EtlError::FileLocked(_)));

        let other = open_error(path, io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(other, EtlError::UnreadableFile { .. }));
    }

    #[test]
    fn test_range_header_at_row_two() {
        let mut range: Range<Data> = Range::new((0, 0), (4, 2));
        range.set_value((0, 0), Data::String("Title".into()));
        range.set_value((2, 0), Data::String("A".into()));
        range.set_value((2, 1), Data::String("B".into()));
        range.set_value((2, 2), Data::String("C".into()));
        range.set_value((3, 0), Data::Int(1));
        range.set_value((4, 1), Data::String("x".into()));

        let dataset = range_to_dataset(&range, 0);
        assert_eq!(dataset.columns(), ["A", "B", "C"]);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.record(0).unwrap().get("A"), Some(&CellValue::Int(1)));
        assert_eq!(
            dataset.record(1).unwrap().get("B"),
            Some(&CellValue::from("x"))
        );
    }

    #[test]
    fn test_range_not_starting_at_a1() {
        // 使用範囲が C3 から始まるシート
        let mut range: Range<Data> = Range::new((2, 2), (3, 3));
        range.set_value((2, 2), Data::String("K1".into()));
        range.set_value((2, 3), Data::String("K2".into()));
        range.set_value((3, 2), Data::String("v1".into()));
        range.set_value((3, 3), Data::String("v2".into()));

        let dataset = range_to_dataset(&range, 0);
        assert_eq!(dataset.columns(), ["Unnamed: 0", "Unnamed: 1", "K1", "K2"]);
        assert_eq!(dataset.record(0).unwrap().value_at(2), Some(&CellValue::from("v1")));
    }

    #[test]
    fn test_range_skips_blank_rows_and_extra_rows() {
        let mut range: Range<Data> = Range::new((2, 0), (6, 0));
        range.set_value((2, 0), Data::String("A".into()));
        range.set_value((3, 0), Data::String("unit".into()));
        range.set_value((5, 0), Data::String("first".into()));
        range.set_value((6, 0), Data::String("second".into()));

        let all = range_to_dataset(&range, 0);
        assert_eq!(all.len(), 3);

        let skipped = range_to_dataset(&range, 1);
        assert_eq!(skipped.len(), 2);
        assert_eq!(
            skipped.record(0).unwrap().get("A"),
            Some(&CellValue::from("first"))
        );
    }

    #[test]
    fn test_range_without_header_row() {
        let mut range: Range<Data> = Range::new((0, 0), (1, 1));
        range.set_value((0, 0), Data::String("Title".into()));

        let dataset = range_to_dataset(&range, 0);
        assert_eq!(dataset.width(), 0);
        assert!(dataset.is_empty());
    }
}
