//! Work List レコードの正規化
//!
//! 1ファイル分の生データに対して:
//! 1. 主キー列（位置14）が空の行を削除
//! 2. 副キー列（位置3）が空の行を削除
//! 3. 固定の列名変換を適用（`PIM Name` は定数で上書きして `Customer` に）
//!
//! キー列は列名ではなく位置で参照する。入力シートは主キー・副キー列を
//! 固定位置に置くことが前提で、列順が異なるシートでは別の列で行が削除される。

use crate::dataset::{CellValue, Dataset};
use crate::error::{Error, Result};

/// 主キー列の位置（0始まり）
pub const PRIMARY_KEY_COLUMN: usize = 14;

/// 副キー列の位置（0始まり）
pub const SECONDARY_KEY_COLUMN: usize = 3;

/// 列名変換テーブル（元の列名, 変換後の列名）
pub const COLUMN_RENAMES: &[(&str, &str)] = &[
    ("WR Number", "NCR_SR No."),
    ("WO Number", "NCR_TASK No."),
];

/// 顧客名で上書きされる列
pub const CUSTOMER_SOURCE_COLUMN: &str = "PIM Name";

/// 顧客名列
pub const CUSTOMER_COLUMN: &str = "Customer";

pub const DEFAULT_CUSTOMER_NAME: &str = "PIM";

#[derive(Debug, Clone)]
pub struct Normalizer {
    customer_name: String,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_CUSTOMER_NAME)
    }
}

impl Normalizer {
    pub fn new(customer_name: impl Into<String>) -> Self {
        Self {
            customer_name: customer_name.into(),
        }
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    /// 1ファイル分のデータを正規化
    ///
    /// 列数が主キー列に届かないシートは `MissingKeyColumn` を返す。
    pub fn normalize(&self, raw: Dataset) -> Result<Dataset> {
        let width = raw.width();
        if width <= PRIMARY_KEY_COLUMN {
            return Err(Error::MissingKeyColumn {
                index: PRIMARY_KEY_COLUMN,
                width,
            });
        }

        let mut cleaned = raw
            .filter_rows(|row| !row[PRIMARY_KEY_COLUMN].is_missing())
            .filter_rows(|row| !row[SECONDARY_KEY_COLUMN].is_missing());

        self.apply_renames(&mut cleaned);
        Ok(cleaned)
    }

    /// 列名変換を適用
    ///
    /// 変換済みの列名には一致しないので、2回目以降は何も変わらない。
    pub fn apply_renames(&self, dataset: &mut Dataset) {
        for (from, to) in COLUMN_RENAMES {
            dataset.rename_column(from, to);
        }

        // `Customer` が既にあっても値は上書きし、列名だけそのまま残す
        if dataset.fill_column(
            CUSTOMER_SOURCE_COLUMN,
            &CellValue::Text(self.customer_name.clone()),
        ) {
            dataset.rename_column(CUSTOMER_SOURCE_COLUMN, CUSTOMER_COLUMN);
        }
    }
}
