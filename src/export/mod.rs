pub mod csv_writer;

use crate::error::Result;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use worklist_common::Dataset;

pub const OUTPUT_FILE_PREFIX: &str = "combined_data";

/// 出力ファイル名（`combined_data_YYYYMMDD.csv`）
pub fn output_file_name(date: NaiveDate) -> String {
    format!("{}_{}.csv", OUTPUT_FILE_PREFIX, date.format("%Y%m%d"))
}

pub fn output_path(output_dir: &Path, date: NaiveDate) -> PathBuf {
    output_dir.join(output_file_name(date))
}

/// 集約結果を出力フォルダにCSVで書き出し、書き出したパスを返す
pub fn export_dataset(dataset: &Dataset, output_dir: &Path, date: NaiveDate) -> Result<PathBuf> {
    let path = output_path(output_dir, date);
    csv_writer::write_csv(dataset, &path)?;
    Ok(path)
}
