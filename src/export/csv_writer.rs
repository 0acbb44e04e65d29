//! CSV出力
//!
//! Excelで文字化けしないよう、BOM付きUTF-8で書き出す。
//! 値はすべて文字列として出力する。

use crate::error::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use worklist_common::Dataset;

pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub fn write_csv(dataset: &Dataset, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_csv_to(dataset, BufWriter::new(file))
}

pub fn write_csv_to<W: Write>(dataset: &Dataset, mut writer: W) -> Result<()> {
    writer.write_all(UTF8_BOM)?;

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(dataset.columns())?;

    for record in dataset.records() {
        csv_writer.write_record(record.values().iter().map(|value| value.to_string()))?;
    }

    csv_writer.flush()?;
    Ok(())
}
