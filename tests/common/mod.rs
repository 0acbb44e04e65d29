//! テスト用 Work List ブックの生成

#![allow(dead_code)]

use rust_xlsxwriter::Workbook;
use std::path::Path;

/// 16列のヘッダー（位置3: SR, 位置14: Planned）
pub const HEADERS: [&str; 16] = [
    "Region",
    "Site",
    "WR Number",
    "SR",
    "WO Number",
    "PIM Name",
    "Status",
    "Owner",
    "Start",
    "End",
    "Crew",
    "Notes",
    "Cost",
    "Hours",
    "Planned",
    "Extra",
];

/// データ行（None は空セル）
pub type Row = Vec<Option<String>>;

/// 位置3（SR）と位置14（Planned）を指定して1行作る
pub fn row(tag: &str, sr: Option<&str>, planned: Option<&str>) -> Row {
    let mut values: Row = HEADERS
        .iter()
        .map(|header| Some(format!("{}-{}", tag, header)))
        .collect();
    values[3] = sr.map(str::to_string);
    values[14] = planned.map(str::to_string);
    values
}

/// ブックを書き出す
///
/// 1行目にタイトル、3行目（位置2）にヘッダー、4行目以降にデータ。
pub fn write_workbook(path: &Path, sheet_name: &str, headers: &[&str], rows: &[Row]) {
    let mut workbook = Workbook::new();

    let cover = workbook.add_worksheet();
    cover.set_name("Cover").unwrap();
    cover.write_string(0, 0, "cover").unwrap();

    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name).unwrap();
    sheet.write_string(0, 0, "Work List export").unwrap();

    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(2, col as u16, *header).unwrap();
    }

    for (index, values) in rows.iter().enumerate() {
        let row = 3 + index as u32;
        for (col, value) in values.iter().enumerate() {
            if let Some(value) = value {
                sheet.write_string(row, col as u16, value.as_str()).unwrap();
            }
        }
    }

    workbook.save(path).unwrap();
}

pub fn write_work_list(path: &Path, rows: &[Row]) {
    write_workbook(path, "Work List", &HEADERS, rows);
}
