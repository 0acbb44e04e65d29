//! calamine のセル値 → CellValue 変換

use calamine::Data;
use chrono::{NaiveDateTime, Timelike};
use worklist_common::CellValue;

/// 欠損値として扱う文字列
const MISSING_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(text) => text_value(text),
        Data::Int(value) => CellValue::Int(*value),
        Data::Float(value) if value.is_nan() => CellValue::Empty,
        Data::Float(value) => CellValue::Float(*value),
        Data::Bool(value) => CellValue::Bool(*value),
        Data::DateTime(value) => {
            if value.is_duration() {
                return CellValue::Float(value.as_f64());
            }
            match value.as_datetime() {
                Some(datetime) => CellValue::Text(format_datetime(&datetime)),
                None => CellValue::Float(value.as_f64()),
            }
        }
        Data::DateTimeIso(text) | Data::DurationIso(text) => text_value(text),
    }
}

/// 欠損値トークンなら Empty
pub fn text_value(text: &str) -> CellValue {
    if is_missing_token(text) {
        CellValue::Empty
    } else {
        CellValue::Text(text.to_string())
    }
}

pub fn is_missing_token(text: &str) -> bool {
    MISSING_TOKENS.contains(&text)
}

/// 日時を文字列化（時刻が0時ちょうどなら日付のみ）
pub fn format_datetime(datetime: &NaiveDateTime) -> String {
    if datetime.num_seconds_from_midnight() == 0 && datetime.nanosecond() == 0 {
        datetime.format("%Y-%m-%d").to_string()
    } else {
        datetime.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
