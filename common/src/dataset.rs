//! データセット型定義
//!
//! - CellValue: セル1つ分のスカラー値（空セルは `Empty`）
//! - Dataset: 列名リスト（初出順の和集合）と、列順に並んだ行の集合
//! - Record: Dataset 内の1行への読み取り専用ビュー

use std::collections::HashSet;
use std::fmt;

/// セルの値
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// 欠損値
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl CellValue {
    /// 欠損値か（空セル・NaN）
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Float(value) => value.is_nan(),
            _ => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(value) => f.write_str(value),
            CellValue::Int(value) => write!(f, "{}", value),
            CellValue::Float(value) if value.is_nan() => Ok(()),
            CellValue::Float(value) => write!(f, "{}", value),
            CellValue::Bool(true) => f.write_str("True"),
            CellValue::Bool(false) => f.write_str("False"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

/// 表形式データ
///
/// 行は常に `columns` と同じ長さに揃えて保持する。
/// 列名は Dataset 内で一意。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// 列名を指定して空のデータセットを作成
    ///
    /// 重複した列名は後ろ側を捨てる。
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let columns = columns
            .into_iter()
            .map(Into::into)
            .filter(|name: &String| seen.insert(name.clone()))
            .collect();

        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// 行を追加（列数に合わせて欠損値で埋める／切り詰める）
    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        row.resize(self.columns.len(), CellValue::Empty);
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// 行数
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// 行の読み取り専用ビュー
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(move |values| Record {
            columns: &self.columns,
            values,
        })
    }

    pub fn record(&self, index: usize) -> Option<Record<'_>> {
        self.rows.get(index).map(|values| Record {
            columns: &self.columns,
            values,
        })
    }

    /// 列の値を上から順に取得
    pub fn column_values(&self, name: &str) -> Option<Vec<&CellValue>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|row| &row[index]).collect())
    }

    /// 条件を満たす行だけを残した新しいデータセットを返す
    pub fn filter_rows<F>(self, mut keep: F) -> Self
    where
        F: FnMut(&[CellValue]) -> bool,
    {
        let rows = self.rows.into_iter().filter(|row| keep(row)).collect();
        Self {
            columns: self.columns,
            rows,
        }
    }

    /// 列名を変更
    ///
    /// `from` が無い、または `to` が既に存在する場合は何もしない（falseを返す）。
    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        if self.has_column(to) {
            return false;
        }
        match self.column_index(from) {
            Some(index) => {
                self.columns[index] = to.to_string();
                true
            }
            None => false,
        }
    }

    /// 列の全行を同じ値で上書き
    pub fn fill_column(&mut self, name: &str, value: &CellValue) -> bool {
        match self.column_index(name) {
            Some(index) => {
                for row in &mut self.rows {
                    row[index] = value.clone();
                }
                true
            }
            None => false,
        }
    }

    /// 別のデータセットを末尾に連結
    ///
    /// 列は初出順の和集合になり、片方にしか無い列は欠損値で埋める。
    /// 行を持たないデータセットは列も追加しない。
    pub fn append(&mut self, other: Dataset) {
        if other.rows.is_empty() {
            return;
        }

        if other.columns == self.columns {
            self.rows.extend(other.rows);
            return;
        }

        let mapping: Vec<usize> = other
            .columns
            .into_iter()
            .map(|name| match self.column_index(&name) {
                Some(index) => index,
                None => {
                    self.columns.push(name);
                    self.columns.len() - 1
                }
            })
            .collect();

        let width = self.columns.len();
        for row in &mut self.rows {
            row.resize(width, CellValue::Empty);
        }

        for row in other.rows {
            let mut merged = vec![CellValue::Empty; width];
            for (value, &index) in row.into_iter().zip(&mapping) {
                merged[index] = value;
            }
            self.rows.push(merged);
        }
    }

    /// 指定列だけを取り出したデータセット（存在しない列は無視）
    pub fn select(&self, names: &[&str]) -> Dataset {
        let indices: Vec<usize> = names
            .iter()
            .filter_map(|name| self.column_index(name))
            .collect();

        Dataset {
            columns: indices.iter().map(|&i| self.columns[i].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
                .collect(),
        }
    }
}

/// Dataset 内の1行
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    columns: &'a [String],
    values: &'a [CellValue],
}

impl<'a> Record<'a> {
    /// 列名で値を取得
    pub fn get(&self, name: &str) -> Option<&'a CellValue> {
        self.columns
            .iter()
            .position(|column| column == name)
            .map(|index| &self.values[index])
    }

    /// 列位置で値を取得
    pub fn value_at(&self, index: usize) -> Option<&'a CellValue> {
        self.values.get(index)
    }

    pub fn values(&self) -> &'a [CellValue] {
        self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a CellValue)> {
        let columns: &'a [String] = self.columns;
        let values: &'a [CellValue] = self.values;
        columns.iter().map(String::as_str).zip(values.iter())
    }
}
