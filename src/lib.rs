//! Work List 集約ツール
//!
//! フォルダ配下の `.xlsx` から Work List シートを読み込み、
//! 正規化して1つのCSVにまとめる。
//!
//! - [`reader`]: シート読み込み（calamine）
//! - [`scanner`]: フォルダ走査と集約
//! - [`session`]: 対話セッション（フォルダ選択 → 集約 → 継続確認 → 出力）
//! - [`export`]: CSV出力
//! - [`prompt`]: 対話インターフェース（ターミナル / スクリプト）

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod prompt;
pub mod reader;
pub mod scanner;
pub mod session;

pub use worklist_common::{CellValue, Dataset, Normalizer, Record};
