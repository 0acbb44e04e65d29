//! Work List 集約の共通ライブラリ
//!
//! スプレッドシートやターミナルに依存しないデータモデルと正規化ルール

pub mod dataset;
pub mod error;
pub mod normalizer;

pub use dataset::{CellValue, Dataset, Record};
pub use error::{Error, Result};
pub use normalizer::{Normalizer, DEFAULT_CUSTOMER_NAME, PRIMARY_KEY_COLUMN, SECONDARY_KEY_COLUMN};
