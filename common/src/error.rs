//! 正規化エラー

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// 位置指定のキー列がシートの列数を超えている
    #[error("key column {index} is missing (sheet has {width} columns)")]
    MissingKeyColumn { index: usize, width: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_column_names_both_sizes() {
        let error = Error::MissingKeyColumn { index: 14, width: 6 };
        assert_eq!(
            error.to_string(),
            "key column 14 is missing (sheet has 6 columns)"
        );
    }
}
