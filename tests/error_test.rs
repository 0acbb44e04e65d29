//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use std::path::PathBuf;
use worklist_combine::config::Config;
use worklist_combine::error::EtlError;
use tempfile::tempdir;

/// EtlErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        EtlError::Config("テスト設定エラー".to_string()),
        EtlError::FolderNotFound("/data/site".to_string()),
        EtlError::FileLocked(PathBuf::from("/data/site/a.xlsx")),
        EtlError::SheetNotFound {
            file: PathBuf::from("/data/site/b.xlsx"),
            sheet: "Work List".to_string(),
        },
        EtlError::UnreadableFile {
            file: PathBuf::from("/data/site/c.xlsx"),
            reason: "zip error".to_string(),
        },
        EtlError::Prompt("入力エラー".to_string()),
    ];

    for err in errors {
        let msg = err.to_string();
        assert!(!msg.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

#[test]
fn test_error_messages_name_the_file() {
    let locked = EtlError::FileLocked(PathBuf::from("a.xlsx"));
    assert!(locked.to_string().contains("a.xlsx"));

    let missing = EtlError::SheetNotFound {
        file: PathBuf::from("b.xlsx"),
        sheet: "Work List".to_string(),
    };
    let msg = missing.to_string();
    assert!(msg.contains("b.xlsx"));
    assert!(msg.contains("Work List"));
}

/// 再試行/中止を問い合わせるのはロック中とシートなしだけ
#[test]
fn test_recoverable_errors() {
    assert!(EtlError::FileLocked(PathBuf::from("a.xlsx")).is_recoverable());
    assert!(EtlError::SheetNotFound {
        file: PathBuf::from("a.xlsx"),
        sheet: "Work List".to_string(),
    }
    .is_recoverable());

    assert!(!EtlError::UnreadableFile {
        file: PathBuf::from("a.xlsx"),
        reason: "broken".to_string(),
    }
    .is_recoverable());
    assert!(!EtlError::FolderNotFound("x".to_string()).is_recoverable());
}

/// 共通クレートのエラーはそのまま表示される
#[test]
fn test_common_error_is_transparent() {
    let err: EtlError = worklist_common::Error::MissingKeyColumn {
        index: 14,
        width: 5,
    }
    .into();
    assert_eq!(err.to_string(), "key column 14 is missing (sheet has 5 columns)");
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: EtlError = io_err.into();
    assert!(matches!(err, EtlError::Io(_)));
}

/// 壊れた設定ファイル
#[test]
fn test_invalid_config_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, EtlError::JsonParse(_)));
}

/// 空の顧客名は設定エラー
#[test]
fn test_empty_customer_name_is_rejected() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"customer_name": ""}"#).unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, EtlError::Config(_)));
}
