//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use circuit_match::error::CircuitMatchError;
use circuit_match::loader;
use rust_xlsxwriter::Workbook;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないマスタを読み込んだ場合
#[test]
fn test_master_not_found() {
    let result = loader::read_master(Path::new("/nonexistent/path/master.xlsx"), "Sheet1", 1);
    assert!(matches!(result, Err(CircuitMatchError::FileNotFound(_))));
}

/// マスタに.xlsx以外を指定した場合
#[test]
fn test_master_must_be_xlsx() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("master.csv");
    std::fs::write(&path, "เลขวงจร\n1234A5678\n").unwrap();

    let result = loader::read_master(&path, "Sheet1", 1);
    assert!(matches!(result, Err(CircuitMatchError::UnsupportedFormat(_))));
}

/// 対応していない比較ファイル
#[test]
fn test_comparison_unsupported_format() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("compare.txt");
    std::fs::write(&path, "1234A5678").unwrap();

    let result = loader::read_comparison(&path, true);
    assert!(matches!(result, Err(CircuitMatchError::UnsupportedFormat(_))));
}

/// 指定シートがない場合はシート一覧を含めて返す
#[test]
fn test_sheet_not_found() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("master.xlsx");
    let mut workbook = Workbook::new();
    workbook.add_worksheet().set_name("Master").unwrap();
    workbook.save(&path).unwrap();

    let err = loader::read_master(&path, "Sheet1", 1).unwrap_err();
    match err {
        CircuitMatchError::SheetNotFound(message) => {
            assert!(message.contains("Sheet1"));
            assert!(message.contains("Master"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

/// 壊れたワークブック
#[test]
fn test_broken_workbook() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, b"not a zip archive").unwrap();

    let result = loader::read_comparison(&path, true);
    assert!(matches!(result, Err(CircuitMatchError::Workbook(_))));
}

/// CircuitMatchErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        CircuitMatchError::Config("テスト設定エラー".to_string()),
        CircuitMatchError::FileNotFound("master.xlsx".to_string()),
        CircuitMatchError::UnsupportedFormat("compare.txt".to_string()),
        CircuitMatchError::SheetNotFound("Sheet1".to_string()),
        CircuitMatchError::Workbook("壊れたファイル".to_string()),
        CircuitMatchError::ExcelGeneration("Excel生成エラー".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: CircuitMatchError = io_err.into();

    assert!(matches!(err, CircuitMatchError::Io(_)));
    assert!(err.to_string().contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: CircuitMatchError = json_err.into();

    assert!(matches!(err, CircuitMatchError::JsonParse(_)));
}

/// 照合コアのエラーからの変換
#[test]
fn test_compare_error_conversion() {
    let master = circuit_match_common::Table::new(vec!["code".into()], vec![]);
    let comparison = circuit_match_common::Table::default();
    let core_err = circuit_match_common::compare(
        &master,
        &comparison,
        &circuit_match_common::MatchOptions::default(),
    )
    .unwrap_err();
    let err: CircuitMatchError = core_err.into();

    assert!(matches!(err, CircuitMatchError::Compare(_)));
    assert!(err.to_string().contains("code"));
}

/// 壊れた照合結果JSON
#[test]
fn test_read_report_invalid_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("report.json");
    std::fs::write(&path, "{\"results\": 3}").unwrap();

    let result = circuit_match::export::read_report(&path);
    assert!(matches!(result, Err(CircuitMatchError::JsonParse(_))));
}
