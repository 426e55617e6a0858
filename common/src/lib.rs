//! Circuit Match Common Library
//!
//! 回線コードの抽出・正規化・マスタ照合を行う照合コア。
//! ファイル読み込みや保存は行わず、読み込み済みの表を受け取って結果を返す。
//!
//! ## 処理フロー
//! 1. マスタ表のキー列を正規化して索引を構築
//! 2. 比較表の各行・列名から回線コードを抽出し、1コード1行に展開
//! 3. 索引で照合し、コード単位で重複除去して集計

pub mod table;
pub mod normalize;
pub mod extract;
pub mod flatten;
pub mod options;
pub mod master;
pub mod category;
pub mod matcher;
pub mod summary;
pub mod records;
pub mod error;

pub use table::{Cell, Table};
pub use normalize::normalize_code;
pub use extract::extract_all;
pub use flatten::{flatten, ComparisonRow};
pub use options::MatchOptions;
pub use master::{MasterIndex, MasterRecord};
pub use category::{derive_category, format_text};
pub use matcher::{match_rows, CompareOutcome, MatchResult, RunSummary};
pub use summary::{summarize, SlaLookup, SummaryRow};
pub use records::{MatchStatus, RecordFilter};
pub use error::{Error, Result};

/// マスタ表と比較表を照合する
///
/// キー列がマスタにない場合は [`Error::MissingKeyColumn`] を返し、照合は行わない。
pub fn compare(master: &Table, comparison: &Table, options: &MatchOptions) -> Result<CompareOutcome> {
    let index = MasterIndex::build(master, options)?;
    let rows = flatten(comparison);
    Ok(match_rows(&rows, &index))
}
