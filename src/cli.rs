use circuit_match_common::MatchStatus;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "circuit-match")]
#[command(about = "回線コード抽出・マスタ照合ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 比較ファイルの回線コードをマスタと照合
    Compare {
        /// 比較ファイル（xlsx/xlsm/xls/xlsb/ods/csv）
        #[arg(required = true)]
        compare_file: PathBuf,

        /// マスタExcel（省略時は設定値）
        #[arg(short, long)]
        master: Option<PathBuf>,

        /// マスタのシート名
        #[arg(short, long)]
        sheet: Option<String>,

        /// マスタのキー列名
        #[arg(short, long)]
        key_column: Option<String>,

        /// ジョブID（省略時は現在時刻）
        #[arg(long)]
        job_id: Option<u64>,

        /// 出力JSONファイル（デフォルト: 比較ファイルと同じ場所/report.json）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 照合結果Excelの出力先
        #[arg(short, long)]
        excel: Option<PathBuf>,

        /// ジョブサマリーExcelの出力先（ファイルまたはディレクトリ）
        #[arg(long)]
        summary: Option<PathBuf>,

        /// 比較ファイルにヘッダー行がない
        #[arg(long)]
        no_header: bool,
    },

    /// テキストから回線コードを抽出して表示
    Extract {
        #[arg(required = true)]
        text: String,
    },

    /// 保存済みの照合結果を絞り込んで表示
    Records {
        /// 照合結果JSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 顧客（完全一致）
        #[arg(long)]
        customer: Option<String>,

        /// プロジェクト名（完全一致）
        #[arg(long)]
        project: Option<String>,

        /// 県（完全一致）
        #[arg(long)]
        province: Option<String>,

        /// 状態 (found/unmatched)
        #[arg(long)]
        status: Option<MatchStatus>,

        /// 部分一致検索
        #[arg(short, long)]
        query: Option<String>,
    },

    /// 設定を表示/編集
    Config {
        /// キー列名を設定
        #[arg(long)]
        set_key_column: Option<String>,

        /// 既定のマスタExcelを設定
        #[arg(long)]
        set_master: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
