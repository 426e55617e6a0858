//! circuit-match
//!
//! 照合コア（`circuit_match_common`）の周りに、設定・表ファイル読み込み・
//! Excel/JSON出力・CLIを載せたもの。

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod logging;
