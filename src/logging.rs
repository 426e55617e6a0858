//! ログ出力（tracing-subscriber）
//!
//! 進捗表示は標準出力、診断ログは標準エラーに出す。
//! `RUST_LOG` が設定されていればそちらを優先する。

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `--verbose` の有無からフィルタ指定を決める
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "circuit_match=debug,circuit_match_common=debug"
    } else {
        "warn"
    }
}

/// グローバルなsubscriberを設定（二重初期化は無視）
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(verbose))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert!(default_directive(true).contains("circuit_match_common=debug"));
        assert_eq!(default_directive(false), "warn");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging(false);
        init_logging(true);
    }
}
