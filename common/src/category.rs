//! サービス区分の導出
//!
//! 回線コードの5文字目が `J` / `Y` の回線はアクセス方式がブロードバンドのため、
//! サービス種別が「data」系なら区分を `Broadband` に読み替える。

/// 読み替え後の区分名
pub const BROADBAND: &str = "Broadband";

/// 読み替え対象となる5文字目
const BROADBAND_MARKERS: [char; 2] = ['J', 'Y'];

/// 表示用に整形する
///
/// 前後空白を除去し、ASCIIのみの文字列は先頭大文字・残り小文字にする。
/// 非ASCII（タイ文字など）を含む場合は大文字小文字を変えない。
pub fn format_text(text: &str) -> String {
    let s = text.trim();
    if !s.is_ascii() {
        return s.to_string();
    }
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(s.len());
            out.push(first.to_ascii_uppercase());
            out.push_str(&chars.as_str().to_ascii_lowercase());
            out
        }
        None => String::new(),
    }
}

/// 回線コードとサービス種別からサービス区分を導出する
pub fn derive_category(code: &str, service_type: &str) -> String {
    let base = format_text(service_type.split(':').next().unwrap_or_default());

    let Some(fifth) = code.chars().nth(4) else {
        return base;
    };
    if !BROADBAND_MARKERS.contains(&fifth.to_ascii_uppercase()) {
        return base;
    }

    let lowered = service_type.trim().to_lowercase();
    let compact: String = lowered
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect();

    if lowered.contains("data") || lowered.starts_with("data") || compact.starts_with("data") {
        BROADBAND.to_string()
    } else {
        base
    }
}
