//! 임베딩된 데이터 파일
//!
//! `include_str!`로 컴파일 시점에 바이너리에 포함되므로 런타임 파일 I/O가 없다.

// ============================================================================
// 임베딩된 원본
// ============================================================================

/// 기본 Markov 스펙 v1
pub const MARKOV_SPEC_YAML: &str = include_str!("../../../../data/markov_spec.v1.yaml");

/// 영어 해설 템플릿
pub const COMMENTARY_EN_US_FTL: &str = include_str!("../../../../data/commentary.en-US.ftl");

/// Locales with embedded commentary.
pub const COMMENTARY_LOCALES: &[&str] = &["en-US"];

/// FTL source for `locale`, if one is embedded.
pub fn commentary_source(locale: &str) -> Option<&'static str> {
    match locale {
        "en-US" | "en" => Some(COMMENTARY_EN_US_FTL),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_files_present() {
        assert!(MARKOV_SPEC_YAML.contains("OPEN_PLAY_FINAL"));
        assert!(COMMENTARY_EN_US_FTL.contains("quiet-minute"));
        for locale in COMMENTARY_LOCALES {
            assert!(commentary_source(locale).is_some());
        }
        assert!(commentary_source("xx-XX").is_none());
    }
}
