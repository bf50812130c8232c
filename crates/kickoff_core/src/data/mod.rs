//! 임베딩된 엔진 데이터
//!
//! - 기본 Markov 스펙 (YAML)
//! - 해설 템플릿 (Fluent FTL)

pub mod embedded;

pub use embedded::{commentary_source, COMMENTARY_EN_US_FTL, COMMENTARY_LOCALES, MARKOV_SPEC_YAML};
