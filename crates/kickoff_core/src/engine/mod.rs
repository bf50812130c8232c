//! Simulation engine
//!
//! - `spec`: 외부 Markov 스펙 문서와 검증
//! - `markov`: 1분 = 6틱 매크로 상태 머신 (기본 모드)
//! - `action_sim`: 선수 단위 액션 시뮬레이터 (세부 모드)
//! - `coefficients` / `selection`: 매치업 기반 계수
//! - `probability`: 액션 확률 해석기
//! - `token` / `narrative`: 재개 토큰과 해설

pub mod action_sim;
pub mod coefficients;
pub mod config;
pub mod deterministic;
pub mod markov;
pub mod momentum;
pub mod narrative;
pub mod probability;
pub mod selection;
pub mod spec;
pub mod state;
pub mod token;
pub mod zone;

pub use action_sim::ActionSimulator;
pub use coefficients::{CoefficientPack, CoefficientPair, SideCoefficients};
pub use config::EngineConfig;
pub use markov::MacroEngine;
pub use momentum::Momentum;
pub use narrative::{Commentary, TeamNames};
pub use spec::{MarkovSpec, ShotResult};
pub use state::{MacroState, PossessionDirective};
pub use token::{SimulationToken, TOKEN_VERSION};
pub use zone::{MacroZone, PitchZone};
