//! Deterministic minute seeding and weighted choice
//!
//! 분(minute) 단위 RNG는 (seed, minute, 시작 상태, 소유권, 존)을 SHA-256으로
//! 해시한 하위 64비트로 ChaCha8 스트림을 만든다. 같은 입력이면 어떤
//! 프로세스/플랫폼에서도 같은 결과가 나온다.
//!
//! ## 원칙
//!
//! 1. 플랫폼/버전에 안정적인 해시만 사용 (`DefaultHasher` 금지)
//! 2. 도메인 태그로 macro/action 스트림 분리
//! 3. 누적합 스캔, 부동소수 오차 시 마지막 항목으로 폴백

use super::state::MacroState;
use super::zone::{MacroZone, PitchZone};
use crate::models::Side;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

/// Stream tags so the two simulation modes never share a stream.
pub mod domain {
    pub const MACRO_MINUTE: u8 = 0x4d;
    pub const ACTION_MINUTE: u8 = 0x41;
}

fn seed_from_digest(bytes: &[u8]) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    let mut low = [0u8; 8];
    low.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(low)
}

/// 64-bit seed for one macro minute.
pub fn minute_seed(
    seed: i64,
    minute: u32,
    state: MacroState,
    possession: Side,
    zone: MacroZone,
) -> u64 {
    let mut buf = Vec::with_capacity(16);
    buf.push(domain::MACRO_MINUTE);
    buf.extend_from_slice(&seed.to_le_bytes());
    buf.extend_from_slice(&minute.to_le_bytes());
    buf.push(state.code());
    buf.push(possession.code());
    buf.push(zone.code());
    seed_from_digest(&buf)
}

pub fn minute_rng(
    seed: i64,
    minute: u32,
    state: MacroState,
    possession: Side,
    zone: MacroZone,
) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(minute_seed(seed, minute, state, possession, zone))
}

/// Stream for one action-mode minute.
pub fn action_rng(seed: i64, minute: u32, possession: Side, zone: PitchZone) -> ChaCha8Rng {
    let mut buf = Vec::with_capacity(16);
    buf.push(domain::ACTION_MINUTE);
    buf.extend_from_slice(&seed.to_le_bytes());
    buf.extend_from_slice(&minute.to_le_bytes());
    buf.push(possession.code());
    buf.push(zone.code());
    ChaCha8Rng::seed_from_u64(seed_from_digest(&buf))
}

/// Cumulative scan over `(item, weight)` pairs with `u` in [0, 1).
///
/// Returns the first entry whose cumulative mass reaches `u`, or the last
/// entry when rounding leaves `u` above the total. `None` only for an empty
/// table. Zero-weight entries are never picked by the scan.
pub fn weighted_choice<T>(items: &[(T, f64)], u: f64) -> Option<&T> {
    let mut cumulative = 0.0;
    for (item, weight) in items {
        if *weight <= 0.0 {
            continue;
        }
        cumulative += weight;
        if u <= cumulative {
            return Some(item);
        }
    }
    items.last().map(|(item, _)| item)
}

/// Draw `u` from `rng` and scan. Weights need not be normalized.
pub fn sample<'a, T, R: Rng + ?Sized>(items: &'a [(T, f64)], rng: &mut R) -> Option<&'a T> {
    let total: f64 = items.iter().map(|(_, w)| w.max(0.0)).sum();
    if total <= 0.0 {
        return items.last().map(|(item, _)| item);
    }
    let u = rng.gen::<f64>() * total;
    weighted_choice(items, u)
}

/// Rescale weights to sum to 1. A zero table is left untouched.
pub fn renormalize<T>(items: &mut [(T, f64)]) {
    let total: f64 = items.iter().map(|(_, w)| *w).sum();
    if total > 0.0 {
        for (_, w) in items.iter_mut() {
            *w /= total;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minute_seed_is_stable() {
        let a = minute_seed(42, 1, MacroState::Kickoff, Side::Home, MacroZone::Mid);
        let b = minute_seed(42, 1, MacroState::Kickoff, Side::Home, MacroZone::Mid);
        assert_eq!(a, b);
    }

    #[test]
    fn test_minute_seed_varies_with_each_input() {
        let base = minute_seed(42, 1, MacroState::Kickoff, Side::Home, MacroZone::Mid);
        assert_ne!(base, minute_seed(43, 1, MacroState::Kickoff, Side::Home, MacroZone::Mid));
        assert_ne!(base, minute_seed(42, 2, MacroState::Kickoff, Side::Home, MacroZone::Mid));
        assert_ne!(base, minute_seed(42, 1, MacroState::Gk, Side::Home, MacroZone::Mid));
        assert_ne!(base, minute_seed(42, 1, MacroState::Kickoff, Side::Away, MacroZone::Mid));
        assert_ne!(base, minute_seed(42, 1, MacroState::Kickoff, Side::Home, MacroZone::Final));
    }

    #[test]
    fn test_rng_streams_replay() {
        let mut r1 = minute_rng(-7, 30, MacroState::OpenPlayMid, Side::Away, MacroZone::Mid);
        let mut r2 = minute_rng(-7, 30, MacroState::OpenPlayMid, Side::Away, MacroZone::Mid);
        let a: Vec<u32> = (0..8).map(|_| r1.gen()).collect();
        let b: Vec<u32> = (0..8).map(|_| r2.gen()).collect();
        assert_eq!(a, b);

        let mut left = action_rng(1, 1, Side::Home, PitchZone::MidLeft);
        let mut right = action_rng(1, 1, Side::Home, PitchZone::MidRight);
        assert_ne!(left.gen::<u64>(), right.gen::<u64>());
    }

    #[test]
    fn test_weighted_choice_cumulative_scan() {
        let table = [("a", 0.2), ("b", 0.5), ("c", 0.3)];
        assert_eq!(weighted_choice(&table, 0.0), Some(&"a"));
        assert_eq!(weighted_choice(&table, 0.2), Some(&"a"));
        assert_eq!(weighted_choice(&table, 0.21), Some(&"b"));
        assert_eq!(weighted_choice(&table, 0.99), Some(&"c"));
        // rounding overflow falls back to the last entry
        assert_eq!(weighted_choice(&table, 1.5), Some(&"c"));
        let empty: [(&str, f64); 0] = [];
        assert_eq!(weighted_choice(&empty, 0.5), None);

        let gated = [("never", 0.0), ("always", 1.0)];
        assert_eq!(weighted_choice(&gated, 0.0), Some(&"always"));
    }

    #[test]
    fn test_renormalize() {
        let mut table = vec![("x", 2.0), ("y", 6.0)];
        renormalize(&mut table);
        assert!((table[0].1 - 0.25).abs() < 1e-12);
        assert!((table[1].1 - 0.75).abs() < 1e-12);
    }
}
