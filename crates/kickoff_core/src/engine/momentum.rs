//! Match momentum (home perspective, [-1, 1])

use super::config::MomentumConfig;
use crate::models::Side;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentumEvent {
    Goal,
    Shot,
    Dribble,
    /// Credited to the side that won the ball.
    Turnover,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Momentum(f32);

impl Momentum {
    pub fn new(value: f32) -> Self {
        if value.is_finite() {
            Momentum(value.clamp(-1.0, 1.0))
        } else {
            Momentum(0.0)
        }
    }

    /// Raw value, positive = home on top.
    pub fn value(&self) -> f32 {
        self.0
    }

    /// Signed view for `side`.
    pub fn for_side(&self, side: Side) -> f32 {
        match side {
            Side::Home => self.0,
            Side::Away => -self.0,
        }
    }

    /// Move towards `side` by `amount`.
    pub fn push(&mut self, side: Side, amount: f32) {
        let signed = if side.is_home() { amount } else { -amount };
        *self = Momentum::new(self.0 + signed);
    }

    pub fn record(&mut self, event: MomentumEvent, side: Side, cfg: &MomentumConfig) {
        let amount = match event {
            MomentumEvent::Goal => cfg.goal_swing,
            MomentumEvent::Shot => cfg.shot_swing,
            MomentumEvent::Dribble => cfg.dribble_swing,
            MomentumEvent::Turnover => cfg.turnover_swing,
        };
        self.push(side, amount);
    }

    /// Per-minute decay towards zero.
    pub fn decay(&mut self, cfg: &MomentumConfig) {
        *self = Momentum::new(self.0 * cfg.decay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_side_is_antisymmetric() {
        let m = Momentum::new(0.4);
        assert_eq!(m.for_side(Side::Home), 0.4);
        assert_eq!(m.for_side(Side::Away), -0.4);
    }

    #[test]
    fn test_push_is_bounded() {
        let cfg = MomentumConfig::default();
        let mut m = Momentum::default();
        for _ in 0..10 {
            m.record(MomentumEvent::Goal, Side::Away, &cfg);
        }
        assert_eq!(m.value(), -1.0);
        assert_eq!(Momentum::new(f32::NAN).value(), 0.0);
    }

    #[test]
    fn test_decay_shrinks_towards_zero() {
        let cfg = MomentumConfig::default();
        let mut m = Momentum::new(0.5);
        m.decay(&cfg);
        assert!(m.value() < 0.5 && m.value() > 0.0);
    }
}
