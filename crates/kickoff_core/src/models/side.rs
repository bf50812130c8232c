use serde::{Deserialize, Serialize};

/// Match side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn flip(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }

    pub fn is_home(self) -> bool {
        matches!(self, Side::Home)
    }

    /// Stable byte code used when hashing minute seeds.
    pub fn code(self) -> u8 {
        match self {
            Side::Home => 0,
            Side::Away => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Home => "home",
            Side::Away => "away",
        }
    }
}

/// 누적 스코어
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Score {
    pub home: u16,
    pub away: u16,
}

impl Score {
    pub fn get(&self, side: Side) -> u16 {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }

    pub fn add_goal(&mut self, side: Side) {
        match side {
            Side::Home => self.home = self.home.saturating_add(1),
            Side::Away => self.away = self.away.saturating_add(1),
        }
    }

    /// Goal difference from `side`'s point of view.
    pub fn diff_for(&self, side: Side) -> i32 {
        let (own, other) = match side {
            Side::Home => (self.home, self.away),
            Side::Away => (self.away, self.home),
        };
        own as i32 - other as i32
    }

    pub fn since(&self, earlier: &Score) -> Score {
        Score {
            home: self.home.saturating_sub(earlier.home),
            away: self.away.saturating_sub(earlier.away),
        }
    }
}

/// Per-side counter (final-third entries, possession seconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SideCounts {
    pub home: u32,
    pub away: u32,
}

impl SideCounts {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }

    pub fn add(&mut self, side: Side, amount: u32) {
        match side {
            Side::Home => self.home += amount,
            Side::Away => self.away += amount,
        }
    }

    pub fn total(&self) -> u32 {
        self.home + self.away
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_flip_roundtrip() {
        assert_eq!(Side::Home.flip(), Side::Away);
        assert_eq!(Side::Home.flip().flip(), Side::Home);
    }

    #[test]
    fn test_score_diff_and_delta() {
        let mut score = Score::default();
        score.add_goal(Side::Home);
        score.add_goal(Side::Home);
        score.add_goal(Side::Away);
        assert_eq!(score.diff_for(Side::Home), 1);
        assert_eq!(score.diff_for(Side::Away), -1);

        let earlier = Score { home: 1, away: 1 };
        assert_eq!(score.since(&earlier), Score { home: 1, away: 0 });
    }
}
