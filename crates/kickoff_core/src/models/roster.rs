use super::player::{Line, PlayerSnapshot};
use super::side::Side;
use serde::{Deserialize, Serialize};

/// One side's players grouped by line.
///
/// Used for actor selection only; the engine never persists it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub goalkeepers: Vec<PlayerSnapshot>,
    #[serde(default)]
    pub defenders: Vec<PlayerSnapshot>,
    #[serde(default)]
    pub midfielders: Vec<PlayerSnapshot>,
    #[serde(default)]
    pub forwards: Vec<PlayerSnapshot>,
}

impl Roster {
    /// Group a flat player list by each player's line.
    pub fn from_players(players: impl IntoIterator<Item = PlayerSnapshot>) -> Self {
        let mut roster = Roster::default();
        for player in players {
            match player.line {
                Line::GK => roster.goalkeepers.push(player),
                Line::DEF => roster.defenders.push(player),
                Line::MID => roster.midfielders.push(player),
                Line::FWD => roster.forwards.push(player),
            }
        }
        roster
    }

    pub fn line(&self, line: Line) -> &[PlayerSnapshot] {
        match line {
            Line::GK => &self.goalkeepers,
            Line::DEF => &self.defenders,
            Line::MID => &self.midfielders,
            Line::FWD => &self.forwards,
        }
    }

    pub fn len(&self) -> usize {
        self.goalkeepers.len() + self.defenders.len() + self.midfielders.len() + self.forwards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn players(&self) -> impl Iterator<Item = &PlayerSnapshot> {
        self.goalkeepers
            .iter()
            .chain(self.defenders.iter())
            .chain(self.midfielders.iter())
            .chain(self.forwards.iter())
    }

    pub fn find(&self, id: u32) -> Option<&PlayerSnapshot> {
        self.players().find(|p| p.id == id)
    }

    /// Copy with every trait map removed (baseline comparisons).
    pub fn without_traits(&self) -> Roster {
        let strip = |players: &[PlayerSnapshot]| {
            players
                .iter()
                .cloned()
                .map(|mut p| {
                    p.traits = None;
                    p
                })
                .collect::<Vec<_>>()
        };
        Roster {
            goalkeepers: strip(&self.goalkeepers),
            defenders: strip(&self.defenders),
            midfielders: strip(&self.midfielders),
            forwards: strip(&self.forwards),
        }
    }
}

/// Both sides' rosters for one match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rosters {
    #[serde(default)]
    pub home: Roster,
    #[serde(default)]
    pub away: Roster,
}

impl Rosters {
    pub fn new(home: Roster, away: Roster) -> Self {
        Self { home, away }
    }

    pub fn side(&self, side: Side) -> &Roster {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn without_traits(&self) -> Rosters {
        Rosters { home: self.home.without_traits(), away: self.away.without_traits() }
    }
}
