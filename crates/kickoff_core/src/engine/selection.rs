//! Per-tick attacker/defender selection
//!
//! | context  | attacker | defender |
//! |----------|----------|----------|
//! | FINAL    | FWD      | DEF      |
//! | MID      | MID      | MID      |
//! | DEF      | DEF      | FWD      |
//! | GK state | GK       | FWD      |
//! | SHOT     | FWD      | GK       |
//!
//! 선호 라인이 비어 있으면 MID → DEF 순으로 폴백한다.

use super::state::MacroState;
use super::zone::MacroZone;
use crate::models::{Line, PlayerSnapshot, Roster, Rosters, Side};
use rand::Rng;

/// Preferred (attacker, defender) lines for a state/zone.
pub fn preferred_lines(state: MacroState, zone: MacroZone) -> (Line, Line) {
    match state {
        MacroState::Shot => (Line::FWD, Line::GK),
        MacroState::Gk => (Line::GK, Line::FWD),
        _ => match zone {
            MacroZone::Final => (Line::FWD, Line::DEF),
            MacroZone::Mid => (Line::MID, Line::MID),
            MacroZone::Def => (Line::DEF, Line::FWD),
        },
    }
}

/// Random player from `preferred`, else midfield, else defense.
pub fn pick_player<'a, R: Rng + ?Sized>(
    roster: &'a Roster,
    preferred: Line,
    rng: &mut R,
) -> Option<&'a PlayerSnapshot> {
    for line in [preferred, Line::MID, Line::DEF] {
        let players = roster.line(line);
        if !players.is_empty() {
            return Some(&players[rng.gen_range(0..players.len())]);
        }
    }
    None
}

/// The two players contesting one tick.
#[derive(Debug, Clone, Copy)]
pub struct Matchup<'a> {
    pub attacking_side: Side,
    pub attacker: Option<&'a PlayerSnapshot>,
    pub defender: Option<&'a PlayerSnapshot>,
}

impl<'a> Matchup<'a> {
    pub fn empty(attacking_side: Side) -> Self {
        Self { attacking_side, attacker: None, defender: None }
    }
}

/// No rosters means no draws from `rng`.
pub fn select_matchup<'a, R: Rng + ?Sized>(
    rosters: Option<&'a Rosters>,
    possession: Side,
    state: MacroState,
    zone: MacroZone,
    rng: &mut R,
) -> Matchup<'a> {
    let Some(rosters) = rosters else {
        return Matchup::empty(possession);
    };
    let (att_line, def_line) = preferred_lines(state, zone);
    let attacker = pick_player(rosters.side(possession), att_line, rng);
    let defender = pick_player(rosters.side(possession.flip()), def_line, rng);
    Matchup { attacking_side: possession, attacker, defender }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn squad(base_id: u32) -> Roster {
        Roster::from_players(vec![
            PlayerSnapshot::new(base_id, "Keeper", Line::GK),
            PlayerSnapshot::new(base_id + 1, "Back", Line::DEF),
            PlayerSnapshot::new(base_id + 2, "Pivot", Line::MID),
            PlayerSnapshot::new(base_id + 3, "Nine", Line::FWD),
        ])
    }

    #[test]
    fn test_preferred_lines_table() {
        assert_eq!(preferred_lines(MacroState::OpenPlayFinal, MacroZone::Final), (Line::FWD, Line::DEF));
        assert_eq!(preferred_lines(MacroState::OpenPlayMid, MacroZone::Mid), (Line::MID, Line::MID));
        assert_eq!(preferred_lines(MacroState::OpenPlayDef, MacroZone::Def), (Line::DEF, Line::FWD));
        assert_eq!(preferred_lines(MacroState::Gk, MacroZone::Def), (Line::GK, Line::FWD));
        assert_eq!(preferred_lines(MacroState::Shot, MacroZone::Final), (Line::FWD, Line::GK));
    }

    #[test]
    fn test_shot_matchup_uses_forward_and_keeper() {
        let rosters = Rosters::new(squad(1), squad(100));
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let m = select_matchup(Some(&rosters), Side::Away, MacroState::Shot, MacroZone::Final, &mut rng);
        assert_eq!(m.attacker.map(|p| p.id), Some(103));
        assert_eq!(m.defender.map(|p| p.id), Some(1));
    }

    #[test]
    fn test_fallback_midfield_then_defense() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mids = Roster::from_players(vec![PlayerSnapshot::new(7, "Pivot", Line::MID)]);
        assert_eq!(pick_player(&mids, Line::FWD, &mut rng).map(|p| p.id), Some(7));

        let backs = Roster::from_players(vec![PlayerSnapshot::new(8, "Back", Line::DEF)]);
        assert_eq!(pick_player(&backs, Line::GK, &mut rng).map(|p| p.id), Some(8));

        let keeper_only = Roster::from_players(vec![PlayerSnapshot::new(9, "Keeper", Line::GK)]);
        assert!(pick_player(&keeper_only, Line::FWD, &mut rng).is_none());
    }

    #[test]
    fn test_no_rosters_leaves_rng_untouched() {
        let mut a = ChaCha8Rng::seed_from_u64(5);
        let mut b = ChaCha8Rng::seed_from_u64(5);
        let m = select_matchup(None, Side::Home, MacroState::OpenPlayMid, MacroZone::Mid, &mut a);
        assert!(m.attacker.is_none() && m.defender.is_none());
        assert_eq!(a.gen::<u64>(), b.gen::<u64>());
    }
}
