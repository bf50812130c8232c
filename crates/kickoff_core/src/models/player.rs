use crate::player::personality::PersonalityTraits;
use serde::{Deserialize, Serialize};

/// Neutral value substituted for missing or non-finite skill attributes.
pub const NEUTRAL_ATTRIBUTE: f32 = 70.0;
pub const ATTRIBUTE_MIN: f32 = 0.0;
pub const ATTRIBUTE_MAX: f32 = 100.0;

/// Player line classification used for actor selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Line {
    GK,
    DEF,
    MID,
    FWD,
}

impl Line {
    pub const ALL: [Line; 4] = [Line::GK, Line::DEF, Line::MID, Line::FWD];

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Line::GK => "GK",
            Line::DEF => "DEF",
            Line::MID => "MID",
            Line::FWD => "FWD",
        }
    }
}

/// Named skill attribute (compile-time accessor into [`PlayerAttributes`])
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attr {
    // Technical
    BallControl,
    Corners,
    Crossing,
    Dribbling,
    Finishing,
    FirstTouch,
    FreeKicks,
    Heading,
    LongRange,
    Marking,
    Passing,
    PenaltyTaking,
    ShotAccuracy,
    Tackling,
    Technique,
    // Mental
    Aggression,
    Anticipation,
    Bravery,
    Composure,
    Concentration,
    Decisions,
    Determination,
    Flair,
    Leadership,
    OffTheBall,
    Positioning,
    Teamwork,
    Vision,
    WorkRate,
    // Physical
    Acceleration,
    Agility,
    Balance,
    Jumping,
    NaturalFitness,
    Pace,
    Stamina,
    Strength,
    // Goalkeeping
    AerialReach,
    CommandOfArea,
    Communication,
    Distribution,
    Handling,
    OneOnOnes,
    Reflexes,
    RushingOut,
}

impl Attr {
    pub fn name(&self) -> &'static str {
        match self {
            Attr::BallControl => "ball_control",
            Attr::Corners => "corners",
            Attr::Crossing => "crossing",
            Attr::Dribbling => "dribbling",
            Attr::Finishing => "finishing",
            Attr::FirstTouch => "first_touch",
            Attr::FreeKicks => "free_kicks",
            Attr::Heading => "heading",
            Attr::LongRange => "long_range",
            Attr::Marking => "marking",
            Attr::Passing => "passing",
            Attr::PenaltyTaking => "penalty_taking",
            Attr::ShotAccuracy => "shot_accuracy",
            Attr::Tackling => "tackling",
            Attr::Technique => "technique",
            Attr::Aggression => "aggression",
            Attr::Anticipation => "anticipation",
            Attr::Bravery => "bravery",
            Attr::Composure => "composure",
            Attr::Concentration => "concentration",
            Attr::Decisions => "decisions",
            Attr::Determination => "determination",
            Attr::Flair => "flair",
            Attr::Leadership => "leadership",
            Attr::OffTheBall => "off_the_ball",
            Attr::Positioning => "positioning",
            Attr::Teamwork => "teamwork",
            Attr::Vision => "vision",
            Attr::WorkRate => "work_rate",
            Attr::Acceleration => "acceleration",
            Attr::Agility => "agility",
            Attr::Balance => "balance",
            Attr::Jumping => "jumping",
            Attr::NaturalFitness => "natural_fitness",
            Attr::Pace => "pace",
            Attr::Stamina => "stamina",
            Attr::Strength => "strength",
            Attr::AerialReach => "aerial_reach",
            Attr::CommandOfArea => "command_of_area",
            Attr::Communication => "communication",
            Attr::Distribution => "distribution",
            Attr::Handling => "handling",
            Attr::OneOnOnes => "one_on_ones",
            Attr::Reflexes => "reflexes",
            Attr::RushingOut => "rushing_out",
        }
    }
}

/// Fixed-schema skill record (0-100 per attribute).
///
/// Every field falls back to [`NEUTRAL_ATTRIBUTE`] when absent from the
/// incoming document, so a partially filled roster still simulates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerAttributes {
    // Technical (15)
    pub ball_control: f32,
    pub corners: f32,
    pub crossing: f32,
    pub dribbling: f32,
    pub finishing: f32,
    pub first_touch: f32,
    pub free_kicks: f32,
    pub heading: f32,
    #[serde(alias = "long_shots")]
    pub long_range: f32,
    pub marking: f32,
    pub passing: f32,
    #[serde(alias = "penalty_kicks")]
    pub penalty_taking: f32,
    #[serde(alias = "accuracy")]
    pub shot_accuracy: f32,
    pub tackling: f32,
    pub technique: f32,

    // Mental (14)
    pub aggression: f32,
    pub anticipation: f32,
    pub bravery: f32,
    pub composure: f32,
    pub concentration: f32,
    pub decisions: f32,
    pub determination: f32,
    pub flair: f32,
    pub leadership: f32,
    pub off_the_ball: f32,
    pub positioning: f32,
    pub teamwork: f32,
    pub vision: f32,
    pub work_rate: f32,

    // Physical (8)
    pub acceleration: f32,
    pub agility: f32,
    pub balance: f32,
    pub jumping: f32,
    pub natural_fitness: f32,
    pub pace: f32,
    pub stamina: f32,
    pub strength: f32,

    // Goalkeeping (8) - outfield players usually carry low values here
    #[serde(alias = "aerial")]
    pub aerial_reach: f32,
    #[serde(alias = "command")]
    pub command_of_area: f32,
    pub communication: f32,
    pub distribution: f32,
    pub handling: f32,
    pub one_on_ones: f32,
    pub reflexes: f32,
    pub rushing_out: f32,
}

impl Default for PlayerAttributes {
    fn default() -> Self {
        Self::uniform(NEUTRAL_ATTRIBUTE)
    }
}

impl PlayerAttributes {
    /// Every attribute set to the same value (test fixtures, placeholders).
    pub fn uniform(value: f32) -> Self {
        Self {
            ball_control: value,
            corners: value,
            crossing: value,
            dribbling: value,
            finishing: value,
            first_touch: value,
            free_kicks: value,
            heading: value,
            long_range: value,
            marking: value,
            passing: value,
            penalty_taking: value,
            shot_accuracy: value,
            tackling: value,
            technique: value,
            aggression: value,
            anticipation: value,
            bravery: value,
            composure: value,
            concentration: value,
            decisions: value,
            determination: value,
            flair: value,
            leadership: value,
            off_the_ball: value,
            positioning: value,
            teamwork: value,
            vision: value,
            work_rate: value,
            acceleration: value,
            agility: value,
            balance: value,
            jumping: value,
            natural_fitness: value,
            pace: value,
            stamina: value,
            strength: value,
            aerial_reach: value,
            command_of_area: value,
            communication: value,
            distribution: value,
            handling: value,
            one_on_ones: value,
            reflexes: value,
            rushing_out: value,
        }
    }

    fn raw(&self, attr: Attr) -> f32 {
        match attr {
            Attr::BallControl => self.ball_control,
            Attr::Corners => self.corners,
            Attr::Crossing => self.crossing,
            Attr::Dribbling => self.dribbling,
            Attr::Finishing => self.finishing,
            Attr::FirstTouch => self.first_touch,
            Attr::FreeKicks => self.free_kicks,
            Attr::Heading => self.heading,
            Attr::LongRange => self.long_range,
            Attr::Marking => self.marking,
            Attr::Passing => self.passing,
            Attr::PenaltyTaking => self.penalty_taking,
            Attr::ShotAccuracy => self.shot_accuracy,
            Attr::Tackling => self.tackling,
            Attr::Technique => self.technique,
            Attr::Aggression => self.aggression,
            Attr::Anticipation => self.anticipation,
            Attr::Bravery => self.bravery,
            Attr::Composure => self.composure,
            Attr::Concentration => self.concentration,
            Attr::Decisions => self.decisions,
            Attr::Determination => self.determination,
            Attr::Flair => self.flair,
            Attr::Leadership => self.leadership,
            Attr::OffTheBall => self.off_the_ball,
            Attr::Positioning => self.positioning,
            Attr::Teamwork => self.teamwork,
            Attr::Vision => self.vision,
            Attr::WorkRate => self.work_rate,
            Attr::Acceleration => self.acceleration,
            Attr::Agility => self.agility,
            Attr::Balance => self.balance,
            Attr::Jumping => self.jumping,
            Attr::NaturalFitness => self.natural_fitness,
            Attr::Pace => self.pace,
            Attr::Stamina => self.stamina,
            Attr::Strength => self.strength,
            Attr::AerialReach => self.aerial_reach,
            Attr::CommandOfArea => self.command_of_area,
            Attr::Communication => self.communication,
            Attr::Distribution => self.distribution,
            Attr::Handling => self.handling,
            Attr::OneOnOnes => self.one_on_ones,
            Attr::Reflexes => self.reflexes,
            Attr::RushingOut => self.rushing_out,
        }
    }

    /// Sanitized attribute value in [0, 100].
    ///
    /// NaN/inf collapse to the neutral default instead of poisoning every
    /// probability downstream.
    #[inline]
    pub fn get(&self, attr: Attr) -> f32 {
        let value = self.raw(attr);
        if value.is_finite() {
            value.clamp(ATTRIBUTE_MIN, ATTRIBUTE_MAX)
        } else {
            NEUTRAL_ATTRIBUTE
        }
    }

    /// 0-1 정규화
    #[inline]
    pub fn normalized(&self, attr: Attr) -> f32 {
        self.get(attr) / ATTRIBUTE_MAX
    }

    /// Mean of a named subset. An empty subset averages to neutral.
    pub fn average(&self, subset: &[Attr]) -> f32 {
        if subset.is_empty() {
            return NEUTRAL_ATTRIBUTE;
        }
        let sum: f32 = subset.iter().map(|a| self.get(*a)).sum();
        sum / subset.len() as f32
    }

    /// Weighted 0-1 blend over `(attr, weight)` pairs.
    pub fn blend(&self, weighted: &[(Attr, f32)]) -> f32 {
        let total: f32 = weighted.iter().map(|(_, w)| *w).sum();
        if total <= 0.0 {
            return NEUTRAL_ATTRIBUTE / ATTRIBUTE_MAX;
        }
        weighted.iter().map(|(a, w)| self.normalized(*a) * w).sum::<f32>() / total
    }
}

/// Read-only per-tick view of a player, owned by the roster collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: u32,
    pub name: String,
    pub line: Line,
    #[serde(default)]
    pub attributes: PlayerAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traits: Option<PersonalityTraits>,
}

impl PlayerSnapshot {
    pub fn new(id: u32, name: impl Into<String>, line: Line) -> Self {
        Self {
            id,
            name: name.into(),
            line,
            attributes: PlayerAttributes::default(),
            traits: None,
        }
    }

    pub fn with_attributes(mut self, attributes: PlayerAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_traits(mut self, traits: PersonalityTraits) -> Self {
        self.traits = Some(traits);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_attributes_default_to_neutral() {
        let attrs: PlayerAttributes = serde_json::from_str(r#"{"passing": 90}"#).unwrap();
        assert_eq!(attrs.get(Attr::Passing), 90.0);
        assert_eq!(attrs.get(Attr::Reflexes), NEUTRAL_ATTRIBUTE);
    }

    #[test]
    fn test_aliases_accepted() {
        let attrs: PlayerAttributes =
            serde_json::from_str(r#"{"long_shots": 81, "accuracy": 77, "command": 60}"#).unwrap();
        assert_eq!(attrs.long_range, 81.0);
        assert_eq!(attrs.shot_accuracy, 77.0);
        assert_eq!(attrs.command_of_area, 60.0);
    }

    #[test]
    fn test_non_finite_replaced_by_neutral() {
        let mut attrs = PlayerAttributes::default();
        attrs.finishing = f32::NAN;
        attrs.pace = f32::INFINITY;
        attrs.tackling = 140.0;
        assert_eq!(attrs.get(Attr::Finishing), NEUTRAL_ATTRIBUTE);
        assert_eq!(attrs.get(Attr::Pace), NEUTRAL_ATTRIBUTE);
        assert_eq!(attrs.get(Attr::Tackling), ATTRIBUTE_MAX);
    }

    #[test]
    fn test_average_and_blend() {
        let mut attrs = PlayerAttributes::uniform(50.0);
        attrs.passing = 90.0;
        attrs.vision = 70.0;
        assert!((attrs.average(&[Attr::Passing, Attr::Vision]) - 80.0).abs() < 1e-4);
        assert_eq!(attrs.average(&[]), NEUTRAL_ATTRIBUTE);

        let blended = attrs.blend(&[(Attr::Passing, 3.0), (Attr::Vision, 1.0)]);
        assert!((blended - 0.85).abs() < 1e-4);
    }

    #[test]
    fn test_line_serde_uppercase() {
        let line: Line = serde_json::from_str("\"FWD\"").unwrap();
        assert_eq!(line, Line::FWD);
        assert_eq!(serde_json::to_string(&Line::GK).unwrap(), "\"GK\"");
    }
}
