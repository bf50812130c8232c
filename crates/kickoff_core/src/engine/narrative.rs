//! Commentary rendering
//!
//! Fluent (FTL) 템플릿 기반 해설. 메시지 ID는 이벤트의
//! (출발 상태, 도착 상태, 턴오버, 결과)에서 결정되고, 선수 이름이 있으면
//! `-actor` 변형을 우선 사용한다.
//!
//! 번들은 렌더링마다 빌린 리소스로 새로 만든다 (`FluentBundle`은 `Sync`가
//! 아니므로 엔진에 보관하지 않는다).

use super::state::MacroState;
use crate::data::commentary_source;
use crate::error::{EngineError, Result};
use crate::models::{ActionEvent, EngineEvent, Side};
use fluent::{FluentArgs, FluentBundle, FluentResource};
use tracing::{debug, warn};
use unic_langid::LanguageIdentifier;

/// Fallback line when a minute produced no text.
pub const QUIET_MINUTE: &str = "quiet-minute";

/// Display names for both sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamNames {
    pub home: String,
    pub away: String,
}

impl TeamNames {
    pub fn new(home: impl Into<String>, away: impl Into<String>) -> Self {
        Self { home: home.into(), away: away.into() }
    }

    pub fn get(&self, side: Side) -> &str {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }
}

/// Template id for a macro event.
pub fn message_id(event: &EngineEvent) -> String {
    if let Some(outcome) = &event.outcome {
        return outcome.to_lowercase().replace(':', "-");
    }
    let id = match (event.from, event.to) {
        (MacroState::Kickoff, _) if !event.turnover => "kickoff",
        (_, MacroState::Shot) => "shot-chance",
        (_, MacroState::Foul) => "foul-called",
        (_, MacroState::Out) => "out-of-play",
        (_, MacroState::Gk) => "gk-restart",
        _ if event.turnover => "turnover",
        (from, to) if from == to => "keep-ball",
        (_, MacroState::OpenPlayMid) if event.from == MacroState::OpenPlayDef => "advance-mid",
        (_, MacroState::OpenPlayFinal) => "advance-final",
        _ => "drop-back",
    };
    id.to_string()
}

/// Template id for an action event.
pub fn action_message_id(event: &ActionEvent) -> String {
    if event.success {
        format!("action-{}", event.kind.name())
    } else {
        format!("action-{}-failed", event.kind.name())
    }
}

/// Localized commentary renderer.
#[derive(Debug)]
pub struct Commentary {
    locale: LanguageIdentifier,
    resource: FluentResource,
}

impl Commentary {
    /// Parse `source` and check it carries the fallback message.
    pub fn new(locale: LanguageIdentifier, source: &str) -> Result<Self> {
        let resource = FluentResource::try_new(source.to_string()).map_err(|(_, errors)| {
            EngineError::Commentary(format!("{} FTL parse error(s) for {}", errors.len(), locale))
        })?;
        let commentary = Self { locale, resource };
        let bundle = commentary.bundle()?;
        if !bundle.has_message(QUIET_MINUTE) {
            return Err(EngineError::Commentary(format!(
                "missing '{}' message for {}",
                QUIET_MINUTE, commentary.locale
            )));
        }
        Ok(commentary)
    }

    /// Embedded templates for `locale`, falling back to en-US.
    pub fn embedded(locale: &LanguageIdentifier) -> Result<Self> {
        let tag = locale.to_string();
        match commentary_source(&tag) {
            Some(source) => Self::new(locale.clone(), source),
            None => {
                warn!(locale = %tag, "no embedded commentary, using en-US");
                let fallback: LanguageIdentifier = "en-US"
                    .parse()
                    .map_err(|_| EngineError::Commentary("invalid fallback locale".into()))?;
                let source = commentary_source("en-US")
                    .ok_or_else(|| EngineError::Commentary("en-US commentary missing".into()))?;
                Self::new(fallback, source)
            }
        }
    }

    pub fn locale(&self) -> &LanguageIdentifier {
        &self.locale
    }

    fn bundle(&self) -> Result<FluentBundle<&FluentResource>> {
        let mut bundle = FluentBundle::new(vec![self.locale.clone()]);
        bundle.set_use_isolating(false);
        bundle
            .add_resource(&self.resource)
            .map_err(|errors| EngineError::Commentary(format!("{:?}", errors)))?;
        Ok(bundle)
    }

    fn format(bundle: &FluentBundle<&FluentResource>, id: &str, args: &FluentArgs) -> Option<String> {
        let message = bundle.get_message(id)?;
        let pattern = message.value()?;
        let mut errors = vec![];
        let text = bundle.format_pattern(pattern, Some(args), &mut errors);
        if !errors.is_empty() {
            debug!(id, ?errors, "commentary formatting errors");
        }
        Some(text.into_owned())
    }

    /// `-actor` variant when a player name is given and the template exists.
    fn format_with_actor(
        bundle: &FluentBundle<&FluentResource>,
        id: &str,
        has_actor: bool,
        args: &FluentArgs,
    ) -> Option<String> {
        if has_actor {
            let actor_id = format!("{}-actor", id);
            if bundle.has_message(&actor_id) {
                return Self::format(bundle, &actor_id, args);
            }
        }
        Self::format(bundle, id, args)
    }

    fn event_text(
        bundle: &FluentBundle<&FluentResource>,
        event: &EngineEvent,
        names: &TeamNames,
    ) -> Option<String> {
        // shots are told from the shooter's side, everything else from the
        // side holding the ball afterwards
        let team = if event.from == MacroState::Shot { event.acting_side() } else { event.possession };
        let mut args = FluentArgs::new();
        args.set("team", names.get(team).to_string());
        args.set("opponent", names.get(team.flip()).to_string());
        args.set("zone", event.zone.name());
        if let Some(actor) = &event.actor {
            args.set("player", actor.name.clone());
        }
        Self::format_with_actor(bundle, &message_id(event), event.actor.is_some(), &args)
    }

    /// Single event sentence, `None` when no template matches.
    pub fn render_event(&self, event: &EngineEvent, names: &TeamNames) -> Option<String> {
        let bundle = self.bundle().ok()?;
        Self::event_text(&bundle, event, names)
    }

    /// Fill each event's narrative and return the minute's lines. A minute
    /// with no rendered text yields the quiet-minute line.
    pub fn narrate(&self, events: &mut [EngineEvent], names: &TeamNames) -> Vec<String> {
        let bundle = match self.bundle() {
            Ok(bundle) => bundle,
            Err(err) => {
                warn!(error = %err, "commentary bundle unavailable");
                return Vec::new();
            }
        };
        let mut lines = Vec::with_capacity(events.len());
        for event in events.iter_mut() {
            event.narrative = Self::event_text(&bundle, event, names);
            if let Some(text) = &event.narrative {
                lines.push(text.clone());
            }
        }
        if lines.is_empty() {
            if let Some(quiet) = Self::format(&bundle, QUIET_MINUTE, &FluentArgs::new()) {
                lines.push(quiet);
            }
        }
        lines
    }

    /// Fill commentary on action events.
    pub fn narrate_actions(&self, actions: &mut [ActionEvent]) {
        let Ok(bundle) = self.bundle() else {
            return;
        };
        for action in actions.iter_mut() {
            let mut args = FluentArgs::new();
            let name = action.actor.as_ref().map_or("A player", |a| a.name.as_str());
            args.set("player", name.to_string());
            action.commentary = Self::format(&bundle, &action_message_id(action), &args);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::zone::{MacroZone, PitchZone};
    use crate::models::{ActionKind, ActorRef};

    fn commentary() -> Commentary {
        Commentary::embedded(&"en-US".parse().unwrap()).unwrap()
    }

    fn names() -> TeamNames {
        TeamNames::new("Rovers", "United")
    }

    fn event(from: MacroState, to: MacroState, turnover: bool, outcome: Option<&str>) -> EngineEvent {
        EngineEvent {
            tick: 0,
            from,
            to,
            possession: Side::Home,
            zone: MacroZone::Mid,
            turnover,
            outcome: outcome.map(str::to_string),
            actor: None,
            narrative: None,
        }
    }

    #[test]
    fn test_message_ids() {
        use MacroState::*;
        assert_eq!(message_id(&event(Kickoff, OpenPlayMid, false, None)), "kickoff");
        assert_eq!(message_id(&event(OpenPlayDef, OpenPlayMid, false, None)), "advance-mid");
        assert_eq!(message_id(&event(OpenPlayMid, OpenPlayFinal, false, None)), "advance-final");
        assert_eq!(message_id(&event(OpenPlayFinal, OpenPlayMid, false, None)), "drop-back");
        assert_eq!(message_id(&event(OpenPlayMid, OpenPlayMid, true, None)), "turnover");
        assert_eq!(message_id(&event(OpenPlayMid, OpenPlayMid, false, None)), "keep-ball");
        assert_eq!(message_id(&event(OpenPlayFinal, Shot, false, None)), "shot-chance");
        assert_eq!(message_id(&event(Shot, Kickoff, true, Some("SHOT:goal"))), "shot-goal");
        assert_eq!(message_id(&event(Foul, OpenPlayMid, true, Some("FOUL:flip"))), "foul-flip");
        assert_eq!(message_id(&event(Gk, OpenPlayDef, false, Some("GK:restart"))), "gk-restart");
    }

    #[test]
    fn test_every_event_id_has_template() {
        let c = commentary();
        let bundle = c.bundle().unwrap();
        let mut ids = vec![
            "kickoff", "advance-mid", "advance-final", "drop-back", "keep-ball", "turnover",
            "shot-chance", "foul-called", "out-of-play", "gk-restart", "foul-retain", "foul-flip",
            "out-retain", "out-flip",
        ]
        .into_iter()
        .map(str::to_string)
        .collect::<Vec<_>>();
        for result in crate::engine::spec::ShotResult::ALL {
            ids.push(format!("shot-{}", result.name()));
        }
        for id in ids {
            assert!(bundle.has_message(&id), "missing {}", id);
        }
    }

    #[test]
    fn test_goal_credits_shooting_side() {
        let c = commentary();
        let mut goal = event(MacroState::Shot, MacroState::Kickoff, true, Some("SHOT:goal"));
        goal.possession = Side::Away;
        let text = c.render_event(&goal, &names()).unwrap();
        assert_eq!(text, "GOAL! Rovers score!");

        goal.actor = Some(ActorRef { id: 9, name: "Vardy".into(), side: Side::Home });
        let text = c.render_event(&goal, &names()).unwrap();
        assert_eq!(text, "GOAL! Vardy scores for Rovers!");
    }

    #[test]
    fn test_zone_selector() {
        let c = commentary();
        let mut e = event(MacroState::OpenPlayMid, MacroState::OpenPlayFinal, true, None);
        e.zone = MacroZone::Final;
        let text = c.render_event(&e, &names()).unwrap();
        assert_eq!(text, "United lose it and Rovers take over high up the pitch.");
    }

    #[test]
    fn test_quiet_minute_fallback() {
        let c = commentary();
        let lines = c.narrate(&mut [], &names());
        assert_eq!(lines, vec!["A quiet minute, neither side able to take control.".to_string()]);
    }

    #[test]
    fn test_action_commentary() {
        let c = commentary();
        let mut actions = vec![ActionEvent {
            index: 0,
            side: Side::Home,
            kind: ActionKind::Dribble,
            success: false,
            zone: PitchZone::MidCentre,
            actor: Some(ActorRef { id: 7, name: "Saka".into(), side: Side::Home }),
            target: None,
            goal: false,
            commentary: None,
        }];
        c.narrate_actions(&mut actions);
        assert_eq!(actions[0].commentary.as_deref(), Some("Saka is dispossessed."));
    }

    #[test]
    fn test_missing_fallback_message_rejected() {
        let err = Commentary::new("en-US".parse().unwrap(), "hello = Hi\n").unwrap_err();
        assert!(matches!(err, EngineError::Commentary(_)));
    }

    #[test]
    fn test_unknown_locale_falls_back() {
        let c = Commentary::embedded(&"fr-FR".parse().unwrap()).unwrap();
        assert_eq!(c.locale().to_string(), "en-US");
    }
}
