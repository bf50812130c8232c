//! 분 단위 시뮬레이션 벤치마크

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kickoff_core::engine::narrative::TeamNames;
use kickoff_core::models::{Line, PlayerAttributes, PlayerSnapshot, Roster};
use kickoff_core::{EngineConfig, MatchEngine, MinuteRequest, Rosters, SimulationToken};

fn squad(base: u32) -> Roster {
    let lines = [Line::GK, Line::DEF, Line::DEF, Line::DEF, Line::DEF, Line::MID, Line::MID, Line::MID, Line::FWD, Line::FWD, Line::FWD];
    Roster::from_players(lines.iter().enumerate().map(|(i, line)| {
        let id = base + i as u32;
        PlayerSnapshot::new(id, format!("Player {}", id), *line)
            .with_attributes(PlayerAttributes::uniform(60.0 + (i as f32 * 2.5)))
    }))
}

fn bench_minute(c: &mut Criterion) {
    let engine = MatchEngine::embedded(EngineConfig::default()).expect("engine");
    let rosters = Rosters::new(squad(1), squad(100));
    let request = MinuteRequest::new(42).with_rosters(rosters);

    c.bench_function("simulate_minute", |b| {
        b.iter(|| engine.simulate_minute(black_box(&request)))
    });
}

fn bench_full_match(c: &mut Criterion) {
    let engine = MatchEngine::embedded(EngineConfig::default().with_personality(true)).expect("engine");
    let rosters = Rosters::new(squad(1), squad(100));
    let names = TeamNames::new("Home", "Away");

    c.bench_function("simulate_90_minutes", |b| {
        b.iter(|| {
            let mut token = SimulationToken::fresh(7);
            for _ in 0..90 {
                token = engine.simulate_resumed(7, &token, &names, Some(&rosters)).next_token;
            }
            black_box(token)
        })
    });
}

criterion_group!(benches, bench_minute, bench_full_match);
criterion_main!(benches);
