// Native integration tests for the session state machine, spawner, motion and
// hit testing. Timestamps are fed manually and the RNG is seeded, so every run
// is deterministic.
//
// A useful trick used throughout: ticking with an unchanged timestamp advances
// motion (one step per tick) without ever triggering the spawn timer, which
// isolates exit handling from spawning.

use std::collections::HashSet;

use trash_dash::{GameConfig, GameSession, Phase, SpawnRng, TrashKind};

fn session() -> GameSession {
    GameSession::new(GameConfig::fullscreen(), SpawnRng::new(7))
}

#[test]
fn new_session_is_ready_with_full_lives() {
    let s = session();
    assert_eq!(s.phase(), Phase::Ready);
    assert_eq!(s.score(), 0);
    assert_eq!(s.lives(), 5);
    assert!(s.objects().is_empty());
}

#[test]
fn start_resets_all_run_state() {
    let mut s = session();
    s.start(0.0);
    assert_eq!(s.phase(), Phase::Playing);
    assert_eq!(s.score(), 0);
    assert_eq!(s.lives(), 5);
    assert!(s.objects().is_empty());
}

#[test]
fn tick_is_a_noop_outside_playing() {
    let mut s = session();
    s.tick(10_000.0);
    assert_eq!(s.phase(), Phase::Ready);
    assert!(s.objects().is_empty());
}

#[test]
fn pointer_is_ignored_outside_playing() {
    let mut s = session();
    assert_eq!(s.handle_pointer(200.0, 300.0), 0);
    assert_eq!(s.score(), 0);
}

#[test]
fn first_spawn_waits_for_the_base_interval() {
    let mut s = session();
    s.start(0.0);
    s.tick(0.0);
    assert!(s.objects().is_empty(), "no spawn at t=0");
    s.tick(1500.0);
    assert!(s.objects().is_empty(), "boundary is strict: no spawn at exactly 1500ms");
    s.tick(1501.0);
    assert_eq!(s.objects().len(), 1);

    let obj = &s.objects()[0];
    assert_eq!(obj.id, 1);
    assert!(TrashKind::ALL.contains(&obj.kind));
    // x uniform in [0, width - 40] for the 400-wide canvas
    assert!((0.0..=360.0).contains(&obj.x), "spawn x {} out of range", obj.x);
    // Spawned at y=-60 and already advanced by one motion step this tick.
    assert!(obj.y > -60.0 && obj.y < -57.0, "unexpected y {}", obj.y);
    assert!(obj.speed >= 1.0, "speed {} below base", obj.speed);
}

#[test]
fn object_ids_are_unique_and_monotonic() {
    let mut s = session();
    s.start(0.0);
    let mut now = 0.0;
    for _ in 0..10 {
        now += 1600.0;
        s.tick(now);
    }
    assert_eq!(s.objects().len(), 10);
    let ids: Vec<u64> = s.objects().iter().map(|o| o.id).collect();
    let unique: HashSet<u64> = ids.iter().copied().collect();
    assert_eq!(unique.len(), ids.len(), "duplicate ids: {ids:?}");
    assert!(ids.windows(2).all(|w| w[0] < w[1]), "ids not monotonic: {ids:?}");
}

#[test]
fn missed_object_costs_exactly_one_life() {
    let mut s = session();
    s.start(0.0);
    s.tick(1501.0);
    assert_eq!(s.objects().len(), 1);
    assert_eq!(s.lives(), 5);

    // Stall the clock: motion continues, the spawn timer does not fire.
    for _ in 0..1000 {
        s.tick(1501.0);
        if s.objects().is_empty() {
            break;
        }
        assert_eq!(s.lives(), 5, "life lost before the object exited");
    }
    assert!(s.objects().is_empty(), "object never exited");
    assert_eq!(s.lives(), 4);
    assert_eq!(s.phase(), Phase::Playing);
}

#[test]
fn five_misses_end_the_game() {
    let mut s = session();
    s.start(0.0);
    let mut now = 0.0;
    for _ in 0..5 {
        now += 1600.0;
        s.tick(now);
    }
    assert_eq!(s.objects().len(), 5);

    for _ in 0..2000 {
        s.tick(now);
        if s.phase() == Phase::GameOver {
            break;
        }
    }
    assert_eq!(s.phase(), Phase::GameOver);
    assert_eq!(s.lives(), 0);

    // Fully paused after game over: no spawns, no motion, no further losses.
    let frozen: Vec<(u64, f64)> = s.objects().iter().map(|o| (o.id, o.y)).collect();
    s.tick(now + 50_000.0);
    let after: Vec<(u64, f64)> = s.objects().iter().map(|o| (o.id, o.y)).collect();
    assert_eq!(frozen, after);
    assert_eq!(s.lives(), 0);
}

#[test]
fn lives_never_go_negative_with_many_objects_in_flight() {
    let mut s = session();
    s.start(0.0);
    let mut now = 0.0;
    for _ in 0..30 {
        now += 1600.0;
        s.tick(now);
    }
    assert_eq!(s.objects().len(), 30);

    for _ in 0..3000 {
        s.tick(now);
        assert!(s.lives() <= 5);
        if s.phase() == Phase::GameOver {
            break;
        }
    }
    assert_eq!(s.phase(), Phase::GameOver);
    assert_eq!(s.lives(), 0);
    // Objects still in flight at game over stay put.
    assert!(!s.objects().is_empty());
}

#[test]
fn pointer_hit_scores_and_removes() {
    let mut s = session();
    s.start(0.0);
    s.tick(1501.0);
    let obj = s.objects()[0].clone();
    let (w, h) = obj.kind.size();

    let removed = s.handle_pointer(obj.x + w / 2.0, obj.y + h / 2.0);
    assert_eq!(removed, 1);
    assert_eq!(s.score(), 10);
    assert!(s.objects().is_empty());
    assert_eq!(s.lives(), 5);
}

#[test]
fn pointer_hit_on_the_box_edge_counts() {
    let mut s = session();
    s.start(0.0);
    s.tick(1501.0);
    let obj = s.objects()[0].clone();
    let (w, h) = obj.kind.size();

    assert_eq!(s.handle_pointer(obj.x + w, obj.y + h), 1);
    assert_eq!(s.score(), 10);
}

#[test]
fn pointer_miss_changes_nothing() {
    let mut s = session();
    s.start(0.0);
    s.tick(1501.0);
    assert_eq!(s.objects().len(), 1);

    // The single object sits near the top edge; the bottom corner is empty.
    let removed = s.handle_pointer(399.0, 599.0);
    assert_eq!(removed, 0);
    assert_eq!(s.score(), 0);
    assert_eq!(s.objects().len(), 1);
}

#[test]
fn one_tap_collects_every_overlapping_object() {
    let mut s = session();
    s.start(0.0);
    let mut now = 0.0;
    // Forty drops crowd the top of the canvas; with ~30px-wide sprites over a
    // 360px spawn band, overlaps are guaranteed long before anything exits.
    for _ in 0..40 {
        now += 1600.0;
        s.tick(now);
    }
    assert_eq!(s.phase(), Phase::Playing);

    let snapshot: Vec<_> = s.objects().to_vec();
    let mut target = None;
    'outer: for a in &snapshot {
        let (w, h) = a.kind.size();
        let px = a.x + w / 2.0;
        let py = a.y + h / 2.0;
        let covered = snapshot.iter().filter(|o| o.contains(px, py)).count();
        if covered >= 2 {
            target = Some((px, py, covered));
            break 'outer;
        }
    }
    let (px, py, covered) = target.expect("expected overlapping spawns among 40 drops");

    let removed = s.handle_pointer(px, py);
    assert_eq!(removed, covered);
    assert_eq!(s.score(), covered as u32 * 10);
    assert_eq!(s.objects().len(), snapshot.len() - covered);
}

#[test]
fn reset_returns_to_ready_and_restart_reissues_ids() {
    let mut s = session();
    s.start(0.0);
    s.tick(1501.0);
    assert_eq!(s.objects().len(), 1);

    s.reset();
    assert_eq!(s.phase(), Phase::Ready);
    assert_eq!(s.score(), 0);
    assert_eq!(s.lives(), 5);
    assert!(s.objects().is_empty());

    // A fresh run issues ids from 1 again and honours the spawn delay anew.
    s.start(10_000.0);
    s.tick(10_001.0);
    assert!(s.objects().is_empty());
    s.tick(11_501.0);
    assert_eq!(s.objects().len(), 1);
    assert_eq!(s.objects()[0].id, 1);
}

#[test]
fn score_only_increases() {
    let mut s = session();
    s.start(0.0);
    let mut now = 0.0;
    let mut last_score = 0;
    for _ in 0..20 {
        now += 1600.0;
        s.tick(now);
        if let Some(obj) = s.objects().first().cloned() {
            let (w, h) = obj.kind.size();
            s.handle_pointer(obj.x + w / 2.0, obj.y + h / 2.0);
        }
        assert!(s.score() >= last_score);
        last_score = s.score();
    }
    assert!(last_score > 0);
}

#[test]
fn identical_seeds_replay_identically() {
    let mut a = GameSession::new(GameConfig::fullscreen(), SpawnRng::new(42));
    let mut b = GameSession::new(GameConfig::fullscreen(), SpawnRng::new(42));
    a.start(0.0);
    b.start(0.0);
    let mut now = 0.0;
    for _ in 0..12 {
        now += 1700.0;
        a.tick(now);
        b.tick(now);
    }
    assert_eq!(a.objects().len(), b.objects().len());
    for (oa, ob) in a.objects().iter().zip(b.objects()) {
        assert_eq!(oa.id, ob.id);
        assert_eq!(oa.kind, ob.kind);
        assert_eq!(oa.x, ob.x);
        assert_eq!(oa.y, ob.y);
        assert_eq!(oa.speed, ob.speed);
    }
}
