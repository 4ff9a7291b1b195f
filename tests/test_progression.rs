use pretty_assertions::assert_eq;
use treadmill_shooter::events::{GameEvent, HudSnapshot};
use treadmill_shooter::progression::*;

fn level_ups(events: &[GameEvent]) -> Vec<(u32, u32)> {
    events
        .iter()
        .filter_map(|e| match e {
            GameEvent::LevelUp {
                level,
                scroll_speed_secs,
            } => Some((*level, *scroll_speed_secs)),
            _ => None,
        })
        .collect()
}

#[test]
fn starting_stats() {
    let p = Progression::new();
    assert_eq!(
        p.stats,
        PlayerStats {
            hp: 3,
            max_hp: 3,
            xp: 0,
            level: 1,
            xp_to_next_level: 10,
        }
    );
    assert_eq!(p.score, 0);
}

// ── gain_xp ───────────────────────────────────────────────────────────────────

#[test]
fn gain_zero_xp_changes_nothing() {
    let mut p = Progression::new();
    p.stats.xp = 7;
    let before = p.stats.clone();
    let mut events = Vec::new();
    for _ in 0..5 {
        p.gain_xp(0, &mut events);
    }
    assert_eq!(p.stats, before);
    assert!(level_ups(&events).is_empty());
}

#[test]
fn gain_xp_below_threshold_accumulates() {
    let mut p = Progression::new();
    let mut events = Vec::new();
    p.gain_xp(5, &mut events);
    p.gain_xp(4, &mut events);
    assert_eq!(p.stats.xp, 9);
    assert_eq!(p.stats.level, 1);
}

#[test]
fn level_up_discards_remainder() {
    let mut p = Progression::new();
    p.stats.xp = 8;
    let mut events = Vec::new();
    p.gain_xp(5, &mut events); // 13 ≥ 10

    assert_eq!(p.stats.level, 2);
    assert_eq!(p.stats.xp, 0); // not 3
    assert_eq!(p.stats.xp_to_next_level, 20);
    assert_eq!(level_ups(&events), vec![(2, 13)]);
}

#[test]
fn huge_xp_grant_levels_once() {
    let mut p = Progression::new();
    let mut events = Vec::new();
    p.gain_xp(100, &mut events);
    assert_eq!(p.stats.level, 2);
    assert_eq!(p.stats.xp, 0);
    assert_eq!(p.stats.xp_to_next_level, 20);
}

#[test]
fn gain_xp_always_refreshes_hud() {
    let mut p = Progression::new();
    let mut events = Vec::new();
    p.gain_xp(0, &mut events);
    assert_eq!(events, vec![GameEvent::HudChanged(p.hud())]);
}

#[test]
fn scroll_speed_shrinks_with_level_down_to_five() {
    assert_eq!(scroll_speed_secs(0), 15);
    assert_eq!(scroll_speed_secs(1), 14);
    assert_eq!(scroll_speed_secs(9), 6);
    assert_eq!(scroll_speed_secs(10), 5);
    assert_eq!(scroll_speed_secs(40), 5);
}

// ── damage ────────────────────────────────────────────────────────────────────

#[test]
fn damage_reports_death_only_at_zero_or_below() {
    let mut p = Progression::new();
    let mut events = Vec::new();
    assert!(!p.apply_damage_to_player(1, &mut events));
    assert!(!p.apply_damage_to_player(1, &mut events));
    assert!(p.apply_damage_to_player(1, &mut events));
    assert_eq!(p.stats.hp, 0);
    assert!(p.apply_damage_to_player(1, &mut events));
    assert_eq!(p.stats.hp, -1);
}

#[test]
fn damage_emits_player_damaged_then_hud() {
    let mut p = Progression::new();
    let mut events = Vec::new();
    p.apply_damage_to_player(1, &mut events);
    assert_eq!(
        events,
        vec![GameEvent::PlayerDamaged { hp: 2 }, GameEvent::HudChanged(p.hud())]
    );
}

// ── kills ─────────────────────────────────────────────────────────────────────

#[test]
fn kill_awards_score_and_xp() {
    let mut p = Progression::new();
    let mut events = Vec::new();
    p.record_kill(&mut events);
    assert_eq!(p.score, KILL_SCORE);
    assert_eq!(p.stats.xp, KILL_XP);

    let last_hud = events.iter().rev().find_map(|e| match e {
        GameEvent::HudChanged(h) => Some(*h),
        _ => None,
    });
    assert_eq!(
        last_hud,
        Some(HudSnapshot {
            hp: 3,
            max_hp: 3,
            level: 1,
            xp: 5,
            xp_to_next_level: 10,
            score: 10,
        })
    );
}

#[test]
fn second_kill_levels_up() {
    let mut p = Progression::new();
    let mut events = Vec::new();
    p.record_kill(&mut events);
    p.record_kill(&mut events);
    assert_eq!(p.score, 20);
    assert_eq!(p.stats.level, 2);
    assert_eq!(p.stats.xp, 0);
    assert_eq!(p.stats.xp_to_next_level, 20);
}

#[test]
fn hp_fraction_is_clamped() {
    let mut hud = Progression::new().hud();
    assert_eq!(hud.hp_fraction(), 1.0);
    hud.hp = -2;
    assert_eq!(hud.hp_fraction(), 0.0);
}
