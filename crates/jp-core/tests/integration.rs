//! Integration tests exercising the full pipeline:
//! timeline → positions → connector → streak, plus classification over a catalog.

use std::collections::HashMap;

use jp_core::{
    CivilDate, ContentRecord, CurveDirection, DayRecord, DayStatus, JourneyStats, LayoutConfig,
    MILESTONE_FREQUENCY, Snapshot, ThemeId, build_connector, build_timeline, classify,
    current_streak, export_snapshot, import_snapshot, layout_journey, position_days,
};

fn d(s: &str) -> CivilDate {
    s.parse().unwrap()
}

fn forty_day_journey() -> Vec<DayRecord> {
    let start = d("2026-01-01");
    let mut logs = HashMap::new();
    for offset in 0..12 {
        if offset != 4 {
            logs.insert(start.add_days(offset), Some(format!("photos/{offset}.jpg")));
        }
    }
    build_timeline("amina", start, d("2026-01-13"), 40, &logs)
}

/// The streak walk sees day 13 (today) plus logged days 12..=6, then missed day 5.
#[test]
fn timeline_feeds_streak_and_stats() {
    let days = forty_day_journey();
    assert_eq!(days.len(), 40);
    assert_eq!(days[12].status, DayStatus::Today);
    assert_eq!(days[4].status, DayStatus::Missed);

    assert_eq!(current_streak(&days), 8);

    let stats = JourneyStats::compute(&days, MILESTONE_FREQUENCY);
    assert_eq!(stats.logged, 11);
    assert_eq!(stats.missed, 1);
    assert_eq!(stats.remaining, 28);
    assert_eq!(stats.longest_streak, 8);
    assert_eq!(stats.milestones_reached, 1);
}

#[test]
fn layout_over_full_journey() {
    let days = forty_day_journey();
    let config = LayoutConfig::default();
    let layout = layout_journey(&days, 390.0, &config);

    assert_eq!(layout.nodes.len(), 40);
    assert_eq!(layout.connector.segments().len(), 39);
    for (node, day) in layout.nodes.iter().zip(&days) {
        assert_eq!(node.day.day_number, day.day_number);
        assert!(node.x >= 0.0);
    }
    let lefts = layout
        .nodes
        .iter()
        .filter(|n| n.direction == CurveDirection::Left)
        .count();
    assert_eq!(lefts, 10);
}

#[test]
fn narrow_screen_only_moves_x() {
    let days = forty_day_journey();
    let config = LayoutConfig::default();
    let wide = position_days(&days, 800.0, &config);
    let narrow = position_days(&days, 110.0, &config);

    for (w, n) in wide.iter().zip(&narrow) {
        assert_eq!(w.y, n.y);
        assert_eq!(w.direction, n.direction);
        assert_eq!(n.x, 55.0 - config.node_size / 2.0);
    }

    let path = build_connector(&narrow, config.node_radius());
    for seg in path.segments() {
        assert_eq!(seg.from.x, seg.to.x);
    }
}

#[test]
fn catalog_classification() {
    let catalog: Vec<ContentRecord> = serde_json::from_str(
        r#"[
            {"id": "1", "title": "Before prayer", "category": "prayer_wudu_category", "tags": ["water"]},
            {"id": "2", "title": "Eating", "tags": ["FOOD", "Eating"]},
            {"id": "3", "title": "Mystery", "tags": ["unknown_tag"]},
            {"id": "4", "title": "Night", "tags": ["family", "sleep"]},
            {"id": "5", "title": "Untagged"}
        ]"#,
    )
    .unwrap();

    let themes: Vec<ThemeId> = catalog.iter().map(classify).collect();
    assert_eq!(
        themes,
        vec![
            ThemeId::PrayerWudu,
            ThemeId::FoodSunnah,
            ThemeId::DuaSpiritual,
            ThemeId::SleepNight,
            ThemeId::DuaSpiritual,
        ]
    );
}

#[test]
fn snapshot_carries_journey() {
    let days = forty_day_journey();
    let content = vec![ContentRecord::new("c", None, &["miswak"])];
    let snap = Snapshot::new("amina", days.clone(), content);
    let json = export_snapshot(&snap).unwrap();
    let back = import_snapshot(&json).unwrap();
    assert_eq!(back.days, days);
    assert_eq!(current_streak(&back.days), current_streak(&days));
}
