use std::time::Duration;

use approx::assert_relative_eq;
use narrative_chart::api::{NarrativeChartConfig, NarrativeChartEngine};
use narrative_chart::core::SceneBatch;
use narrative_chart::playback::{PlaybackPhase, PlaybackScrubber, ScrubTick, TickSchedule};
use narrative_chart::render::NullRenderer;

fn engine() -> NarrativeChartEngine<NullRenderer> {
    let batch = SceneBatch::new()
        .with_trajectory("A", &[(3, 0), (4, 1), (5, 0), (6, 2)])
        .with_trajectory("B", &[(3, 1), (4, 0), (5, 1), (6, 1)]);
    let mut engine =
        NarrativeChartEngine::new(NullRenderer::default(), NarrativeChartConfig::default())
            .expect("engine init");
    engine.load_scenes(&batch).expect("load scenes");
    engine
}

#[test]
fn play_starts_timer_at_base_interval() {
    let mut engine = engine();
    assert_eq!(engine.playback_state().phase, PlaybackPhase::Stopped);
    assert_eq!(engine.playback_state().scene_cursor, 3);

    assert_eq!(
        engine.play(),
        TickSchedule::Start {
            interval: Duration::from_millis(40)
        }
    );
    assert_eq!(engine.playback_state().phase, PlaybackPhase::Playing);
}

#[test]
fn scene_count_ticks_return_to_first_scene() {
    let mut engine = engine();
    engine.play();

    let scenes: Vec<_> = (0..4)
        .map(|_| engine.tick().expect("playing").scene)
        .collect();
    assert_eq!(scenes, vec![4, 5, 6, 3]);
    assert_eq!(engine.playback_state().scene_cursor, 3);
}

#[test]
fn tick_reports_column_span_and_wrap() {
    let mut engine = engine();
    engine.play();

    let request = engine.tick().expect("playing");
    let layout = engine.layout();
    assert_eq!(request.scene, 4);
    assert!(!request.wrapped);
    assert_relative_eq!(request.column_left, layout.column_left(4));
    assert_relative_eq!(request.column_right, layout.column_left(4) + 30.0);
    assert_relative_eq!(request.center_x, layout.scene_center_x(4));

    engine.tick();
    engine.tick();
    assert!(engine.tick().expect("playing").wrapped);
}

#[test]
fn ticks_do_nothing_when_not_playing() {
    let mut engine = engine();
    assert_eq!(engine.tick(), None);

    engine.play();
    engine.tick();
    assert_eq!(engine.pause(), TickSchedule::Cancel);
    assert_eq!(engine.tick(), None);
    assert_eq!(engine.playback_state().scene_cursor, 4);
    assert!(!engine.has_pending_invalidation());
}

#[test]
fn stop_rewinds_to_first_scene() {
    let mut engine = engine();
    engine.play();
    engine.tick();
    engine.tick();

    assert_eq!(engine.stop(), TickSchedule::Cancel);
    assert_eq!(engine.playback_state().phase, PlaybackPhase::Stopped);
    assert_eq!(engine.playback_state().scene_cursor, 3);
    assert_eq!(engine.stop(), TickSchedule::Unchanged);
}

#[test]
fn pause_then_play_resumes_from_cursor() {
    let mut engine = engine();
    engine.play();
    engine.tick();
    engine.pause();
    assert_eq!(engine.playback_state().phase, PlaybackPhase::Paused);

    assert!(matches!(engine.play(), TickSchedule::Start { .. }));
    assert_eq!(engine.tick().map(|request| request.scene), Some(5));
}

#[test]
fn rate_change_while_playing_keeps_running_interval() {
    let mut scrubber = PlaybackScrubber::new(Duration::from_millis(40), 1.0).expect("scrubber");
    scrubber.set_scene_range(0, 9);
    scrubber.play();

    scrubber.set_rate(2.0).expect("valid rate");
    assert_eq!(scrubber.scheduled_interval(), Some(Duration::from_millis(40)));
    assert_eq!(scrubber.play(), TickSchedule::Unchanged);
    assert_eq!(scrubber.state().rate_multiplier, 2.0);

    scrubber.pause();
    assert_eq!(
        scrubber.play(),
        TickSchedule::Start {
            interval: Duration::from_millis(20)
        }
    );

    scrubber.stop();
    scrubber.set_rate(0.25).expect("valid rate");
    assert_eq!(
        scrubber.play(),
        TickSchedule::Start {
            interval: Duration::from_millis(160)
        }
    );
}

#[test]
fn stop_then_play_applies_new_rate() {
    let mut engine = engine();
    engine.play();
    engine.set_rate(2.0).expect("valid rate");
    engine.stop();

    assert_eq!(
        engine.play(),
        TickSchedule::Start {
            interval: Duration::from_millis(20)
        }
    );
}

#[test]
fn rate_options_come_from_config() {
    let mut engine = engine();
    assert_eq!(engine.rate_options(), &[0.25, 0.5, 1.0, 2.0, 4.0]);

    assert_eq!(engine.select_rate_option(4).expect("option"), 4.0);
    assert_eq!(engine.playback_state().rate_multiplier, 4.0);
    assert!(engine.select_rate_option(5).is_err());
    assert!(engine.set_rate(-1.0).is_err());
    assert_eq!(engine.playback_state().rate_multiplier, 4.0);
}

#[test]
fn loading_scenes_while_playing_cancels_timer() {
    let mut engine = engine();
    engine.play();
    engine.tick();

    let schedule = engine
        .load_scenes(&SceneBatch::new().with_trajectory("C", &[(10, 0), (11, 0)]))
        .expect("reload");
    assert_eq!(schedule, TickSchedule::Cancel);
    assert_eq!(engine.playback_state().phase, PlaybackPhase::Stopped);
    assert_eq!(engine.playback_state().scene_cursor, 10);
}

#[test]
fn single_scene_range_wraps_every_tick() {
    let mut scrubber = PlaybackScrubber::new(Duration::from_millis(40), 1.0).expect("scrubber");
    scrubber.set_scene_range(7, 7);
    scrubber.play();

    assert_eq!(
        scrubber.on_tick(),
        Some(ScrubTick {
            scene: 7,
            wrapped: true
        })
    );
}

#[test]
fn range_ending_at_max_scene_index_wraps_to_first_scene() {
    let mut scrubber = PlaybackScrubber::new(Duration::from_millis(40), 1.0).expect("scrubber");
    scrubber.set_scene_range(i32::MAX - 1, i32::MAX);
    scrubber.play();

    let ticks: Vec<_> = (0..3)
        .map(|_| scrubber.on_tick().expect("playing"))
        .map(|tick| (tick.scene, tick.wrapped))
        .collect();
    assert_eq!(
        ticks,
        vec![(i32::MAX, false), (i32::MAX - 1, true), (i32::MAX, false)]
    );
}
