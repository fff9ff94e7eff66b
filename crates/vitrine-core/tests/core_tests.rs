use vitrine_core::{
    config::Config,
    data::{parse_count, parse_factor, parse_ms, RevealKind, RevealSpec},
    ids::{IdAllocator, TargetId},
    inputs::{Inputs, Signal},
    outputs::{Change, CoreEvent, Outputs},
    Engine,
};

fn step(eng: &mut Engine, dt: f64) -> Outputs {
    eng.update(dt, Inputs::default()).clone()
}

fn drive(eng: &mut Engine, dt: f64, signals: Vec<Signal>) -> Outputs {
    eng.update(dt, Inputs { signals }).clone()
}

fn texts_for(out: &Outputs, id: TargetId) -> Vec<String> {
    out.changes
        .iter()
        .filter_map(|c| match c {
            Change::SetText { target, text } if *target == id => Some(text.clone()),
            _ => None,
        })
        .collect()
}

fn appends_for(out: &Outputs, id: TargetId) -> Vec<String> {
    out.changes
        .iter()
        .filter_map(|c| match c {
            Change::AppendText { target, text } if *target == id => Some(text.clone()),
            _ => None,
        })
        .collect()
}

fn classes_added(out: &Outputs, id: TargetId) -> Vec<String> {
    out.changes
        .iter()
        .filter_map(|c| match c {
            Change::AddClass { target, class } if *target == id => Some(class.clone()),
            _ => None,
        })
        .collect()
}

fn observe_threshold(out: &Outputs, id: TargetId) -> Option<f32> {
    out.changes.iter().find_map(|c| match c {
        Change::Observe { target, threshold } if *target == id => Some(*threshold),
        _ => None,
    })
}

fn reveal_fired_count(out: &Outputs, id: TargetId) -> usize {
    out.events
        .iter()
        .filter(|e| matches!(e, CoreEvent::RevealFired { target, .. } if *target == id))
        .count()
}

/// it should allocate TargetId/ItemId monotonically and reset
#[test]
fn ids_allocator_basics() {
    let mut ids = IdAllocator::default();
    let t0 = ids.alloc_target();
    let t1 = ids.alloc_target();
    let i0 = ids.alloc_item();
    assert_eq!(t0.0 + 1, t1.0);
    assert_eq!(i0.0, 0);
    ids.reset();
    assert_eq!(ids.alloc_target(), t0);
}

/// it should exercise Outputs API basics: clear/empty/push/absorb
#[test]
fn outputs_api_basics() {
    let mut out = Outputs::default();
    assert!(out.is_empty());
    out.push_change(Change::LockPageScroll);
    out.push_event(CoreEvent::LightboxClosed);
    assert!(!out.is_empty());
    assert_eq!(out.changes.len(), 1);
    assert_eq!(out.events.len(), 1);

    let mut sink = Outputs::default();
    sink.push_change(Change::UnlockPageScroll);
    sink.absorb(&mut out);
    assert!(out.is_empty());
    assert_eq!(sink.changes.len(), 2);
    // Absorbed changes keep their order after the sink's own.
    assert_eq!(sink.changes[0], Change::UnlockPageScroll);
    assert_eq!(sink.changes[1], Change::LockPageScroll);

    out.clear();
    assert!(out.is_empty());
}

/// it should flush registration changes into the next update's outputs
#[test]
fn registration_changes_flush_on_next_update() {
    let mut eng = Engine::new(Config::default());
    let classes = eng.register_reveal(RevealSpec::classes(RevealKind::FadeUp, 0.0));
    let counter = eng.register_reveal(RevealSpec::counter(250, 2000.0, 0.0));
    let typed = eng.register_reveal(RevealSpec::typewriter("hi", 100.0, 0.0));

    let out = step(&mut eng, 16.0);
    // Class-based reveals start hidden under the setup class.
    assert_eq!(
        classes_added(&out, classes),
        vec!["scroll-reveal".to_string()]
    );
    // Entrance reveals observe at the shallow threshold, text effects at the
    // focus threshold.
    assert_eq!(observe_threshold(&out, classes), Some(0.1));
    assert_eq!(observe_threshold(&out, counter), Some(0.5));
    assert_eq!(observe_threshold(&out, typed), Some(0.5));
    // A typewriter clears its slot up front.
    assert_eq!(texts_for(&out, typed), vec![String::new()]);

    // Nothing is re-emitted on the following frame.
    let out = step(&mut eng, 16.0);
    assert!(out.is_empty());
}

/// it should apply a class reveal exactly once under repeated visibility signals
#[test]
fn reveal_applies_classes_once() {
    let mut eng = Engine::new(Config::default());
    let id = eng.register_reveal(RevealSpec::classes(RevealKind::FadeUp, 0.0));
    step(&mut eng, 16.0);

    let mut revealed = 0usize;
    let mut fired = 0usize;
    for _ in 0..3 {
        let out = drive(
            &mut eng,
            16.0,
            vec![Signal::VisibilityCrossed { target: id }],
        );
        revealed += classes_added(&out, id)
            .iter()
            .filter(|c| *c == "revealed")
            .count();
        fired += reveal_fired_count(&out, id);
    }
    assert_eq!(revealed, 1);
    assert_eq!(fired, 1);
    assert_eq!(eng.is_triggered(id), Some(true));
}

/// it should unobserve a target as soon as it triggers
#[test]
fn reveal_unobserves_on_trigger() {
    let mut eng = Engine::new(Config::default());
    let id = eng.register_reveal(RevealSpec::classes(RevealKind::ZoomIn, 0.0));
    step(&mut eng, 16.0);

    let out = drive(
        &mut eng,
        16.0,
        vec![Signal::VisibilityCrossed { target: id }],
    );
    assert!(out
        .changes
        .iter()
        .any(|c| matches!(c, Change::Unobserve { target } if *target == id)));
    // The kind-specific entrance class arrives with the reveal.
    assert!(classes_added(&out, id)
        .contains(&"animate-zoom-in".to_string()));
}

/// it should defer application by the configured delay
#[test]
fn reveal_delay_defers_application() {
    let mut eng = Engine::new(Config::default());
    let id = eng.register_reveal(RevealSpec::classes(RevealKind::FadeIn, 100.0));
    step(&mut eng, 100.0);

    // Trigger at t=200; the apply deadline is 300.
    let out = drive(
        &mut eng,
        100.0,
        vec![Signal::VisibilityCrossed { target: id }],
    );
    assert_eq!(reveal_fired_count(&out, id), 0);

    let out = step(&mut eng, 100.0);
    assert_eq!(reveal_fired_count(&out, id), 1);
    assert!(classes_added(&out, id).contains(&"revealed".to_string()));
}

/// it should count up to the exact target with a monotonic floored display
#[test]
fn counter_counts_up_to_exact_target() {
    let mut eng = Engine::new(Config::default());
    let id = eng.register_reveal(RevealSpec::counter(250, 2000.0, 0.0));
    step(&mut eng, 16.0);
    drive(
        &mut eng,
        16.0,
        vec![Signal::VisibilityCrossed { target: id }],
    );

    let mut shown: Vec<i64> = Vec::new();
    let mut finished: Vec<i64> = Vec::new();
    for _ in 0..200 {
        let out = step(&mut eng, 16.0);
        for text in texts_for(&out, id) {
            assert!(finished.is_empty(), "no display updates after the finish");
            shown.push(text.parse().unwrap());
        }
        for e in &out.events {
            if let CoreEvent::CounterFinished { target, value } = e {
                assert_eq!(*target, id);
                finished.push(*value);
            }
        }
    }

    // 2000ms at a 16ms frame interval is 125 display frames.
    assert_eq!(shown.len(), 125);
    assert_eq!(shown.last().copied(), Some(250));
    assert!(
        shown.windows(2).all(|w| w[0] <= w[1]),
        "display is monotonic"
    );
    assert!(shown.iter().all(|v| *v <= 250), "display never overshoots");
    assert_eq!(finished, vec![250]);
}

/// it should land a degenerate counter on its goal immediately
#[test]
fn counter_with_zero_duration_lands_immediately() {
    let mut eng = Engine::new(Config::default());
    let id = eng.register_reveal(RevealSpec::counter(100, 0.0, 0.0));
    step(&mut eng, 16.0);

    let out = drive(
        &mut eng,
        16.0,
        vec![Signal::VisibilityCrossed { target: id }],
    );
    assert_eq!(texts_for(&out, id), vec!["100".to_string()]);
    assert!(out
        .events
        .iter()
        .any(|e| matches!(e, CoreEvent::CounterFinished { value: 100, .. })));
}

/// it should accumulate fractional frames instead of dropping them
#[test]
fn counter_accumulates_partial_frames() {
    let mut eng = Engine::new(Config::default());
    let id = eng.register_reveal(RevealSpec::counter(10, 160.0, 0.0));
    step(&mut eng, 16.0);
    drive(
        &mut eng,
        16.0,
        vec![Signal::VisibilityCrossed { target: id }],
    );

    // 8ms updates: every second update crosses a 16ms frame boundary.
    let mut shown = 0usize;
    let mut done = false;
    for _ in 0..40 {
        let out = step(&mut eng, 8.0);
        shown += texts_for(&out, id).len();
        done |= out
            .events
            .iter()
            .any(|e| matches!(e, CoreEvent::CounterFinished { .. }));
    }
    assert!(done, "counter finishes on fractional update cadence");
    // 160ms / 16ms = 10 frames of display updates.
    assert_eq!(shown, 10);
}

/// it should type each character exactly once at a drift-free cadence
#[test]
fn typewriter_types_each_char_once() {
    let mut eng = Engine::new(Config::default());
    let id = eng.register_reveal(RevealSpec::typewriter("Hello", 100.0, 0.0));
    step(&mut eng, 16.0);

    // Apply lands in the trigger frame and types the first character.
    let out = drive(
        &mut eng,
        16.0,
        vec![Signal::VisibilityCrossed { target: id }],
    );
    assert_eq!(appends_for(&out, id), vec!["H".to_string()]);

    let mut typed = String::from("H");
    let mut finished = 0usize;
    for _ in 0..60 {
        let out = step(&mut eng, 16.0);
        for ch in appends_for(&out, id) {
            assert_eq!(finished, 0, "no characters after the finish");
            typed.push_str(&ch);
        }
        finished += out
            .events
            .iter()
            .filter(|e| matches!(e, CoreEvent::TypewriterFinished { target } if *target == id))
            .count();
    }
    assert_eq!(typed, "Hello");
    assert_eq!(finished, 1);
}

/// it should finish an empty typewriter at apply time
#[test]
fn typewriter_with_empty_text_finishes_at_apply() {
    let mut eng = Engine::new(Config::default());
    let id = eng.register_reveal(RevealSpec::typewriter("", 100.0, 0.0));
    step(&mut eng, 16.0);

    let out = drive(
        &mut eng,
        16.0,
        vec![Signal::VisibilityCrossed { target: id }],
    );
    assert!(appends_for(&out, id).is_empty());
    assert!(out
        .events
        .iter()
        .any(|e| matches!(e, CoreEvent::TypewriterFinished { target } if *target == id)));
}

/// it should translate parallax targets against scroll, throttled per frame
#[test]
fn parallax_tracks_scroll_with_speed() {
    let mut eng = Engine::new(Config::default());
    let id = eng.register_reveal(RevealSpec::parallax(0.5));

    // Parallax is scroll-driven; registration observes nothing.
    let out = step(&mut eng, 16.0);
    assert_eq!(observe_threshold(&out, id), None);

    let scroll = |y: f64| Signal::ScrollChanged {
        scroll_y: y,
        viewport_height: 800.0,
        document_height: 10_000.0,
    };

    // Two readings in one frame collapse to one style write.
    let out = drive(&mut eng, 16.0, vec![scroll(200.0), scroll(210.0)]);
    let styles: Vec<&str> = out
        .changes
        .iter()
        .filter_map(|c| match c {
            Change::SetStyle { target, property, value } if *target == id => {
                assert_eq!(property, "transform");
                Some(value.as_str())
            }
            _ => None,
        })
        .collect();
    assert_eq!(styles, vec!["translateY(-100px)"]);

    // The next frame passes the gate again.
    let out = drive(&mut eng, 16.0, vec![scroll(300.0)]);
    assert!(out
        .changes
        .iter()
        .any(|c| matches!(c, Change::SetStyle { value, .. } if value == "translateY(-150px)")));
}

/// it should ignore visibility signals for unknown targets
#[test]
fn unknown_visibility_target_is_ignored() {
    let mut eng = Engine::new(Config::default());
    let out = drive(
        &mut eng,
        16.0,
        vec![Signal::VisibilityCrossed {
            target: TargetId(999),
        }],
    );
    assert!(out.is_empty());
}

/// it should fall back to defaults on malformed host attributes
#[test]
fn attribute_parsing_is_lenient() {
    assert_eq!(parse_ms(Some("150"), 0.0), 150.0);
    assert_eq!(parse_ms(Some("-5"), 0.0), 0.0);
    assert_eq!(parse_ms(Some("abc"), 7.0), 7.0);
    assert_eq!(parse_ms(None, 7.0), 7.0);

    assert_eq!(parse_count(Some("250")), 250);
    assert_eq!(parse_count(Some("nope")), 0);
    assert_eq!(parse_count(None), 0);

    assert_eq!(parse_factor(Some("0.8"), 0.5), 0.8);
    assert_eq!(parse_factor(Some("NaN"), 0.5), 0.5);
    assert_eq!(parse_factor(None, 0.5), 0.5);

    assert_eq!(RevealKind::parse("zoom-in"), RevealKind::ZoomIn);
    assert_eq!(RevealKind::parse(" fade-in "), RevealKind::FadeIn);
    assert_eq!(RevealKind::parse("wobble"), RevealKind::FadeUp);
}

/// it should report the reveal kind in the fired event
#[test]
fn reveal_fired_event_carries_kind() {
    let mut eng = Engine::new(Config::default());
    let id = eng.register_reveal(RevealSpec::classes(RevealKind::SlideLeft, 0.0));
    step(&mut eng, 16.0);

    let out = drive(
        &mut eng,
        16.0,
        vec![Signal::VisibilityCrossed { target: id }],
    );
    assert!(out.events.iter().any(|e| matches!(
        e,
        CoreEvent::RevealFired {
            target,
            kind: RevealKind::SlideLeft,
        } if *target == id
    )));
}
