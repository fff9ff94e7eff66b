use vitrine_core::{
    config::Config,
    data::DeviceClass,
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

fn device_events(out: &Outputs) -> Vec<DeviceClass> {
    out.events
        .iter()
        .filter_map(|e| match e {
            CoreEvent::DeviceChanged { device } => Some(*device),
            _ => None,
        })
        .collect()
}

/// it should bucket widths against the configured breakpoints
#[test]
fn classify_buckets_widths() {
    let bp = Config::default().breakpoints;
    assert_eq!(DeviceClass::classify(320.0, &bp), DeviceClass::Mobile);
    assert_eq!(DeviceClass::classify(767.9, &bp), DeviceClass::Mobile);
    assert_eq!(DeviceClass::classify(768.0, &bp), DeviceClass::Tablet);
    assert_eq!(DeviceClass::classify(1023.9, &bp), DeviceClass::Tablet);
    assert_eq!(DeviceClass::classify(1024.0, &bp), DeviceClass::Desktop);
    assert_eq!(DeviceClass::classify(2560.0, &bp), DeviceClass::Desktop);
}

/// it should settle a resize burst once, on the latest width
#[test]
fn resize_burst_settles_once_on_latest_width() {
    let mut eng = Engine::new(Config::default());

    // A burst of readings; each one restarts the quiet window.
    drive(
        &mut eng,
        16.0,
        vec![Signal::ViewportResized { width: 500.0 }],
    );
    let out = step(&mut eng, 100.0);
    assert!(device_events(&out).is_empty());
    drive(
        &mut eng,
        16.0,
        vec![Signal::ViewportResized { width: 900.0 }],
    );

    // Still inside the refreshed window.
    let out = step(&mut eng, 100.0);
    assert!(device_events(&out).is_empty());
    assert_eq!(eng.device(), None);

    // Quiet long enough: one settle, classified from the last reading.
    let out = step(&mut eng, 300.0);
    assert_eq!(device_events(&out), vec![DeviceClass::Tablet]);
    assert!(out.changes.iter().any(|c| matches!(
        c,
        Change::SetDocumentAttr { name, value } if name == "data-device" && value == "tablet"
    )));
    assert_eq!(eng.device(), Some(DeviceClass::Tablet));

    // Nothing further without new readings.
    let out = step(&mut eng, 1000.0);
    assert!(device_events(&out).is_empty());
}

/// it should re-announce the device on every settle, changed or not
#[test]
fn device_is_reannounced_per_settle() {
    let mut eng = Engine::new(Config::default());
    drive(
        &mut eng,
        16.0,
        vec![Signal::ViewportResized { width: 900.0 }],
    );
    let out = step(&mut eng, 300.0);
    assert_eq!(device_events(&out), vec![DeviceClass::Tablet]);

    // Same bucket, new settle: the broadcast repeats.
    drive(
        &mut eng,
        16.0,
        vec![Signal::ViewportResized { width: 901.0 }],
    );
    let out = step(&mut eng, 300.0);
    assert_eq!(device_events(&out), vec![DeviceClass::Tablet]);
}

/// it should hold, fade, then hide the preloader after page load
#[test]
fn preloader_holds_fades_then_hides() {
    let mut eng = Engine::new(Config::default());
    let id = eng.register_preloader();

    drive(&mut eng, 16.0, vec![Signal::PageLoaded]);

    let style_of = |out: &Outputs| -> Vec<(String, String)> {
        out.changes
            .iter()
            .filter_map(|c| match c {
                Change::SetStyle { target, property, value } if *target == id => {
                    Some((property.clone(), value.clone()))
                }
                _ => None,
            })
            .collect()
    };

    // Hold window: nothing yet.
    let out = step(&mut eng, 984.0);
    assert!(style_of(&out).is_empty());

    // 1000ms after load: fade begins.
    let out = step(&mut eng, 16.0);
    assert_eq!(
        style_of(&out),
        vec![("opacity".to_string(), "0".to_string())]
    );

    // Fade window runs 500ms before the element is hidden outright.
    let out = step(&mut eng, 490.0);
    assert!(style_of(&out).is_empty());
    let out = step(&mut eng, 16.0);
    assert_eq!(
        style_of(&out),
        vec![("display".to_string(), "none".to_string())]
    );

    // A stray second load signal does not restart the sequence.
    let out = drive(&mut eng, 16.0, vec![Signal::PageLoaded]);
    assert!(style_of(&out).is_empty());
    let out = step(&mut eng, 2000.0);
    assert!(style_of(&out).is_empty());
}

/// it should ignore page-load signals when no preloader is registered
#[test]
fn page_load_without_preloader_is_a_no_op() {
    let mut eng = Engine::new(Config::default());
    let out = drive(&mut eng, 16.0, vec![Signal::PageLoaded]);
    assert!(out.is_empty());
    let out = step(&mut eng, 5000.0);
    assert!(out.is_empty());
}
