//! # Page Effects Verification
//!
//! Drives every effect through the mock host and checks the observable
//! contract: what lands in the document, when, and with which values.
//!
//! Run with: cargo test --package lustre_core --test page_effects_test

use lustre_core::config::{EffectsConfig, ParticleConfig, RippleConfig, ToastConfig};
use lustre_core::effects::counter::{CounterAnimation, CounterSpec};
use lustre_core::effects::particles::{link_opacity, ParticleField, ParticleLayer};
use lustre_core::effects::ripple::{create_ripple, RippleGeometry};
use lustre_core::effects::scroll_progress::ScrollProgress;
use lustre_core::effects::smooth_scroll::{AnchorNavigator, ClickOutcome};
use lustre_core::effects::toast::{show_notification, ToastOptions, SHOW_CLASS};
use lustre_core::mock::{DrawCommand, ManualScheduler, MockDocument, MockElement, RecordingCanvas};
use lustre_core::{AnimationLoop, DocumentHost, ElementHandle, Rect, ScrollMetrics, Viewport};
use std::cell::RefCell;
use std::rc::Rc;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ============================================================================
// PARTICLE FIELD
// ============================================================================

#[test]
fn particles_stay_inside_surface_forever() {
    for seed in 0..8 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut field = ParticleField::new(ParticleConfig::default(), Viewport::new(1280.0, 720.0), &mut rng);

        for _ in 0..5_000 {
            field.update();
            for p in field.particles() {
                assert!((0.0..1280.0).contains(&p.x), "x escaped: {}", p.x);
                assert!((0.0..720.0).contains(&p.y), "y escaped: {}", p.y);
            }
        }
    }
}

#[test]
fn particles_recover_after_shrinking_surface() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut field = ParticleField::new(ParticleConfig::default(), Viewport::new(1920.0, 1080.0), &mut rng);
    field.resize(800.0, 600.0);

    field.update();
    for p in field.particles() {
        assert!(p.x < 800.0 && p.y < 600.0);
    }
}

#[test]
fn links_drawn_iff_closer_than_threshold() {
    let mut rng = StdRng::seed_from_u64(3);
    let field = ParticleField::new(ParticleConfig::default(), Viewport::new(400.0, 300.0), &mut rng);
    let particles = field.particles();

    let mut expected = Vec::new();
    for i in 0..particles.len() {
        for j in i + 1..particles.len() {
            if particles[i].distance_to(&particles[j]) < 100.0 {
                expected.push((i, j));
            }
        }
    }

    let actual: Vec<(usize, usize)> = field.links().map(|l| (l.a, l.b)).collect();
    assert_eq!(actual, expected);
    assert!(!actual.is_empty(), "dense field should have links");
}

#[test]
fn link_opacity_falls_toward_threshold() {
    let mut last = f64::INFINITY;
    for step in 0..1000 {
        let distance = f64::from(step) * 0.1;
        let opacity = link_opacity(distance, 100.0, 0.1).unwrap();
        assert!(opacity < last);
        last = opacity;
    }
    assert!(last < 1e-3);
    assert!(link_opacity(100.0, 100.0, 0.1).is_none());
}

#[test]
fn particle_layer_paints_every_tick() {
    let mut rng = StdRng::seed_from_u64(5);
    let field = ParticleField::new(ParticleConfig::default(), Viewport::new(500.0, 400.0), &mut rng);
    assert_eq!(field.particles().len(), 30);

    let layer = Rc::new(RefCell::new(ParticleLayer::new(field, RecordingCanvas::new())));
    layer.borrow_mut().canvas.reset();
    let mut frames = AnimationLoop::new();
    frames.register(Box::new(Rc::clone(&layer)));

    for frame in 0..3 {
        assert!(frames.tick(f64::from(frame) * 16.7));

        let mut layer = layer.borrow_mut();
        let expected_links = layer.field.links().count();
        let commands = &layer.canvas.commands;
        assert_eq!(commands.len(), 1 + 30 + expected_links);
        assert_eq!(
            commands[0],
            DrawCommand::Clear {
                width: 500.0,
                height: 400.0
            }
        );
        assert!(commands[1..=30]
            .iter()
            .all(|c| matches!(c, DrawCommand::Circle { .. })));
        assert!(commands[31..]
            .iter()
            .all(|c| matches!(c, DrawCommand::Line { .. })));
        layer.canvas.reset();
    }
    assert_eq!(frames.stats().active_effects, 1);
}

// ============================================================================
// COUNTER
// ============================================================================

#[test]
fn counter_ends_on_exact_value() {
    let element = MockElement::new("span");
    let spec = CounterSpec::new(0.0, 250.0, 1000.0).with_suffix("+");
    let mut frames = AnimationLoop::new();
    frames.register(Box::new(CounterAnimation::new(element.clone(), spec)));

    let mut previous = -1.0;
    let mut now = 5_000.0;
    while frames.tick(now) {
        let shown: f64 = element.text().trim_end_matches('+').parse().unwrap();
        assert!(shown >= previous, "counter went backwards: {shown} < {previous}");
        previous = shown;
        now += 16.0;
    }

    assert_eq!(element.text(), "250+");
    assert!(frames.is_idle());
}

#[test]
fn counter_follows_quartic_ease_out() {
    let spec = CounterSpec::new(0.0, 250.0, 1000.0).with_suffix("+");
    for elapsed in [100.0, 250.0, 500.0, 750.0, 900.0] {
        let p: f64 = elapsed / 1000.0;
        let expected = (250.0 * (1.0 - (1.0 - p).powi(4))).floor();
        assert_eq!(spec.text_at(spec.progress(elapsed)), format!("{expected}+"));
    }
}

// ============================================================================
// SCROLL PROGRESS
// ============================================================================

#[test]
fn scroll_progress_thirty_percent() {
    let doc = MockDocument::new(Viewport::new(1024.0, 650.0));
    let config = EffectsConfig::default();
    let progress = ScrollProgress::ensure_bar(&doc, None, &config.scroll_progress).unwrap();

    progress.on_scroll(ScrollMetrics {
        scroll_y: 150.0,
        scroll_height: 1150.0,
        viewport_height: 650.0,
    });
    assert_eq!(progress.bar().style("width").as_deref(), Some("30%"));
}

// ============================================================================
// SMOOTH SCROLL
// ============================================================================

#[test]
fn anchor_click_scrolls_to_target() {
    let doc = MockDocument::new(Viewport::new(1024.0, 768.0));
    let section = MockElement::new("section").with_id("section2");
    doc.body().append_child(&section);
    let navigator = AnchorNavigator::new(&doc);

    assert!(navigator.on_anchor_click("#section2").prevents_default());
    assert_eq!(section.scroll_requests(), 1);

    assert_eq!(navigator.on_anchor_click("#"), ClickOutcome::Ignored);
    assert_eq!(section.scroll_requests(), 1);
}

// ============================================================================
// RIPPLE
// ============================================================================

#[test]
fn ripple_at_top_left_corner() {
    let container = Rect::new(0.0, 0.0, 100.0, 40.0);
    let geometry = RippleGeometry::compute(container, 0.0, 0.0);
    assert_eq!(geometry.size, 100.0);
    assert_eq!(geometry.left, -50.0);
    assert_eq!(geometry.top, -50.0);

    let doc = MockDocument::new(Viewport::new(1024.0, 768.0));
    let scheduler = ManualScheduler::new();
    let button = MockElement::new("button").with_bounds(Rect::new(200.0, 300.0, 100.0, 40.0));
    let ripple = create_ripple(&doc, &scheduler, &button, 200.0, 300.0, &RippleConfig::default()).unwrap();
    assert_eq!(ripple.style("left").as_deref(), Some("-50px"));
    assert_eq!(ripple.style("top").as_deref(), Some("-50px"));
}

// ============================================================================
// NOTIFICATION
// ============================================================================

#[test]
fn notification_lifecycle() {
    let doc = MockDocument::new(Viewport::new(1024.0, 768.0));
    let scheduler = ManualScheduler::new();
    let config = ToastConfig::default();

    let toast = show_notification(&doc, &scheduler, "Welcome", &ToastOptions::default(), &config).unwrap();
    assert!(toast.is_attached());
    assert!(toast.has_class("success"));
    assert!(!toast.has_class(SHOW_CLASS));

    scheduler.advance(10);
    assert!(toast.has_class(SHOW_CLASS));

    scheduler.advance(2_989);
    assert!(toast.has_class(SHOW_CLASS));
    scheduler.advance(1);
    assert!(!toast.has_class(SHOW_CLASS));
    assert!(toast.is_attached());

    scheduler.advance(499);
    assert!(toast.is_attached());
    scheduler.advance(1);
    assert!(!toast.is_attached());
    assert!(doc.body().children().is_empty());
    assert_eq!(scheduler.pending(), 0);
}

#[test]
fn short_toast_still_enters_first() {
    let doc = MockDocument::new(Viewport::new(1024.0, 768.0));
    let scheduler = ManualScheduler::new();
    let config = ToastConfig::default();
    let options = ToastOptions {
        duration_ms: 10,
        ..ToastOptions::default()
    };

    let toast = show_notification(&doc, &scheduler, "Quick", &options, &config).unwrap();
    // Both timers fall due at 10ms; entry was scheduled first and runs first
    scheduler.advance(10);
    assert!(!toast.has_class(SHOW_CLASS));
    scheduler.advance(500);
    assert!(!toast.is_attached());
}
