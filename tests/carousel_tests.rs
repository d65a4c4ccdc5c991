//! Integration tests for the show carousel driven through a simulated host.

use std::time::Duration;

use playbill::ui::{
    Carousel, CarouselEvent, CarouselSettings, Component, HostCallback, ImageStatus, InputEvent,
    Key, SimulatedHost, Slot,
};

mod fixtures;
use fixtures::test_shows;

const SETTLE: Duration = Duration::from_secs(2);

fn carousel(count: usize) -> Carousel {
    Carousel::new(test_shows(count), CarouselSettings::default()).expect("valid carousel")
}

fn press(carousel: &mut Carousel, host: &mut SimulatedHost, key: Key) -> Vec<CarouselEvent> {
    let mut events: Vec<_> = carousel
        .handle_input(&InputEvent::key(key), host.now(), host)
        .into_iter()
        .collect();
    events.extend(host.settle(carousel, SETTLE));
    events
}

fn drag(carousel: &mut Carousel, host: &mut SimulatedHost, from: f64, to: f64) -> Vec<CarouselEvent> {
    let now = host.now();
    let mut events = Vec::new();
    events.extend(carousel.handle_input(&InputEvent::PointerDown { x: from, y: 0.0 }, now, host));
    events.extend(carousel.handle_input(&InputEvent::PointerMove { x: (from + to) / 2.0, y: 0.0 }, now, host));
    events.extend(carousel.handle_input(&InputEvent::PointerUp { x: to, y: 0.0 }, now, host));
    events
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn test_wraps_forward_and_back() {
    let mut carousel = carousel(3);
    let mut host = SimulatedHost::new();

    let mut centers = Vec::new();
    for _ in 0..3 {
        for event in press(&mut carousel, &mut host, Key::Right) {
            if let CarouselEvent::CenterChanged { index } = event {
                centers.push(index);
            }
        }
    }
    assert_eq!(centers, vec![1, 2, 0]);

    press(&mut carousel, &mut host, Key::Left);
    assert_eq!(carousel.center_index(), 2);
    assert_eq!(carousel.item_in(Slot::Right), 0);
    assert_eq!(carousel.item_in(Slot::Left), 1);
}

#[test]
fn test_two_items_show_the_other_item_on_both_sides() {
    let mut carousel = carousel(2);
    let mut host = SimulatedHost::new();

    assert_eq!(carousel.item_in(Slot::Left), 1);
    assert_eq!(carousel.item_in(Slot::Right), 1);

    press(&mut carousel, &mut host, Key::Right);
    assert_eq!(carousel.center_index(), 1);
    assert_eq!(carousel.item_in(Slot::Left), 0);
    assert_eq!(carousel.item_in(Slot::Right), 0);

    press(&mut carousel, &mut host, Key::Right);
    assert_eq!(carousel.center_index(), 0);
}

#[test]
fn test_single_item_never_moves() {
    let mut carousel = carousel(1);
    let mut host = SimulatedHost::new();

    assert!(press(&mut carousel, &mut host, Key::Right).is_empty());
    assert!(drag(&mut carousel, &mut host, 500.0, 200.0).is_empty());
    host.settle(&mut carousel, SETTLE);
    assert_eq!(carousel.center_index(), 0);
    assert_eq!(carousel.item_in(Slot::Left), 0);
}

#[test]
fn test_navigation_while_animating_is_dropped() {
    let mut carousel = carousel(4);
    let mut host = SimulatedHost::new();

    carousel.handle_input(&InputEvent::key(Key::Right), host.now(), &mut host);
    host.run_until(&mut carousel, Duration::from_millis(100));
    assert!(carousel.is_animating());

    assert_eq!(
        carousel.handle_input(&InputEvent::key(Key::Right), host.now(), &mut host),
        None
    );
    host.settle(&mut carousel, SETTLE);
    assert_eq!(carousel.center_index(), 1);
}

#[test]
fn test_no_frame_shows_new_index_with_leftover_offset() {
    let mut carousel = carousel(5);
    let mut host = SimulatedHost::new();
    carousel.handle_input(&InputEvent::key(Key::Right), host.now(), &mut host);

    let mut previous_offset = 0.0;
    while let Some((at, callback)) = host.next_due(SETTLE) {
        let event = match callback {
            HostCallback::Frame(id) => carousel.on_frame(id, at, &mut host),
            HostCallback::Timer(id) => carousel.on_timer(id, at, &mut host),
        };

        if carousel.center_index() == 0 {
            assert!(carousel.offset() >= previous_offset, "offset must grow monotonically");
            previous_offset = carousel.offset();
        } else {
            assert_eq!(event, Some(CarouselEvent::CenterChanged { index: 1 }));
            assert!(carousel.offset().abs() < f64::EPSILON);
        }
    }
    assert_eq!(carousel.center_index(), 1);
}

// ============================================================================
// Dragging
// ============================================================================

#[test]
fn test_long_drag_lands_one_item_away() {
    let mut carousel = carousel(3);
    let mut host = SimulatedHost::new();

    drag(&mut carousel, &mut host, 600.0, 420.0);
    assert!(carousel.is_animating());
    host.settle(&mut carousel, SETTLE);
    assert_eq!(carousel.center_index(), 1);

    drag(&mut carousel, &mut host, 200.0, 500.0);
    host.settle(&mut carousel, SETTLE);
    assert_eq!(carousel.center_index(), 0);
}

#[test]
fn test_short_drag_springs_back() {
    let mut carousel = carousel(3);
    let mut host = SimulatedHost::new();

    drag(&mut carousel, &mut host, 500.0, 440.0);
    assert!(carousel.is_animating());
    host.settle(&mut carousel, SETTLE);

    assert_eq!(carousel.center_index(), 0);
    assert!(carousel.offset().abs() < f64::EPSILON);
}

#[test]
fn test_tiny_drag_snaps_without_animation() {
    let mut carousel = carousel(3);
    let mut host = SimulatedHost::new();

    drag(&mut carousel, &mut host, 500.0, 497.0);
    assert!(!carousel.is_animating());
    assert_eq!(host.pending_frames(), 0);
    assert!(carousel.offset().abs() < f64::EPSILON);
}

#[test]
fn test_drag_release_is_deterministic() {
    let run = || {
        let mut carousel = carousel(4);
        let mut host = SimulatedHost::new();
        drag(&mut carousel, &mut host, 700.0, 560.0);

        let mut views = Vec::new();
        while let Some((at, callback)) = host.next_due(SETTLE) {
            match callback {
                HostCallback::Frame(id) => carousel.on_frame(id, at, &mut host),
                HostCallback::Timer(id) => carousel.on_timer(id, at, &mut host),
            };
            views.push(carousel.view());
        }
        views
    };

    let first = run();
    let second = run();
    assert!(!first.is_empty());
    assert_eq!(first, second);
    assert_eq!(first.last().map(|v| v.center_index), Some(1));
}

#[test]
fn test_click_after_drag_does_not_flip() {
    let mut carousel = carousel(3);
    let mut host = SimulatedHost::new();

    drag(&mut carousel, &mut host, 500.0, 450.0);
    let event = carousel.handle_input(&InputEvent::Click { item: 0 }, host.now(), &mut host);
    assert_eq!(event, None);
    assert_eq!(carousel.flipped_index(), None);
}

// ============================================================================
// Flip
// ============================================================================

#[test]
fn test_flip_reveals_detail_after_delay() {
    let mut carousel = carousel(3);
    let mut host = SimulatedHost::new();

    let event = carousel.handle_input(&InputEvent::Click { item: 0 }, host.now(), &mut host);
    assert_eq!(event, Some(CarouselEvent::Flipped { index: 0 }));
    assert!(!carousel.detail_visible());

    host.settle(&mut carousel, SETTLE);
    assert!(carousel.detail_visible());

    let view = carousel.view();
    let center = &view.slots[1];
    assert!(center.flipped && center.detail_visible);
    assert!(view.slots[0].transform.opacity < 0.1);
    assert!(view.slots[2].transform.opacity < 0.1);
}

#[test]
fn test_only_center_can_flip() {
    let mut carousel = carousel(3);
    let mut host = SimulatedHost::new();

    let event = carousel.handle_input(&InputEvent::Click { item: 1 }, host.now(), &mut host);
    assert_eq!(event, None);
    assert_eq!(carousel.flipped_index(), None);
}

#[test]
fn test_flipped_index_always_equals_center() {
    let mut carousel = carousel(4);
    let mut host = SimulatedHost::new();

    carousel.handle_input(&InputEvent::key(Key::Enter), host.now(), &mut host);
    host.settle(&mut carousel, SETTLE);

    let inputs = [Key::Right, Key::Right, Key::Left, Key::Right, Key::Right, Key::Right];
    for key in inputs {
        let event = carousel.handle_input(&InputEvent::key(key), host.now(), &mut host);
        assert!(matches!(event, Some(CarouselEvent::CenterChanged { .. })));
        assert!(!carousel.is_animating(), "flipped navigation swaps instantly");
        assert_eq!(carousel.flipped_index(), Some(carousel.center_index()));
        assert!(carousel.detail_visible());
    }
    assert_eq!(carousel.center_index(), 0);
}

#[test]
fn test_unflip_clears_after_delay() {
    let mut carousel = carousel(3);
    let mut host = SimulatedHost::new();

    carousel.handle_input(&InputEvent::key(Key::Enter), host.now(), &mut host);
    host.settle(&mut carousel, SETTLE);

    let event = carousel.handle_input(&InputEvent::key(Key::Enter), host.now(), &mut host);
    assert_eq!(event, Some(CarouselEvent::Unflipped { index: 0 }));
    assert_eq!(carousel.flipped_index(), Some(0));

    host.settle(&mut carousel, SETTLE);
    assert_eq!(carousel.flipped_index(), None);
    assert!(carousel.view().slots.iter().all(|slot| !slot.flipped));
}

// ============================================================================
// Posters
// ============================================================================

#[test]
fn test_failed_poster_uses_placeholder() {
    let mut carousel = carousel(3);
    let placeholder = CarouselSettings::default().placeholder_image;

    carousel.on_poster_loaded(1, ImageStatus::Failed);
    let view = carousel.view();

    assert_eq!(view.slots[1].poster, "/images/posters/0.jpg");
    assert_eq!(view.slots[2].poster, placeholder);

    // Out-of-range reports are ignored.
    carousel.on_poster_loaded(7, ImageStatus::Failed);
    assert_eq!(carousel.poster_src(7), placeholder);
}
