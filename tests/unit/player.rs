use std::cell::RefCell;
use std::rc::Rc;

use super::*;

fn canvas() -> Canvas {
    Canvas {
        width: 2,
        height: 1,
    }
}

fn frames(range: std::ops::Range<u8>) -> Vec<FrameRGBA> {
    range
        .map(|v| FrameRGBA::filled(2, 1, [v, v, v, 255]))
        .collect()
}

fn player_with_log(fps: Fps) -> (AnimationPlayer, Rc<RefCell<Vec<usize>>>) {
    let mut player = AnimationPlayer::new(fps, canvas());
    let log = Rc::new(RefCell::new(Vec::new()));
    let l = Rc::clone(&log);
    player.on_frame_updated(move |ev| l.borrow_mut().push(ev.index));
    (player, log)
}

#[test]
fn idle_until_animate() {
    let mut player = AnimationPlayer::new(Fps::new(12, 1).unwrap(), canvas());
    player.add_frames(frames(0..3));
    assert_eq!(player.tick(0.0), TickOutcome::Idle);
    assert!(!player.is_playing());
}

#[test]
fn resumes_after_underrun_without_replaying() {
    let (mut player, log) = player_with_log(Fps::new(1, 1).unwrap());
    player.add_frames(frames(0..6));
    player.animate();

    for s in 0..6u32 {
        assert_eq!(player.tick(f64::from(s)), TickOutcome::Rendered(s as usize));
    }
    assert_eq!(player.tick(6.0), TickOutcome::Underrun(6));
    assert!(!player.is_playing());
    assert_eq!(player.current_frame(), 6);

    player.add_frames(frames(6..10));
    player.animate();
    for s in 0..4u32 {
        player.tick(100.0 + f64::from(s));
    }
    assert_eq!(player.tick(104.0), TickOutcome::Underrun(10));

    assert_eq!(*log.borrow(), (0..10).collect::<Vec<_>>());
    assert_eq!(player.target().pixel(0, 0), Some([9, 9, 9, 255]));
}

#[test]
fn same_virtual_frame_is_not_redrawn() {
    let (mut player, log) = player_with_log(Fps::new(2, 1).unwrap());
    player.add_frames(frames(0..4));
    player.animate();

    assert_eq!(player.tick(10.0), TickOutcome::Rendered(0));
    assert_eq!(player.tick(10.2), TickOutcome::Unchanged(0));
    assert_eq!(player.tick(10.5), TickOutcome::Rendered(1));
    assert_eq!(player.tick(10.6), TickOutcome::Unchanged(1));
    assert_eq!(*log.borrow(), vec![0, 1]);
}

#[test]
fn frames_appended_while_playing_are_picked_up() {
    let (mut player, log) = player_with_log(Fps::new(1, 1).unwrap());
    player.add_frames(frames(0..2));
    player.animate();
    player.tick(0.0);
    player.tick(1.0);
    player.add_frames(frames(2..4));
    assert_eq!(player.tick(2.0), TickOutcome::Rendered(2));
    assert_eq!(player.tick(3.0), TickOutcome::Rendered(3));
    assert!(player.is_playing());
    assert_eq!(*log.borrow(), vec![0, 1, 2, 3]);
}

#[test]
fn slow_refresh_skips_frames() {
    let (mut player, log) = player_with_log(Fps::new(12, 1).unwrap());
    player.add_frames(frames(0..30));
    player.animate();
    player.tick(0.0);
    assert_eq!(player.tick(1.0), TickOutcome::Rendered(12));
    assert_eq!(*log.borrow(), vec![0, 12]);
}

#[test]
fn cancel_stops_the_loop_and_keeps_position() {
    let (mut player, _log) = player_with_log(Fps::new(1, 1).unwrap());
    player.add_frames(frames(0..5));
    player.animate();
    player.tick(0.0);
    player.tick(2.0);
    player.cancel();
    assert_eq!(player.tick(3.0), TickOutcome::Idle);
    assert_eq!(player.current_frame(), 2);

    player.animate();
    assert_eq!(player.tick(50.0), TickOutcome::Unchanged(2));
    assert_eq!(player.tick(51.0), TickOutcome::Rendered(3));
}

#[test]
fn empty_buffer_underruns_at_zero() {
    let mut player = AnimationPlayer::new(Fps::new(12, 1).unwrap(), canvas());
    player.animate();
    assert_eq!(player.tick(0.0), TickOutcome::Underrun(0));
    assert_eq!(player.current_frame(), 0);
    assert!(player.is_empty());
}

#[test]
fn unsubscribed_callbacks_stop_receiving() {
    let mut player = AnimationPlayer::new(Fps::new(1, 1).unwrap(), canvas());
    let hits = Rc::new(RefCell::new(0));
    let h = Rc::clone(&hits);
    let id = player.on_frame_updated(move |_| *h.borrow_mut() += 1);
    player.add_frames(frames(0..3));
    player.animate();
    player.tick(0.0);
    assert!(player.unsubscribe(id));
    player.tick(1.0);
    assert_eq!(*hits.borrow(), 1);
}
