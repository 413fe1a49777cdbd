use std::time::Instant;

use otp_mini::{Command, Engine, InputEvent, OtpConfig, StateFlags, TriggerEvent};

fn focus(index: usize) -> InputEvent {
    InputEvent::Focus { index }
}

fn blur(index: usize) -> InputEvent {
    InputEvent::Blur { index }
}

#[test]
fn first_focus_sets_flag() {
    let mut eng = Engine::new(OtpConfig::default());
    let cmds = eng.handle_event(focus(0), Instant::now());
    assert_eq!(
        cmds,
        vec![
            Command::Trigger(TriggerEvent::Focus),
            Command::AddState(StateFlags::FOCUS)
        ]
    );
    assert_eq!(eng.focused_index(), Some(0));
}

#[test]
fn sibling_transfer_is_not_a_blur() {
    let mut eng = Engine::new(OtpConfig::default());
    let now = Instant::now();
    let _ = eng.handle_event(focus(0), now);

    assert!(eng.handle_event(blur(0), now).is_empty());
    let cmds = eng.handle_event(focus(1), now);
    assert_eq!(cmds, vec![Command::Trigger(TriggerEvent::Focus)]);

    assert!(eng.poll(now).is_empty());
    assert_eq!(eng.focused_index(), Some(1));
    assert!(eng.flags().contains(StateFlags::FOCUS));
}

#[test]
fn blur_is_confirmed_on_the_next_tick() {
    let mut eng = Engine::new(OtpConfig::default());
    let now = Instant::now();
    let _ = eng.handle_event(focus(2), now);
    let _ = eng.handle_event(blur(2), now);

    assert_eq!(eng.focused_index(), Some(2));
    assert_eq!(eng.next_deadline(), Some(now));

    let cmds = eng.poll(now);
    assert_eq!(
        cmds,
        vec![
            Command::Trigger(TriggerEvent::Blur),
            Command::RemoveState(StateFlags::FOCUS)
        ]
    );
    assert_eq!(eng.focused_index(), None);
    assert_eq!(eng.next_deadline(), None);
    assert!(eng.poll(now).is_empty());
}

#[test]
fn focus_outside_the_mask_is_ignored() {
    let mut eng = Engine::new(OtpConfig {
        format: "xx".into(),
        ..OtpConfig::default()
    });
    assert!(eng.handle_event(focus(2), Instant::now()).is_empty());
    assert_eq!(eng.focused_index(), None);
}
