use std::time::Instant;

use otp_mini::{Command, Engine, InputEvent, InputKind, OtpConfig, StateFlags, TriggerEvent};

fn paste(text: &str) -> InputEvent {
    InputEvent::Paste {
        text: text.to_string(),
    }
}

fn change(value: &str) -> Command {
    Command::Trigger(TriggerEvent::Change {
        value: value.to_string(),
    })
}

fn complete(value: &str) -> Command {
    Command::Trigger(TriggerEvent::Complete {
        value: value.to_string(),
    })
}

#[test]
fn paste_overwrites_only_the_prefix() {
    let mut eng = Engine::new(OtpConfig::default());
    let now = Instant::now();
    let _ = eng.set_value("345678", now);

    let cmds = eng.handle_event(paste("12"), now);
    assert_eq!(
        cmds,
        vec![
            Command::PreventDefault,
            Command::FocusField(5),
            change("125678"),
            complete("125678")
        ]
    );
    assert_eq!(eng.value(), "125678");
}

#[test]
fn grouped_format_paste_fills_every_field() {
    let mut eng = Engine::new(OtpConfig {
        format: "xxx-xxx".into(),
        ..OtpConfig::default()
    });
    let cmds = eng.handle_event(paste("123456"), Instant::now());
    assert_eq!(
        cmds,
        vec![
            Command::PreventDefault,
            Command::FocusField(5),
            change("123456"),
            complete("123456"),
            Command::AddState(StateFlags::COMPLETE)
        ]
    );

    let snap = eng.snapshot();
    assert_eq!(
        snap.field_values,
        vec![Some('1'), Some('2'), Some('3'), Some('4'), Some('5'), Some('6')]
    );
    assert_eq!(snap.combined_value, "123456");
    assert!(snap.is_complete);
}

#[test]
fn partial_paste_focuses_the_next_field() {
    let mut eng = Engine::new(OtpConfig::default());
    let cmds = eng.handle_event(paste("12"), Instant::now());
    assert_eq!(
        cmds,
        vec![Command::PreventDefault, Command::FocusField(2), change("12")]
    );
}

#[test]
fn separators_and_letters_are_stripped_for_numeric() {
    let mut eng = Engine::new(OtpConfig::default());
    let now = Instant::now();
    let _ = eng.handle_event(paste("12-34 56"), now);
    assert_eq!(eng.value(), "123456");

    let mut eng = Engine::new(OtpConfig::default());
    let cmds = eng.handle_event(paste("a1b2"), now);
    assert_eq!(eng.value(), "12");
    assert!(cmds.contains(&Command::FocusField(2)));
}

#[test]
fn alphanumeric_paste_keeps_letters() {
    let mut eng = Engine::new(OtpConfig {
        kind: InputKind::Alphanumeric,
        ..OtpConfig::default()
    });
    let _ = eng.handle_event(paste("ab-12 ü"), Instant::now());
    assert_eq!(eng.value(), "ab12");
}

#[test]
fn overflow_is_discarded() {
    let mut eng = Engine::new(OtpConfig::default());
    let cmds = eng.handle_event(paste("123456789"), Instant::now());
    assert_eq!(eng.value(), "123456");
    assert!(cmds.contains(&Command::FocusField(5)));
}

#[test]
fn paste_without_usable_characters_changes_nothing() {
    let mut eng = Engine::new(OtpConfig::default());
    let now = Instant::now();
    let _ = eng.set_value("12", now);
    let cmds = eng.handle_event(paste("--ab"), now);
    assert_eq!(cmds, vec![Command::PreventDefault]);
    assert_eq!(eng.value(), "12");
}

#[test]
fn paste_completion_submits_when_configured() {
    let mut eng = Engine::new(OtpConfig {
        auto_submit: true,
        ..OtpConfig::default()
    });
    let cmds = eng.handle_event(paste("654321"), Instant::now());
    assert!(cmds.contains(&Command::Trigger(TriggerEvent::Submit {
        value: "654321".into()
    })));
}
