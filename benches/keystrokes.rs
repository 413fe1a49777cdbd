//! Benchmarks for otp_mini event throughput.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use otp_mini::{Engine, InputEvent, InputKind, KeyCode, OtpConfig, traits::Clipboard};
use std::time::{Duration, Instant};

/// Mock clipboard for benchmarking
struct MockClipboard {
    content: Option<String>,
}

impl Clipboard for MockClipboard {
    fn get(&mut self) -> Option<String> {
        self.content.clone()
    }
}

fn input(index: usize, c: char) -> InputEvent {
    InputEvent::Input {
        index,
        data: c.to_string(),
    }
}

fn backspace(index: usize) -> InputEvent {
    InputEvent::KeyDown {
        index,
        key: KeyCode::Backspace,
    }
}

fn benchmark_type_and_erase(c: &mut Criterion) {
    let mut engine = Engine::new(OtpConfig::default());
    let now = Instant::now();

    c.bench_function("type six digits then erase", |b| {
        b.iter(|| {
            for (i, ch) in "482913".chars().enumerate() {
                black_box(engine.handle_event(black_box(input(i, ch)), now));
            }
            for i in (0..6).rev() {
                black_box(engine.handle_event(black_box(backspace(i)), now));
            }
        });
    });
}

fn benchmark_rejected_input(c: &mut Criterion) {
    let mut engine = Engine::new(OtpConfig::default());
    let now = Instant::now();

    c.bench_function("rejected keystrokes", |b| {
        b.iter(|| {
            for (i, ch) in "abc-!?".chars().enumerate() {
                black_box(engine.handle_event(black_box(input(i, ch)), now));
            }
        });
    });
}

fn benchmark_paste(c: &mut Criterion) {
    let mut engine = Engine::new(OtpConfig {
        format: "xxxx-xxxx-xxxx".into(),
        kind: InputKind::Alphanumeric,
        ..OtpConfig::default()
    });
    let mut clipboard = MockClipboard {
        content: Some("AB12 CD34 EF56 overflow".to_string()),
    };
    let now = Instant::now();

    c.bench_function("paste with filtering", |b| {
        b.iter(|| {
            black_box(engine.paste_from(&mut clipboard, now));
            black_box(engine.clear());
        });
    });
}

fn benchmark_debounced_burst(c: &mut Criterion) {
    let mut engine = Engine::new(OtpConfig {
        debounce: true,
        ..OtpConfig::default()
    });
    let start = Instant::now();

    c.bench_function("debounced setValue burst", |b| {
        b.iter(|| {
            for step in 0..10u64 {
                let at = start + Duration::from_millis(step * 10);
                black_box(engine.set_value(black_box("123456"), at));
            }
            black_box(engine.poll(start + Duration::from_secs(1)));
        });
    });
}

fn benchmark_snapshot(c: &mut Criterion) {
    let mut engine = Engine::new(OtpConfig {
        required: true,
        ..OtpConfig::default()
    });
    let _ = engine.set_value("123", Instant::now());

    c.bench_function("snapshot", |b| {
        b.iter(|| black_box(engine.snapshot()));
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(10))
        .sample_size(100);
    targets = benchmark_type_and_erase,
              benchmark_rejected_input,
              benchmark_paste,
              benchmark_debounced_burst,
              benchmark_snapshot
}
criterion_main!(benches);
