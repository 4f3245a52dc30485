//! End-to-end exercises of the event loop against the in-memory terminal.

use std::io::Cursor;

use vtcore::geometry::Size;
use vtcore::runtime::{Application, Outcome, RuntimeConfig};
use vtcore::terminal::TestBackend;
use vtcore::{Event, Runtime};

struct RecordingApp {
    seen: Vec<Event>,
}

impl Application for RecordingApp {
    fn handle_event(&mut self, event: Event) -> Outcome {
        let quit = matches!(event, Event::Key(ref key) if key.key == vtcore::Key::Char('q'));
        self.seen.push(event);
        if quit {
            Outcome::quit()
        } else {
            Outcome::continue_running()
        }
    }

    fn draw(&self, _frame: &mut vtcore::RenderFrame<'_>) {}
}

#[tokio::test]
async fn runtime_decodes_typed_input_and_quits_on_q() {
    let backend = TestBackend::new(Size::new(20, 5));
    let mut runtime = Runtime::new(backend).unwrap();
    let mut app = RecordingApp { seen: Vec::new() };
    let input = Cursor::new(b"abq".to_vec());
    let result = runtime.run(&mut app, input).await;
    assert!(result.is_ok());
    assert!(app.seen.iter().any(|e| matches!(e, Event::Key(k) if k.key == vtcore::Key::Char('a'))));
    assert!(app.seen.iter().any(|e| matches!(e, Event::Key(k) if k.key == vtcore::Key::Char('q'))));
}

struct QuitAfterThree {
    handled: usize,
}

impl Application for QuitAfterThree {
    fn handle_event(&mut self, _event: Event) -> Outcome {
        self.handled += 1;
        if self.handled >= 3 {
            Outcome::quit()
        } else {
            Outcome::continue_running()
        }
    }

    fn draw(&self, _frame: &mut vtcore::RenderFrame<'_>) {}
}

#[tokio::test]
async fn runtime_runs_on_ticks_alone_with_no_input() {
    let backend = TestBackend::new(Size::new(10, 3));
    let config = RuntimeConfig {
        tick_interval: std::time::Duration::from_millis(5),
        ..RuntimeConfig::default()
    };
    let mut runtime = Runtime::with_config(backend, config).unwrap();
    let mut app = QuitAfterThree { handled: 0 };
    let input = Cursor::new(Vec::<u8>::new());
    let result = runtime.run(&mut app, input).await;
    assert!(result.is_ok());
    assert!(app.handled >= 3);
}

#[tokio::test]
async fn runtime_batch_event_is_unpacked_in_order() {
    use vtcore::Command;

    struct BatchApp {
        order: Vec<u8>,
        posted: bool,
    }
    impl Application for BatchApp {
        fn handle_event(&mut self, event: Event) -> Outcome {
            match event {
                Event::Quit => unreachable!("Quit is handled by the runtime, not the app"),
                Event::Tick(_) if !self.posted => {
                    self.posted = true;
                    let batch = Event::Batch(vec![Event::Resize(1, 1), Event::Resize(2, 2)]);
                    Outcome::with_commands(vec![Command::immediate(batch)])
                }
                Event::Resize(w, _) => {
                    self.order.push(w as u8);
                    if self.order.len() == 2 {
                        Outcome::quit()
                    } else {
                        Outcome::continue_running()
                    }
                }
                _ => Outcome::continue_running(),
            }
        }
        fn draw(&self, _frame: &mut vtcore::RenderFrame<'_>) {}
    }

    let backend = TestBackend::new(Size::new(10, 3));
    let config = RuntimeConfig {
        tick_interval: std::time::Duration::from_millis(5),
        ..RuntimeConfig::default()
    };
    let mut runtime = Runtime::with_config(backend, config).unwrap();
    let mut app = BatchApp { order: Vec::new(), posted: false };
    let input = Cursor::new(Vec::<u8>::new());
    let result = runtime.run(&mut app, input).await;
    assert!(result.is_ok());
    assert_eq!(app.order, vec![1, 2]);
}
