//! A tour of the stock widgets.
//!
//! - Tab moves focus between the list and the notes pane
//! - Up/Down move the focused widget
//! - Typing goes to the input box
//! - Esc asks to quit; Ctrl-C quits immediately
//!
//! A background thread sends a tick every second to show external events.
//! Set `TERVI_LOG=/path/to/file` to capture tracing output.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::mpsc;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use tervi::color::rgb;
use tervi::{
    confirm_dialog, hstack, inline_stack, list, map, run_with, scroll_view, text, text_field,
    vstack, zstack, Config, ConfirmState, Event, Key, ListState, Message, Outcome, ScrollState,
    TextFieldState, View,
};
use tracing_subscriber::EnvFilter;

const FILES: [&str; 8] = [
    "Cargo.toml",
    "src/lib.rs",
    "src/view/mod.rs",
    "src/layout/molder.rs",
    "src/renderer/buffer.rs",
    "src/input/decoder.rs",
    "src/pipeline/mount.rs",
    "tests/runtime.rs",
];

const NOTES: [&str; 4] = [
    "Every frame the whole view tree is rebuilt from application state.",
    "Leaves wrap per glyph; wide glyphs like 日本語 take two cells.",
    "Containers split the space left over by fixed-size children evenly between auto-sized ones.",
    "Scroll this pane with Up/Down after moving focus here with Tab.",
];

#[derive(Clone, Copy, PartialEq, Eq)]
enum Focus {
    Files,
    Notes,
}

struct App {
    focus: Cell<Focus>,
    ticks: Cell<u64>,
    files: Rc<RefCell<ListState>>,
    notes: Rc<RefCell<ScrollState>>,
    input: Rc<RefCell<TextFieldState>>,
    quit: Rc<RefCell<ConfirmState>>,
}

impl App {
    fn new() -> Self {
        Self {
            focus: Cell::new(Focus::Files),
            ticks: Cell::new(0),
            files: Rc::default(),
            notes: Rc::default(),
            input: Rc::default(),
            quit: Rc::default(),
        }
    }

    fn priority(&self, pane: Focus) -> i32 {
        if self.focus.get() == pane { 10 } else { 0 }
    }

    fn pane(&self, view: View, pane: Focus) -> View {
        let accent = if self.focus.get() == pane {
            rgb(95, 175, 255)
        } else {
            rgb(88, 88, 88)
        };
        view.border_style(tervi::Style::fg(accent))
    }

    fn view(&self) -> View {
        let files = list(&self.files, map(FILES, text));
        let notes = scroll_view(&self.notes, map(NOTES, |note| text(note).padding((0, 0, 1, 0))));

        zstack([
            vstack([
                hstack([
                    self.pane(files, Focus::Files)
                        .title("Files")
                        .relative_size(5, 0)
                        .priority(self.priority(Focus::Files)),
                    self.pane(notes, Focus::Notes)
                        .title("Notes")
                        .priority(self.priority(Focus::Notes)),
                ]),
                text_field(&self.input).border().title("Input").height(6).priority(-1),
                inline_stack([
                    text(" Tab ").invert(true),
                    text(" focus  "),
                    text(" Esc ").invert(true),
                    text(" quit  "),
                    text(format!("ticks: {}", self.ticks.get())).fg(rgb(135, 135, 135)),
                ])
                .height(1),
            ]),
            confirm_dialog(&self.quit, "Quit", "Are you sure to quit?"),
        ])
    }

    fn handle(&self, event: Event<()>) -> Outcome {
        match event {
            Event::External(()) => self.ticks.set(self.ticks.get() + 1),
            Event::Key(Key::TAB) => self.focus.set(match self.focus.get() {
                Focus::Files => Focus::Notes,
                Focus::Notes => Focus::Files,
            }),
            Event::Key(Key::ESC) => self.quit.borrow_mut().open = true,
            Event::Key(_) => return Outcome::Unhandled,
        }
        Outcome::Handled
    }
}

fn init_logging() {
    let Ok(path) = std::env::var("TERVI_LOG") else {
        return;
    };
    let Ok(file) = std::fs::File::create(&path) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tervi=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

fn main() -> tervi::Result<()> {
    init_logging();

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        while tx.send(Message::Event(())).is_ok() {
            thread::sleep(Duration::from_secs(1));
        }
    });

    let app = Rc::new(App::new());
    let handler = Rc::clone(&app);
    let config = Config::new()
        .events(rx)
        .on_event(move |event| handler.handle(event))
        .default_style(tervi::Style::fg(rgb(215, 215, 215)));

    run_with(move || app.view(), config)
}
