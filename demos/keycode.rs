//! Key-code inspector.
//!
//! Shows the code of every key press that reaches the fallback handler,
//! newest first. Ctrl-C quits.
//!
//! Set `TERVI_LOG=/path/to/file` to write the library's tracing output to a
//! file (the terminal itself is busy drawing the UI).

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Mutex;

use tervi::{inline_map, run_with, string, Config, Event, Key, Outcome, View};
use tracing_subscriber::EnvFilter;

const HISTORY: usize = 150;

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

fn root_view(keys: &[Key]) -> View {
    inline_map(keys.iter().copied(), |key| string(format_args!(" {:#x}", key.code())))
        .border()
        .title("Key Code")
        .relative_size(9, 9)
}

fn main() -> tervi::Result<()> {
    init_logging();

    let keys: Rc<RefCell<Vec<Key>>> = Rc::default();
    let recorded = Rc::clone(&keys);
    let config = Config::<()>::new().on_event(move |event| {
        if let Event::Key(key) = event {
            let mut keys = recorded.borrow_mut();
            keys.insert(0, key);
            keys.truncate(HISTORY);
        }
        Outcome::Handled
    });

    run_with(move || root_view(&keys.borrow()), config)
}
