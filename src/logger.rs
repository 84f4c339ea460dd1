use std::{fs::File, path::Path, sync::Mutex};

use tracing::Level;

pub const LOG_FILE: &str = "snake.log";

/// Send tracing output to `path`. Stdout belongs to the game, so nothing is
/// logged when the file cannot be created.
pub fn init_logger(path: &Path) -> bool {
    let file = match File::create(path) {
        Ok(file) => file,
        Err(_) => return false,
    };

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .try_init()
        .is_ok()
}
