//! Output sink for `echo` and host task messages.
//!
//! Every line a script prints goes through the context's handler. The `nf`
//! binary writes to stdout; library callers that set `capture_output` and
//! the tests read lines back from a buffer.

use std::sync::Arc;

use parking_lot::Mutex;

/// Where printed lines go.
pub enum PrintHandler {
    Stdout,
    /// Lines joined with `\n`, each one newline-terminated.
    Buffer(Mutex<String>),
    Silent,
}

impl PrintHandler {
    /// Emit one line; the trailing newline is added here.
    pub fn println(&self, line: &str) {
        match self {
            PrintHandler::Stdout => println!("{line}"),
            PrintHandler::Buffer(buffer) => {
                let mut buffer = buffer.lock();
                buffer.push_str(line);
                buffer.push('\n');
            }
            PrintHandler::Silent => {}
        }
    }

    /// Everything captured so far; empty unless this is a buffer.
    pub fn get_output(&self) -> String {
        match self {
            PrintHandler::Buffer(buffer) => buffer.lock().clone(),
            PrintHandler::Stdout | PrintHandler::Silent => String::new(),
        }
    }
}

/// Handler shared between a context and the caller that reads its output.
pub type SharedPrintHandler = Arc<PrintHandler>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Stdout)
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Buffer(Mutex::new(String::new())))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Silent)
}
