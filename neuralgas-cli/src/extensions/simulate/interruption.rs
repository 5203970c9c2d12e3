//! Interruption handler.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Clears given running flag when the process receives Ctrl-C, so a running simulation stops
/// after its current batch.
pub fn handle_interruption(is_running: Arc<AtomicBool>) -> Result<(), String> {
    ctrlc::set_handler(move || {
        is_running.store(false, Ordering::Relaxed);
    })
    .map_err(|err| format!("cannot set interruption handler: '{err}'"))
}
