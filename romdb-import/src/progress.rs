//! Conversion progress reporting.

/// Receives progress updates while database files are loaded.
pub trait ImportProgress {
    /// Called after each game section is stored.
    fn on_game(&self, current: usize, total: usize, rom_id: &str);

    /// Called when a source file starts loading (e.g. "Loading details database").
    fn on_phase(&self, message: &str);

    /// Called when an optional source was not supplied.
    fn on_skipped(&self, source: &str);

    /// Called once everything is committed.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl ImportProgress for SilentProgress {
    fn on_game(&self, _current: usize, _total: usize, _rom_id: &str) {}
    fn on_phase(&self, _message: &str) {}
    fn on_skipped(&self, _source: &str) {}
    fn on_complete(&self, _message: &str) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl ImportProgress for LogProgress {
    fn on_game(&self, current: usize, total: usize, rom_id: &str) {
        if current.is_multiple_of(250) || current == total {
            log::info!("  [{current}/{total}] {rom_id}");
        }
    }

    fn on_phase(&self, message: &str) {
        log::info!("{message}");
    }

    fn on_skipped(&self, source: &str) {
        log::info!("No {source} supplied, skipping");
    }

    fn on_complete(&self, message: &str) {
        log::info!("{message}");
    }
}
