use std::fmt;

/// Sink for layout diagnostics.
///
/// The engine itself never touches a global logger; callers pass whichever
/// sink they want. `NoopLog` keeps the engine silent (tests, hot paths),
/// `TracingLog` forwards to `tracing`.
pub trait LayoutLog {
    /// Verbose per-step detail.
    fn debug(&self, args: fmt::Arguments<'_>);

    /// Something the caller might care about (e.g. overlap repair gave up).
    fn warn(&self, args: fmt::Arguments<'_>);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLog;

impl LayoutLog for NoopLog {
    fn debug(&self, _args: fmt::Arguments<'_>) {}
    fn warn(&self, _args: fmt::Arguments<'_>) {}
}

/// Forwards engine diagnostics to the `tracing` macros.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl LayoutLog for TracingLog {
    fn debug(&self, args: fmt::Arguments<'_>) {
        tracing::debug!("{}", args);
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        tracing::warn!("{}", args);
    }
}
