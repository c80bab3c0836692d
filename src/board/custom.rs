use super::BoardSupport;
use crate::clock::ClockSource;
use crate::error::TimingError;
use crate::instrument::Instrumentation;
use crate::output::OutputFormat;

/// Board assembled from any clock provider.
///
/// For targets this crate has no backend for, and for driving the harness
/// with a [`ScriptedClock`](crate::clock::ScriptedClock) in tests.
#[derive(Debug)]
pub struct CustomBoard<C> {
    name: String,
    clock: C,
    format: OutputFormat,
    instrumentation: Instrumentation,
    initialised: bool,
}

impl<C: ClockSource> CustomBoard<C> {
    /// Create a board named `name` measuring with `clock`.
    pub fn new(name: impl Into<String>, clock: C) -> Self {
        Self {
            name: name.into(),
            clock,
            format: OutputFormat::Plain,
            instrumentation: Instrumentation::Boundary,
            initialised: false,
        }
    }

    /// Set the output format.
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the trigger instrumentation policy.
    pub fn with_instrumentation(mut self, policy: Instrumentation) -> Self {
        self.instrumentation = policy;
        self
    }
}

impl<C: ClockSource> BoardSupport for CustomBoard<C> {
    fn name(&self) -> &str {
        &self.name
    }

    fn initialise(&mut self) -> Result<(), TimingError> {
        self.initialised = true;
        Ok(())
    }

    fn is_initialised(&self) -> bool {
        self.initialised
    }

    fn clock(&self) -> &dyn ClockSource {
        &self.clock
    }

    fn output_format(&self) -> OutputFormat {
        self.format
    }

    fn instrumentation(&self) -> Instrumentation {
        self.instrumentation
    }
}
