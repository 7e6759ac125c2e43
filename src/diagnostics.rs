//! Reporting of malformed input.
//!
//! Constructors that parse user input accept a [`Diagnostics`] sink and call it
//! before returning an error. The sink only observes: whatever it does, the
//! constructor's result is the same.

use crate::error::GeoHashError;

/// A malformed-input event.
#[derive(Debug, Clone, Copy)]
pub struct Diagnostic<'a> {
    /// Name of the operation that rejected the input, e.g. `"from_geohash"`.
    pub operation: &'static str,
    /// The rejected input as given by the caller.
    pub input: &'a str,
    pub error: &'a GeoHashError,
}

/// Receiver for [`Diagnostic`] events.
pub trait Diagnostics {
    fn warn(&self, diagnostic: &Diagnostic<'_>);
}

/// Forwards diagnostics to the `log` facade at warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn warn(&self, diagnostic: &Diagnostic<'_>) {
        log::warn!(
            "{} rejected {:?}: {}",
            diagnostic.operation,
            diagnostic.input,
            diagnostic.error
        );
    }
}

/// Discards every diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn warn(&self, _diagnostic: &Diagnostic<'_>) {}
}

impl<F> Diagnostics for F
where
    F: Fn(&Diagnostic<'_>),
{
    fn warn(&self, diagnostic: &Diagnostic<'_>) {
        self(diagnostic)
    }
}

/// Reports `result`'s error, if any, and hands the result back unchanged.
pub(crate) fn report<T>(
    diagnostics: &dyn Diagnostics,
    operation: &'static str,
    input: &str,
    result: Result<T, GeoHashError>,
) -> Result<T, GeoHashError> {
    if let Err(error) = &result {
        diagnostics.warn(&Diagnostic {
            operation,
            input,
            error,
        });
    }
    result
}
