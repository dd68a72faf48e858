//! miette reporting of [`OddityError`]s: a stable `oddity::*` code per
//! variant and a help line for placement and path failures.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use oddity::OddityError;

/// Adapter giving an [`OddityError`] a stable diagnostic code and, where
/// the fix is known, a help line.
pub struct ErrorAdapter<'a>(pub &'a OddityError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            OddityError::Io(_) => "oddity::io",
            OddityError::Configuration(_) => "oddity::configuration",
            OddityError::Path(_) => "oddity::path",
            OddityError::PlacementExhausted { .. } => "oddity::placement",
            OddityError::ConstraintUnsatisfiable(_) => "oddity::constraint",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            OddityError::PlacementExhausted { .. } => {
                "use fewer or smaller motifs, or raise the attempt caps in the [placement] configuration"
            }
            OddityError::Path(_) => "check the `d` attribute of the symbol outline files",
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Convert an [`OddityError`] into a reportable diagnostic.
pub fn to_reportable(err: &OddityError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}
