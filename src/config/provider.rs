//! The parameter provider seam.

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::ParametrosSueldo;

/// Source of the statutory parameters in force on a date.
///
/// The calculation pipeline asks a provider for the parameters of the input's
/// date and AFP fund. [`ConfigLoader`](super::ConfigLoader) serves them from
/// YAML period files; tests supply their own doubles.
pub trait ParameterProvider {
    /// Returns the parameters in force on `fecha`, with the AFP rate resolved
    /// for the fund code `afp`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ErrorParametros`](crate::error::EngineError::ErrorParametros)
    /// when no parameters apply to `fecha` or they cannot be assembled.
    fn get_parametros(&self, fecha: NaiveDate, afp: &str) -> EngineResult<ParametrosSueldo>;
}
