//! Error types for the salary calculation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing a salary.
//! Every variant maps to a stable machine-readable code (see [`EngineError::code`]).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the salary calculation engine.
///
/// All operations in the engine return this error type. The first violated
/// rule aborts the calculation; no partial result is ever produced.
///
/// # Example
///
/// ```
/// use sueldo_engine::error::EngineError;
///
/// let error = EngineError::TipoContratoInvalido {
///     value: "honorarios".to_string(),
/// };
/// assert_eq!(error.code(), "TIPO_CONTRATO_INVALIDO");
/// assert!(error.is_validation());
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The base salary is zero or negative.
    #[error("Base salary must be positive, got {value}")]
    SueldoBaseInvalido {
        /// The rejected base salary.
        value: Decimal,
    },

    /// The calculation date is missing or is not a calendar date.
    #[error("Invalid calculation date: '{value}'")]
    FechaInvalida {
        /// The raw date as received.
        value: String,
    },

    /// No pension fund code was supplied.
    #[error("A pension fund (AFP) code is required")]
    AfpRequerida,

    /// A work-accident insurer was supplied but is blank.
    #[error("Work-accident insurer (mutualidad) must not be blank")]
    MutualidadRequerida,

    /// The contract type is not one of the supported values.
    #[error("Invalid contract type: '{value}'")]
    TipoContratoInvalido {
        /// The contract type as received.
        value: String,
    },

    /// An overtime hour count is negative.
    #[error("Overtime hours '{field}' must not be negative, got {value}")]
    HorasExtrasNegativas {
        /// The offending field.
        field: String,
        /// The rejected value.
        value: Decimal,
    },

    /// A bonus amount is negative.
    #[error("Bonus '{field}' must not be negative, got {value}")]
    BonosNegativos {
        /// The offending field.
        field: String,
        /// The rejected value.
        value: Decimal,
    },

    /// A non-taxable allowance is negative.
    #[error("Non-taxable allowance '{field}' must not be negative, got {value}")]
    NoImponibleNegativo {
        /// The offending field.
        field: String,
        /// The rejected value.
        value: Decimal,
    },

    /// Commissions are negative.
    #[error("Commissions must not be negative, got {value}")]
    ComisionesNegativas {
        /// The rejected value.
        value: Decimal,
    },

    /// Salary advances are negative.
    #[error("Advances must not be negative, got {value}")]
    AnticiposNegativos {
        /// The rejected value.
        value: Decimal,
    },

    /// Court-ordered withholdings are negative.
    #[error("Court-ordered withholdings must not be negative, got {value}")]
    JudicialesNegativos {
        /// The rejected value.
        value: Decimal,
    },

    /// Voluntary pension savings are negative.
    #[error("Voluntary pension savings (APV) must not be negative, got {value}")]
    ApvNegativo {
        /// The rejected value.
        value: Decimal,
    },

    /// Voluntary savings account deposit is negative.
    #[error("Savings account (cuenta 2) deposit must not be negative, got {value}")]
    Cuenta2Negativa {
        /// The rejected value.
        value: Decimal,
    },

    /// The additional health contribution in UF is negative.
    #[error("Additional health contribution must not be negative, got {value} UF")]
    CotizacionAdicionalNegativa {
        /// The rejected value.
        value: Decimal,
    },

    /// Absence days are outside the 0..=30 range.
    #[error("Absence days must be between 0 and 30, got {value}")]
    DiasAusenciaInvalidos {
        /// The rejected value.
        value: Decimal,
    },

    /// An Isapre plan was supplied with a non-positive cost.
    #[error("Isapre plan must be positive, got {value} UF")]
    PlanIsapreInvalido {
        /// The rejected plan value.
        value: Decimal,
    },

    /// The UF value of the parameters is not positive.
    #[error("UF value must be positive, got {value}")]
    ValorUfInvalido {
        /// The rejected value.
        value: Decimal,
    },

    /// The taxable-income ceiling in UF is not positive.
    #[error("Taxable income ceiling must be positive, got {value} UF")]
    TopeUfInvalido {
        /// The rejected value.
        value: Decimal,
    },

    /// The resolved AFP rate is negative.
    #[error("AFP rate must not be negative, got {value}%")]
    ComisionAfpInvalida {
        /// The rejected value.
        value: Decimal,
    },

    /// The work-accident insurance rate is negative.
    #[error("Work-accident insurance rate must not be negative, got {value}%")]
    TasaMutualidadInvalida {
        /// The rejected value.
        value: Decimal,
    },

    /// The weekly working-hours basis is not positive.
    #[error("Weekly working hours must be positive, got {value}")]
    HorasJornadaInvalidas {
        /// The rejected value.
        value: Decimal,
    },

    /// The tax bracket table is empty.
    #[error("At least one income tax bracket is required")]
    TramosImpuestoRequeridos,

    /// Statutory parameters could not be resolved for the requested date.
    #[error("Unable to resolve parameters for {date}: {message}")]
    ErrorParametros {
        /// The calculation date.
        date: NaiveDate,
        /// A description of the failure.
        message: String,
    },

    /// An unexpected failure while computing amounts.
    #[error("Calculation error: {message}")]
    ErrorCalculo {
        /// A description of the calculation error.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Returns the stable machine-readable code of this error.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::SueldoBaseInvalido { .. } => "SUELDO_BASE_INVALIDO",
            EngineError::FechaInvalida { .. } => "FECHA_INVALIDA",
            EngineError::AfpRequerida => "AFP_REQUERIDA",
            EngineError::MutualidadRequerida => "MUTUALIDAD_REQUERIDA",
            EngineError::TipoContratoInvalido { .. } => "TIPO_CONTRATO_INVALIDO",
            EngineError::HorasExtrasNegativas { .. } => "HORAS_EXTRAS_NEGATIVAS",
            EngineError::BonosNegativos { .. } => "BONOS_NEGATIVOS",
            EngineError::NoImponibleNegativo { .. } => "NO_IMPONIBLE_NEGATIVO",
            EngineError::ComisionesNegativas { .. } => "COMISIONES_NEGATIVAS",
            EngineError::AnticiposNegativos { .. } => "ANTICIPOS_NEGATIVOS",
            EngineError::JudicialesNegativos { .. } => "JUDICIALES_NEGATIVOS",
            EngineError::ApvNegativo { .. } => "APV_NEGATIVO",
            EngineError::Cuenta2Negativa { .. } => "CUENTA2_NEGATIVA",
            EngineError::CotizacionAdicionalNegativa { .. } => "COTIZACION_ADICIONAL_NEGATIVA",
            EngineError::DiasAusenciaInvalidos { .. } => "DIAS_AUSENCIA_INVALIDOS",
            EngineError::PlanIsapreInvalido { .. } => "PLAN_ISAPRE_INVALIDO",
            EngineError::ValorUfInvalido { .. } => "VALOR_UF_INVALIDO",
            EngineError::TopeUfInvalido { .. } => "TOPE_UF_INVALIDO",
            EngineError::ComisionAfpInvalida { .. } => "COMISION_AFP_INVALIDA",
            EngineError::TasaMutualidadInvalida { .. } => "TASA_MUTUALIDAD_INVALIDA",
            EngineError::HorasJornadaInvalidas { .. } => "HORAS_JORNADA_INVALIDAS",
            EngineError::TramosImpuestoRequeridos => "TRAMOS_IMPUESTO_REQUERIDOS",
            EngineError::ErrorParametros { .. } => "ERROR_PARAMETROS",
            EngineError::ErrorCalculo { .. } => "ERROR_CALCULO",
            EngineError::ConfigNotFound { .. } => "CONFIG_NO_ENCONTRADA",
            EngineError::ConfigParseError { .. } => "CONFIG_INVALIDA",
        }
    }

    /// Returns true for errors caused by the caller's input or parameters.
    ///
    /// Infrastructure failures (parameter resolution, configuration, unexpected
    /// calculation errors) return false.
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            EngineError::ErrorParametros { .. }
                | EngineError::ErrorCalculo { .. }
                | EngineError::ConfigNotFound { .. }
                | EngineError::ConfigParseError { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
