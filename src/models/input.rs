//! Calculation input model.
//!
//! [`SueldoInput`] describes one employee for one calculation period. The
//! contract type, the AFP and the date travel as raw strings that default to
//! empty when absent, so the validator can reject them with a precise error
//! code instead of a deserialization failure.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The type of employment contract.
///
/// Drives employee-side unemployment insurance eligibility and the
/// employer-side unemployment insurance rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipoContrato {
    /// Open-ended contract.
    Indefinido,
    /// Fixed-term contract.
    PlazoFijo,
    /// Contract for a specific job or project.
    ObraFaena,
}

impl TipoContrato {
    /// Returns the wire representation of this contract type.
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoContrato::Indefinido => "indefinido",
            TipoContrato::PlazoFijo => "plazo_fijo",
            TipoContrato::ObraFaena => "obra_faena",
        }
    }

    /// Returns true for open-ended contracts.
    pub fn is_indefinido(&self) -> bool {
        *self == TipoContrato::Indefinido
    }
}

impl fmt::Display for TipoContrato {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TipoContrato {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "indefinido" => Ok(TipoContrato::Indefinido),
            "plazo_fijo" => Ok(TipoContrato::PlazoFijo),
            "obra_faena" => Ok(TipoContrato::ObraFaena),
            other => Err(EngineError::TipoContratoInvalido {
                value: other.to_string(),
            }),
        }
    }
}

/// The health scheme the employee contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipoSalud {
    /// Public health fund.
    Fonasa,
    /// Private health insurer.
    Isapre,
}

/// Private health insurance plan details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Isapre {
    /// Monthly plan cost in UF.
    pub plan: Decimal,
}

/// Overtime hours worked in the period, by surcharge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorasExtras {
    /// Hours paid with a 50% surcharge.
    #[serde(default)]
    pub cincuenta: Decimal,
    /// Hours paid with a 100% surcharge.
    #[serde(default)]
    pub cien: Decimal,
}

impl HorasExtras {
    /// Returns each hour count with its field name.
    pub fn fields(&self) -> [(&'static str, Decimal); 2] {
        [("cincuenta", self.cincuenta), ("cien", self.cien)]
    }
}

/// Taxable bonuses paid in the period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bonos {
    /// Night-work bonus.
    #[serde(default)]
    pub nocturnidad: Decimal,
    /// Public-holiday bonus.
    #[serde(default)]
    pub festivo: Decimal,
    /// Hazard bonus.
    #[serde(default)]
    pub peligrosidad: Decimal,
    /// Responsibility bonus.
    #[serde(default)]
    pub responsabilidad: Decimal,
    /// Any other taxable bonus, including aggregated extra-shift pay.
    #[serde(default)]
    pub otros: Decimal,
}

impl Bonos {
    /// Returns each bonus with its field name.
    pub fn fields(&self) -> [(&'static str, Decimal); 5] {
        [
            ("nocturnidad", self.nocturnidad),
            ("festivo", self.festivo),
            ("peligrosidad", self.peligrosidad),
            ("responsabilidad", self.responsabilidad),
            ("otros", self.otros),
        ]
    }
}

/// Non-taxable allowances paid in the period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoImponibleInput {
    /// Meal allowance.
    #[serde(default)]
    pub colacion: Decimal,
    /// Transport allowance.
    #[serde(default)]
    pub movilizacion: Decimal,
    /// Travel expenses.
    #[serde(default)]
    pub viatico: Decimal,
    /// Tool wear allowance.
    #[serde(default)]
    pub desgaste: Decimal,
    /// Family allowance.
    #[serde(default)]
    pub asignacion_familiar: Decimal,
}

impl NoImponibleInput {
    /// Returns each allowance with its field name.
    pub fn fields(&self) -> [(&'static str, Decimal); 5] {
        [
            ("colacion", self.colacion),
            ("movilizacion", self.movilizacion),
            ("viatico", self.viatico),
            ("desgaste", self.desgaste),
            ("asignacionFamiliar", self.asignacion_familiar),
        ]
    }
}

/// Input for a single salary calculation.
///
/// # Example
///
/// ```
/// use sueldo_engine::models::{SueldoInput, TipoContrato};
///
/// let input: SueldoInput = serde_json::from_str(r#"{
///     "sueldoBase": "1000000",
///     "fecha": "2025-08-31",
///     "afp": "habitat",
///     "tipoSalud": "fonasa",
///     "tipoContrato": "indefinido"
/// }"#).unwrap();
///
/// assert_eq!(input.contrato().unwrap(), TipoContrato::Indefinido);
/// assert!(input.bonos.otros.is_zero());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SueldoInput {
    /// Monthly contractual base salary.
    pub sueldo_base: Decimal,
    /// Calculation date (`YYYY-MM-DD`); selects the statutory parameters.
    #[serde(default)]
    pub fecha: String,
    /// Pension fund code (e.g., "habitat").
    #[serde(default)]
    pub afp: String,
    /// Health scheme.
    pub tipo_salud: TipoSalud,
    /// Private health plan, when the employee is affiliated to an Isapre.
    #[serde(default)]
    pub isapre: Option<Isapre>,
    /// Work-accident insurer the employer is affiliated to.
    #[serde(default)]
    pub mutualidad: Option<String>,
    /// Contract type: `indefinido`, `plazo_fijo` or `obra_faena`.
    #[serde(default)]
    pub tipo_contrato: String,
    /// Overtime hours.
    #[serde(default)]
    pub horas_extras: HorasExtras,
    /// Taxable bonuses.
    #[serde(default)]
    pub bonos: Bonos,
    /// Sales commissions.
    #[serde(default)]
    pub comisiones: Decimal,
    /// Non-taxable allowances.
    #[serde(default)]
    pub no_imponible: NoImponibleInput,
    /// Additional health contribution in UF, on top of the legal 7%.
    #[serde(default, rename = "cotizacionAdicionalUF")]
    pub cotizacion_adicional_uf: Decimal,
    /// Salary advances already paid.
    #[serde(default)]
    pub anticipos: Decimal,
    /// Court-ordered withholdings.
    #[serde(default)]
    pub judiciales: Decimal,
    /// Voluntary pension savings deducted before tax.
    #[serde(default)]
    pub apv: Decimal,
    /// Voluntary savings account deposit deducted before tax.
    #[serde(default)]
    pub cuenta2: Decimal,
    /// Unpaid absence days in the month.
    #[serde(default)]
    pub dias_ausencia: Decimal,
}

impl SueldoInput {
    /// Parses the calculation date.
    pub fn fecha_calculo(&self) -> EngineResult<NaiveDate> {
        NaiveDate::parse_from_str(self.fecha.trim(), "%Y-%m-%d").map_err(|_| {
            EngineError::FechaInvalida {
                value: self.fecha.clone(),
            }
        })
    }

    /// Parses the contract type.
    pub fn contrato(&self) -> EngineResult<TipoContrato> {
        self.tipo_contrato.parse()
    }
}
