//! Calculation result models.
//!
//! [`SueldoResultado`] and its breakdowns capture every amount produced by a
//! salary calculation, the parameters it used, and an audit trace of the
//! rules applied. All money amounts are whole pesos.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ParametrosSueldo, TipoContrato};

/// Taxable income ("imponible") breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImponibleDetalle {
    /// Contractual base salary.
    pub sueldo_base: Decimal,
    /// Deduction for unpaid absence days.
    pub descuento_ausencias: Decimal,
    /// Base salary actually earned in the period.
    pub sueldo_base_devengado: Decimal,
    /// Legal gratification after its ceiling.
    pub gratificacion_legal: Decimal,
    /// Monthly gratification ceiling, when one was supplied.
    pub tope_gratificacion: Option<Decimal>,
    /// Hourly rate used for overtime.
    pub valor_hora: Decimal,
    /// Overtime pay.
    pub horas_extras: Decimal,
    /// Commissions.
    pub comisiones: Decimal,
    /// Sum of all taxable bonuses.
    pub bonos: Decimal,
    /// Taxable income before the UF ceiling.
    pub total_antes_tope: Decimal,
    /// Taxable-income ceiling in pesos.
    pub tope_imponible: Decimal,
    /// Amount above the ceiling, excluded from contributions and tax.
    pub tope_aplicado: Decimal,
    /// Capped taxable income.
    pub total: Decimal,
}

/// Non-taxable allowances breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoImponibleDetalle {
    /// Meal allowance.
    pub colacion: Decimal,
    /// Transport allowance.
    pub movilizacion: Decimal,
    /// Travel expenses.
    pub viatico: Decimal,
    /// Tool wear allowance.
    pub desgaste: Decimal,
    /// Family allowance.
    pub asignacion_familiar: Decimal,
    /// Sum of all allowances.
    pub total: Decimal,
}

/// Employee-side mandatory contributions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CotizacionesDetalle {
    /// AFP rate applied, in percent.
    pub tasa_afp: Decimal,
    /// Pension contribution.
    pub afp: Decimal,
    /// Legal 7% health contribution.
    pub salud_legal: Decimal,
    /// UF-denominated health top-up.
    pub salud_adicional: Decimal,
    /// Total health contribution.
    pub salud: Decimal,
    /// Employee unemployment insurance.
    pub afc: Decimal,
    /// Sum of all contributions.
    pub total: Decimal,
}

/// Single income tax ("impuesto único").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpuestoDetalle {
    /// Taxable base net of contributions and voluntary savings.
    pub base_tributable: Decimal,
    /// 1-based index of the matched bracket.
    pub tramo: u32,
    /// Marginal rate of the matched bracket.
    pub factor: Decimal,
    /// Rebate of the matched bracket.
    pub rebaja: Decimal,
    /// Tax withheld.
    pub impuesto_unico: Decimal,
}

/// Other deductions from net pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescuentosDetalle {
    /// Salary advances.
    pub anticipos: Decimal,
    /// Court-ordered withholdings.
    pub judiciales: Decimal,
    /// Sum of deductions.
    pub total: Decimal,
}

/// Employer-side costs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmpleadorDetalle {
    /// Disability and survivorship insurance.
    pub sis: Decimal,
    /// Employer unemployment insurance rate, in percent.
    pub tasa_afc: Decimal,
    /// Employer unemployment insurance.
    pub afc: Decimal,
    /// Work-accident insurance rate, in percent.
    pub tasa_mutualidad: Decimal,
    /// Work-accident insurance.
    pub mutual: Decimal,
    /// Pension-reform employer levy.
    pub reforma_previsional: Decimal,
    /// Total cost of the employee for the employer.
    pub costo_total: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the statute backing this rule.
    pub legal_ref: String,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete, immutable result of a salary calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SueldoResultado {
    /// Calculation date.
    pub fecha: NaiveDate,
    /// Contract type the calculation was made for.
    pub tipo_contrato: TipoContrato,
    /// Taxable income.
    pub imponible: ImponibleDetalle,
    /// Non-taxable allowances.
    pub no_imponible: NoImponibleDetalle,
    /// Employee contributions.
    pub cotizaciones: CotizacionesDetalle,
    /// Income tax.
    pub impuesto: ImpuestoDetalle,
    /// Other deductions.
    pub descuentos: DescuentosDetalle,
    /// Net salary.
    pub sueldo_liquido: Decimal,
    /// Employer costs.
    pub empleador: EmpleadorDetalle,
    /// Parameters actually used.
    pub parametros: ParametrosSueldo,
    /// Ordered audit trace of the rules applied.
    pub traza: Vec<AuditStep>,
}
