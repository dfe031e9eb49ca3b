//! Employer-side costs.
//!
//! Computes the employer-paid insurances and levy on the capped taxable income
//! and the total cost of the employee.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{AuditStep, EmpleadorDetalle, ParametrosSueldo, TipoContrato};

use super::rounding::{checked_sum, percent_of};

/// Returns the employer unemployment insurance rate for open-ended contracts, in percent.
pub fn afc_empleador_indefinido_rate() -> Decimal {
    Decimal::new(24, 1)
}

/// Returns the employer unemployment insurance rate for other contracts, in percent.
pub fn afc_empleador_plazo_rate() -> Decimal {
    Decimal::from(3)
}

/// Returns the work-accident insurance rate used when none is supplied, in percent.
pub fn default_mutualidad_rate() -> Decimal {
    Decimal::new(90, 2)
}

/// Returns the pension-reform employer levy rate, in percent.
pub fn reforma_previsional_rate() -> Decimal {
    Decimal::ONE
}

/// The result of the employer cost calculation, including the breakdown and audit step.
#[derive(Debug, Clone)]
pub struct EmpleadorResult {
    /// The employer cost breakdown.
    pub detalle: EmpleadorDetalle,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates employer-side costs.
///
/// - `sis = imponible × tasa_sis`
/// - `afc = imponible × 2.4%` for open-ended contracts, `3%` otherwise
/// - `mutual = imponible × tasa_mutualidad` (0.90% when not supplied)
/// - `reforma_previsional = imponible × 1%`
/// - `costo_total = imponible + no_imponible + sis + afc + mutual + reforma_previsional`
///
/// # Legal Reference
///
/// DL 3.500 art. 59; Ley 19.728 art. 5; Ley 16.744 art. 15; Ley 21.735.
pub fn calcular_empleador(
    imponible: Decimal,
    no_imponible: Decimal,
    contrato: TipoContrato,
    params: &ParametrosSueldo,
    step_number: u32,
) -> EngineResult<EmpleadorResult> {
    let sis = percent_of(imponible, params.tasa_sis, "sis")?;

    let tasa_afc = if contrato.is_indefinido() {
        afc_empleador_indefinido_rate()
    } else {
        afc_empleador_plazo_rate()
    };
    let afc = percent_of(imponible, tasa_afc, "afc empleador")?;

    let tasa_mutualidad = params
        .tasa_mutualidad
        .unwrap_or_else(default_mutualidad_rate);
    let mutual = percent_of(imponible, tasa_mutualidad, "mutualidad")?;

    let reforma_previsional = percent_of(imponible, reforma_previsional_rate(), "reforma previsional")?;

    let costo_total = checked_sum(
        &[imponible, no_imponible, sis, afc, mutual, reforma_previsional],
        "costo empleador",
    )?;

    tracing::debug!(%sis, %afc, %mutual, %reforma_previsional, %costo_total, "empleador calculated");

    let audit_step = AuditStep {
        step_number,
        rule_id: "costo_empleador".to_string(),
        rule_name: "Costo Empleador".to_string(),
        legal_ref: "DL 3.500 art. 59; Ley 19.728 art. 5; Ley 16.744 art. 15".to_string(),
        reasoning: format!(
            "${} SIS ({}%) + ${} AFC ({}%, {}) + ${} mutual ({}%) + ${} reforma ({}%) on ${} imponible; costo total ${}",
            sis,
            params.tasa_sis.normalize(),
            afc,
            tasa_afc.normalize(),
            contrato,
            mutual,
            tasa_mutualidad.normalize(),
            reforma_previsional,
            reforma_previsional_rate(),
            imponible,
            costo_total
        ),
    };

    Ok(EmpleadorResult {
        detalle: EmpleadorDetalle {
            sis,
            tasa_afc,
            afc,
            tasa_mutualidad,
            mutual,
            reforma_previsional,
            costo_total,
        },
        audit_step,
    })
}
