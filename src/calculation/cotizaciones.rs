//! Employee-side mandatory contributions.
//!
//! This module computes the pension (AFP), health and unemployment insurance
//! (AFC) contributions on the capped taxable income, and resolves the AFP rate
//! of a fund from a rate table.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{AuditStep, CotizacionesDetalle, ParametrosSueldo, SueldoInput, TipoContrato};

use super::rounding::{checked_mul, checked_sum, percent_of, round_pesos};

/// Returns the AFP rate applied when a fund code is not in the rate table, in percent.
///
/// Equal to the highest fund rate in force, so an unknown fund never
/// under-withholds.
pub fn default_afp_rate() -> Decimal {
    Decimal::new(1145, 2)
}

/// Returns the legal health contribution rate, in percent (7%).
pub fn salud_legal_rate() -> Decimal {
    Decimal::from(7)
}

/// Returns the employee unemployment insurance rate for open-ended contracts, in percent.
pub fn afc_trabajador_rate() -> Decimal {
    Decimal::new(6, 1)
}

/// The AFP rate resolved for a fund code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TasaAfp {
    /// Total employee rate, in percent.
    pub tasa: Decimal,
    /// True when the code was unknown and the default rate was applied.
    pub es_default: bool,
}

/// Resolves the AFP rate of a fund from a rate table.
///
/// Codes are matched case-insensitively after trimming. Unknown codes fall
/// back to [`default_afp_rate`]; this is a deliberate degrade, logged as a warning.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use sueldo_engine::calculation::{default_afp_rate, tasa_afp};
/// use rust_decimal::Decimal;
///
/// let mut tabla = BTreeMap::new();
/// tabla.insert("habitat".to_string(), Decimal::new(1127, 2));
///
/// assert_eq!(tasa_afp("Habitat", &tabla).tasa, Decimal::new(1127, 2));
/// let fallback = tasa_afp("futura", &tabla);
/// assert!(fallback.es_default);
/// assert_eq!(fallback.tasa, default_afp_rate());
/// ```
pub fn tasa_afp(codigo: &str, tabla: &BTreeMap<String, Decimal>) -> TasaAfp {
    let codigo = codigo.trim().to_lowercase();
    match tabla.get(&codigo) {
        Some(tasa) => TasaAfp {
            tasa: *tasa,
            es_default: false,
        },
        None => {
            tracing::warn!(afp = %codigo, tasa = %default_afp_rate(), "unknown AFP code, applying default rate");
            TasaAfp {
                tasa: default_afp_rate(),
                es_default: true,
            }
        }
    }
}

/// The result of the contributions calculation, including the breakdown and audit step.
#[derive(Debug, Clone)]
pub struct CotizacionesResult {
    /// The contributions breakdown.
    pub detalle: CotizacionesDetalle,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates employee-side mandatory contributions.
///
/// - `afp = imponible × comision_afp`
/// - `salud = imponible × 7% + cotizacion_adicional_uf × valor_uf`
/// - `afc = imponible × 0.6%` for open-ended contracts, otherwise zero
///
/// # Legal Reference
///
/// DL 3.500 art. 17; Ley 18.469 art. 84; Ley 19.728 art. 5.
pub fn calcular_cotizaciones(
    imponible: Decimal,
    input: &SueldoInput,
    contrato: TipoContrato,
    params: &ParametrosSueldo,
    step_number: u32,
) -> EngineResult<CotizacionesResult> {
    let afp = percent_of(imponible, params.comision_afp, "cotizacion afp")?;

    let salud_legal = percent_of(imponible, salud_legal_rate(), "cotizacion salud")?;
    let salud_adicional = round_pesos(checked_mul(
        input.cotizacion_adicional_uf,
        params.valor_uf,
        "cotizacion salud adicional",
    )?);
    let salud = checked_sum(&[salud_legal, salud_adicional], "cotizacion salud")?;

    let afc = if contrato.is_indefinido() {
        percent_of(imponible, afc_trabajador_rate(), "cotizacion afc")?
    } else {
        Decimal::ZERO
    };

    let total = checked_sum(&[afp, salud, afc], "cotizaciones")?;

    tracing::debug!(%afp, %salud, %afc, %total, "cotizaciones calculated");

    let afc_reasoning = if contrato.is_indefinido() {
        format!("${} AFC ({}%)", afc, afc_trabajador_rate())
    } else {
        format!("$0 AFC (contract {} is exempt)", contrato)
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "cotizaciones".to_string(),
        rule_name: "Cotizaciones Obligatorias".to_string(),
        legal_ref: "DL 3.500 art. 17; Ley 19.728 art. 5".to_string(),
        reasoning: format!(
            "${} x {}% = ${} AFP; ${} salud ({} legal + {} adicional); {}; total ${}",
            imponible,
            params.comision_afp.normalize(),
            afp,
            salud,
            salud_legal,
            salud_adicional,
            afc_reasoning,
            total
        ),
    };

    Ok(CotizacionesResult {
        detalle: CotizacionesDetalle {
            tasa_afp: params.comision_afp,
            afp,
            salud_legal,
            salud_adicional,
            salud,
            afc,
            total,
        },
        audit_step,
    })
}
