//! Single income tax ("impuesto único de segunda categoría").

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, CotizacionesDetalle, ImpuestoDetalle, ParametrosSueldo, SueldoInput, TramoImpuesto};

use super::rounding::{checked_mul, checked_sub, checked_sum, round_pesos};

/// The result of the income tax calculation, including the breakdown and audit step.
#[derive(Debug, Clone)]
pub struct ImpuestoResult {
    /// The income tax breakdown.
    pub detalle: ImpuestoDetalle,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Finds the bracket containing `base`, returning its 1-based index.
///
/// Falls back to the last bracket when none matches. Returns `None` only for
/// an empty table.
pub fn find_tramo(base: Decimal, tramos: &[TramoImpuesto]) -> Option<(u32, &TramoImpuesto)> {
    tramos
        .iter()
        .enumerate()
        .find(|(_, tramo)| tramo.contains(base))
        .or_else(|| tramos.iter().enumerate().next_back())
        .map(|(index, tramo)| (index as u32 + 1, tramo))
}

/// Calculates the single income tax.
///
/// The taxable base is `imponible − afp − salud − afc − apv − cuenta2`; the tax
/// is `max(0, base × factor − rebaja)` for the bracket containing the base.
/// A negative base is looked up as zero, so it lands in the exempt bracket.
///
/// # Legal Reference
///
/// DL 824 (Ley sobre Impuesto a la Renta) art. 42 N°1 and 43.
pub fn calcular_impuesto(
    imponible: Decimal,
    cotizaciones: &CotizacionesDetalle,
    input: &SueldoInput,
    params: &ParametrosSueldo,
    step_number: u32,
) -> EngineResult<ImpuestoResult> {
    let deducciones = checked_sum(
        &[
            cotizaciones.afp,
            cotizaciones.salud,
            cotizaciones.afc,
            round_pesos(input.apv),
            round_pesos(input.cuenta2),
        ],
        "base tributable",
    )?;
    let base_tributable = checked_sub(imponible, deducciones, "base tributable")?;

    let (tramo, bracket) = find_tramo(base_tributable.max(Decimal::ZERO), &params.tramos)
        .ok_or(EngineError::TramosImpuestoRequeridos)?;

    let bruto = checked_sub(
        checked_mul(base_tributable, bracket.factor, "impuesto unico")?,
        bracket.rebaja,
        "impuesto unico",
    )?;
    let impuesto_unico = round_pesos(bruto.max(Decimal::ZERO));

    tracing::debug!(%base_tributable, tramo, %impuesto_unico, "impuesto calculated");

    let audit_step = AuditStep {
        step_number,
        rule_id: "impuesto_unico".to_string(),
        rule_name: "Impuesto Único".to_string(),
        legal_ref: "DL 824 art. 43".to_string(),
        reasoning: format!(
            "Base ${} in bracket {}: ${} x {} - ${} = ${}",
            base_tributable,
            tramo,
            base_tributable,
            bracket.factor.normalize(),
            bracket.rebaja.normalize(),
            impuesto_unico
        ),
    };

    Ok(ImpuestoResult {
        detalle: ImpuestoDetalle {
            base_tributable,
            tramo,
            factor: bracket.factor,
            rebaja: bracket.rebaja,
            impuesto_unico,
        },
        audit_step,
    })
}
