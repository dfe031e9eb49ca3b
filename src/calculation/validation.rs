//! Input and parameter validation.
//!
//! Both validators are pure predicates: they return the error for the first
//! violated rule and never touch any amount.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{ParametrosSueldo, SueldoInput};

/// Maximum number of absence days in a 30-day month.
pub const MAX_DIAS_AUSENCIA: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// Validates a calculation input.
///
/// Rules are checked in this order: base salary, date, AFP code, work-accident
/// insurer, contract type, overtime hours, bonuses, commissions, non-taxable
/// allowances, additional health contribution, advances, court-ordered
/// withholdings, APV, cuenta 2, absence days and Isapre plan.
///
/// # Examples
///
/// ```
/// use sueldo_engine::calculation::validate_input;
/// use sueldo_engine::models::SueldoInput;
///
/// let input: SueldoInput = serde_json::from_str(r#"{
///     "sueldoBase": "1000000",
///     "fecha": "2025-08-31",
///     "afp": "habitat",
///     "tipoSalud": "fonasa",
///     "tipoContrato": "indefinido",
///     "horasExtras": { "cincuenta": "-1" }
/// }"#).unwrap();
///
/// let error = validate_input(&input).unwrap_err();
/// assert_eq!(error.code(), "HORAS_EXTRAS_NEGATIVAS");
/// ```
pub fn validate_input(input: &SueldoInput) -> EngineResult<()> {
    if input.sueldo_base <= Decimal::ZERO {
        return Err(EngineError::SueldoBaseInvalido {
            value: input.sueldo_base,
        });
    }

    input.fecha_calculo()?;

    if input.afp.trim().is_empty() {
        return Err(EngineError::AfpRequerida);
    }

    if input
        .mutualidad
        .as_ref()
        .is_some_and(|m| m.trim().is_empty())
    {
        return Err(EngineError::MutualidadRequerida);
    }

    input.contrato()?;

    if let Some((field, value)) = first_negative(&input.horas_extras.fields()) {
        return Err(EngineError::HorasExtrasNegativas {
            field: field.to_string(),
            value,
        });
    }

    if let Some((field, value)) = first_negative(&input.bonos.fields()) {
        return Err(EngineError::BonosNegativos {
            field: field.to_string(),
            value,
        });
    }

    if input.comisiones < Decimal::ZERO {
        return Err(EngineError::ComisionesNegativas {
            value: input.comisiones,
        });
    }

    if let Some((field, value)) = first_negative(&input.no_imponible.fields()) {
        return Err(EngineError::NoImponibleNegativo {
            field: field.to_string(),
            value,
        });
    }

    if input.cotizacion_adicional_uf < Decimal::ZERO {
        return Err(EngineError::CotizacionAdicionalNegativa {
            value: input.cotizacion_adicional_uf,
        });
    }

    if input.anticipos < Decimal::ZERO {
        return Err(EngineError::AnticiposNegativos {
            value: input.anticipos,
        });
    }

    if input.judiciales < Decimal::ZERO {
        return Err(EngineError::JudicialesNegativos {
            value: input.judiciales,
        });
    }

    if input.apv < Decimal::ZERO {
        return Err(EngineError::ApvNegativo { value: input.apv });
    }

    if input.cuenta2 < Decimal::ZERO {
        return Err(EngineError::Cuenta2Negativa {
            value: input.cuenta2,
        });
    }

    if input.dias_ausencia < Decimal::ZERO || input.dias_ausencia > MAX_DIAS_AUSENCIA {
        return Err(EngineError::DiasAusenciaInvalidos {
            value: input.dias_ausencia,
        });
    }

    if let Some(isapre) = &input.isapre {
        if isapre.plan <= Decimal::ZERO {
            return Err(EngineError::PlanIsapreInvalido { value: isapre.plan });
        }
    }

    Ok(())
}

/// Validates the statutory parameters resolved for a calculation.
pub fn validate_parameters(params: &ParametrosSueldo) -> EngineResult<()> {
    if params.valor_uf <= Decimal::ZERO {
        return Err(EngineError::ValorUfInvalido {
            value: params.valor_uf,
        });
    }

    if params.uf_tope_imponible <= Decimal::ZERO {
        return Err(EngineError::TopeUfInvalido {
            value: params.uf_tope_imponible,
        });
    }

    if params.comision_afp < Decimal::ZERO {
        return Err(EngineError::ComisionAfpInvalida {
            value: params.comision_afp,
        });
    }

    if let Some(tasa) = params.tasa_mutualidad.filter(|t| *t < Decimal::ZERO) {
        return Err(EngineError::TasaMutualidadInvalida { value: tasa });
    }

    if let Some(horas) = params.horas_semanales_jornada.filter(|h| *h <= Decimal::ZERO) {
        return Err(EngineError::HorasJornadaInvalidas { value: horas });
    }

    if params.tramos.is_empty() {
        return Err(EngineError::TramosImpuestoRequeridos);
    }

    Ok(())
}

fn first_negative(fields: &[(&'static str, Decimal)]) -> Option<(&'static str, Decimal)> {
    fields.iter().copied().find(|(_, value)| *value < Decimal::ZERO)
}
