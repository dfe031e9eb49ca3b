//! Whole-peso rounding and checked money arithmetic.
//!
//! [`round_pesos`] is the rounding rule of the engine: half-up to the nearest
//! peso. Ceilings are truncated instead, so a capped amount never exceeds the
//! exact limit. [`RoundPesos`] applies the rule to every money leaf of a result
//! tree.
//! The `checked_*` helpers turn `Decimal` overflow into `ERROR_CALCULO`.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    CotizacionesDetalle, DescuentosDetalle, EmpleadorDetalle, ImponibleDetalle, ImpuestoDetalle,
    NoImponibleDetalle, SueldoResultado,
};

/// Rounds an amount to whole pesos, half away from zero.
///
/// # Examples
///
/// ```
/// use sueldo_engine::calculation::round_pesos;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_pesos(Decimal::new(3765005, 1)), Decimal::from(376501));
/// assert_eq!(round_pesos(Decimal::new(3760122, 1)), Decimal::from(376012));
/// ```
pub fn round_pesos(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Truncates an amount to whole pesos, for limits that must not be exceeded.
pub(crate) fn truncate_pesos(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::ToZero)
}

/// Rounds every money leaf of a value to whole pesos.
///
/// Rates, factors and UF quantities are left exact.
pub trait RoundPesos {
    /// Returns the value with every money leaf rounded.
    fn round_pesos(self) -> Self;
}

impl RoundPesos for ImponibleDetalle {
    fn round_pesos(self) -> Self {
        Self {
            sueldo_base: round_pesos(self.sueldo_base),
            descuento_ausencias: round_pesos(self.descuento_ausencias),
            sueldo_base_devengado: round_pesos(self.sueldo_base_devengado),
            gratificacion_legal: round_pesos(self.gratificacion_legal),
            tope_gratificacion: self.tope_gratificacion.map(round_pesos),
            valor_hora: round_pesos(self.valor_hora),
            horas_extras: round_pesos(self.horas_extras),
            comisiones: round_pesos(self.comisiones),
            bonos: round_pesos(self.bonos),
            total_antes_tope: round_pesos(self.total_antes_tope),
            tope_imponible: round_pesos(self.tope_imponible),
            tope_aplicado: round_pesos(self.tope_aplicado),
            total: round_pesos(self.total),
        }
    }
}

impl RoundPesos for NoImponibleDetalle {
    fn round_pesos(self) -> Self {
        Self {
            colacion: round_pesos(self.colacion),
            movilizacion: round_pesos(self.movilizacion),
            viatico: round_pesos(self.viatico),
            desgaste: round_pesos(self.desgaste),
            asignacion_familiar: round_pesos(self.asignacion_familiar),
            total: round_pesos(self.total),
        }
    }
}

impl RoundPesos for CotizacionesDetalle {
    fn round_pesos(self) -> Self {
        Self {
            tasa_afp: self.tasa_afp,
            afp: round_pesos(self.afp),
            salud_legal: round_pesos(self.salud_legal),
            salud_adicional: round_pesos(self.salud_adicional),
            salud: round_pesos(self.salud),
            afc: round_pesos(self.afc),
            total: round_pesos(self.total),
        }
    }
}

impl RoundPesos for ImpuestoDetalle {
    fn round_pesos(self) -> Self {
        Self {
            base_tributable: round_pesos(self.base_tributable),
            tramo: self.tramo,
            factor: self.factor,
            rebaja: round_pesos(self.rebaja),
            impuesto_unico: round_pesos(self.impuesto_unico),
        }
    }
}

impl RoundPesos for DescuentosDetalle {
    fn round_pesos(self) -> Self {
        Self {
            anticipos: round_pesos(self.anticipos),
            judiciales: round_pesos(self.judiciales),
            total: round_pesos(self.total),
        }
    }
}

impl RoundPesos for EmpleadorDetalle {
    fn round_pesos(self) -> Self {
        Self {
            sis: round_pesos(self.sis),
            tasa_afc: self.tasa_afc,
            afc: round_pesos(self.afc),
            tasa_mutualidad: self.tasa_mutualidad,
            mutual: round_pesos(self.mutual),
            reforma_previsional: round_pesos(self.reforma_previsional),
            costo_total: round_pesos(self.costo_total),
        }
    }
}

impl RoundPesos for SueldoResultado {
    fn round_pesos(self) -> Self {
        Self {
            imponible: self.imponible.round_pesos(),
            no_imponible: self.no_imponible.round_pesos(),
            cotizaciones: self.cotizaciones.round_pesos(),
            impuesto: self.impuesto.round_pesos(),
            descuentos: self.descuentos.round_pesos(),
            sueldo_liquido: round_pesos(self.sueldo_liquido),
            empleador: self.empleador.round_pesos(),
            ..self
        }
    }
}

fn overflow(operation: &str) -> EngineError {
    EngineError::ErrorCalculo {
        message: format!("arithmetic overflow computing {}", operation),
    }
}

/// Multiplies two amounts, failing with `ERROR_CALCULO` on overflow.
pub(crate) fn checked_mul(a: Decimal, b: Decimal, operation: &str) -> EngineResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| overflow(operation))
}

/// Divides two amounts, failing with `ERROR_CALCULO` on overflow or a zero divisor.
pub(crate) fn checked_div(a: Decimal, b: Decimal, operation: &str) -> EngineResult<Decimal> {
    a.checked_div(b).ok_or_else(|| overflow(operation))
}

/// Sums amounts, failing with `ERROR_CALCULO` on overflow.
pub(crate) fn checked_sum(values: &[Decimal], operation: &str) -> EngineResult<Decimal> {
    values.iter().try_fold(Decimal::ZERO, |acc, v| {
        acc.checked_add(*v).ok_or_else(|| overflow(operation))
    })
}

/// Subtracts `b` from `a`, failing with `ERROR_CALCULO` on overflow.
pub(crate) fn checked_sub(a: Decimal, b: Decimal, operation: &str) -> EngineResult<Decimal> {
    a.checked_sub(b).ok_or_else(|| overflow(operation))
}

/// Applies a percentage rate (11.27 for 11.27%) and rounds the result to pesos.
pub(crate) fn percent_of(base: Decimal, rate: Decimal, operation: &str) -> EngineResult<Decimal> {
    let product = checked_mul(base, rate, operation)?;
    Ok(round_pesos(checked_div(product, Decimal::ONE_HUNDRED, operation)?))
}
