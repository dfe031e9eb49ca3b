//! Taxable income ("imponible") calculation.
//!
//! Assembles base salary, legal gratification, overtime, commissions and
//! bonuses, then applies the UF-indexed taxable-income ceiling. Amounts above
//! the ceiling are reported in `tope_aplicado` and take no further part in
//! contributions or tax.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{AuditStep, ImponibleDetalle, ParametrosSueldo, SueldoInput};

use super::rounding::{
    checked_div, checked_mul, checked_sub, checked_sum, round_pesos, truncate_pesos,
};
use super::validation::MAX_DIAS_AUSENCIA;

/// Legal weekly working hours assumed when the parameters do not supply them.
pub const DEFAULT_HORAS_SEMANALES: Decimal = Decimal::from_parts(45, 0, 0, false, 0);

/// Days in the payroll month used to prorate absences.
const DIAS_MES: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// Weeks per month used to turn weekly hours into monthly hours.
const SEMANAS_POR_MES: Decimal = Decimal::from_parts(4, 0, 0, false, 0);

/// Returns the legal gratification share of the base salary (25%).
pub fn gratificacion_rate() -> Decimal {
    Decimal::new(25, 2)
}

/// Returns the number of minimum wages in the yearly gratification ceiling (4.75).
pub fn gratificacion_tope_ingresos_minimos() -> Decimal {
    Decimal::new(475, 2)
}

/// Returns the surcharge for 50% overtime hours.
pub fn recargo_cincuenta() -> Decimal {
    Decimal::new(5, 1)
}

/// Returns the surcharge for 100% overtime hours.
pub fn recargo_cien() -> Decimal {
    Decimal::ONE
}

/// The result of the taxable income calculation, including the breakdown and audit step.
#[derive(Debug, Clone)]
pub struct ImponibleResult {
    /// The taxable income breakdown.
    pub detalle: ImponibleDetalle,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the capped taxable income for an input.
///
/// # Steps
///
/// 1. Base salary, reduced proportionally for absence days on a 30-day month.
/// 2. Legal gratification: 25% of the earned base, capped at
///    `4.75 × ingreso_minimo_mensual / 12` when the minimum wage is supplied.
/// 3. Overtime: `cincuenta × valor_hora × 0.5 + cien × valor_hora × 1.0`, where
///    `valor_hora = sueldo_base / (horas_semanales_jornada × 4)`.
/// 4. Commissions and the sum of bonuses pass through.
/// 5. Ceiling: `total = min(total_antes_tope, uf_tope_imponible × valor_uf)`.
///
/// Each amount is rounded to whole pesos as it is produced. The ceiling is
/// truncated so the capped total stays within the exact UF limit.
///
/// # Legal Reference
///
/// Código del Trabajo art. 32 and 50; DL 3.500 art. 16.
pub fn calcular_imponible(
    input: &SueldoInput,
    params: &ParametrosSueldo,
    step_number: u32,
) -> EngineResult<ImponibleResult> {
    let sueldo_base = round_pesos(input.sueldo_base);

    let dias = input.dias_ausencia.min(MAX_DIAS_AUSENCIA);
    let descuento_ausencias = round_pesos(checked_div(
        checked_mul(sueldo_base, dias, "descuento ausencias")?,
        DIAS_MES,
        "descuento ausencias",
    )?);
    let sueldo_base_devengado = checked_sub(sueldo_base, descuento_ausencias, "sueldo devengado")?;

    let tope_gratificacion = params
        .ingreso_minimo_mensual
        .map(|imm| {
            let anual = checked_mul(imm, gratificacion_tope_ingresos_minimos(), "tope gratificacion")?;
            checked_div(anual, Decimal::from(12), "tope gratificacion").map(round_pesos)
        })
        .transpose()?;
    let gratificacion_bruta = round_pesos(checked_mul(
        sueldo_base_devengado,
        gratificacion_rate(),
        "gratificacion",
    )?);
    let gratificacion_legal = match tope_gratificacion {
        Some(tope) => gratificacion_bruta.min(tope),
        None => gratificacion_bruta,
    };

    let horas_semanales = params
        .horas_semanales_jornada
        .unwrap_or(DEFAULT_HORAS_SEMANALES);
    let horas_mensuales = checked_mul(horas_semanales, SEMANAS_POR_MES, "horas mensuales")?;
    let valor_hora = checked_div(sueldo_base, horas_mensuales, "valor hora")?;
    let pago_cincuenta = checked_mul(
        checked_mul(input.horas_extras.cincuenta, valor_hora, "horas extras")?,
        recargo_cincuenta(),
        "horas extras",
    )?;
    let pago_cien = checked_mul(
        checked_mul(input.horas_extras.cien, valor_hora, "horas extras")?,
        recargo_cien(),
        "horas extras",
    )?;
    let horas_extras = round_pesos(checked_sum(&[pago_cincuenta, pago_cien], "horas extras")?);

    let comisiones = round_pesos(input.comisiones);
    let bonos = round_pesos(checked_sum(
        &input.bonos.fields().map(|(_, value)| value),
        "bonos",
    )?);

    let total_antes_tope = checked_sum(
        &[
            sueldo_base_devengado,
            gratificacion_legal,
            horas_extras,
            comisiones,
            bonos,
        ],
        "imponible",
    )?;

    let tope_imponible = truncate_pesos(checked_mul(
        params.uf_tope_imponible,
        params.valor_uf,
        "tope imponible",
    )?);
    let total = total_antes_tope.min(tope_imponible);
    let tope_aplicado = (total_antes_tope - total).max(Decimal::ZERO);

    tracing::debug!(
        %total_antes_tope,
        %tope_imponible,
        %total,
        "imponible calculated"
    );

    let reasoning = if tope_aplicado > Decimal::ZERO {
        format!(
            "${} base + ${} gratificación + ${} horas extras + ${} comisiones + ${} bonos = ${} (capped at {} UF = ${}, ${} excluded)",
            sueldo_base_devengado,
            gratificacion_legal,
            horas_extras,
            comisiones,
            bonos,
            total_antes_tope,
            params.uf_tope_imponible.normalize(),
            tope_imponible,
            tope_aplicado
        )
    } else {
        format!(
            "${} base + ${} gratificación + ${} horas extras + ${} comisiones + ${} bonos = ${}",
            sueldo_base_devengado, gratificacion_legal, horas_extras, comisiones, bonos, total
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "imponible".to_string(),
        rule_name: "Renta Imponible".to_string(),
        legal_ref: "CT art. 50; DL 3.500 art. 16".to_string(),
        reasoning,
    };

    Ok(ImponibleResult {
        detalle: ImponibleDetalle {
            sueldo_base,
            descuento_ausencias,
            sueldo_base_devengado,
            gratificacion_legal,
            tope_gratificacion,
            valor_hora: round_pesos(valor_hora),
            horas_extras,
            comisiones,
            bonos,
            total_antes_tope,
            tope_imponible,
            tope_aplicado,
            total,
        },
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TipoSalud, TramoImpuesto};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_input(sueldo_base: &str) -> SueldoInput {
        SueldoInput {
            sueldo_base: dec(sueldo_base),
            fecha: "2025-08-31".to_string(),
            afp: "habitat".to_string(),
            tipo_salud: TipoSalud::Fonasa,
            isapre: None,
            mutualidad: None,
            tipo_contrato: "indefinido".to_string(),
            horas_extras: Default::default(),
            bonos: Default::default(),
            comisiones: Decimal::ZERO,
            no_imponible: Default::default(),
            cotizacion_adicional_uf: Decimal::ZERO,
            anticipos: Decimal::ZERO,
            judiciales: Decimal::ZERO,
            apv: Decimal::ZERO,
            cuenta2: Decimal::ZERO,
            dias_ausencia: Decimal::ZERO,
        }
    }

    fn create_test_params() -> ParametrosSueldo {
        ParametrosSueldo {
            valor_uf: dec("38000"),
            uf_tope_imponible: dec("87.8"),
            comision_afp: dec("11.27"),
            tasa_sis: dec("1.88"),
            tasa_mutualidad: None,
            horas_semanales_jornada: Some(dec("45")),
            ingreso_minimo_mensual: None,
            tramos: vec![TramoImpuesto {
                desde: Decimal::ZERO,
                hasta: None,
                factor: Decimal::ZERO,
                rebaja: Decimal::ZERO,
            }],
        }
    }

    /// IM-001: base salary plus uncapped gratification
    #[test]
    fn test_base_plus_gratificacion() {
        let result = calcular_imponible(&create_test_input("1000000"), &create_test_params(), 1)
            .unwrap();

        assert_eq!(result.detalle.gratificacion_legal, dec("250000"));
        assert_eq!(result.detalle.total_antes_tope, dec("1250000"));
        assert_eq!(result.detalle.total, dec("1250000"));
        assert_eq!(result.detalle.tope_aplicado, Decimal::ZERO);
        assert!(result.detalle.tope_gratificacion.is_none());
    }

    /// IM-002: taxable income capped at the UF ceiling
    #[test]
    fn test_total_capped_at_uf_ceiling() {
        let result = calcular_imponible(&create_test_input("5000000"), &create_test_params(), 1)
            .unwrap();

        assert_eq!(result.detalle.gratificacion_legal, dec("1250000"));
        assert_eq!(result.detalle.total_antes_tope, dec("6250000"));
        assert_eq!(result.detalle.tope_imponible, dec("3336400"));
        assert_eq!(result.detalle.total, dec("3336400"));
        assert_eq!(result.detalle.tope_aplicado, dec("2913600"));
        assert!(result.audit_step.reasoning.contains("87.8 UF"));
    }

    /// IM-007: a fractional ceiling is truncated, never rounded up
    #[test]
    fn test_fractional_ceiling_truncated() {
        let mut params = create_test_params();
        params.valor_uf = dec("38000.5");

        let result = calcular_imponible(&create_test_input("5000000"), &params, 1).unwrap();

        assert_eq!(result.detalle.tope_imponible, dec("3336443"));
        assert_eq!(result.detalle.total, dec("3336443"));
        assert!(result.detalle.total <= params.uf_tope_imponible * params.valor_uf);
        assert_eq!(result.detalle.tope_aplicado, dec("2913557"));
    }

    /// IM-003: gratification capped at 4.75 minimum wages per year
    #[test]
    fn test_gratificacion_capped_by_minimum_wage() {
        let mut params = create_test_params();
        params.ingreso_minimo_mensual = Some(dec("529000"));

        let result = calcular_imponible(&create_test_input("1000000"), &params, 1).unwrap();

        // 529000 * 4.75 / 12 = 209395.83
        assert_eq!(result.detalle.tope_gratificacion, Some(dec("209396")));
        assert_eq!(result.detalle.gratificacion_legal, dec("209396"));
        assert_eq!(result.detalle.total, dec("1209396"));
    }

    #[test]
    fn test_gratificacion_below_cap_is_uncapped() {
        let mut params = create_test_params();
        params.ingreso_minimo_mensual = Some(dec("529000"));

        let result = calcular_imponible(&create_test_input("600000"), &params, 1).unwrap();

        assert_eq!(result.detalle.gratificacion_legal, dec("150000"));
    }

    /// IM-004: overtime on a 180-hour month
    #[test]
    fn test_horas_extras_on_180_hour_basis() {
        let mut input = create_test_input("900000");
        input.horas_extras.cincuenta = dec("10");
        input.horas_extras.cien = dec("2");

        let result = calcular_imponible(&input, &create_test_params(), 1).unwrap();

        // valor hora = 900000 / 180 = 5000
        // 10 * 5000 * 0.5 + 2 * 5000 * 1.0 = 25000 + 10000
        assert_eq!(result.detalle.valor_hora, dec("5000"));
        assert_eq!(result.detalle.horas_extras, dec("35000"));
    }

    #[test]
    fn test_horas_extras_use_supplied_weekly_hours() {
        let mut input = create_test_input("880000");
        input.horas_extras.cincuenta = dec("4");
        let mut params = create_test_params();
        params.horas_semanales_jornada = Some(dec("44"));

        let result = calcular_imponible(&input, &params, 1).unwrap();

        // valor hora = 880000 / 176 = 5000
        assert_eq!(result.detalle.horas_extras, dec("10000"));
    }

    #[test]
    fn test_missing_weekly_hours_default_to_45() {
        let mut input = create_test_input("900000");
        input.horas_extras.cien = dec("1");
        let mut params = create_test_params();
        params.horas_semanales_jornada = None;

        let result = calcular_imponible(&input, &params, 1).unwrap();

        assert_eq!(result.detalle.horas_extras, dec("5000"));
    }

    /// IM-005: commissions and bonuses pass through
    #[test]
    fn test_comisiones_and_bonos_pass_through() {
        let mut input = create_test_input("800000");
        input.comisiones = dec("120000");
        input.bonos.nocturnidad = dec("15000");
        input.bonos.festivo = dec("10000");
        input.bonos.otros = dec("5000.4");

        let result = calcular_imponible(&input, &create_test_params(), 1).unwrap();

        assert_eq!(result.detalle.comisiones, dec("120000"));
        assert_eq!(result.detalle.bonos, dec("30000"));
        assert_eq!(result.detalle.total, dec("1150000"));
    }

    /// IM-006: absence days reduce the earned base
    #[test]
    fn test_dias_ausencia_reduce_base() {
        let mut input = create_test_input("900000");
        input.dias_ausencia = dec("3");

        let result = calcular_imponible(&input, &create_test_params(), 1).unwrap();

        assert_eq!(result.detalle.descuento_ausencias, dec("90000"));
        assert_eq!(result.detalle.sueldo_base_devengado, dec("810000"));
        assert_eq!(result.detalle.gratificacion_legal, dec("202500"));
        assert_eq!(result.detalle.total, dec("1012500"));
    }

    #[test]
    fn test_fractional_base_rounded_half_up() {
        let result = calcular_imponible(&create_test_input("1000000.5"), &create_test_params(), 1)
            .unwrap();

        assert_eq!(result.detalle.sueldo_base, dec("1000001"));
    }

    #[test]
    fn test_overflowing_base_returns_error_calculo() {
        let input = create_test_input("79228162514264337593543950335");

        let result = calcular_imponible(&input, &create_test_params(), 1);

        assert_eq!(result.unwrap_err().code(), "ERROR_CALCULO");
    }

    #[test]
    fn test_audit_step_records_rule_and_step_number() {
        let result = calcular_imponible(&create_test_input("1000000"), &create_test_params(), 3)
            .unwrap();

        assert_eq!(result.audit_step.step_number, 3);
        assert_eq!(result.audit_step.rule_id, "imponible");
        assert!(result.audit_step.reasoning.contains("$1250000"));
    }
}
