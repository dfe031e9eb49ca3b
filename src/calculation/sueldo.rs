//! Salary calculation pipeline.
//!
//! [`calcular_sueldo`] sequences validation, parameter resolution and every
//! calculator, derives the net salary and rounds the assembled result. The
//! first failure aborts the pipeline and is returned unchanged.

use rust_decimal::Decimal;

use crate::config::ParameterProvider;
use crate::error::EngineResult;
use crate::models::{
    AuditStep, DescuentosDetalle, NoImponibleDetalle, ParametrosSueldo, SueldoInput,
    SueldoResultado,
};

use super::cotizaciones::calcular_cotizaciones;
use super::empleador::calcular_empleador;
use super::imponible::calcular_imponible;
use super::impuesto::calcular_impuesto;
use super::rounding::{RoundPesos, checked_sub, checked_sum, round_pesos};
use super::validation::{validate_input, validate_parameters};

/// Calculates the net salary and employer cost for an input.
///
/// Validates the input, resolves the statutory parameters for the input's date
/// from `provider`, then runs [`calcular_con_parametros`].
///
/// # Errors
///
/// Returns the validation error of the first violated input rule, the
/// provider's error when parameters cannot be resolved, or the first
/// parameter or calculation error.
pub fn calcular_sueldo<P>(input: &SueldoInput, provider: &P) -> EngineResult<SueldoResultado>
where
    P: ParameterProvider + ?Sized,
{
    validate_input(input)?;
    let fecha = input.fecha_calculo()?;
    let parametros = provider.get_parametros(fecha, &input.afp)?;
    calcular_validado(input, parametros)
}

/// Calculates the net salary and employer cost with explicit parameters.
///
/// The result is a pure function of `(input, parametros)`.
///
/// # Examples
///
/// ```
/// use sueldo_engine::calculation::calcular_con_parametros;
/// use sueldo_engine::models::{ParametrosSueldo, SueldoInput, TramoImpuesto};
/// use rust_decimal::Decimal;
///
/// let input: SueldoInput = serde_json::from_str(r#"{
///     "sueldoBase": "1000000",
///     "fecha": "2025-08-31",
///     "afp": "habitat",
///     "tipoSalud": "fonasa",
///     "tipoContrato": "indefinido"
/// }"#).unwrap();
///
/// let parametros = ParametrosSueldo {
///     valor_uf: Decimal::from(38000),
///     uf_tope_imponible: Decimal::new(878, 1),
///     comision_afp: Decimal::new(1127, 2),
///     tasa_sis: Decimal::new(188, 2),
///     tasa_mutualidad: None,
///     horas_semanales_jornada: None,
///     ingreso_minimo_mensual: None,
///     tramos: vec![TramoImpuesto {
///         desde: Decimal::ZERO,
///         hasta: None,
///         factor: Decimal::ZERO,
///         rebaja: Decimal::ZERO,
///     }],
/// };
///
/// let resultado = calcular_con_parametros(&input, &parametros).unwrap();
/// assert_eq!(resultado.sueldo_liquido, Decimal::from(1_014_125));
/// ```
pub fn calcular_con_parametros(
    input: &SueldoInput,
    parametros: &ParametrosSueldo,
) -> EngineResult<SueldoResultado> {
    validate_input(input)?;
    calcular_validado(input, parametros.clone())
}

fn calcular_validado(
    input: &SueldoInput,
    parametros: ParametrosSueldo,
) -> EngineResult<SueldoResultado> {
    validate_parameters(&parametros)?;

    let fecha = input.fecha_calculo()?;
    let contrato = input.contrato()?;
    let mut traza: Vec<AuditStep> = Vec::new();
    let mut step_number: u32 = 1;

    let imponible = calcular_imponible(input, &parametros, step_number)?;
    traza.push(imponible.audit_step);
    step_number += 1;
    let imponible = imponible.detalle;

    let no_imponible = calcular_no_imponible(input)?;
    traza.push(AuditStep {
        step_number,
        rule_id: "no_imponible".to_string(),
        rule_name: "Haberes No Imponibles".to_string(),
        legal_ref: "CT art. 41".to_string(),
        reasoning: format!(
            "${} colación + ${} movilización + ${} viático + ${} desgaste + ${} asignación familiar = ${}",
            no_imponible.colacion,
            no_imponible.movilizacion,
            no_imponible.viatico,
            no_imponible.desgaste,
            no_imponible.asignacion_familiar,
            no_imponible.total
        ),
    });
    step_number += 1;

    let cotizaciones =
        calcular_cotizaciones(imponible.total, input, contrato, &parametros, step_number)?;
    traza.push(cotizaciones.audit_step);
    step_number += 1;
    let cotizaciones = cotizaciones.detalle;

    let impuesto = calcular_impuesto(
        imponible.total,
        &cotizaciones,
        input,
        &parametros,
        step_number,
    )?;
    traza.push(impuesto.audit_step);
    step_number += 1;
    let impuesto = impuesto.detalle;

    let anticipos = round_pesos(input.anticipos);
    let judiciales = round_pesos(input.judiciales);
    let descuentos = DescuentosDetalle {
        anticipos,
        judiciales,
        total: checked_sum(&[anticipos, judiciales], "descuentos")?,
    };

    let haberes = checked_sum(&[imponible.total, no_imponible.total], "haberes")?;
    let total_descuentos = checked_sum(
        &[cotizaciones.total, impuesto.impuesto_unico, descuentos.total],
        "total descuentos",
    )?;
    let sueldo_liquido = checked_sub(haberes, total_descuentos, "sueldo liquido")?;
    traza.push(AuditStep {
        step_number,
        rule_id: "sueldo_liquido".to_string(),
        rule_name: "Sueldo Líquido".to_string(),
        legal_ref: "CT art. 54 bis; CT art. 58".to_string(),
        reasoning: format!(
            "${} haberes - (${} cotizaciones + ${} impuesto + ${} descuentos) = ${}",
            haberes, cotizaciones.total, impuesto.impuesto_unico, descuentos.total, sueldo_liquido
        ),
    });
    step_number += 1;

    let empleador = calcular_empleador(
        imponible.total,
        no_imponible.total,
        contrato,
        &parametros,
        step_number,
    )?;
    traza.push(empleador.audit_step);
    let empleador = empleador.detalle;

    tracing::info!(
        fecha = %fecha,
        tipo_contrato = %contrato,
        imponible = %imponible.total,
        sueldo_liquido = %sueldo_liquido,
        costo_total = %empleador.costo_total,
        "sueldo calculated"
    );

    let resultado = SueldoResultado {
        fecha,
        tipo_contrato: contrato,
        imponible,
        no_imponible,
        cotizaciones,
        impuesto,
        descuentos,
        sueldo_liquido,
        empleador,
        parametros,
        traza,
    };

    Ok(resultado.round_pesos())
}

fn calcular_no_imponible(input: &SueldoInput) -> EngineResult<NoImponibleDetalle> {
    let n = &input.no_imponible;
    let colacion = round_pesos(n.colacion);
    let movilizacion = round_pesos(n.movilizacion);
    let viatico = round_pesos(n.viatico);
    let desgaste = round_pesos(n.desgaste);
    let asignacion_familiar = round_pesos(n.asignacion_familiar);
    let total: Decimal = checked_sum(
        &[colacion, movilizacion, viatico, desgaste, asignacion_familiar],
        "no imponible",
    )?;

    Ok(NoImponibleDetalle {
        colacion,
        movilizacion,
        viatico,
        desgaste,
        asignacion_familiar,
        total,
    })
}
