//! Statutory parameters in force for a calculation period.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A progressive income-tax bracket, in pesos.
///
/// The tax for a base inside the bracket is `base × factor − rebaja`.
///
/// # Example
///
/// ```
/// use sueldo_engine::models::TramoImpuesto;
/// use rust_decimal::Decimal;
///
/// let tramo = TramoImpuesto {
///     desde: Decimal::from(1_500_000),
///     hasta: Some(Decimal::from(2_500_000)),
///     factor: Decimal::new(4, 2),
///     rebaja: Decimal::from(60_000),
/// };
/// assert!(tramo.contains(Decimal::from(2_500_000)));
/// assert!(!tramo.contains(Decimal::from(2_500_001)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TramoImpuesto {
    /// Lower bound of the bracket (inclusive).
    pub desde: Decimal,
    /// Upper bound of the bracket (inclusive); `None` for the open-ended last bracket.
    pub hasta: Option<Decimal>,
    /// Marginal rate as a fraction (0.04 for 4%).
    pub factor: Decimal,
    /// Cumulative rebate subtracted from `base × factor`.
    pub rebaja: Decimal,
}

impl TramoImpuesto {
    /// Returns true if `base` falls inside this bracket.
    pub fn contains(&self, base: Decimal) -> bool {
        base >= self.desde && self.hasta.is_none_or(|hasta| base <= hasta)
    }
}

/// Point-in-time statutory constants for one calculation.
///
/// Rates are expressed in percent (11.27 means 11.27%), amounts in pesos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParametrosSueldo {
    /// Value of one UF in pesos for the period.
    pub valor_uf: Decimal,
    /// Taxable-income ceiling in UF.
    pub uf_tope_imponible: Decimal,
    /// Total employee AFP rate resolved for the employee's fund, in percent.
    pub comision_afp: Decimal,
    /// Disability and survivorship insurance rate, in percent.
    pub tasa_sis: Decimal,
    /// Work-accident insurance rate, in percent; defaulted when absent.
    #[serde(default)]
    pub tasa_mutualidad: Option<Decimal>,
    /// Legal weekly working hours; defaulted to 45 when absent.
    #[serde(default)]
    pub horas_semanales_jornada: Option<Decimal>,
    /// Monthly minimum wage used for the legal gratification ceiling.
    #[serde(default)]
    pub ingreso_minimo_mensual: Option<Decimal>,
    /// Ordered, gap-free tax brackets covering `[0, ∞)`.
    pub tramos: Vec<TramoImpuesto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tramo(desde: i64, hasta: Option<i64>) -> TramoImpuesto {
        TramoImpuesto {
            desde: Decimal::from(desde),
            hasta: hasta.map(Decimal::from),
            factor: Decimal::ZERO,
            rebaja: Decimal::ZERO,
        }
    }

    #[test]
    fn test_bracket_bounds_are_inclusive() {
        let t = tramo(100, Some(200));
        assert!(t.contains(Decimal::from(100)));
        assert!(t.contains(Decimal::from(200)));
        assert!(!t.contains(Decimal::from(99)));
        assert!(!t.contains(Decimal::new(20001, 2)));
    }

    #[test]
    fn test_open_ended_bracket_has_no_upper_bound() {
        let t = tramo(100, None);
        assert!(t.contains(Decimal::from(1_000_000_000)));
        assert!(!t.contains(Decimal::from(50)));
    }

    #[test]
    fn test_parametros_deserialize_with_optional_fields_missing() {
        let json = r#"{
            "valorUf": "38000",
            "ufTopeImponible": "87.8",
            "comisionAfp": "11.27",
            "tasaSis": "1.88",
            "tramos": [{ "desde": "0", "hasta": null, "factor": "0", "rebaja": "0" }]
        }"#;

        let params: ParametrosSueldo = serde_json::from_str(json).unwrap();
        assert!(params.tasa_mutualidad.is_none());
        assert!(params.horas_semanales_jornada.is_none());
        assert!(params.ingreso_minimo_mensual.is_none());
        assert_eq!(params.tramos.len(), 1);
        assert!(params.tramos[0].hasta.is_none());
    }
}
