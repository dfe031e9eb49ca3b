//! Configuration types for statutory salary parameters.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the per-period YAML files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;

/// An income tax bracket as published, with bounds and rebate in UTM.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TramoConfig {
    /// Lower bound in UTM.
    pub desde_utm: Decimal,
    /// Upper bound in UTM; omitted for the open-ended last bracket.
    #[serde(default)]
    pub hasta_utm: Option<Decimal>,
    /// Marginal rate as a fraction.
    pub factor: Decimal,
    /// Rebate in UTM.
    pub rebaja_utm: Decimal,
}

/// Statutory parameters in force from an effective date.
///
/// Rates are in percent. Periods are loaded from `periodos/*.yaml` and kept
/// sorted by `effective_date`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PeriodoConfig {
    /// First date on which these parameters apply.
    pub effective_date: NaiveDate,
    /// Value of one UF in pesos.
    pub valor_uf: Decimal,
    /// Value of one UTM in pesos.
    pub valor_utm: Decimal,
    /// Taxable-income ceiling in UF.
    pub uf_tope_imponible: Decimal,
    /// Disability and survivorship insurance rate.
    pub tasa_sis: Decimal,
    /// Work-accident insurance base rate.
    #[serde(default)]
    pub tasa_mutualidad: Option<Decimal>,
    /// Legal weekly working hours.
    #[serde(default)]
    pub horas_semanales_jornada: Option<Decimal>,
    /// Monthly minimum wage in pesos.
    #[serde(default)]
    pub ingreso_minimo_mensual: Option<Decimal>,
    /// Total employee AFP rate by fund code (lowercase).
    pub tasas_afp: BTreeMap<String, Decimal>,
    /// Monthly income tax brackets, ordered from lowest.
    pub tramos: Vec<TramoConfig>,
}
