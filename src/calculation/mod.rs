//! Calculation logic for the salary engine.
//!
//! This module contains the input and parameter validation, the taxable income
//! assembly with its UF ceiling, employee contributions, the single income tax,
//! employer costs, the peso rounding rules, and the pipeline that sequences
//! them into a [`SueldoResultado`](crate::models::SueldoResultado).

mod cotizaciones;
mod empleador;
mod imponible;
mod impuesto;
mod rounding;
mod sueldo;
mod validation;

pub use cotizaciones::{
    CotizacionesResult, TasaAfp, afc_trabajador_rate, calcular_cotizaciones, default_afp_rate,
    salud_legal_rate, tasa_afp,
};
pub use empleador::{
    EmpleadorResult, afc_empleador_indefinido_rate, afc_empleador_plazo_rate,
    calcular_empleador, default_mutualidad_rate, reforma_previsional_rate,
};
pub use imponible::{
    DEFAULT_HORAS_SEMANALES, ImponibleResult, calcular_imponible, gratificacion_rate,
    gratificacion_tope_ingresos_minimos, recargo_cien, recargo_cincuenta,
};
pub use impuesto::{ImpuestoResult, calcular_impuesto, find_tramo};
pub use rounding::{RoundPesos, round_pesos};
pub use sueldo::{calcular_con_parametros, calcular_sueldo};
pub use validation::{MAX_DIAS_AUSENCIA, validate_input, validate_parameters};
