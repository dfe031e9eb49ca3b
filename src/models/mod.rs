//! Core data models for the salary calculation engine.
//!
//! This module contains the calculation input, the point-in-time statutory
//! parameters and the immutable calculation result.

mod input;
mod parametros;
mod resultado;

pub use input::{Bonos, HorasExtras, Isapre, NoImponibleInput, SueldoInput, TipoContrato, TipoSalud};
pub use parametros::{ParametrosSueldo, TramoImpuesto};
pub use resultado::{
    AuditStep, CotizacionesDetalle, DescuentosDetalle, EmpleadorDetalle, ImponibleDetalle,
    ImpuestoDetalle, NoImponibleDetalle, SueldoResultado,
};
