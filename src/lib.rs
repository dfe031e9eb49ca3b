//! Salary Calculation Engine for Chilean Payroll
//!
//! This crate computes an employee's monthly net salary (sueldo líquido) and
//! the employer's total cost from gross salary components, applying Chilean
//! statutory rules: legal gratification, the UF-indexed taxable ceiling,
//! pension, health and unemployment contributions, and the progressive single
//! income tax. Statutory parameters are resolved per date from YAML periods.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
