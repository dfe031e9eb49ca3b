//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading statutory
//! parameter periods from YAML files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::calculation::{round_pesos, tasa_afp};
use crate::error::{EngineError, EngineResult};
use crate::models::{ParametrosSueldo, TramoImpuesto};

use super::provider::ParameterProvider;
use super::types::{PeriodoConfig, TramoConfig};

/// Loads and provides access to statutory parameter periods.
///
/// The `ConfigLoader` reads one YAML file per period and serves the period in
/// force on a given date as [`ParametrosSueldo`].
///
/// # Directory Structure
///
/// ```text
/// config/cl/
/// └── periodos/
///     ├── 2025-01-01.yaml  # Parameters effective from this date
///     └── 2025-08-01.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use sueldo_engine::config::{ConfigLoader, ParameterProvider};
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/cl").unwrap();
///
/// let fecha = NaiveDate::from_ymd_opt(2025, 8, 31).unwrap();
/// let parametros = loader.get_parametros(fecha, "habitat").unwrap();
/// println!("AFP rate: {}%", parametros.comision_afp);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Periods sorted oldest first.
    periodos: Vec<PeriodoConfig>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/cl")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The `periodos` directory is missing or holds no YAML files
    /// - Any file contains invalid YAML or misses a required field
    /// - Two files share an effective date
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let periodos_dir = path.as_ref().join("periodos");
        let periodos = Self::load_periodos(&periodos_dir)?;
        let loader = Self::from_periodos(periodos)?;

        tracing::info!(
            path = %periodos_dir.display(),
            periodos = loader.periodos.len(),
            "parameter periods loaded"
        );

        Ok(loader)
    }

    /// Builds a loader from in-memory periods.
    ///
    /// Periods may be given in any order.
    pub fn from_periodos(mut periodos: Vec<PeriodoConfig>) -> EngineResult<Self> {
        if periodos.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: "periodos (no parameter periods supplied)".to_string(),
            });
        }

        periodos.sort_by_key(|p| p.effective_date);

        if let Some(pair) = periodos
            .windows(2)
            .find(|pair| pair[0].effective_date == pair[1].effective_date)
        {
            return Err(EngineError::ConfigParseError {
                path: "periodos".to_string(),
                message: format!("duplicate effective date {}", pair[0].effective_date),
            });
        }

        Ok(Self { periodos })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all period files from the periods directory.
    fn load_periodos(periodos_dir: &Path) -> EngineResult<Vec<PeriodoConfig>> {
        let periodos_dir_str = periodos_dir.display().to_string();

        if !periodos_dir.exists() {
            return Err(EngineError::ConfigNotFound {
                path: periodos_dir_str,
            });
        }

        let entries = fs::read_dir(periodos_dir).map_err(|_| EngineError::ConfigNotFound {
            path: periodos_dir_str.clone(),
        })?;

        let mut periodos = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: periodos_dir_str.clone(),
            })?;

            let path = entry.path();
            if path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
            {
                periodos.push(Self::load_yaml::<PeriodoConfig>(&path)?);
            }
        }

        if periodos.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no period files found)", periodos_dir_str),
            });
        }

        Ok(periodos)
    }

    /// Returns all loaded periods, oldest first.
    pub fn periodos(&self) -> &[PeriodoConfig] {
        &self.periodos
    }

    /// Returns the most recent period effective on or before `fecha`.
    pub fn periodo_vigente(&self, fecha: NaiveDate) -> EngineResult<&PeriodoConfig> {
        self.periodos
            .iter()
            .rfind(|p| p.effective_date <= fecha)
            .ok_or_else(|| EngineError::ErrorParametros {
                date: fecha,
                message: "no parameter period in force".to_string(),
            })
    }
}

impl ParameterProvider for ConfigLoader {
    fn get_parametros(&self, fecha: NaiveDate, afp: &str) -> EngineResult<ParametrosSueldo> {
        let periodo = self.periodo_vigente(fecha)?;
        let tasa = tasa_afp(afp, &periodo.tasas_afp);

        let tramos = periodo
            .tramos
            .iter()
            .map(|tramo| tramo_en_pesos(tramo, periodo.valor_utm, fecha))
            .collect::<EngineResult<Vec<_>>>()?;

        tracing::debug!(
            fecha = %fecha,
            periodo = %periodo.effective_date,
            afp = %afp,
            comision_afp = %tasa.tasa,
            afp_default = tasa.es_default,
            "parameters resolved"
        );

        Ok(ParametrosSueldo {
            valor_uf: periodo.valor_uf,
            uf_tope_imponible: periodo.uf_tope_imponible,
            comision_afp: tasa.tasa,
            tasa_sis: periodo.tasa_sis,
            tasa_mutualidad: periodo.tasa_mutualidad,
            horas_semanales_jornada: periodo.horas_semanales_jornada,
            ingreso_minimo_mensual: periodo.ingreso_minimo_mensual,
            tramos,
        })
    }
}

/// Converts a bracket published in UTM into whole pesos.
fn tramo_en_pesos(
    tramo: &TramoConfig,
    valor_utm: Decimal,
    fecha: NaiveDate,
) -> EngineResult<TramoImpuesto> {
    let en_pesos = |utm: Decimal| {
        utm.checked_mul(valor_utm)
            .map(round_pesos)
            .ok_or_else(|| EngineError::ErrorParametros {
                date: fecha,
                message: format!("tax bracket overflow converting {} UTM", utm),
            })
    };

    Ok(TramoImpuesto {
        desde: en_pesos(tramo.desde_utm)?,
        hasta: tramo.hasta_utm.map(en_pesos).transpose()?,
        factor: tramo.factor,
        rebaja: en_pesos(tramo.rebaja_utm)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/cl"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_periodo(effective_date: NaiveDate, valor_uf: &str) -> PeriodoConfig {
        let mut tasas_afp = BTreeMap::new();
        tasas_afp.insert("habitat".to_string(), dec("11.27"));
        PeriodoConfig {
            effective_date,
            valor_uf: dec(valor_uf),
            valor_utm: dec("68000"),
            uf_tope_imponible: dec("87.8"),
            tasa_sis: dec("1.88"),
            tasa_mutualidad: None,
            horas_semanales_jornada: None,
            ingreso_minimo_mensual: None,
            tasas_afp,
            tramos: vec![
                TramoConfig {
                    desde_utm: Decimal::ZERO,
                    hasta_utm: Some(dec("13.5")),
                    factor: Decimal::ZERO,
                    rebaja_utm: Decimal::ZERO,
                },
                TramoConfig {
                    desde_utm: dec("13.5"),
                    hasta_utm: None,
                    factor: dec("0.04"),
                    rebaja_utm: dec("0.54"),
                },
            ],
        }
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert!(loader.periodos().len() >= 2);
        assert!(
            loader
                .periodos()
                .windows(2)
                .all(|w| w[0].effective_date < w[1].effective_date)
        );
    }

    #[test]
    fn test_load_missing_directory_returns_config_not_found() {
        match ConfigLoader::load("./config/nonexistent") {
            Err(EngineError::ConfigNotFound { path }) => assert!(path.contains("periodos")),
            other => panic!("Expected ConfigNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_get_parametros_from_files() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let params = loader.get_parametros(date(2025, 8, 31), "habitat").unwrap();

        assert_eq!(params.comision_afp, dec("11.27"));
        assert_eq!(params.uf_tope_imponible, dec("87.8"));
        assert_eq!(params.ingreso_minimo_mensual, Some(dec("529000")));
        assert_eq!(params.tramos.len(), 8);
        assert!(params.tramos.last().unwrap().hasta.is_none());
    }

    #[test]
    fn test_file_brackets_are_contiguous() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let params = loader.get_parametros(date(2025, 8, 31), "modelo").unwrap();

        assert_eq!(params.tramos[0].desde, Decimal::ZERO);
        for pair in params.tramos.windows(2) {
            assert_eq!(pair[0].hasta, Some(pair[1].desde));
        }
    }

    #[test]
    fn test_file_brackets_are_whole_pesos() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let params = loader.get_parametros(date(2025, 8, 31), "habitat").unwrap();

        // 13.5 UTM x 68647 = 926734.5 and 0.54 UTM x 68647 = 37069.38
        assert_eq!(params.tramos[0].hasta, Some(dec("926735")));
        assert_eq!(params.tramos[1].desde, dec("926735"));
        assert_eq!(params.tramos[1].rebaja, dec("37069"));
        for tramo in &params.tramos {
            assert_eq!(tramo.desde, tramo.desde.trunc());
            assert_eq!(tramo.rebaja, tramo.rebaja.trunc());
            if let Some(hasta) = tramo.hasta {
                assert_eq!(hasta, hasta.trunc());
            }
        }
    }

    #[test]
    fn test_periodo_vigente_picks_most_recent_on_or_before_date() {
        let loader = ConfigLoader::from_periodos(vec![
            create_test_periodo(date(2025, 8, 1), "39000"),
            create_test_periodo(date(2025, 1, 1), "38000"),
        ])
        .unwrap();

        assert_eq!(
            loader.periodo_vigente(date(2025, 7, 31)).unwrap().valor_uf,
            dec("38000")
        );
        assert_eq!(
            loader.periodo_vigente(date(2025, 8, 1)).unwrap().valor_uf,
            dec("39000")
        );
        assert_eq!(
            loader.periodo_vigente(date(2026, 3, 15)).unwrap().valor_uf,
            dec("39000")
        );
    }

    #[test]
    fn test_date_before_first_period_returns_error_parametros() {
        let loader =
            ConfigLoader::from_periodos(vec![create_test_periodo(date(2025, 1, 1), "38000")])
                .unwrap();

        let result = loader.get_parametros(date(2024, 12, 31), "habitat");

        assert_eq!(result.unwrap_err().code(), "ERROR_PARAMETROS");
    }

    #[test]
    fn test_brackets_converted_from_utm_to_pesos() {
        let loader =
            ConfigLoader::from_periodos(vec![create_test_periodo(date(2025, 1, 1), "38000")])
                .unwrap();

        let params = loader.get_parametros(date(2025, 2, 1), "habitat").unwrap();

        assert_eq!(params.tramos[0].hasta, Some(dec("918000")));
        assert_eq!(params.tramos[1].desde, dec("918000"));
        assert_eq!(params.tramos[1].factor, dec("0.04"));
        assert_eq!(params.tramos[1].rebaja, dec("36720"));
    }

    #[test]
    fn test_unknown_afp_falls_back_to_default_rate() {
        let loader =
            ConfigLoader::from_periodos(vec![create_test_periodo(date(2025, 1, 1), "38000")])
                .unwrap();

        let params = loader.get_parametros(date(2025, 2, 1), "desconocida").unwrap();

        assert_eq!(params.comision_afp, dec("11.45"));
    }

    #[test]
    fn test_from_periodos_rejects_empty_and_duplicates() {
        assert_eq!(
            ConfigLoader::from_periodos(vec![]).unwrap_err().code(),
            "CONFIG_NO_ENCONTRADA"
        );

        let result = ConfigLoader::from_periodos(vec![
            create_test_periodo(date(2025, 1, 1), "38000"),
            create_test_periodo(date(2025, 1, 1), "38100"),
        ]);
        assert_eq!(result.unwrap_err().code(), "CONFIG_INVALIDA");
    }
}
