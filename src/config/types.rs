//! Configuration types for payroll calculation.
//!
//! This module contains the strongly-typed rate tables and policy switches
//! that are deserialized from YAML configuration files, together with the
//! built-in 2024 tables.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::UnhealthyLevel;

/// Metadata about the jurisdiction the tables belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JurisdictionMetadata {
    /// Short code of the table set (e.g., "BR-2024").
    pub code: String,
    /// Human-readable name of the table set.
    pub name: String,
    /// The version or effective date of the tables.
    pub version: String,
    /// URL to the official source of the tables.
    pub source_url: String,
}

/// One progressive INSS bracket.
///
/// The bracket covers the salary slice `(min, max]` (the first bracket also
/// includes `min` itself). Its `min` must equal the previous bracket's `max`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InssBracket {
    /// Lower bound of the slice (the previous bracket's ceiling).
    pub min: Decimal,
    /// Upper bound of the slice.
    pub max: Decimal,
    /// Contribution rate applied to the slice (e.g., 0.075).
    pub rate: Decimal,
}

/// One IRRF bracket of the simplified "deduction table" method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrrfBracket {
    /// Lower bound of the bracket (the previous bracket's ceiling).
    pub min: Decimal,
    /// Upper bound of the bracket; `None` for the open-ended top bracket.
    #[serde(default)]
    pub max: Option<Decimal>,
    /// Flat rate applied to the whole calculation base.
    pub rate: Decimal,
    /// Fixed amount subtracted from `base × rate` ("parcela a deduzir").
    pub fixed_deduction: Decimal,
}

/// Insalubridade rates as a fraction of the minimum wage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnhealthyRates {
    /// Rate for the low exposure level.
    pub low: Decimal,
    /// Rate for the medium exposure level.
    pub medium: Decimal,
    /// Rate for the high exposure level.
    pub high: Decimal,
}

impl UnhealthyRates {
    /// Returns the rate for an exposure level (zero when there is no exposure).
    pub fn rate_for(&self, level: UnhealthyLevel) -> Decimal {
        match level {
            UnhealthyLevel::None => Decimal::ZERO,
            UnhealthyLevel::Low => self.low,
            UnhealthyLevel::Medium => self.medium,
            UnhealthyLevel::High => self.high,
        }
    }
}

/// Rate tables and flat-rate constants for one tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTables {
    /// The tax year the tables apply to.
    pub year: i32,
    /// National minimum wage, the base of the insalubridade premium.
    pub minimum_wage: Decimal,
    /// IRRF base deduction per dependent.
    pub dependent_deduction: Decimal,
    /// Employer FGTS rate over the gross total.
    pub fgts_rate: Decimal,
    /// Periculosidade rate over the base salary.
    pub hazard_rate: Decimal,
    /// Maximum vale-transporte discount as a fraction of the base salary.
    pub transport_discount_cap_rate: Decimal,
    /// Insalubridade rates by exposure level.
    pub unhealthy_rates: UnhealthyRates,
    /// Progressive INSS brackets, ascending.
    pub inss_brackets: Vec<InssBracket>,
    /// IRRF brackets, ascending; the last one is open-ended.
    pub irrf_brackets: Vec<IrrfBracket>,
}

impl RateTables {
    /// Returns the 2024 Brazilian tables.
    ///
    /// # Example
    ///
    /// ```
    /// use folha_engine::config::RateTables;
    /// use rust_decimal::Decimal;
    ///
    /// let tables = RateTables::brazil_2024();
    /// assert_eq!(tables.minimum_wage, Decimal::new(141200, 2));
    /// assert!(tables.validate().is_ok());
    /// ```
    pub fn brazil_2024() -> Self {
        Self {
            year: 2024,
            minimum_wage: Decimal::new(141200, 2),
            dependent_deduction: Decimal::new(18959, 2),
            fgts_rate: Decimal::new(8, 2),
            hazard_rate: Decimal::new(30, 2),
            transport_discount_cap_rate: Decimal::new(6, 2),
            unhealthy_rates: UnhealthyRates {
                low: Decimal::new(10, 2),
                medium: Decimal::new(20, 2),
                high: Decimal::new(40, 2),
            },
            inss_brackets: vec![
                InssBracket {
                    min: Decimal::ZERO,
                    max: Decimal::new(141200, 2),
                    rate: Decimal::new(75, 3),
                },
                InssBracket {
                    min: Decimal::new(141200, 2),
                    max: Decimal::new(266668, 2),
                    rate: Decimal::new(9, 2),
                },
                InssBracket {
                    min: Decimal::new(266668, 2),
                    max: Decimal::new(400003, 2),
                    rate: Decimal::new(12, 2),
                },
                InssBracket {
                    min: Decimal::new(400003, 2),
                    max: Decimal::new(778602, 2),
                    rate: Decimal::new(14, 2),
                },
            ],
            irrf_brackets: vec![
                IrrfBracket {
                    min: Decimal::ZERO,
                    max: Some(Decimal::new(225920, 2)),
                    rate: Decimal::ZERO,
                    fixed_deduction: Decimal::ZERO,
                },
                IrrfBracket {
                    min: Decimal::new(225920, 2),
                    max: Some(Decimal::new(282665, 2)),
                    rate: Decimal::new(75, 3),
                    fixed_deduction: Decimal::new(16944, 2),
                },
                IrrfBracket {
                    min: Decimal::new(282665, 2),
                    max: Some(Decimal::new(375105, 2)),
                    rate: Decimal::new(15, 2),
                    fixed_deduction: Decimal::new(38144, 2),
                },
                IrrfBracket {
                    min: Decimal::new(375105, 2),
                    max: Some(Decimal::new(466468, 2)),
                    rate: Decimal::new(225, 3),
                    fixed_deduction: Decimal::new(66277, 2),
                },
                IrrfBracket {
                    min: Decimal::new(466468, 2),
                    max: None,
                    rate: Decimal::new(275, 3),
                    fixed_deduction: Decimal::new(89600, 2),
                },
            ],
        }
    }

    /// Checks that the tables are internally consistent.
    ///
    /// Brackets must start at zero and be contiguous (each `min` equal to the
    /// previous `max`), rates must lie in `[0, 1]` and constants must not be
    /// negative. The INSS table must end at a ceiling and the IRRF table must
    /// end with a single open-ended bracket.
    pub fn validate(&self) -> EngineResult<()> {
        non_negative("constants", "minimum_wage", self.minimum_wage)?;
        non_negative("constants", "dependent_deduction", self.dependent_deduction)?;
        unit_rate("constants", "fgts_rate", self.fgts_rate)?;
        unit_rate("constants", "hazard_rate", self.hazard_rate)?;
        unit_rate(
            "constants",
            "transport_discount_cap_rate",
            self.transport_discount_cap_rate,
        )?;
        unit_rate("constants", "unhealthy_rates.low", self.unhealthy_rates.low)?;
        unit_rate(
            "constants",
            "unhealthy_rates.medium",
            self.unhealthy_rates.medium,
        )?;
        unit_rate("constants", "unhealthy_rates.high", self.unhealthy_rates.high)?;

        self.validate_inss()?;
        self.validate_irrf()
    }

    fn validate_inss(&self) -> EngineResult<()> {
        if self.inss_brackets.is_empty() {
            return Err(EngineError::invalid_table("inss", "no brackets defined"));
        }

        let mut expected_min = Decimal::ZERO;
        for (index, bracket) in self.inss_brackets.iter().enumerate() {
            if bracket.min != expected_min {
                return Err(EngineError::invalid_table(
                    "inss",
                    format!(
                        "bracket {} starts at {} but the previous ceiling is {}",
                        index, bracket.min, expected_min
                    ),
                ));
            }
            if bracket.max <= bracket.min {
                return Err(EngineError::invalid_table(
                    "inss",
                    format!("bracket {} has max {} <= min {}", index, bracket.max, bracket.min),
                ));
            }
            unit_rate("inss", &format!("brackets[{}].rate", index), bracket.rate)?;
            expected_min = bracket.max;
        }

        Ok(())
    }

    fn validate_irrf(&self) -> EngineResult<()> {
        if self.irrf_brackets.is_empty() {
            return Err(EngineError::invalid_table("irrf", "no brackets defined"));
        }

        let last = self.irrf_brackets.len() - 1;
        let mut expected_min = Decimal::ZERO;
        for (index, bracket) in self.irrf_brackets.iter().enumerate() {
            if bracket.min != expected_min {
                return Err(EngineError::invalid_table(
                    "irrf",
                    format!(
                        "bracket {} starts at {} but the previous ceiling is {}",
                        index, bracket.min, expected_min
                    ),
                ));
            }
            unit_rate("irrf", &format!("brackets[{}].rate", index), bracket.rate)?;
            non_negative(
                "irrf",
                &format!("brackets[{}].fixed_deduction", index),
                bracket.fixed_deduction,
            )?;

            match (bracket.max, index == last) {
                (None, true) => {}
                (None, false) => {
                    return Err(EngineError::invalid_table(
                        "irrf",
                        format!("bracket {} is open-ended but is not the last bracket", index),
                    ));
                }
                (Some(_), true) => {
                    return Err(EngineError::invalid_table(
                        "irrf",
                        "the last bracket must be open-ended",
                    ));
                }
                (Some(max), false) => {
                    if max <= bracket.min {
                        return Err(EngineError::invalid_table(
                            "irrf",
                            format!("bracket {} has max {} <= min {}", index, max, bracket.min),
                        ));
                    }
                    expected_min = max;
                }
            }
        }

        Ok(())
    }
}

fn non_negative(table: &str, field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::invalid_table(
            table,
            format!("{} must not be negative (got {})", field, value),
        ));
    }
    Ok(())
}

fn unit_rate(table: &str, field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(EngineError::invalid_table(
            table,
            format!("{} must be between 0 and 1 (got {})", field, value),
        ));
    }
    Ok(())
}

/// How periculosidade and insalubridade combine when both apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PremiumPolicy {
    /// Both premiums are paid.
    #[default]
    Additive,
    /// Only the larger premium is paid (hazard wins a tie).
    GreaterOf,
}

/// Policy switches that are not part of the statutory tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPolicy {
    /// How hazard and unhealthy premiums combine.
    #[serde(default)]
    pub premium_policy: PremiumPolicy,
    /// Multiplier applied to the hourly wage for paid overtime.
    pub overtime_multiplier: Decimal,
}

impl Default for PayrollPolicy {
    fn default() -> Self {
        Self {
            premium_policy: PremiumPolicy::Additive,
            overtime_multiplier: Decimal::new(15, 1),
        }
    }
}

/// The complete, validated payroll configuration.
///
/// Construction always validates the tables, so a `PayrollConfig` in hand is
/// known to have contiguous brackets and sane constants.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    metadata: JurisdictionMetadata,
    tables: RateTables,
    policy: PayrollPolicy,
}

impl PayrollConfig {
    /// Creates a new configuration, validating the rate tables and policy.
    pub fn new(
        metadata: JurisdictionMetadata,
        tables: RateTables,
        policy: PayrollPolicy,
    ) -> EngineResult<Self> {
        tables.validate()?;
        if policy.overtime_multiplier < Decimal::ONE {
            return Err(EngineError::invalid_table(
                "policy",
                format!(
                    "overtime_multiplier must be at least 1 (got {})",
                    policy.overtime_multiplier
                ),
            ));
        }
        Ok(Self {
            metadata,
            tables,
            policy,
        })
    }

    /// Returns the built-in 2024 configuration with the default policy.
    pub fn brazil_2024() -> Self {
        Self {
            metadata: JurisdictionMetadata {
                code: "BR-2024".to_string(),
                name: "Brazilian payroll tables 2024".to_string(),
                version: "2024-05-01".to_string(),
                source_url: "https://www.gov.br/receitafederal".to_string(),
            },
            tables: RateTables::brazil_2024(),
            policy: PayrollPolicy::default(),
        }
    }

    /// Returns a copy of this configuration with a different premium policy.
    pub fn with_premium_policy(mut self, premium_policy: PremiumPolicy) -> Self {
        self.policy.premium_policy = premium_policy;
        self
    }

    /// Returns the jurisdiction metadata.
    pub fn metadata(&self) -> &JurisdictionMetadata {
        &self.metadata
    }

    /// Returns the rate tables.
    pub fn tables(&self) -> &RateTables {
        &self.tables
    }

    /// Returns the policy switches.
    pub fn policy(&self) -> &PayrollPolicy {
        &self.policy
    }
}
