//! Population configuration.
//!
//! # Validation
//!
//! `SimulationConfig` stores `u32` counts, so a value that exists is already
//! a non-negative integer.  Untrusted input (a JSON file, form fields) goes
//! through [`RawSimulationConfig`], which accepts any JSON number or numeric
//! string and rejects negative, fractional, non-finite, or oversized values
//! with [`CoreError::Configuration`] before a graph is ever built.
//!
//! ```rust
//! use cg_core::{RawCount, RawSimulationConfig, SimulationConfig};
//!
//! let raw = RawSimulationConfig {
//!     houses: Some(RawCount::Number(-1.0)),
//!     ..RawSimulationConfig::default()
//! };
//! assert!(SimulationConfig::try_from(raw).is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult, VenueType};

// ── SimulationConfig ──────────────────────────────────────────────────────────

/// Validated population configuration.  Immutable for the length of a run;
/// a restart replaces it wholesale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSimulationConfig")]
pub struct SimulationConfig {
    #[serde(rename = "houses")]
    pub house_count: u32,

    #[serde(rename = "agentsPerHouse")]
    pub agents_per_house: u32,

    #[serde(rename = "busStations")]
    pub bus_station_count: u32,

    #[serde(rename = "hospitals")]
    pub hospital_count: u32,

    #[serde(rename = "supermarkets")]
    pub supermarket_count: u32,

    #[serde(rename = "temples")]
    pub temple_count: u32,

    /// Agents seeded Sick at construction.  Clamped to the population.
    #[serde(rename = "initialSickAgents")]
    pub initial_sick_agents: u32,
}

impl Default for SimulationConfig {
    /// A small town: 42 houses of 9, one each of station, hospital and
    /// temple, three supermarkets, and a single index case.
    fn default() -> Self {
        Self {
            house_count:         42,
            agents_per_house:    9,
            bus_station_count:   1,
            hospital_count:      1,
            supermarket_count:   3,
            temple_count:        1,
            initial_sick_agents: 1,
        }
    }
}

impl SimulationConfig {
    /// Number of venues of `venue_type` to create.
    pub fn venue_count(&self, venue_type: VenueType) -> u32 {
        match venue_type {
            VenueType::House       => self.house_count,
            VenueType::Temple      => self.temple_count,
            VenueType::Hospital    => self.hospital_count,
            VenueType::Supermarket => self.supermarket_count,
            VenueType::Station     => self.bus_station_count,
        }
    }

    /// Total venues across all types.
    pub fn total_venues(&self) -> u64 {
        VenueType::ALL
            .iter()
            .map(|&t| self.venue_count(t) as u64)
            .sum()
    }

    /// `house_count * agents_per_house`, or a configuration error if the
    /// population does not fit in the 32-bit agent index space.
    pub fn total_agents(&self) -> CoreResult<u32> {
        self.house_count
            .checked_mul(self.agents_per_house)
            .ok_or_else(|| {
                CoreError::config(
                    "agentsPerHouse",
                    format!(
                        "gives {} x {} agents, more than the {} supported",
                        self.house_count,
                        self.agents_per_house,
                        u32::MAX
                    ),
                )
            })
    }

    /// Check derived sizes.  Field values themselves are valid by type.
    pub fn validate(&self) -> CoreResult<()> {
        self.total_agents()?;
        if self.total_venues() > u32::MAX as u64 {
            return Err(CoreError::config(
                "houses",
                format!("venue total {} exceeds {}", self.total_venues(), u32::MAX),
            ));
        }
        Ok(())
    }
}

// ── RawSimulationConfig ───────────────────────────────────────────────────────

/// One count as it arrives from outside: a JSON number or a numeric string
/// (form inputs hand over strings).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCount {
    Number(f64),
    Text(String),
}

impl RawCount {
    fn to_count(&self, field: &'static str) -> CoreResult<u32> {
        let value = match self {
            RawCount::Number(n) => *n,
            RawCount::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| CoreError::config(field, format!("{s:?} is not a number")))?,
        };
        if !value.is_finite() {
            return Err(CoreError::config(field, format!("{value} is not finite")));
        }
        if value < 0.0 {
            return Err(CoreError::config(field, format!("{value} is negative")));
        }
        if value.fract() != 0.0 {
            return Err(CoreError::config(field, format!("{value} is not an integer")));
        }
        if value > u32::MAX as f64 {
            return Err(CoreError::config(field, format!("{value} exceeds {}", u32::MAX)));
        }
        Ok(value as u32)
    }
}

impl From<u32> for RawCount {
    fn from(n: u32) -> Self {
        RawCount::Number(n as f64)
    }
}

/// Unvalidated configuration.  Absent fields fall back to
/// [`SimulationConfig::default`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawSimulationConfig {
    pub houses:              Option<RawCount>,
    pub agents_per_house:    Option<RawCount>,
    pub bus_stations:        Option<RawCount>,
    pub hospitals:           Option<RawCount>,
    pub supermarkets:        Option<RawCount>,
    pub temples:             Option<RawCount>,
    pub initial_sick_agents: Option<RawCount>,
}

impl From<&SimulationConfig> for RawSimulationConfig {
    fn from(c: &SimulationConfig) -> Self {
        Self {
            houses:              Some(c.house_count.into()),
            agents_per_house:    Some(c.agents_per_house.into()),
            bus_stations:        Some(c.bus_station_count.into()),
            hospitals:           Some(c.hospital_count.into()),
            supermarkets:        Some(c.supermarket_count.into()),
            temples:             Some(c.temple_count.into()),
            initial_sick_agents: Some(c.initial_sick_agents.into()),
        }
    }
}

impl TryFrom<RawSimulationConfig> for SimulationConfig {
    type Error = CoreError;

    fn try_from(raw: RawSimulationConfig) -> CoreResult<Self> {
        let defaults = SimulationConfig::default();
        let field = |value: &Option<RawCount>, name: &'static str, default: u32| match value {
            Some(v) => v.to_count(name),
            None    => Ok(default),
        };

        let config = SimulationConfig {
            house_count:         field(&raw.houses, "houses", defaults.house_count)?,
            agents_per_house:    field(&raw.agents_per_house, "agentsPerHouse", defaults.agents_per_house)?,
            bus_station_count:   field(&raw.bus_stations, "busStations", defaults.bus_station_count)?,
            hospital_count:      field(&raw.hospitals, "hospitals", defaults.hospital_count)?,
            supermarket_count:   field(&raw.supermarkets, "supermarkets", defaults.supermarket_count)?,
            temple_count:        field(&raw.temples, "temples", defaults.temple_count)?,
            initial_sick_agents: field(&raw.initial_sick_agents, "initialSickAgents", defaults.initial_sick_agents)?,
        };
        config.validate()?;
        Ok(config)
    }
}
