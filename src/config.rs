//! Run configuration.
//!
//! Parameters come either from a YAML scenario file or, as in the classic
//! terminal workflow, from six numbers typed at a prompt.
//!
//! # YAML format
//!
//! ```yaml
//! particle:
//!   initial_position: 1.0
//!   initial_velocity: 0.0
//!   mass: 1.0
//!   spring_constant: 1.0
//!
//! integration:
//!   time_step: 0.01         # h
//!   time_interval: 20.0     # T, the run takes floor(T / h) steps
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::dynamics::state::Params;

/// Physical description of the particle and its spring.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ParticleConfig {
    pub initial_position: f64,
    pub initial_velocity: f64,
    pub mass: f64,
    pub spring_constant: f64,
}

/// Time discretisation.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct IntegrationConfig {
    pub time_step: f64,
    pub time_interval: f64,
}

/// Top-level scenario as stored on disk.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Scenario {
    pub particle: ParticleConfig,
    pub integration: IntegrationConfig,
}

impl Scenario {
    /// Flatten into the integrator's parameter set.
    pub fn params(&self) -> Params {
        Params {
            initial_position: self.particle.initial_position,
            initial_velocity: self.particle.initial_velocity,
            time_step: self.integration.time_step,
            time_interval: self.integration.time_interval,
            mass: self.particle.mass,
            spring_constant: self.particle.spring_constant,
        }
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            particle: ParticleConfig {
                initial_position: 1.0,
                initial_velocity: 0.0,
                mass: 1.0,
                spring_constant: 1.0,
            },
            integration: IntegrationConfig {
                time_step: 0.01,      // ~628 samples per period
                time_interval: 20.0,  // a little over three periods
            },
        }
    }
}

impl From<Params> for Scenario {
    fn from(p: Params) -> Self {
        Self {
            particle: ParticleConfig {
                initial_position: p.initial_position,
                initial_velocity: p.initial_velocity,
                mass: p.mass,
                spring_constant: p.spring_constant,
            },
            integration: IntegrationConfig {
                time_step: p.time_step,
                time_interval: p.time_interval,
            },
        }
    }
}

/// Parse a scenario from any reader.
pub fn parse_scenario<R: std::io::Read>(reader: R) -> Result<Scenario> {
    let scenario: Scenario = serde_yaml::from_reader(reader)?;
    Ok(scenario)
}

/// Load a scenario YAML file.
pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let file = File::open(path)
        .with_context(|| format!("failed to open scenario {}", path.display()))?;
    parse_scenario(BufReader::new(file))
        .with_context(|| format!("failed to parse scenario {}", path.display()))
}

// ---------------------------------------------------------------------------
// Interactive prompt
// ---------------------------------------------------------------------------

const BANNER: &str =
    "Velocity and position calculator for 1 dimensional particle system. F=-kx default";

const PROMPTS: [&str; 6] = [
    "Please enter the initial position of the particle.",
    "Please enter the initial velocity of the particle.",
    "Please enter the time step of the movement.",
    "Please enter the time interval of the movement.",
    "Please enter the mass of the particle",
    "Please enter the spring constant(k)",
];

/// Ask for the six parameters in order.
///
/// Answers are whitespace-separated numbers; several may share one line, in
/// which case later prompts are still printed but consume the buffered values.
pub fn prompt_parameters<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<Params> {
    writeln!(output, "{}", BANNER)?;

    let mut pending: Vec<String> = Vec::new();
    let mut values = [0.0_f64; 6];

    for (slot, prompt) in values.iter_mut().zip(PROMPTS) {
        writeln!(output, "{}", prompt)?;
        output.flush()?;

        while pending.is_empty() {
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                bail!("input ended before all six parameters were given");
            }
            pending = line.split_whitespace().rev().map(str::to_owned).collect();
        }

        let token = pending.pop().unwrap_or_default();
        *slot = token
            .parse::<f64>()
            .with_context(|| format!("'{}' is not a number", token))?;
    }

    let [initial_position, initial_velocity, time_step, time_interval, mass, spring_constant] =
        values;
    Ok(Params {
        initial_position,
        initial_velocity,
        time_step,
        time_interval,
        mass,
        spring_constant,
    })
}
