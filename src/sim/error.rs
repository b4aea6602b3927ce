/// Errors raised while setting up or running a simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Time step is not a positive finite number
    InvalidTimeStep {
        time_step: f64,
    },
    /// Time interval is shorter than one time step (or non-finite)
    InvalidInterval {
        time_interval: f64,
        time_step: f64,
    },
    /// Mass is zero or non-finite
    InvalidMass {
        mass: f64,
    },
    /// Some other input parameter is NaN or infinite
    NonFiniteInput {
        name: &'static str,
        value: f64,
    },
    /// Force, velocity or position blew up during the run
    NonFiniteResult {
        /// Last step whose state was finite (0 if the first step failed)
        last_valid_step: usize,
        /// Time of the failing step
        time: f64,
    },
}

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimError::InvalidTimeStep { time_step } => {
                write!(f, "Time step must be positive and finite, got {}", time_step)
            }
            SimError::InvalidInterval { time_interval, time_step } => {
                write!(
                    f,
                    "Time interval {} must be finite and at least one time step ({})",
                    time_interval, time_step
                )
            }
            SimError::InvalidMass { mass } => {
                write!(f, "Mass must be nonzero and finite, got {}", mass)
            }
            SimError::NonFiniteInput { name, value } => {
                write!(f, "Parameter {} must be finite, got {}", name, value)
            }
            SimError::NonFiniteResult { last_valid_step, time } => {
                write!(
                    f,
                    "Non-finite state at t = {} (last valid step {})",
                    time, last_valid_step
                )
            }
        }
    }
}

impl std::error::Error for SimError {}
