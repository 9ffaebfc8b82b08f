//! Generator configuration

/// Tolerance written to `B1` when none is given
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Data rows per sheet when none is given
pub const DEFAULT_ITERATIONS: u32 = 25;

/// File written by the CLI when no `--output` is given
pub const DEFAULT_OUTPUT: &str = "metodos_numericos.xlsx";

/// Settings applied identically to every method sheet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    /// Convergence threshold stored in the tolerance cell
    pub tolerance: f64,
    /// Number of data rows, the seed row included
    pub iterations: u32,
}

impl GeneratorConfig {
    /// Configuration with the default tolerance and iteration count
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the iteration count
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}
