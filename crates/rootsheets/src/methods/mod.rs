//! The four root-finding methods, one worksheet each
//!
//! | sheet | f(x) | seeds |
//! |-------|------|-------|
//! | `Biseccion` | eˣ − cos x | a = −1, b = 1 |
//! | `Newton-Raphson` | x·atan(x/2) + ln(x² + 4) − 3 | x₀ = 1.5 |
//! | `Secante` | 0.5 + x²/4 − x·sin x − cos(2x)/2 | x₋₁ = 0.5, x₀ = 1 |
//! | `Punto Fijo` | g(x) = √((10 − x³)/4) | x₀ = 1 |

pub mod bisection;
pub mod fixed_point;
pub mod newton;
pub mod secant;

use rootsheets_core::Workbook;

use crate::config::GeneratorConfig;
use crate::error::Result;

pub use bisection::BISECTION;
pub use fixed_point::FIXED_POINT;
pub use newton::NEWTON_RAPHSON;
pub use secant::SECANT;

/// Appends one method sheet, returning its index
pub type Builder = fn(&mut Workbook, &GeneratorConfig) -> Result<usize>;

/// Every sheet builder in workbook order
pub static BUILDERS: [Builder; 4] = [
    bisection::build,
    newton::build,
    secant::build,
    fixed_point::build,
];
