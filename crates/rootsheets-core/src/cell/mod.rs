//! Cell-related types
//!
//! - [`CellValue`] - what a cell holds
//! - [`CellAddress`] / [`CellRange`] - where it lives
//! - [`CellData`] - value plus style index, as stored by a worksheet

mod address;
mod storage;
mod value;

pub use address::{CellAddress, CellRange};
pub use storage::{CellData, CellStorage};
pub use value::{CellValue, SharedString};
