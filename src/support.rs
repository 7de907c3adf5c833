//! Supporting utilities used by the nozzle models.
//!
//! These modules are public because they're useful on their own, but their
//! APIs are not stable.

pub mod constraint;
pub mod thermo;
pub mod units;
