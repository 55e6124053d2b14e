//! Single-call conversion: parameters and the three-stage driver.

pub(crate) mod params;
pub(crate) mod trace;
