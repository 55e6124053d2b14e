//! Stroke ordering over the selected points.

pub(crate) mod occupancy;
pub(crate) mod planner;
