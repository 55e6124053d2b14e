//! Stochastic, brightness-weighted pixel selection.

pub(crate) mod mode;
pub(crate) mod selector;
pub(crate) mod weights;
