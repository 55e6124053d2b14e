//! Path-to-PCM conversion.

pub(crate) mod amplitude;
pub(crate) mod border;
pub(crate) mod stretch;
