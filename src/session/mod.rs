pub(crate) mod trace_session;
