pub mod commands;
pub mod dict_source;
pub mod trace_init;
