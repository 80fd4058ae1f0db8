pub mod build_context;
pub mod command_line;
pub mod constants;
