//! Terminal module: Writing update streams to a terminal.

mod output;

pub use output::AnsiWriter;
