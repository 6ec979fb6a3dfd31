//! # Commands
//!
//! One function per subcommand. Each returns a serializable response; the
//! caller decides whether it is printed as text or as JSON.
//!
//! ## Command Categories
//! - **Items**: list, show, add, edit, delete
//! - **Reports**: stats, categories

pub mod items;
pub mod reports;

use std::io::{self, Write};

use serde::Serialize;

use crate::config::CliConfig;
use crate::error::CliResult;

pub use items::*;
pub use reports::*;

/// A command response that can be printed for a human.
pub trait Render: Serialize {
    /// Writes the human-readable form.
    fn write_text<W: Write>(&self, writer: &mut W, config: &CliConfig) -> io::Result<()>;
}

/// Prints `response` as pretty JSON or as text.
pub fn emit<T: Render, W: Write>(
    writer: &mut W,
    response: &T,
    json: bool,
    config: &CliConfig,
) -> CliResult<()> {
    if json {
        let text = serde_json::to_string_pretty(response)?;
        writeln!(writer, "{text}")?;
    } else {
        response.write_text(writer, config)?;
    }
    Ok(())
}
