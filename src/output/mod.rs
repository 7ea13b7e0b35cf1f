//
//  teamcity-cli
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Formatting Module
//!
//! Renders command results either as human-readable tables or as JSON for
//! scripting.
//!
//! ## Output Formats
//!
//! | Format | Description | Use Case |
//! |--------|-------------|----------|
//! | `Table` | Tables and key/value listings | Interactive terminal use |
//! | `Json` | Pretty-printed JSON | Scripting, piping to `jq` |
//!
//! ## Implementing Output for a Type
//!
//! Single entities implement [`TableOutput`]; list items implement
//! [`TableRow`] so that a slice of them renders as one table.
//!
//! ```rust,no_run
//! use serde::Serialize;
//! use teamcity_cli::output::{OutputFormat, OutputWriter, TableRow};
//!
//! #[derive(Serialize)]
//! struct AgentRow {
//!     name: String,
//!     connected: bool,
//! }
//!
//! impl TableRow for AgentRow {
//!     fn headers() -> &'static [&'static str] {
//!         &["NAME", "CONNECTED"]
//!     }
//!
//!     fn row(&self, _color: bool) -> Vec<String> {
//!         vec![self.name.clone(), self.connected.to_string()]
//!     }
//! }
//!
//! let writer = OutputWriter::new(OutputFormat::Table);
//! writer.write_list(&[AgentRow { name: "agent-1".into(), connected: true }])?;
//! # Ok::<(), anyhow::Error>(())
//! ```

mod json;
mod table;

pub use json::*;
pub use table::*;

use serde::Serialize;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Writes command output in the selected format.
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    pub fn json() -> Self {
        Self::new(OutputFormat::Json)
    }

    pub fn table() -> Self {
        Self::new(OutputFormat::Table)
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Writes a single entity.
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(value)?,
            OutputFormat::Table => value.print_table(self.color),
        }
        Ok(())
    }

    /// Writes a list as one table, or as a JSON array.
    pub fn write_list<T: Serialize + TableRow>(&self, values: &[T]) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(&values)?,
            OutputFormat::Table => {
                if values.is_empty() {
                    self.write_info("No results");
                    return Ok(());
                }
                TableBuilder::new()
                    .color(self.color)
                    .headers(T::headers().iter().copied())
                    .rows(values.iter().map(|v| v.row(self.color)))
                    .print();
            }
        }
        Ok(())
    }

    pub fn write_error(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("error:").red().bold(), msg);
        } else {
            eprintln!("error: {}", msg);
        }
    }

    pub fn write_warning(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {}", msg);
        }
    }

    pub fn write_info(&self, msg: &str) {
        println!("{}", msg);
    }

    pub fn write_success(&self, msg: &str) {
        use console::style;
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {}", msg);
        }
    }
}

/// Human-readable rendering of a single entity.
pub trait TableOutput {
    fn print_table(&self, color: bool);
}

/// One row of a listing table.
pub trait TableRow {
    fn headers() -> &'static [&'static str];

    fn row(&self, color: bool) -> Vec<String>;
}

pub fn print_header(text: &str) {
    use console::style;
    println!("{}", style(text).bold());
    println!("{}", "-".repeat(text.chars().count()));
}

pub fn print_field(key: &str, value: &str, color: bool) {
    use console::style;
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}

/// Prints an optional field, showing `-` when absent.
pub fn print_optional_field(key: &str, value: Option<&str>, color: bool) {
    print_field(key, value.unwrap_or("-"), color);
}
