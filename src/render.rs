use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::error::{ListError, Result};
use crate::list::List;

// =============================================================================
// Milestone 8: Text serialization
// =============================================================================

/// Layout of the arrow-chained diagnostic line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintStyle {
    pub arrow: String,
    pub terminator: String,
    /// Spaces per nesting level when a composite value is pretty-printed.
    pub indent: usize,
}

impl Default for PrintStyle {
    fn default() -> Self {
        PrintStyle {
            arrow: " -> ".to_string(),
            terminator: "/".to_string(),
            indent: 2,
        }
    }
}

/// Text form of one value in the arrow chain: strings raw, scalars as JSON
/// text, arrays and objects as indented JSON.
pub fn render_value<T: Serialize + ?Sized>(value: &T, indent: usize) -> Result<String> {
    match serde_json::to_value(value)? {
        Value::String(text) => Ok(text),
        composite @ (Value::Array(_) | Value::Object(_)) => pretty(&composite, indent),
        scalar => Ok(scalar.to_string()),
    }
}

fn pretty(value: &Value, indent: usize) -> Result<String> {
    let indent = " ".repeat(indent);
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buffer).map_err(|err| ListError::invalid_argument("print", err.to_string()))
}

impl<T: Serialize> List<T> {
    /// Each value as compact JSON, separated by `delimiter`.
    pub fn join(&self, delimiter: &str) -> Result<String> {
        let parts = self.iter().map(serde_json::to_string);
        let joined = itertools::process_results(parts, |mut parts| parts.join(delimiter))?;
        Ok(joined)
    }

    pub fn to_arrow_string(&self) -> Result<String> {
        self.to_arrow_string_with(&PrintStyle::default())
    }

    /// `<v1> -> <v2> -> ... -> /` with the given layout.
    pub fn to_arrow_string_with(&self, style: &PrintStyle) -> Result<String> {
        let mut line = String::new();
        for value in self.iter() {
            line.push_str(&render_value(value, style.indent)?);
            line.push_str(&style.arrow);
        }
        line.push_str(&style.terminator);
        Ok(line)
    }

    /// Writes the arrow chain to stdout.
    pub fn print(&self) -> Result<()> {
        self.print_with(&PrintStyle::default())
    }

    pub fn print_with(&self, style: &PrintStyle) -> Result<()> {
        println!("{}", self.to_arrow_string_with(style)?);
        Ok(())
    }
}
