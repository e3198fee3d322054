//! Output formatting for CLI commands

use serde::Serialize;

use crate::storage::OutputFormat;

/// Output helper for consistent formatting
pub struct Output {
    format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Prints a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Text => println!("{}", message),
            OutputFormat::Json | OutputFormat::Yaml => {
                let value = serde_json::json!({
                    "success": true,
                    "message": message
                });
                if self.format == OutputFormat::Json {
                    println!("{}", value);
                } else if let Ok(yaml) = serde_yaml::to_string(&value) {
                    print!("{}", yaml);
                }
            }
        }
    }

    /// Prints structured data in the machine formats
    ///
    /// In text mode the data is pretty-printed as JSON; callers with a
    /// dedicated text rendering should check [`Output::is_text`] first.
    pub fn data<T: Serialize>(&self, data: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Text => println!("{}", serde_json::to_string_pretty(data)?),
            OutputFormat::Json => println!("{}", serde_json::to_string(data)?),
            OutputFormat::Yaml => print!("{}", serde_yaml::to_string(data)?),
        }
        Ok(())
    }

    /// Prints preformatted text (text mode only)
    pub fn text(&self, text: &str) {
        if self.is_text() {
            print!("{}", text);
            if !text.ends_with('\n') {
                println!();
            }
        }
    }

    /// Returns true if using text format
    pub fn is_text(&self) -> bool {
        self.format == OutputFormat::Text
    }
}
