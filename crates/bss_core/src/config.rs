//! Output configuration.

use std::fmt;
use std::str::FromStr;

use bss_codec::{FormatConfig, LineFormat};
use serde::{Deserialize, Serialize};

use crate::error::{BssError, BssResult};

/// Output encoding of a segment data stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    /// Legacy BSS text lines.
    #[default]
    Text,
    /// Avro object container.
    #[serde(alias = "avro")]
    Container,
}

impl DataFormat {
    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            DataFormat::Text => "text",
            DataFormat::Container => "container",
        }
    }
}

impl FromStr for DataFormat {
    type Err = BssError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(DataFormat::Text),
            "container" | "avro" => Ok(DataFormat::Container),
            other => Err(BssError::UnknownFormat {
                name: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for a segment data formatter.
///
/// ```
/// use bss_core::{DataFormat, OutputConfig};
///
/// let config: OutputConfig = serde_json::from_str(r#"{
///     "format": "text",
///     "line": { "sep3": ",", "segment_fields": ["SEG_ID", "VALUE"] }
/// }"#).unwrap();
/// assert_eq!(config.format, DataFormat::Text);
/// assert!(config.line_format().unwrap().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output encoding.
    pub format: DataFormat,
    /// Line layout; required for text output, ignored otherwise.
    pub line: Option<FormatConfig>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: DataFormat::Text,
            line: Some(FormatConfig::default()),
        }
    }
}

impl OutputConfig {
    /// Creates a text configuration with the given layout.
    #[must_use]
    pub fn text(line: FormatConfig) -> Self {
        Self {
            format: DataFormat::Text,
            line: Some(line),
        }
    }

    /// Creates a container configuration.
    #[must_use]
    pub fn container() -> Self {
        Self {
            format: DataFormat::Container,
            line: None,
        }
    }

    /// Sets the output encoding.
    #[must_use]
    pub fn with_format(mut self, format: DataFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the line layout.
    #[must_use]
    pub fn with_line(mut self, line: FormatConfig) -> Self {
        self.line = Some(line);
        self
    }

    /// Validates the line layout, if one is set.
    ///
    /// # Errors
    ///
    /// Returns `BssError::Config` if the layout is invalid.
    pub fn line_format(&self) -> BssResult<Option<LineFormat>> {
        self.line
            .as_ref()
            .map(FormatConfig::validate)
            .transpose()
            .map_err(BssError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bss_codec::ConfigError;

    #[test]
    fn default_is_minimal_text() {
        let config = OutputConfig::default();
        assert_eq!(config.format, DataFormat::Text);
        assert_eq!(config.line_format().unwrap(), Some(LineFormat::MINIMAL));
    }

    #[test]
    fn format_names() {
        assert_eq!("text".parse::<DataFormat>().unwrap(), DataFormat::Text);
        assert_eq!("avro".parse::<DataFormat>().unwrap(), DataFormat::Container);
        assert_eq!(DataFormat::Container.to_string(), "container");
        assert!(matches!(
            "csv".parse::<DataFormat>(),
            Err(BssError::UnknownFormat { name }) if name == "csv"
        ));
        assert_eq!(
            "csv".parse::<DataFormat>().unwrap_err().to_string(),
            "unknown data format: csv"
        );
    }

    #[test]
    fn deserialize_container_alias() {
        let config: OutputConfig = serde_json::from_str(r#"{"format":"avro","line":null}"#).unwrap();
        assert_eq!(config, OutputConfig::container());
    }

    #[test]
    fn unknown_segment_field_in_json() {
        let json = r#"{"format":"text","line":{"segment_fields":["SEG_ID","SEGMENT"]}}"#;
        let err = serde_json::from_str::<OutputConfig>(json).unwrap_err();
        assert!(
            err.to_string().contains("unknown segment field: SEGMENT"),
            "{err}"
        );
    }

    #[test]
    fn invalid_line_is_reported() {
        let config = OutputConfig::text(FormatConfig::new().with_fields(vec![]));
        assert!(matches!(
            config.line_format(),
            Err(BssError::Config(ConfigError::MissingIdentifier))
        ));
    }
}
