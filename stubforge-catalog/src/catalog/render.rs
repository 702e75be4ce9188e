//! The `[render]` section.

use serde::Deserialize;

/// Output formatting preferences read from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RenderSettings {
    pub indent: IndentSetting,
    pub brace_style: BraceStyleSetting,
    pub blank_line_between_members: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            indent: IndentSetting::Spaces(4),
            brace_style: BraceStyleSetting::OwnLine,
            blank_line_between_members: true,
        }
    }
}

/// `indent = 2 | 4 | 8 | "tab"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawIndent")]
pub enum IndentSetting {
    Spaces(u8),
    Tab,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawIndent {
    Width(i64),
    Keyword(String),
}

impl TryFrom<RawIndent> for IndentSetting {
    type Error = String;

    fn try_from(raw: RawIndent) -> Result<Self, Self::Error> {
        match raw {
            RawIndent::Width(width @ (2 | 4 | 8)) => Ok(Self::Spaces(width as u8)),
            RawIndent::Keyword(keyword) if keyword == "tab" => Ok(Self::Tab),
            RawIndent::Width(width) => Err(format!(
                "indent must be 2, 4, 8 or \"tab\", found {}",
                width
            )),
            RawIndent::Keyword(keyword) => Err(format!(
                "indent must be 2, 4, 8 or \"tab\", found \"{}\"",
                keyword
            )),
        }
    }
}

/// Where the opening brace of a block goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BraceStyleSetting {
    /// Opening brace on its own line (Allman).
    #[default]
    OwnLine,
    /// Opening brace at the end of the header line.
    SameLine,
}
