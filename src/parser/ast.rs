// Entry model produced by the parser

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Category of a declaration, taken from its `type:` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    Error,
    AppId,
}

impl EntryType {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryType::Error => "error",
            EntryType::AppId => "app_id",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `type:` value outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown entry type '{0}'")]
pub struct UnknownEntryType(pub String);

impl FromStr for EntryType {
    type Err = UnknownEntryType;

    /// Exact, case-sensitive match on `"error"` or `"app_id"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(EntryType::Error),
            "app_id" => Ok(EntryType::AppId),
            other => Err(UnknownEntryType(other.to_string())),
        }
    }
}

/// One successfully parsed `enumeration ... ;` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumEntry {
    /// Declaration slot number following the `enumeration` keyword.
    pub enum_id: u16,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub title: String,
    /// Registry id from the `id:` field.
    pub id: u32,
}

impl EnumEntry {
    pub fn new(enum_id: u16, entry_type: EntryType, title: impl Into<String>, id: u32) -> Self {
        Self {
            enum_id,
            entry_type,
            title: title.into(),
            id,
        }
    }
}

impl fmt::Display for EnumEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Enumeration {}:", self.enum_id)?;
        writeln!(f, "  type: '{}'", self.entry_type)?;
        writeln!(f, "  title: '{}'", self.title)?;
        write!(f, "  id: {}", self.id)
    }
}
