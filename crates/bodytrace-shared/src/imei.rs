//! Device identifiers
//!
//! The backend is trusted to send well formed IMEIs so [`Imei`] values
//! received over the wire are not validated. Text typed in by a user goes
//! through [`Imei::parse`].

use std::fmt::Display;

use egui::WidgetText;

use crate::errors::ConversionError;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Imei(String);

impl Imei {
    pub const MAX_LENGTH: usize = 32;

    pub fn parse(value: &str) -> Result<Self, ConversionError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ConversionError::Empty);
        }
        if value.len() > Self::MAX_LENGTH {
            return Err(ConversionError::MaxExceeded {
                max: Self::MAX_LENGTH,
                actual: value.len(),
            });
        }
        if let Some(c) = value.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(ConversionError::InvalidCharacter(c));
        }
        Ok(Self(value.to_string()))
    }

    /// Splits a comma separated list as entered on the user forms
    pub fn parse_list(value: &str) -> Result<Vec<Self>, ConversionError> {
        value
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(Self::parse)
            .collect()
    }
}

impl AsRef<str> for Imei {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Imei {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&Imei> for WidgetText {
    fn from(value: &Imei) -> Self {
        (&value.0).into()
    }
}

/// The IMEI(s) attached to a session or a user record
///
/// The backend sends `null`, a single string or a list depending on the
/// account so all three shapes are accepted. An empty string is treated as no
/// device.
#[derive(Debug, Default, serde::Serialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum ImeiSelection {
    #[default]
    None,
    One(Imei),
    Many(Vec<Imei>),
}

impl ImeiSelection {
    pub fn as_slice(&self) -> &[Imei] {
        match self {
            ImeiSelection::None => &[],
            ImeiSelection::One(imei) => std::slice::from_ref(imei),
            ImeiSelection::Many(imeis) => imeis,
        }
    }

    pub fn first(&self) -> Option<&Imei> {
        self.as_slice().first()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn to_vec(&self) -> Vec<Imei> {
        self.as_slice().to_vec()
    }

    /// Comma separated for display and for prefilling edit forms
    pub fn joined(&self) -> String {
        self.as_slice()
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl From<Vec<Imei>> for ImeiSelection {
    fn from(mut value: Vec<Imei>) -> Self {
        match value.len() {
            0 => Self::None,
            1 => Self::One(value.remove(0)),
            _ => Self::Many(value),
        }
    }
}

impl From<Option<Imei>> for ImeiSelection {
    fn from(value: Option<Imei>) -> Self {
        value.map_or(Self::None, Self::One)
    }
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum ImeiSelectionWire {
    One(String),
    Many(Vec<String>),
}

impl<'de> serde::Deserialize<'de> for ImeiSelection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let wire: Option<ImeiSelectionWire> = serde::Deserialize::deserialize(deserializer)?;
        let imeis: Vec<Imei> = match wire {
            None => vec![],
            Some(ImeiSelectionWire::One(value)) => vec![Imei(value)],
            Some(ImeiSelectionWire::Many(values)) => values.into_iter().map(Imei).collect(),
        };
        Ok(imeis
            .into_iter()
            .filter(|imei| !imei.0.trim().is_empty())
            .collect::<Vec<_>>()
            .into())
    }
}
