//! Ground targets, either known ground truth or reported by a team.
//!
//! The `type` discriminant selects which descriptive fields a target
//! carries, so each variant of [`TargetKind`] holds only its own payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;
use crate::wire::{coerce_f64, wire_conversions, Fields, WireMap, WireRecord};

/// Discriminant drawn from the closed set of competition target types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    Standard,
    OffAxis,
    Emergent,
    Qrc,
}

impl TargetType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "standard" => Some(Self::Standard),
            "off_axis" => Some(Self::OffAxis),
            "emergent" => Some(Self::Emergent),
            "qrc" => Some(Self::Qrc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::OffAxis => "off_axis",
            Self::Emergent => "emergent",
            Self::Qrc => "qrc",
        }
    }
}

impl std::fmt::Display for TargetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual description of a shape target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Characteristics {
    pub orientation: String,
    pub shape: String,
    pub background_color: String,
    pub alphanumeric: String,
    pub alphanumeric_color: String,
}

impl Characteristics {
    pub fn new(
        orientation: impl Into<String>,
        shape: impl Into<String>,
        background_color: impl Into<String>,
        alphanumeric: impl Into<String>,
        alphanumeric_color: impl Into<String>,
    ) -> Self {
        Self {
            orientation: orientation.into(),
            shape: shape.into(),
            background_color: background_color.into(),
            alphanumeric: alphanumeric.into(),
            alphanumeric_color: alphanumeric_color.into(),
        }
    }

    fn from_fields(fields: &Fields<'_>) -> Result<Self, ValidationError> {
        Ok(Self {
            orientation: fields.string("orientation")?,
            shape: fields.string("shape")?,
            background_color: fields.string("background_color")?,
            alphanumeric: fields.string("alphanumeric")?,
            alphanumeric_color: fields.string("alphanumeric_color")?,
        })
    }

    fn write(&self, map: &mut WireMap) {
        map.insert("orientation".into(), self.orientation.clone().into());
        map.insert("shape".into(), self.shape.clone().into());
        map.insert("background_color".into(), self.background_color.clone().into());
        map.insert("alphanumeric".into(), self.alphanumeric.clone().into());
        map.insert("alphanumeric_color".into(), self.alphanumeric_color.clone().into());
    }
}

/// Type-specific payload of a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetKind {
    Standard(Characteristics),
    OffAxis(Characteristics),
    Emergent { description: String },
    Qrc { description: String },
}

impl TargetKind {
    pub fn target_type(&self) -> TargetType {
        match self {
            Self::Standard(_) => TargetType::Standard,
            Self::OffAxis(_) => TargetType::OffAxis,
            Self::Emergent { .. } => TargetType::Emergent,
            Self::Qrc { .. } => TargetType::Qrc,
        }
    }
}

/// A located target.
///
/// `id` and `user` are assigned by the server when a report is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct Target {
    pub id: Option<i64>,
    pub user: Option<i64>,
    pub latitude: f64,
    pub longitude: f64,
    pub kind: TargetKind,
    pub autonomous: Option<bool>,
}

impl Target {
    pub fn new(
        kind: TargetKind,
        latitude: impl Into<Value>,
        longitude: impl Into<Value>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: None,
            user: None,
            latitude: coerce_f64("latitude", &latitude.into())?,
            longitude: coerce_f64("longitude", &longitude.into())?,
            kind,
            autonomous: None,
        })
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_user(mut self, user: i64) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_autonomous(mut self, autonomous: bool) -> Self {
        self.autonomous = Some(autonomous);
        self
    }

    pub fn target_type(&self) -> TargetType {
        self.kind.target_type()
    }

    /// Whether the target was found autonomously. Defaults to false.
    pub fn is_autonomous(&self) -> bool {
        self.autonomous.unwrap_or(false)
    }

    pub fn characteristics(&self) -> Option<&Characteristics> {
        match &self.kind {
            TargetKind::Standard(c) | TargetKind::OffAxis(c) => Some(c),
            _ => None,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match &self.kind {
            TargetKind::Emergent { description } | TargetKind::Qrc { description } => {
                Some(description)
            }
            _ => None,
        }
    }
}

impl WireRecord for Target {
    const ENTITY: &'static str = "target";

    fn to_wire(&self) -> WireMap {
        let mut map = WireMap::new();
        if let Some(id) = self.id {
            map.insert("id".into(), id.into());
        }
        if let Some(user) = self.user {
            map.insert("user".into(), user.into());
        }
        map.insert("type".into(), self.target_type().as_str().into());
        map.insert("latitude".into(), self.latitude.into());
        map.insert("longitude".into(), self.longitude.into());
        match &self.kind {
            TargetKind::Standard(c) | TargetKind::OffAxis(c) => c.write(&mut map),
            TargetKind::Emergent { description } | TargetKind::Qrc { description } => {
                map.insert("description".into(), description.clone().into());
            }
        }
        if let Some(autonomous) = self.autonomous {
            map.insert("autonomous".into(), autonomous.into());
        }
        map
    }

    fn from_wire(value: &Value) -> Result<Self, ValidationError> {
        let fields = Fields::of(Self::ENTITY, value)?;
        let type_name = fields.string("type")?;
        let target_type =
            TargetType::parse(&type_name).ok_or(ValidationError::UnknownTargetType(type_name))?;
        let latitude = fields.f64("latitude")?;
        let longitude = fields.f64("longitude")?;

        let kind = match target_type {
            TargetType::Standard => TargetKind::Standard(Characteristics::from_fields(&fields)?),
            TargetType::OffAxis => TargetKind::OffAxis(Characteristics::from_fields(&fields)?),
            TargetType::Emergent => TargetKind::Emergent {
                description: fields.string("description")?,
            },
            TargetType::Qrc => TargetKind::Qrc {
                description: fields.string("description")?,
            },
        };

        Ok(Self {
            id: fields.opt_i64("id")?,
            user: fields.opt_i64("user")?,
            latitude,
            longitude,
            kind,
            autonomous: fields.opt_bool("autonomous")?,
        })
    }
}

wire_conversions!(Target);
