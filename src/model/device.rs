use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl DeviceType {
    /// Folds the caller's viewport/user-agent heuristics into a device class.
    /// Tablets are never treated as phones even when the mobile heuristic fires.
    pub fn classify(is_mobile: bool, is_tablet: bool) -> DeviceType {
        match (is_mobile, is_tablet) {
            (_, true) => DeviceType::Tablet,
            (true, false) => DeviceType::Mobile,
            (false, false) => DeviceType::Desktop,
        }
    }

    pub fn is_phone(&self) -> bool {
        matches!(self, DeviceType::Mobile)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    Polygon,
    Cloud,
    Jagged,
}
