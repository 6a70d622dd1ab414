use serde::{Deserialize, Serialize};

/// Base imagery of the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BaseLayer {
    #[default]
    Map,
    Satellite,
}

impl BaseLayer {
    /// Layer code understood by the static image provider
    pub fn code(&self) -> &'static str {
        match self {
            BaseLayer::Map => "map",
            BaseLayer::Satellite => "sat",
        }
    }
}

/// User-selected presentation options, independent of the viewport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DisplayOptions {
    pub base_layer: BaseLayer,
    /// Traffic jams overlay
    pub show_traffic: bool,
    /// Toponym labels overlay
    pub show_labels: bool,
    /// Append the postal code of the found place to the display text
    pub show_postal_code: bool,
}

impl DisplayOptions {
    /// Comma-separated layer list, base layer first
    pub fn layer_param(&self) -> String {
        let mut layers = vec![self.base_layer.code()];
        if self.show_traffic {
            layers.push("trf");
        }
        if self.show_labels {
            layers.push("skl");
        }
        layers.join(",")
    }
}
