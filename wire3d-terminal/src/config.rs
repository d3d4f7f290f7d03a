/// Scene configuration, fixed before a run begins
use serde::{Deserialize, Serialize};

/// Configuration for a terminal scene. All values are plain assignments
/// accepted before [`crate::SceneApp::run`] is invoked, not during.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Viewport size in terminal cells; `None` uses the terminal size.
    #[serde(default)]
    pub width: Option<u16>,
    #[serde(default)]
    pub height: Option<u16>,
    /// Initial camera position in world coordinates.
    #[serde(default)]
    pub viewpoint: [f64; 3],
    /// Initial camera rotation (pitch, yaw) in radians.
    #[serde(default)]
    pub rotation: [f64; 2],
    #[serde(default = "default_title")]
    pub title: String,
    /// Near clipping plane distance.
    #[serde(default = "default_clip_distance")]
    pub clip_distance: f64,
    /// Background colour as an RGB triplet.
    #[serde(default = "default_background")]
    pub background: [u8; 3],
    /// Horizontal field of view in radians.
    #[serde(default = "default_fov")]
    pub fov: f64,
}

fn default_title() -> String {
    "wire3d".into()
}

fn default_clip_distance() -> f64 {
    1.0
}

fn default_background() -> [u8; 3] {
    [128, 128, 255]
}

fn default_fov() -> f64 {
    std::f64::consts::FRAC_PI_2
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            viewpoint: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0],
            title: default_title(),
            clip_distance: default_clip_distance(),
            background: default_background(),
            fov: default_fov(),
        }
    }
}

impl SceneConfig {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_yields_defaults() {
        let config = SceneConfig::from_json("{}").unwrap();
        assert_eq!(config.clip_distance, 1.0);
        assert_eq!(config.background, [128, 128, 255]);
        assert_eq!(config.width, None);
    }

    #[test]
    fn fields_override_defaults() {
        let config = SceneConfig::from_json(
            r#"{"width": 120, "height": 40, "viewpoint": [0.0, -30.0, -30.0], "title": "Orbit"}"#,
        )
        .unwrap();
        assert_eq!(config.width, Some(120));
        assert_eq!(config.viewpoint[1], -30.0);
        assert_eq!(config.title, "Orbit");
    }
}
