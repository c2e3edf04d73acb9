use crate::config::VisualizerConfig;
use bevy::prelude::*;
use std::path::Path;

/// UI font resource: the preferred font when usable, otherwise Bevy's
/// built-in default.
///
/// All UI text references `font.0.clone()`.  Created by [`load_ui_font`] at
/// startup.
#[derive(Resource, Default, Clone)]
pub struct UiFont(pub Handle<Font>);

/// True when the file at `path` exists and parses as a TrueType/OpenType font
/// (index 0 of a collection).
pub fn font_is_usable(path: &Path) -> bool {
    match std::fs::read(path) {
        Ok(bytes) => ttf_parser::Face::parse(&bytes, 0).is_ok(),
        Err(_) => false,
    }
}

/// Load the configured font from `assets/`, falling back to the default font.
///
/// Must run before any setup system that spawns text.
pub fn load_ui_font(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<VisualizerConfig>,
) {
    let on_disk = Path::new("assets").join(&config.font_path);
    let handle = if font_is_usable(&on_disk) {
        asset_server.load(config.font_path.clone())
    } else {
        debug!(
            "Font {} unavailable; using the default font",
            on_disk.display()
        );
        Handle::default()
    };
    commands.insert_resource(UiFont(handle));
}

/// Setup camera for 2D rendering
pub fn setup_camera(mut commands: Commands) {
    // Default Camera2d maps one world unit to one logical pixel, centered on
    // the window; see `transform::Canvas`.
    commands.spawn(Camera2d);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_font_is_unusable() {
        assert!(!font_is_usable(Path::new("assets/fonts/does-not-exist.ttf")));
    }

    #[test]
    fn non_font_file_is_unusable() {
        assert!(!font_is_usable(Path::new("Cargo.toml")));
    }
}
