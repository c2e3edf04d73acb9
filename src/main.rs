use bevy::prelude::*;
use bevy::window::WindowResolution;
use parabola::constants::{CANVAS_HEIGHT, CANVAS_WIDTH, WINDOW_TITLE};
use parabola::VisualizerPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: WINDOW_TITLE.into(),
                resolution: WindowResolution::new(CANVAS_WIDTH as u32, CANVAS_HEIGHT as u32),
                resizable: false,
                ..Default::default()
            }),
            ..Default::default()
        }))
        .add_plugins(VisualizerPlugin)
        .run();
}
