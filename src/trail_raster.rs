//! Persistent trail raster.
//!
//! The trail is painted segment by segment into a canvas-sized RGBA image that
//! is displayed behind everything else.  The image is only ever appended to or
//! cleared wholesale; the full trail history is never redrawn.
//!
//! [`sync_trail_raster_system`] compares the lifecycle's trail against what has
//! already been painted (tracked by run id and point count) and paints only
//! the missing segments.

use crate::config::VisualizerConfig;
use crate::lifecycle::Simulation;
use crate::transform::Canvas;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy_asset::RenderAssetUsages;

/// Trail stroke colour.
pub const TRAIL_COLOR: [u8; 4] = [0, 0, 255, 255];

/// Handle to the trail image plus bookkeeping of what it already contains.
#[derive(Resource, Debug, Clone, Default)]
pub struct TrailRaster {
    pub image: Handle<Image>,
    /// Run id of the trail currently painted.
    painted_run: u64,
    /// Number of trail points already covered by painted segments.
    painted_points: usize,
}

impl TrailRaster {
    /// Bookkeeping for a freshly created, empty trail image.
    pub fn new(image: Handle<Image>) -> Self {
        Self {
            image,
            painted_run: 0,
            painted_points: 0,
        }
    }
}

/// Marker for the sprite displaying the trail raster.
#[derive(Component)]
pub struct TrailSprite;

/// A borrowed RGBA8 pixel buffer with row 0 at the top of the canvas.
pub struct PixelBuffer<'a> {
    pub data: &'a mut [u8],
    pub width: usize,
    pub height: usize,
}

impl PixelBuffer<'_> {
    /// Set every pixel to transparent.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    fn put(&mut self, x: isize, y: isize, color: [u8; 4]) {
        if x >= 0 && x < self.width as isize && y >= 0 && y < self.height as isize {
            let offset = (y as usize * self.width + x as usize) * 4;
            self.data[offset..offset + 4].copy_from_slice(&color);
        }
    }

    /// Draw a segment between two screen points using Bresenham's algorithm,
    /// stamping a square brush of side `width` at every step.
    ///
    /// Pixels outside the buffer are skipped.
    pub fn draw_segment(&mut self, from: Vec2, to: Vec2, width: f32, color: [u8; 4]) {
        let (mut x0, mut y0, x1, y1) = (
            from.x.round() as isize,
            from.y.round() as isize,
            to.x.round() as isize,
            to.y.round() as isize,
        );
        let brush = width.round().max(1.0) as isize;
        let lo = -(brush - 1) / 2;
        let hi = lo + brush;

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            for oy in lo..hi {
                for ox in lo..hi {
                    self.put(x0 + ox, y0 + oy, color);
                }
            }

            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }
}

/// Build a transparent canvas-sized image for the trail.
pub fn new_trail_image(canvas: &Canvas) -> Image {
    Image::new_fill(
        Extent3d {
            width: canvas.width as u32,
            height: canvas.height as u32,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        &[0, 0, 0, 0],
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    )
}

/// Startup system: create the trail image and the sprite that shows it.
pub fn setup_trail_raster(mut commands: Commands, mut images: ResMut<Assets<Image>>) {
    let handle = images.add(new_trail_image(&Canvas::default()));
    commands.spawn((
        Sprite::from_image(handle.clone()),
        Transform::from_translation(Vec3::new(0.0, 0.0, 0.0)),
        TrailSprite,
    ));
    commands.insert_resource(TrailRaster::new(handle));
}

/// Bring `buffer` up to date with `trail_points` of run `run_id`.
///
/// A new run id clears the buffer first.  Returns whether any pixel changed.
pub fn paint_trail(
    raster: &mut TrailRaster,
    buffer: &mut PixelBuffer<'_>,
    run_id: u64,
    trail_points: &[Vec2],
    width: f32,
) -> bool {
    let mut changed = false;
    if raster.painted_run != run_id || trail_points.len() < raster.painted_points {
        buffer.clear();
        raster.painted_run = run_id;
        raster.painted_points = 0;
        changed = true;
    }
    let first = raster.painted_points.max(1);
    for i in first..trail_points.len() {
        buffer.draw_segment(trail_points[i - 1], trail_points[i], width, TRAIL_COLOR);
        changed = true;
    }
    raster.painted_points = trail_points.len();
    changed
}

/// Paint newly appended trail segments into the trail image; clear it when a
/// new run starts or the simulation is reset.
pub fn sync_trail_raster_system(
    mut raster: ResMut<TrailRaster>,
    mut images: ResMut<Assets<Image>>,
    sim: Res<Simulation>,
    config: Res<VisualizerConfig>,
) {
    let trail = sim.trail();
    if raster.painted_run == sim.run_id() && raster.painted_points == trail.len() {
        return;
    }
    let handle = raster.image.clone();
    let Some(image) = images.get_mut(&handle) else {
        return;
    };
    let width = image.width() as usize;
    let height = image.height() as usize;
    let Some(data) = image.data.as_mut() else {
        return;
    };
    let mut buffer = PixelBuffer {
        data: data.as_mut_slice(),
        width,
        height,
    };
    paint_trail(
        &mut raster,
        &mut buffer,
        sim.run_id(),
        trail.points(),
        config.trail_width,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(data: &[u8], width: usize, x: usize, y: usize) -> [u8; 4] {
        let o = (y * width + x) * 4;
        [data[o], data[o + 1], data[o + 2], data[o + 3]]
    }

    #[test]
    fn horizontal_segment_covers_every_column() {
        let mut data = vec![0u8; 20 * 10 * 4];
        let mut buf = PixelBuffer {
            data: &mut data,
            width: 20,
            height: 10,
        };
        buf.draw_segment(Vec2::new(2.0, 5.0), Vec2::new(12.0, 5.0), 1.0, TRAIL_COLOR);
        for x in 2..=12 {
            assert_eq!(pixel(&data, 20, x, 5), TRAIL_COLOR, "x = {x}");
        }
        assert_eq!(pixel(&data, 20, 13, 5), [0, 0, 0, 0]);
        assert_eq!(pixel(&data, 20, 7, 4), [0, 0, 0, 0]);
    }

    #[test]
    fn two_pixel_brush_thickens_the_line() {
        let mut data = vec![0u8; 10 * 10 * 4];
        let mut buf = PixelBuffer {
            data: &mut data,
            width: 10,
            height: 10,
        };
        buf.draw_segment(Vec2::new(1.0, 5.0), Vec2::new(8.0, 5.0), 2.0, TRAIL_COLOR);
        assert_eq!(pixel(&data, 10, 4, 5), TRAIL_COLOR);
        assert_eq!(pixel(&data, 10, 4, 6), TRAIL_COLOR);
        assert_eq!(pixel(&data, 10, 4, 4), [0, 0, 0, 0]);
    }

    #[test]
    fn out_of_bounds_segment_is_clipped() {
        let mut data = vec![0u8; 4 * 4 * 4];
        let mut buf = PixelBuffer {
            data: &mut data,
            width: 4,
            height: 4,
        };
        buf.draw_segment(Vec2::new(-10.0, -10.0), Vec2::new(10.0, 10.0), 2.0, TRAIL_COLOR);
        assert_eq!(pixel(&data, 4, 2, 2), TRAIL_COLOR);
    }

    #[test]
    fn paint_trail_only_paints_new_segments_and_clears_on_new_run() {
        let mut raster = TrailRaster::default();
        let mut data = vec![0u8; 30 * 30 * 4];
        let points = [Vec2::new(1.0, 1.0), Vec2::new(10.0, 1.0), Vec2::new(10.0, 10.0)];

        {
            let mut buf = PixelBuffer {
                data: &mut data,
                width: 30,
                height: 30,
            };
            assert!(paint_trail(&mut raster, &mut buf, 1, &points[..1], 1.0));
            assert!(paint_trail(&mut raster, &mut buf, 1, &points, 1.0));
            assert!(!paint_trail(&mut raster, &mut buf, 1, &points, 1.0));
        }
        assert_eq!(pixel(&data, 30, 5, 1), TRAIL_COLOR);
        assert_eq!(pixel(&data, 30, 10, 5), TRAIL_COLOR);

        {
            let mut buf = PixelBuffer {
                data: &mut data,
                width: 30,
                height: 30,
            };
            assert!(paint_trail(&mut raster, &mut buf, 2, &[], 1.0));
        }
        assert!(data.iter().all(|&b| b == 0));
    }
}
