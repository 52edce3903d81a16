/// Animated 3D overlay scene
///
/// Draws the three decorative models (cube, sphere, cylinder) over the
/// captured photo. The "3D" is cosmetic: model-space points are rotated
/// with cgmath, run through a single perspective divide, and painted
/// back-to-front onto an iced canvas. No attempt is made to register the
/// models against the scene in the photo.

use std::f32::consts::TAU;

use cgmath::{Deg, Matrix3, Vector3};
use iced::widget::canvas::{self, Path};
use iced::{Color, Point, Rectangle};

use crate::state::transform::TransformParams;
use crate::Message;

/// Per-model multipliers applied on top of the user scale
pub const CUBE_SCALE: f32 = 1.0;
pub const SPHERE_SCALE: f32 = 0.8;
pub const CYLINDER_SCALE: f32 = 0.6;

/// Cube: full turn every 10 seconds, plus a slower second axis
const CUBE_SPIN_DEG_PER_SEC: f32 = 36.0;
const CUBE_TILT_DEG_PER_SEC: f32 = 23.0;
/// Cylinder: full tumble every 3 seconds
const CYLINDER_SPIN_DEG_PER_SEC: f32 = 120.0;
/// Sphere: one bob cycle every 2 seconds
pub const SPHERE_BOB_PERIOD: f32 = 2.0;
pub const SPHERE_BOB_AMPLITUDE: f32 = 0.5;

/// Model positions in world units (cube sits at the origin)
const SPHERE_X: f32 = 1.8;
const CYLINDER_X: f32 = -1.8;

/// Camera distance for the perspective divide, in world units
const FOCAL: f32 = 4.0;

const CYLINDER_RADIUS: f32 = 0.5;
const CYLINDER_HALF_HEIGHT: f32 = 0.5;
const CYLINDER_SEGMENTS: usize = 24;

/// Cube faces as corner indices plus their indigo shade.
/// Corner layout: 0..3 front face (z = +0.5) counter-clockwise from
/// bottom-left, 4..7 the matching back corners.
const CUBE_FACES: [([usize; 4], [u8; 3]); 6] = [
    ([0, 1, 2, 3], [99, 102, 241]),  // front
    ([5, 4, 7, 6], [79, 70, 229]),   // back
    ([1, 5, 6, 2], [129, 140, 248]), // right
    ([4, 0, 3, 7], [67, 56, 202]),   // left
    ([3, 2, 6, 7], [165, 180, 252]), // top
    ([4, 5, 1, 0], [55, 48, 163]),   // bottom
];

/// The canvas program layered over the captured photo
#[derive(Debug, Clone)]
pub struct OverlayScene {
    pub transform: TransformParams,
    /// Seconds since the app started; drives the looping animations
    pub clock: f32,
}

impl canvas::Program<Message> for OverlayScene {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: iced::mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        if bounds.width < 1.0 || bounds.height < 1.0 {
            return vec![frame.into_geometry()];
        }

        let center = Point::new(bounds.width / 2.0, bounds.height / 2.0);
        let unit = bounds.height / 5.0;
        let [cube_scale, sphere_scale, cylinder_scale] = object_scales(self.transform.scale);

        draw_cylinder(
            &mut frame,
            center,
            unit,
            cylinder_scale,
            self.clock * CYLINDER_SPIN_DEG_PER_SEC,
        );
        draw_sphere(&mut frame, center, unit, sphere_scale, self.clock);

        // The user rotation applies to the cube only, on top of its spin
        let yaw = self.transform.rotation + self.clock * CUBE_SPIN_DEG_PER_SEC;
        let tilt = self.clock * CUBE_TILT_DEG_PER_SEC;
        draw_cube(&mut frame, center, unit, cube_scale, yaw, tilt);

        vec![frame.into_geometry()]
    }
}

/// Effective scale of [cube, sphere, cylinder] for a given user scale
pub fn object_scales(scale: f32) -> [f32; 3] {
    [
        scale * CUBE_SCALE,
        scale * SPHERE_SCALE,
        scale * CYLINDER_SCALE,
    ]
}

/// Vertical world-space offset of the bobbing sphere at a given time
pub fn bob_offset(clock: f32) -> f32 {
    (clock * TAU / SPHERE_BOB_PERIOD).sin() * SPHERE_BOB_AMPLITUDE
}

/// Face indices ordered farthest-first for the painter's algorithm
pub fn depth_order(depths: &[f32]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..depths.len()).collect();
    order.sort_by(|&a, &b| depths[a].total_cmp(&depths[b]));
    order
}

/// Points of a horizontal circle at height `y`, counter-clockwise
pub fn circle_points(y: f32, radius: f32, segments: usize) -> Vec<Vector3<f32>> {
    (0..segments)
        .map(|i| {
            let angle = i as f32 * TAU / segments as f32;
            Vector3::new(angle.cos() * radius, y, angle.sin() * radius)
        })
        .collect()
}

/// Perspective-project a world-space point onto the canvas.
/// Positive z is toward the viewer; y points up.
fn project(v: Vector3<f32>, center: Point, unit: f32) -> Point {
    let depth = FOCAL / (FOCAL - v.z).max(0.5);
    Point::new(center.x + v.x * unit * depth, center.y - v.y * unit * depth)
}

fn fill_polygon(frame: &mut canvas::Frame, points: &[Point], color: Color) {
    if points.len() < 3 {
        return;
    }
    let path = Path::new(|builder| {
        builder.move_to(points[0]);
        for &point in &points[1..] {
            builder.line_to(point);
        }
        builder.close();
    });
    frame.fill(&path, color);
}

fn cube_corners() -> [Vector3<f32>; 8] {
    let h = 0.5;
    [
        Vector3::new(-h, -h, h),
        Vector3::new(h, -h, h),
        Vector3::new(h, h, h),
        Vector3::new(-h, h, h),
        Vector3::new(-h, -h, -h),
        Vector3::new(h, -h, -h),
        Vector3::new(h, h, -h),
        Vector3::new(-h, h, -h),
    ]
}

fn draw_cube(
    frame: &mut canvas::Frame,
    center: Point,
    unit: f32,
    scale: f32,
    yaw_deg: f32,
    tilt_deg: f32,
) {
    let rotation = Matrix3::from_angle_y(Deg(yaw_deg)) * Matrix3::from_angle_x(Deg(tilt_deg));
    let corners = cube_corners().map(|corner| rotation * (corner * scale));

    let depths: Vec<f32> = CUBE_FACES
        .iter()
        .map(|(indices, _)| indices.iter().map(|&i| corners[i].z).sum::<f32>() / 4.0)
        .collect();

    for face in depth_order(&depths) {
        let (indices, rgb) = CUBE_FACES[face];
        let points: Vec<Point> = indices
            .iter()
            .map(|&i| project(corners[i], center, unit))
            .collect();
        fill_polygon(frame, &points, Color::from_rgb8(rgb[0], rgb[1], rgb[2]));
    }
}

fn draw_sphere(frame: &mut canvas::Frame, center: Point, unit: f32, scale: f32, clock: f32) {
    let world = Vector3::new(SPHERE_X, bob_offset(clock), 0.0);
    let screen = project(world, center, unit);
    let radius = 0.5 * scale * unit;

    frame.fill(&Path::circle(screen, radius), Color::from_rgb8(236, 72, 153));

    // Off-center highlight to fake a lit ball
    let highlight = Point::new(screen.x - radius * 0.35, screen.y - radius * 0.35);
    frame.fill(
        &Path::circle(highlight, radius * 0.4),
        Color::from_rgba8(249, 168, 212, 0.7),
    );
}

fn draw_cylinder(frame: &mut canvas::Frame, center: Point, unit: f32, scale: f32, spin_deg: f32) {
    let rotation = Matrix3::from_angle_x(Deg(spin_deg));
    let offset = Vector3::new(CYLINDER_X, 0.0, 0.0);

    let place = |p: &Vector3<f32>| rotation * (*p * scale) + offset;
    let top: Vec<Vector3<f32>> = circle_points(CYLINDER_HALF_HEIGHT, CYLINDER_RADIUS, CYLINDER_SEGMENTS)
        .iter()
        .map(place)
        .collect();
    let bottom: Vec<Vector3<f32>> =
        circle_points(-CYLINDER_HALF_HEIGHT, CYLINDER_RADIUS, CYLINDER_SEGMENTS)
            .iter()
            .map(place)
            .collect();

    // Body: top ring forward, bottom ring back, as one filled polygon
    let mut silhouette: Vec<Point> = top.iter().map(|&p| project(p, center, unit)).collect();
    silhouette.extend(bottom.iter().rev().map(|&p| project(p, center, unit)));
    fill_polygon(frame, &silhouette, Color::from_rgb8(16, 185, 129));

    // Paint whichever cap is tilted toward the viewer
    let top_depth = top.iter().map(|p| p.z).sum::<f32>() / top.len() as f32;
    let bottom_depth = bottom.iter().map(|p| p.z).sum::<f32>() / bottom.len() as f32;
    let (cap, color) = if top_depth >= bottom_depth {
        (&top, Color::from_rgb8(110, 231, 183))
    } else {
        (&bottom, Color::from_rgb8(4, 120, 87))
    };
    let cap_points: Vec<Point> = cap.iter().map(|&p| project(p, center, unit)).collect();
    fill_polygon(frame, &cap_points, color);
}
