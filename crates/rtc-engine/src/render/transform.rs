//! Model/view/projection math for the spinning cube.

use std::f32::consts::TAU;

use glam::{Mat4, Vec3};

/// Fixed camera looking down -Z at the origin from `distance` units away.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    /// Vertical field of view, degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub distance: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
            distance: 3.0,
        }
    }
}

impl Camera {
    pub fn view(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, -self.distance))
    }

    /// Perspective projection with wgpu's 0..1 depth range.
    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), aspect, self.near, self.far)
    }
}

/// Constant-rate rotation about a fixed axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Spin {
    axis: Vec3,
    /// Radians per second.
    pub speed: f32,
    /// Current angle in radians, kept in `[0, TAU)`.
    angle: f32,
}

impl Spin {
    /// A zero-length axis falls back to +Y.
    pub fn new(axis: Vec3, speed: f32) -> Self {
        Self {
            axis: axis.try_normalize().unwrap_or(Vec3::Y),
            speed,
            angle: 0.0,
        }
    }

    pub fn axis(&self) -> Vec3 {
        self.axis
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Advances by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.angle = (self.angle + self.speed * dt).rem_euclid(TAU);
    }

    pub fn model(&self) -> Mat4 {
        Mat4::from_axis_angle(self.axis, self.angle)
    }
}

impl Default for Spin {
    fn default() -> Self {
        Self::new(Vec3::new(0.5, 1.0, 0.0), 1.0)
    }
}

/// Per-frame matrices; `mvp = projection * view * model`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transforms {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    pub mvp: Mat4,
}

impl Default for Transforms {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            mvp: Mat4::IDENTITY,
        }
    }
}

impl Transforms {
    pub fn compute(spin: &Spin, camera: &Camera, aspect: f32) -> Self {
        let model = spin.model();
        let view = camera.view();
        let projection = camera.projection(aspect);
        Self {
            model,
            view,
            projection,
            mvp: projection * view * model,
        }
    }
}

/// GPU layout of the transform uniform.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct MvpUniform {
    pub mvp: [[f32; 4]; 4],
}

impl From<&Transforms> for MvpUniform {
    fn from(t: &Transforms) -> Self {
        Self {
            mvp: t.mvp.to_cols_array_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn close(a: Vec4, b: Vec4) -> bool {
        (a - b).abs().max_element() < 1e-4
    }

    #[test]
    fn spin_starts_at_identity() {
        let spin = Spin::default();
        assert_eq!(spin.model(), Mat4::IDENTITY);
    }

    #[test]
    fn spin_axis_is_normalized() {
        let spin = Spin::default();
        assert!((spin.axis().length() - 1.0).abs() < 1e-6);
        assert_eq!(Spin::new(Vec3::ZERO, 1.0).axis(), Vec3::Y);
    }

    #[test]
    fn spin_angle_tracks_elapsed_time_and_wraps() {
        let mut spin = Spin::default();
        spin.advance(1.5);
        assert!((spin.angle() - 1.5).abs() < 1e-6);

        spin.advance(TAU);
        assert!((spin.angle() - 1.5).abs() < 1e-4);
        assert!(spin.angle() < TAU);
    }

    #[test]
    fn negative_speed_stays_in_range() {
        let mut spin = Spin::new(Vec3::Y, -2.0);
        spin.advance(1.0);
        assert!((0.0..TAU).contains(&spin.angle()));
    }

    #[test]
    fn cube_center_lands_mid_depth_range() {
        let t = Transforms::compute(&Spin::default(), &Camera::default(), 1.0);
        let clip = t.mvp * Vec4::new(0.0, 0.0, 0.0, 1.0);

        assert!(clip.x.abs() < 1e-5 && clip.y.abs() < 1e-5);
        // Right-handed perspective: w is the view-space distance.
        assert!((clip.w - 3.0).abs() < 1e-5);
        let ndc_z = clip.z / clip.w;
        assert!((0.0..1.0).contains(&ndc_z));
    }

    #[test]
    fn wider_aspect_squeezes_x() {
        let camera = Camera::default();
        let square = camera.projection(1.0);
        let wide = camera.projection(2.0);
        assert!((wide.x_axis.x * 2.0 - square.x_axis.x).abs() < 1e-5);
        assert_eq!(wide.y_axis.y, square.y_axis.y);
    }

    #[test]
    fn mvp_is_product_in_order() {
        let mut spin = Spin::default();
        spin.advance(0.7);
        let t = Transforms::compute(&spin, &Camera::default(), 16.0 / 9.0);

        let p = Vec4::new(0.5, -0.5, 0.5, 1.0);
        let expected = t.projection * (t.view * (t.model * p));
        assert!(close(t.mvp * p, expected));
    }

    #[test]
    fn uniform_is_column_major() {
        let t = Transforms {
            mvp: Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)),
            ..Default::default()
        };
        let u = MvpUniform::from(&t);
        assert_eq!(u.mvp[3], [1.0, 2.0, 3.0, 1.0]);
    }
}
