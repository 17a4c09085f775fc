use bevy::prelude::*;
use bevy::render::camera::ScalingMode;
use bevy::window::PrimaryWindow;

use constants::stage::{CAMERA_Z, DEFAULT_ASPECT, FRUSTUM_HEIGHT};

/// Fixed orthographic stage camera. The frustum height never changes;
/// the aspect follows the primary window so NDC/world mapping stays in
/// step with what is rendered.
#[derive(Resource)]
pub struct StageCamera {
    pub frustum_height: f32,
    pub aspect: f32,
}

impl Default for StageCamera {
    fn default() -> Self {
        Self {
            frustum_height: FRUSTUM_HEIGHT,
            aspect: DEFAULT_ASPECT,
        }
    }
}

impl StageCamera {
    pub fn half_height(&self) -> f32 {
        self.frustum_height * 0.5
    }

    pub fn half_width(&self) -> f32 {
        self.frustum_height * self.aspect * 0.5
    }

    /// Map mirrored NDC coordinates onto the z=0 stage plane.
    pub fn ndc_to_world(&self, ndc: Vec2) -> Vec3 {
        Vec3::new(ndc.x * self.half_width(), ndc.y * self.half_height(), 0.0)
    }

    /// Ray through the given NDC point: orthographic, so the origin sits
    /// on the camera plane and every ray looks straight down -Z.
    pub fn stage_ray(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let origin = Vec3::new(
            ndc.x * self.half_width(),
            ndc.y * self.half_height(),
            CAMERA_Z,
        );
        (origin, Vec3::NEG_Z)
    }
}

pub fn spawn_stage_camera(commands: &mut Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(OrthographicProjection {
            scaling_mode: ScalingMode::FixedVertical {
                viewport_height: FRUSTUM_HEIGHT,
            },
            ..OrthographicProjection::default_3d()
        }),
        Transform::from_xyz(0.0, 0.0, CAMERA_Z).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Keep the NDC mapping in step with window resizes.
pub fn update_stage_aspect(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut camera: ResMut<StageCamera>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    if window.height() > 0.0 {
        camera.aspect = window.width() / window.height();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ndc_to_world_spans_frustum() {
        let camera = StageCamera {
            frustum_height: 6.0,
            aspect: 2.0,
        };
        let corner = camera.ndc_to_world(Vec2::new(1.0, 1.0));
        assert!((corner.x - 6.0).abs() < 1e-6);
        assert!((corner.y - 3.0).abs() < 1e-6);
        assert_eq!(corner.z, 0.0);

        let centre = camera.ndc_to_world(Vec2::ZERO);
        assert_eq!(centre, Vec3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_stage_ray_points_into_scene() {
        let camera = StageCamera::default();
        let (origin, dir) = camera.stage_ray(Vec2::new(0.5, -0.5));
        assert_eq!(origin.z, CAMERA_Z);
        assert_eq!(dir, Vec3::NEG_Z);
    }
}
