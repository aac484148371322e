use drifter_core::physics_object::{checked_normalize, LOCAL_FORWARD};
use drifter_core::tuning::ChaseCameraConfig;
use glam::DVec3;
use tracing::warn;

/// Where the camera sits and what it looks at, in world space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CameraTransform {
    pub position: DVec3,
    pub target: DVec3,
}

impl CameraTransform {
    pub fn view_mat4(&self) -> glam::Mat4 {
        glam::Mat4::look_at_rh(
            self.position.as_vec3(),
            self.target.as_vec3(),
            glam::Vec3::Y,
        )
    }
}

/*
 * Trails the player: sits `distance_behind` back along the player's forward
 * direction and `height_above` up, and looks at a point a little above the
 * player so the view never tips nose-down into the ground.
 */
pub struct ChaseCamera {
    config: ChaseCameraConfig,
    position: Option<DVec3>, // None until the first update, which always snaps
    last_forward: DVec3,
}

impl ChaseCamera {
    pub fn new(config: ChaseCameraConfig) -> ChaseCamera {
        ChaseCamera {
            config,
            position: None,
            last_forward: LOCAL_FORWARD,
        }
    }

    pub fn position(&self) -> Option<DVec3> {
        self.position
    }

    /// Forget the current position; the next update snaps to the ideal one.
    pub fn reset(&mut self) {
        self.position = None;
    }

    pub fn ideal_position(&self, player_position: DVec3, forward: DVec3) -> DVec3 {
        player_position - forward * self.config.distance_behind()
            + DVec3::new(0.0, self.config.height_above(), 0.0)
    }

    pub fn update(&mut self, player_position: DVec3, forward: DVec3) -> CameraTransform {
        let forward = match checked_normalize(forward) {
            Some(unit_forward) => {
                self.last_forward = unit_forward;
                unit_forward
            }
            None => {
                warn!(?forward, "degenerate forward direction, keeping the previous one");
                self.last_forward
            }
        };

        let ideal_position = self.ideal_position(player_position, forward);
        let smoothing = self.config.smoothing();

        let position = match self.position {
            Some(previous) if smoothing > 0.0 && previous.is_finite() => {
                previous.lerp(ideal_position, 1.0 - smoothing)
            }
            _ => ideal_position,
        };
        self.position = Some(position);

        CameraTransform {
            position,
            target: player_position + DVec3::new(0.0, self.config.look_height(), 0.0),
        }
    }
}
