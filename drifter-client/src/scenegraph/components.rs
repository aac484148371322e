use drifter_core::entity_location::EntityLocation;

// ---------- Components ---------- //

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: glam::Vec3,
    pub rotation: glam::Quat,
    pub scale: glam::Vec3,
}

impl Transform {
    pub fn from_entity_location(
        entity_location: &EntityLocation,
        entity_scale: glam::Vec3,
    ) -> Transform {
        let [x, y, z, w] = entity_location.rotation.to_array();
        let rotation = glam::Quat::from_xyzw(x as f32, y as f32, z as f32, w as f32);

        Transform {
            translation: entity_location.position.as_vec3(),
            rotation: rotation.normalize(),
            scale: entity_scale,
        }
    }

    pub fn to_mat4(&self) -> glam::Mat4 {
        glam::Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: glam::Vec3::ZERO,
            rotation: glam::Quat::IDENTITY,
            scale: glam::Vec3::ONE,
        }
    }
}
