//! Particle sprites. A pool of plain sprites grows to the largest live
//! population seen; spare slots are hidden rather than despawned.

use bevy::prelude::*;

use super::SceneEntity;
use crate::particles::kinds::behavior;
use crate::shared::*;

#[derive(Component, Debug, Clone, Copy)]
pub struct ParticleSprite {
    pub slot: usize,
}

pub fn sync_particle_sprites(
    mut commands: Commands,
    render_state: Res<RenderState>,
    surface: Res<DrawingSurface>,
    mut pool: Query<(&ParticleSprite, &mut Sprite, &mut Transform, &mut Visibility)>,
) {
    let live = render_state.particles.len();
    let pooled = pool.iter().count();
    // New slots show up next frame once their commands apply.
    for slot in pooled..live {
        commands.spawn((
            SceneEntity,
            ParticleSprite { slot },
            Sprite::from_color(Color::WHITE, Vec2::ONE),
            Transform::from_xyz(0.0, 0.0, Z_PARTICLES),
            Visibility::Hidden,
        ));
    }

    let frame = render_state.frame;
    for (sprite_slot, mut sprite, mut transform, mut visibility) in &mut pool {
        let Some(p) = render_state.particles.get(sprite_slot.slot) else {
            visibility.set_if_neq(Visibility::Hidden);
            continue;
        };
        let look = (behavior(p.kind).look)(p, frame);
        sprite.color = p.color.with_opacity(look.opacity);
        sprite.custom_size = Some(look.size);
        // Slot order keeps overlapping particles from flickering.
        let z = Z_PARTICLES + sprite_slot.slot as f32 * 0.0001;
        transform.translation = surface.to_world(p.position).extend(z);
        transform.rotation = Quat::from_rotation_z(look.rotation);
        visibility.set_if_neq(Visibility::Inherited);
    }
}
