use glam::Vec3;
use hecs::Entity;

use crate::{
    components::{
        id::{CurveId, MontageSectionId, ParticleId, SoundId},
        item::ItemStatePolicy,
    },
    registry::curves::RegistryCurves,
};

/// Result of a spatial ray query against the host world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceHit {
    pub location: Vec3,
    /// Gameplay entity the ray hit, if the blocking geometry belongs to one.
    pub entity: Option<Entity>,
}

/// Ray queries against host geometry. A miss returns `None`; a hit carries
/// the authoritative blocked location.
pub trait TraceService {
    fn trace_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<TraceHit>;
}

/// Time-keyed float curves for interpolation. `None` means the curve id is
/// unknown to the host.
pub trait CurveSampler {
    fn sample(&self, curve: &CurveId, time: f32) -> Option<f32>;
}

/// Fire-and-forget hooks into the host's rendering/audio/physics layers.
/// The core never consumes a return value from any of these.
pub trait Presentation {
    fn play_sound(&self, sound: &SoundId);
    fn play_sound_at(&self, sound: &SoundId, location: Vec3);
    fn spawn_particles(&self, particles: &ParticleId, location: Vec3);
    fn spawn_beam(&self, particles: &ParticleId, start: Vec3, end: Vec3);
    fn play_montage_section(&self, entity: Entity, section: &MontageSectionId);
    fn set_item_visual(&self, item: Entity, policy: ItemStatePolicy);
    fn apply_impulse(&self, entity: Entity, impulse: Vec3);
    fn attach_to_hand(&self, character: Entity, item: Entity);
    fn detach(&self, item: Entity);
    fn show_pickup_widget(&self, item: Entity);
    fn hide_pickup_widget(&self, item: Entity);
    fn enable_glow(&self, item: Entity);
    fn pulse_glow(&self, item: Entity);
    fn show_health_bar(&self, enemy: Entity);
    fn hide_health_bar(&self, enemy: Entity);
    fn stop_ai_movement(&self, enemy: Entity);
    fn despawn_visual(&self, entity: Entity);
}

/// Trace service for worlds with no geometry: every ray misses.
pub struct NullTrace;

impl TraceService for NullTrace {
    fn trace_ray(&self, _origin: Vec3, _direction: Vec3, _max_distance: f32) -> Option<TraceHit> {
        None
    }
}

/// Presentation sink that drops every hook call.
pub struct NullPresentation;

impl Presentation for NullPresentation {
    fn play_sound(&self, _sound: &SoundId) {}
    fn play_sound_at(&self, _sound: &SoundId, _location: Vec3) {}
    fn spawn_particles(&self, _particles: &ParticleId, _location: Vec3) {}
    fn spawn_beam(&self, _particles: &ParticleId, _start: Vec3, _end: Vec3) {}
    fn play_montage_section(&self, _entity: Entity, _section: &MontageSectionId) {}
    fn set_item_visual(&self, _item: Entity, _policy: ItemStatePolicy) {}
    fn apply_impulse(&self, _entity: Entity, _impulse: Vec3) {}
    fn attach_to_hand(&self, _character: Entity, _item: Entity) {}
    fn detach(&self, _item: Entity) {}
    fn show_pickup_widget(&self, _item: Entity) {}
    fn hide_pickup_widget(&self, _item: Entity) {}
    fn enable_glow(&self, _item: Entity) {}
    fn pulse_glow(&self, _item: Entity) {}
    fn show_health_bar(&self, _enemy: Entity) {}
    fn hide_health_bar(&self, _enemy: Entity) {}
    fn stop_ai_movement(&self, _enemy: Entity) {}
    fn despawn_visual(&self, _entity: Entity) {}
}

/// The host services the combat core depends on, injected at construction.
pub struct Services {
    pub trace: Box<dyn TraceService>,
    pub curves: Box<dyn CurveSampler>,
    pub presentation: Box<dyn Presentation>,
}

impl Services {
    pub fn new(
        trace: Box<dyn TraceService>,
        curves: Box<dyn CurveSampler>,
        presentation: Box<dyn Presentation>,
    ) -> Self {
        Self {
            trace,
            curves,
            presentation,
        }
    }

    /// Geometry-free services with the built-in curve tables; enough for
    /// simulation without a host engine.
    pub fn headless() -> Self {
        Self::new(
            Box::new(NullTrace),
            Box::new(RegistryCurves),
            Box::new(NullPresentation),
        )
    }
}
