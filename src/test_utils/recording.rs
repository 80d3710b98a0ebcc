use std::{cell::RefCell, rc::Rc};

use glam::Vec3;
use hecs::Entity;

use crate::{
    components::{
        id::{MontageSectionId, ParticleId, SoundId},
        item::ItemStatePolicy,
    },
    engine::services::{Presentation, TraceHit, TraceService},
};

/// Everything the core told the presentation layer to do, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum PresentationEvent {
    Sound(SoundId),
    SoundAt(SoundId, Vec3),
    Particles(ParticleId, Vec3),
    Beam(ParticleId, Vec3, Vec3),
    Montage(Entity, MontageSectionId),
    ItemVisual(Entity, ItemStatePolicy),
    Impulse(Entity, Vec3),
    Attach(Entity, Entity),
    Detach(Entity),
    ShowPickupWidget(Entity),
    HidePickupWidget(Entity),
    EnableGlow(Entity),
    PulseGlow(Entity),
    ShowHealthBar(Entity),
    HideHealthBar(Entity),
    StopAiMovement(Entity),
    DespawnVisual(Entity),
}

pub type PresentationLog = Rc<RefCell<Vec<PresentationEvent>>>;

/// Presentation double that appends every hook call to a shared log.
pub struct RecordingPresentation {
    log: PresentationLog,
}

impl RecordingPresentation {
    pub fn new() -> (Self, PresentationLog) {
        let log: PresentationLog = Rc::new(RefCell::new(Vec::new()));
        (Self { log: Rc::clone(&log) }, log)
    }

    fn push(&self, event: PresentationEvent) {
        self.log.borrow_mut().push(event);
    }
}

impl Presentation for RecordingPresentation {
    fn play_sound(&self, sound: &SoundId) {
        self.push(PresentationEvent::Sound(sound.clone()));
    }

    fn play_sound_at(&self, sound: &SoundId, location: Vec3) {
        self.push(PresentationEvent::SoundAt(sound.clone(), location));
    }

    fn spawn_particles(&self, particles: &ParticleId, location: Vec3) {
        self.push(PresentationEvent::Particles(particles.clone(), location));
    }

    fn spawn_beam(&self, particles: &ParticleId, start: Vec3, end: Vec3) {
        self.push(PresentationEvent::Beam(particles.clone(), start, end));
    }

    fn play_montage_section(&self, entity: Entity, section: &MontageSectionId) {
        self.push(PresentationEvent::Montage(entity, section.clone()));
    }

    fn set_item_visual(&self, item: Entity, policy: ItemStatePolicy) {
        self.push(PresentationEvent::ItemVisual(item, policy));
    }

    fn apply_impulse(&self, entity: Entity, impulse: Vec3) {
        self.push(PresentationEvent::Impulse(entity, impulse));
    }

    fn attach_to_hand(&self, character: Entity, item: Entity) {
        self.push(PresentationEvent::Attach(character, item));
    }

    fn detach(&self, item: Entity) {
        self.push(PresentationEvent::Detach(item));
    }

    fn show_pickup_widget(&self, item: Entity) {
        self.push(PresentationEvent::ShowPickupWidget(item));
    }

    fn hide_pickup_widget(&self, item: Entity) {
        self.push(PresentationEvent::HidePickupWidget(item));
    }

    fn enable_glow(&self, item: Entity) {
        self.push(PresentationEvent::EnableGlow(item));
    }

    fn pulse_glow(&self, item: Entity) {
        self.push(PresentationEvent::PulseGlow(item));
    }

    fn show_health_bar(&self, enemy: Entity) {
        self.push(PresentationEvent::ShowHealthBar(enemy));
    }

    fn hide_health_bar(&self, enemy: Entity) {
        self.push(PresentationEvent::HideHealthBar(enemy));
    }

    fn stop_ai_movement(&self, enemy: Entity) {
        self.push(PresentationEvent::StopAiMovement(enemy));
    }

    fn despawn_visual(&self, entity: Entity) {
        self.push(PresentationEvent::DespawnVisual(entity));
    }
}

/// Trace double whose scripted hit can be swapped mid-test through the
/// shared handle.
pub struct StubTrace {
    hit: Rc<RefCell<Option<TraceHit>>>,
}

pub type TraceScript = Rc<RefCell<Option<TraceHit>>>;

impl StubTrace {
    pub fn miss() -> (Self, TraceScript) {
        Self::with(None)
    }

    pub fn hit_at(location: Vec3) -> (Self, TraceScript) {
        Self::with(Some(TraceHit {
            location,
            entity: None,
        }))
    }

    pub fn hit_entity(location: Vec3, entity: Entity) -> (Self, TraceScript) {
        Self::with(Some(TraceHit {
            location,
            entity: Some(entity),
        }))
    }

    fn with(hit: Option<TraceHit>) -> (Self, TraceScript) {
        let script: TraceScript = Rc::new(RefCell::new(hit));
        (
            Self {
                hit: Rc::clone(&script),
            },
            script,
        )
    }
}

impl TraceService for StubTrace {
    fn trace_ray(&self, _origin: Vec3, _direction: Vec3, _max_distance: f32) -> Option<TraceHit> {
        *self.hit.borrow()
    }
}
