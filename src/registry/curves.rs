use std::{collections::HashMap, sync::LazyLock};

use serde::{Deserialize, Serialize};

use crate::{
    components::id::CurveId,
    engine::services::CurveSampler,
    registry::registry::{Registry, RegistryEntry},
};

/// A keyframed float curve: `(time, value)` pairs sorted by time, sampled
/// with linear interpolation and clamped to the key range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveRow {
    pub id: CurveId,
    pub keys: Vec<[f32; 2]>,
}

impl RegistryEntry for CurveRow {
    type Id = CurveId;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}

impl CurveRow {
    pub fn sample(&self, time: f32) -> f32 {
        let Some(first) = self.keys.first() else {
            return 0.0;
        };
        let last = self.keys.last().unwrap();
        if time <= first[0] {
            return first[1];
        }
        if time >= last[0] {
            return last[1];
        }
        for window in self.keys.windows(2) {
            let [t0, v0] = window[0];
            let [t1, v1] = window[1];
            if time >= t0 && time <= t1 {
                if (t1 - t0).abs() <= f32::EPSILON {
                    return v1;
                }
                let alpha = (time - t0) / (t1 - t0);
                return v0 + alpha * (v1 - v0);
            }
        }
        last[1]
    }
}

/// Vertical arc of an item flying to the camera anchor: overshoots the
/// target height, then settles on it for the rest of the 0.7 s window.
pub static ITEM_Z_CURVE_ID: LazyLock<CurveId> = LazyLock::new(|| CurveId::from_str("curve.item_z"));

static ITEM_Z_CURVE: LazyLock<CurveRow> = LazyLock::new(|| CurveRow {
    id: ITEM_Z_CURVE_ID.clone(),
    keys: vec![[0.0, 0.0], [0.3, 1.15], [0.55, 1.0], [0.7, 1.0]],
});

/// Uniform scale of an item shrinking into the character's hand near the
/// end of the interpolation.
pub static ITEM_SCALE_CURVE_ID: LazyLock<CurveId> =
    LazyLock::new(|| CurveId::from_str("curve.item_scale"));

static ITEM_SCALE_CURVE: LazyLock<CurveRow> = LazyLock::new(|| CurveRow {
    id: ITEM_SCALE_CURVE_ID.clone(),
    keys: vec![[0.0, 1.0], [0.45, 1.0], [0.7, 0.15]],
});

pub static CURVE_REGISTRY: LazyLock<Registry<CurveId, CurveRow>> = LazyLock::new(|| Registry {
    entries: HashMap::from([
        (ITEM_Z_CURVE_ID.clone(), ITEM_Z_CURVE.clone()),
        (ITEM_SCALE_CURVE_ID.clone(), ITEM_SCALE_CURVE.clone()),
    ]),
});

/// `CurveSampler` backed by the built-in curve registry.
pub struct RegistryCurves;

impl CurveSampler for RegistryCurves {
    fn sample(&self, curve: &CurveId, time: f32) -> Option<f32> {
        CURVE_REGISTRY.get(curve).map(|row| row.sample(time))
    }
}
