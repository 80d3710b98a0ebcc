use crate::engine::scheduler::TimerToken;

/// HUD crosshair spread accumulator. Four independently interpolated factors
/// combine into one multiplier read by an external HUD; nothing in gameplay
/// depends on it.
#[derive(Debug, Clone, Default)]
pub struct CrosshairSpread {
    pub(crate) velocity_factor: f32,
    pub(crate) in_air_factor: f32,
    pub(crate) aim_factor: f32,
    pub(crate) shooting_factor: f32,
    pub(crate) firing_window: bool,
    pub(crate) shoot_timer: Option<TimerToken>,
}

impl CrosshairSpread {
    pub fn multiplier(&self) -> f32 {
        0.5 + self.velocity_factor + self.in_air_factor - self.aim_factor + self.shooting_factor
    }

    pub fn velocity_factor(&self) -> f32 {
        self.velocity_factor
    }

    pub fn in_air_factor(&self) -> f32 {
        self.in_air_factor
    }

    pub fn aim_factor(&self) -> f32 {
        self.aim_factor
    }

    pub fn shooting_factor(&self) -> f32 {
        self.shooting_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplier_at_rest_is_baseline() {
        let spread = CrosshairSpread::default();
        assert!((spread.multiplier() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn aim_factor_shrinks_the_multiplier() {
        let spread = CrosshairSpread {
            velocity_factor: 1.0,
            in_air_factor: 0.5,
            aim_factor: 0.6,
            shooting_factor: 0.3,
            ..Default::default()
        };
        assert!((spread.multiplier() - 1.7).abs() < 1e-6);
    }
}
