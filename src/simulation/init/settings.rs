use super::WorldState;

pub const MIN_TEMPERATURE: f32 = 0.0;
pub const MAX_TEMPERATURE: f32 = 100.0;

/// Clamp a control input into [0, 100]; NaN reads as cold
pub fn clamp_temperature(temperature: f32) -> f32 {
    if temperature.is_nan() {
        return MIN_TEMPERATURE;
    }
    temperature.clamp(MIN_TEMPERATURE, MAX_TEMPERATURE)
}

pub(super) fn set_temperature(world: &mut WorldState, temperature: f32) {
    world.temperature = clamp_temperature(temperature);
}

pub(super) fn heat(world: &mut WorldState, delta: f32) {
    world.temperature = clamp_temperature(world.temperature + delta);
}
