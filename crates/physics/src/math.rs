//! Shared numeric helpers.

/// Critically damped spring toward a target value.
///
/// Moves `current` toward `target` over roughly `smooth_time` seconds without
/// overshoot, carrying a velocity accumulator between frames. The per-frame
/// change is capped at `max_speed * smooth_time`. Returns the new value and
/// the new velocity.
///
/// Uses the standard cubic approximation of the exponential decay, which is
/// stable for the frame times a game loop produces.
pub fn smooth_damp(
    current: f32,
    target: f32,
    velocity: f32,
    smooth_time: f32,
    max_speed: f32,
    dt: f32,
) -> (f32, f32) {
    let smooth_time = smooth_time.max(0.0001);
    let omega = 2.0 / smooth_time;

    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let max_change = max_speed * smooth_time;
    let change = (current - target).clamp(-max_change, max_change);

    let temp = (velocity + omega * change) * dt;
    let new_velocity = (velocity - omega * temp) * exp;
    let output = target + (change + temp) * exp;

    (output, new_velocity)
}
