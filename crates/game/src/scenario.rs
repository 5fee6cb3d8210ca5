//! Scripted walk through the ichor pool used by the headless simulation.

use engine_core::Vec3;

/// One segment of the scripted player path: constant velocity for a while.
#[derive(Debug, Clone, Copy)]
pub struct Leg {
    pub label: &'static str,
    pub velocity: Vec3,
    pub seconds: f32,
}

const fn leg(label: &'static str, velocity: Vec3, seconds: f32) -> Leg {
    Leg {
        label,
        velocity,
        seconds,
    }
}

/// Where the player starts, west of a pool centred on the origin.
pub const PLAYER_START: Vec3 = Vec3::new(-12.0, 0.0, 0.0);

/// Wade in, hop out and back (jump cheese), linger until pulled under,
/// struggle free, then wait for the pool to calm down.
pub static SCRIPT: [Leg; 7] = [
    leg("approach", Vec3::new(4.0, 0.0, 0.0), 3.0),
    leg("wade", Vec3::ZERO, 2.5),
    leg("hop out", Vec3::new(-20.0, 0.0, 0.0), 0.45),
    leg("hop back", Vec3::new(20.0, 0.0, 0.0), 0.45),
    leg("linger", Vec3::new(0.0, 0.0, -0.2), 8.0),
    leg("escape", Vec3::new(-6.0, 0.0, 0.0), 2.0),
    leg("recover", Vec3::ZERO, 3.0),
];

/// Total scripted time in seconds.
pub fn duration() -> f32 {
    SCRIPT.iter().map(|l| l.seconds).sum()
}

/// The leg active at `elapsed` seconds, or `None` once the script is over.
pub fn leg_at(elapsed: f32) -> Option<&'static Leg> {
    let mut start = 0.0;
    for l in SCRIPT.iter() {
        if elapsed < start + l.seconds {
            return Some(l);
        }
        start += l.seconds;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legs_follow_each_other() {
        assert_eq!(leg_at(0.0).unwrap().label, "approach");
        assert_eq!(leg_at(3.1).unwrap().label, "wade");
        assert_eq!(leg_at(5.6).unwrap().label, "hop out");
        assert!(leg_at(duration() + 0.1).is_none());
    }

    #[test]
    fn hop_returns_to_where_it_started() {
        let out = SCRIPT[2];
        let back = SCRIPT[3];
        let net = out.velocity * out.seconds + back.velocity * back.seconds;
        assert!(net.length() < 1e-5);
    }
}
