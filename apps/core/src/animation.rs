//! Expand animation for the radial menu. Options pop out one after another,
//! growing from half size while fading in.

pub const NODE_STAGGER_SECONDS: f64 = 0.1;
pub const NODE_REVEAL_SECONDS: f64 = 0.3;
pub const NODE_START_SCALE: f64 = 0.5;
pub const TRIGGER_EXPANDED_SCALE: f64 = 1.1;
const MAX_FRAME_DELTA: f64 = 0.25;
const BACK_OVERSHOOT: f64 = 1.70158;

/// Advance an elapsed-time counter from a wall clock reading.
///
/// The first reading only records the clock. Deltas are clamped so a stalled
/// frame (a hidden tab, a suspended terminal) does not skip the animation, and
/// a clock that runs backwards never rewinds it.
pub fn advance_clock(elapsed: f64, last_tick: Option<f64>, now_seconds: f64) -> (f64, Option<f64>) {
    let delta = last_tick
        .map(|last| (now_seconds - last).clamp(0.0, MAX_FRAME_DELTA))
        .unwrap_or(0.0);

    (elapsed + delta, Some(now_seconds))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeFrame {
    pub scale: f64,
    pub opacity: f64,
}

impl NodeFrame {
    pub const HIDDEN: Self = Self {
        scale: NODE_START_SCALE,
        opacity: 0.0,
    };
    pub const SETTLED: Self = Self {
        scale: 1.0,
        opacity: 1.0,
    };

    pub fn is_visible(self) -> bool {
        self.opacity > 0.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExpandAnimation {
    elapsed: f64,
    last_tick: Option<f64>,
}

impl ExpandAnimation {
    pub const fn new() -> Self {
        Self {
            elapsed: 0.0,
            last_tick: None,
        }
    }

    pub fn restart(&mut self) {
        self.elapsed = 0.0;
        self.last_tick = None;
    }

    pub fn tick(&mut self, now_seconds: f64) {
        (self.elapsed, self.last_tick) = advance_clock(self.elapsed, self.last_tick, now_seconds);
    }

    pub fn node_frame(&self, index: usize) -> NodeFrame {
        node_frame_at(self.elapsed, index)
    }

    pub fn is_settled(&self, count: usize) -> bool {
        count == 0 || self.node_frame(count - 1) == NodeFrame::SETTLED
    }
}

/// Frame of option `index` after `elapsed` seconds of expansion.
pub fn node_frame_at(elapsed: f64, index: usize) -> NodeFrame {
    #[allow(clippy::cast_precision_loss)]
    let delay = index as f64 * NODE_STAGGER_SECONDS;
    let progress = ((elapsed - delay) / NODE_REVEAL_SECONDS).clamp(0.0, 1.0);

    if progress <= 0.0 {
        return NodeFrame::HIDDEN;
    }
    if progress >= 1.0 {
        return NodeFrame::SETTLED;
    }

    NodeFrame {
        scale: (1.0 - NODE_START_SCALE).mul_add(ease_out_back(progress), NODE_START_SCALE),
        opacity: ease_out_cubic(progress),
    }
}

pub const fn trigger_scale(expanded: bool) -> f64 {
    if expanded {
        TRIGGER_EXPANDED_SCALE
    } else {
        1.0
    }
}

fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

fn ease_out_back(t: f64) -> f64 {
    let c3 = BACK_OVERSHOOT + 1.0;
    let shifted = t - 1.0;
    c3.mul_add(shifted.powi(3), BACK_OVERSHOOT * shifted.powi(2)) + 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(diff < 1e-9, "expected {expected}, got {actual}, diff {diff}");
    }

    #[test]
    fn first_tick_initializes_clock_without_advancing() {
        let (elapsed, last_tick) = advance_clock(0.4, None, 10.0);
        assert_close(elapsed, 0.4);
        assert_eq!(last_tick, Some(10.0));
    }

    #[test]
    fn large_frame_gap_is_clamped() {
        let (elapsed, _) = advance_clock(0.0, Some(3.0), 30.0);
        assert_close(elapsed, MAX_FRAME_DELTA);
    }

    #[test]
    fn backwards_time_does_not_rewind() {
        let (elapsed, last_tick) = advance_clock(0.3, Some(10.0), 9.0);
        assert_close(elapsed, 0.3);
        assert_eq!(last_tick, Some(9.0));
    }

    #[test]
    fn nodes_reveal_in_stagger_order() {
        let elapsed = 0.15;
        assert!(node_frame_at(elapsed, 0).is_visible());
        assert!(node_frame_at(elapsed, 1).is_visible());
        assert!(!node_frame_at(elapsed, 2).is_visible());
        assert!(node_frame_at(elapsed, 0).opacity > node_frame_at(elapsed, 1).opacity);
    }

    #[test]
    fn every_node_settles_after_full_stagger() {
        let mut animation = ExpandAnimation::new();
        let mut now = 0.0;
        animation.tick(now);
        while now < 2.0 {
            now += 0.05;
            animation.tick(now);
        }
        assert!(animation.is_settled(5));
        assert_eq!(animation.node_frame(4), NodeFrame::SETTLED);
    }

    #[test]
    fn restart_hides_nodes_again() {
        let mut animation = ExpandAnimation::new();
        animation.tick(0.0);
        animation.tick(0.2);
        animation.restart();
        assert_eq!(animation.node_frame(0), NodeFrame::HIDDEN);
    }

    #[test]
    fn trigger_grows_while_expanded() {
        assert_close(trigger_scale(true), 1.1);
        assert_close(trigger_scale(false), 1.0);
    }
}
