//! Geometry for the radial menu: the responsive radius, the position of each
//! option around the trigger, and pointer hit-testing.

use std::f64::consts::TAU;

pub const NARROW_BREAKPOINT_PX: f64 = 600.0;
pub const MEDIUM_BREAKPOINT_PX: f64 = 900.0;

pub const NARROW_RADIUS: u16 = 100;
pub const MEDIUM_RADIUS: u16 = 130;
pub const WIDE_RADIUS: u16 = 150;

/// Radius of the option circle for a viewport of `width_px` pixels.
pub fn radius_for_width(width_px: f64) -> u16 {
    if width_px < NARROW_BREAKPOINT_PX {
        NARROW_RADIUS
    } else if width_px < MEDIUM_BREAKPOINT_PX {
        MEDIUM_RADIUS
    } else {
        WIDE_RADIUS
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Angle of option `index` out of `count`, in radians, starting at 3 o'clock.
pub fn node_angle(index: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let fraction = index as f64 / count as f64;
    TAU * fraction
}

/// Offsets of every option from the trigger centre, evenly spaced on a circle.
pub fn node_positions(count: usize, radius: f64) -> Vec<Point> {
    (0..count)
        .map(|index| {
            let angle = node_angle(index, count);
            Point::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Trigger,
    Node(usize),
    Inside,
    Outside,
}

/// A laid-out radial menu in some pixel space, used to resolve pointer events.
#[derive(Debug, Clone)]
pub struct RadialLayout {
    pub center: Point,
    pub radius: f64,
    pub node_radius: f64,
    pub trigger_radius: f64,
    pub count: usize,
}

impl RadialLayout {
    pub fn new(center: Point, radius: u16, count: usize) -> Self {
        let radius = f64::from(radius);
        Self {
            center,
            radius,
            node_radius: radius * 0.28,
            trigger_radius: radius * 0.35,
            count,
        }
    }

    pub fn node_center(&self, index: usize) -> Point {
        let angle = node_angle(index, self.count);
        Point::new(
            angle.cos().mul_add(self.radius, self.center.x),
            angle.sin().mul_add(self.radius, self.center.y),
        )
    }

    /// Extent of the control. Anything beyond it counts as an outside click.
    pub fn bounds_radius(&self, expanded: bool) -> f64 {
        if expanded {
            self.radius + self.node_radius
        } else {
            self.trigger_radius
        }
    }

    pub fn hit(&self, point: Point, expanded: bool) -> Hit {
        let distance = point.distance_to(self.center);
        if distance <= self.trigger_radius {
            return Hit::Trigger;
        }

        if expanded {
            if let Some(index) = (0..self.count)
                .find(|&index| point.distance_to(self.node_center(index)) <= self.node_radius)
            {
                return Hit::Node(index);
            }
        }

        if distance <= self.bounds_radius(expanded) {
            Hit::Inside
        } else {
            Hit::Outside
        }
    }
}
