use glam::Vec2;

/// The watch face's three pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Clock,
    HeartRate,
    Battery,
}

/// Axis-aligned rectangle in UI NDC, given as centre and half extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HotRect {
    pub center: Vec2,
    pub half: Vec2,
}

impl HotRect {
    pub const fn new(x: f32, y: f32, half_w: f32, half_h: f32) -> Self {
        Self {
            center: Vec2::new(x, y),
            half: Vec2::new(half_w, half_h),
        }
    }

    /// Edges count as inside.
    pub fn contains(&self, p: Vec2) -> bool {
        let d = (p - self.center).abs();
        d.x <= self.half.x && d.y <= self.half.y
    }
}

pub const LEFT_ARROW: HotRect = HotRect::new(-0.8, 0.0, 0.1, 0.1);
pub const RIGHT_ARROW: HotRect = HotRect::new(0.8, 0.0, 0.1, 0.1);

impl Screen {
    /// The page reached through the left arrow, if this page shows one.
    pub fn left(self) -> Option<Screen> {
        match self {
            Screen::Clock => None,
            Screen::HeartRate => Some(Screen::Clock),
            Screen::Battery => Some(Screen::HeartRate),
        }
    }

    pub fn right(self) -> Option<Screen> {
        match self {
            Screen::Clock => Some(Screen::HeartRate),
            Screen::HeartRate => Some(Screen::Battery),
            Screen::Battery => None,
        }
    }

    /// Resolves this frame's click. Outside watch view, or with no click, or
    /// with a click that misses both arrows, the page stays put.
    pub fn navigate(self, click: Option<Vec2>, watch_view: bool) -> Screen {
        let Some(p) = click.filter(|_| watch_view) else {
            return self;
        };
        let next = if LEFT_ARROW.contains(p) {
            self.left()
        } else if RIGHT_ARROW.contains(p) {
            self.right()
        } else {
            None
        };
        match next {
            Some(screen) => {
                log::info!("Watch screen {:?} -> {:?}", self, screen);
                screen
            }
            None => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RIGHT: Option<Vec2> = Some(Vec2::new(0.8, 0.0));
    const LEFT: Option<Vec2> = Some(Vec2::new(-0.8, 0.05));

    #[test]
    fn transitions_follow_the_arrows() {
        assert_eq!(Screen::Clock.navigate(RIGHT, true), Screen::HeartRate);
        assert_eq!(Screen::Clock.navigate(LEFT, true), Screen::Clock);
        assert_eq!(Screen::HeartRate.navigate(LEFT, true), Screen::Clock);
        assert_eq!(Screen::HeartRate.navigate(RIGHT, true), Screen::Battery);
        assert_eq!(Screen::Battery.navigate(LEFT, true), Screen::HeartRate);
        assert_eq!(Screen::Battery.navigate(RIGHT, true), Screen::Battery);
    }

    #[test]
    fn clicks_outside_watch_view_or_hot_rects_do_nothing() {
        for screen in [Screen::Clock, Screen::HeartRate, Screen::Battery] {
            assert_eq!(screen.navigate(RIGHT, false), screen);
            assert_eq!(screen.navigate(LEFT, false), screen);
            assert_eq!(screen.navigate(Some(Vec2::ZERO), true), screen);
            assert_eq!(screen.navigate(Some(Vec2::new(0.8, 0.5)), true), screen);
            assert_eq!(screen.navigate(None, true), screen);
        }
    }

    #[test]
    fn hot_rect_edges_are_inclusive() {
        let rect = HotRect::new(0.0, 0.0, 0.5, 0.25);
        assert!(rect.contains(Vec2::new(0.5, -0.25)));
        assert!(!rect.contains(Vec2::new(0.5, 0.3)));
        assert!(RIGHT_ARROW.contains(Vec2::new(0.85, 0.05)));
        assert!(!RIGHT_ARROW.contains(Vec2::new(0.95, 0.0)));
    }
}
