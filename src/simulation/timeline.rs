/// Which way the global timeline is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Growing,
    Shrinking,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Direction::Growing => 1.0,
            Direction::Shrinking => -1.0,
        }
    }
}

/// Reversible ticker driving the grow -> hold -> shrink cycle.
///
/// The direction is resolved at the start of each frame from the ticker's
/// bounds, and the ticker moves one unit in that direction at the end.
#[derive(Clone, Debug)]
pub struct Timeline {
    ticker: f64,
    direction: Direction,
    max_ticker: f64,
}

impl Timeline {
    pub fn new(max_ticker: u32) -> Self {
        Self {
            ticker: 0.0,
            direction: Direction::Growing,
            max_ticker: f64::from(max_ticker),
        }
    }

    /// Apply the bounds rule and return the direction for this frame.
    pub fn resolve(&mut self) -> Direction {
        if self.ticker >= self.max_ticker {
            self.direction = Direction::Shrinking;
        } else if self.ticker <= 0.0 {
            self.direction = Direction::Growing;
        }
        self.direction
    }

    /// Move the ticker one unit in the current direction.
    pub fn advance(&mut self) {
        self.ticker = (self.ticker + self.direction.sign()).clamp(0.0, self.max_ticker);
    }

    /// Jump straight back to the start of the cycle; the next `resolve`
    /// switches to growing.
    pub fn rewind(&mut self) {
        self.ticker = 0.0;
    }

    pub fn reset(&mut self) {
        self.ticker = 0.0;
        self.direction = Direction::Growing;
    }

    pub fn ticker(&self) -> f64 {
        self.ticker
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn max_ticker(&self) -> f64 {
        self.max_ticker
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One frame with no cells: resolve, then advance.
    fn frame(timeline: &mut Timeline) -> Direction {
        let direction = timeline.resolve();
        timeline.advance();
        direction
    }

    #[test]
    fn test_initial_state() {
        let timeline = Timeline::new(360);
        assert_eq!(timeline.ticker(), 0.0);
        assert_eq!(timeline.direction(), Direction::Growing);
    }

    #[test]
    fn test_flips_after_reaching_duration() {
        let mut timeline = Timeline::new(10);
        for _ in 0..10 {
            assert_eq!(frame(&mut timeline), Direction::Growing);
        }
        assert_eq!(timeline.ticker(), 10.0);
        assert_eq!(timeline.direction(), Direction::Growing);

        assert_eq!(frame(&mut timeline), Direction::Shrinking);
        assert_eq!(timeline.ticker(), 9.0);
    }

    #[test]
    fn test_bounce_over_two_durations() {
        let max = 25;
        let mut timeline = Timeline::new(max);
        let mut previous = timeline.direction();
        let mut flips = 0;
        let mut returned_to_zero = false;

        // up for `max` frames, down for `max`, then one frame back up
        for _ in 0..2 * max + 1 {
            let direction = frame(&mut timeline);
            if direction != previous {
                flips += 1;
                previous = direction;
            }
            returned_to_zero |= timeline.ticker() == 0.0;
        }
        assert!(returned_to_zero);
        assert_eq!(flips, 2);
        assert_eq!(timeline.direction(), Direction::Growing);
        assert_eq!(timeline.ticker(), 1.0);
    }

    #[test]
    fn test_ticker_stays_in_bounds() {
        let mut timeline = Timeline::new(3);
        for _ in 0..100 {
            frame(&mut timeline);
            assert!((0.0..=3.0).contains(&timeline.ticker()));
        }
    }

    #[test]
    fn test_rewind_keeps_direction_until_resolve() {
        let mut timeline = Timeline::new(5);
        for _ in 0..7 {
            frame(&mut timeline);
        }
        assert_eq!(timeline.direction(), Direction::Shrinking);
        assert!(timeline.ticker() > 0.0);

        timeline.rewind();
        assert_eq!(timeline.ticker(), 0.0);
        assert_eq!(timeline.direction(), Direction::Shrinking);
        assert_eq!(timeline.resolve(), Direction::Growing);
    }

    #[test]
    fn test_zero_duration_alternates() {
        let mut timeline = Timeline::new(0);
        assert_eq!(frame(&mut timeline), Direction::Shrinking);
        assert_eq!(timeline.ticker(), 0.0);
    }
}
