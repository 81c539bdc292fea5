use super::types::{HOURS_PER_DAY, INTERVALS_PER_DAY, INTERVALS_PER_HOUR, INTERVALS_PER_YEAR};

/// A simulation clock that hands out 15-minute interval indices.
///
/// # Examples
///
/// ```
/// use ev_fleet_sim::sim::clock::Clock;
///
/// let mut clock = Clock::year();
/// assert_eq!(clock.tick(), Some(0));
/// assert_eq!(clock.tick(), Some(1));
/// assert_eq!(clock.total(), 35_040);
/// ```
pub struct Clock {
    /// Next interval to hand out
    current: usize,
    /// Total intervals to run
    total: usize,
}

impl Clock {
    fn new(total: usize) -> Self {
        Self { current: 0, total }
    }

    /// A clock spanning one simulated year (35,040 intervals).
    pub fn year() -> Self {
        Self::new(INTERVALS_PER_YEAR)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Advances the clock by one interval.
    ///
    /// # Returns
    ///
    /// * `Some(step)` - The current interval (starting from 0) before advancing
    /// * `None` - If the clock has reached its total
    pub fn tick(&mut self) -> Option<usize> {
        if self.current < self.total {
            let step = self.current;
            self.current += 1;
            Some(step)
        } else {
            None
        }
    }
}

/// Hour of day (`0..=23`) an interval falls into, wrapping daily.
pub fn hour_of_day(interval: usize) -> usize {
    (interval / INTERVALS_PER_HOUR) % HOURS_PER_DAY
}

/// Zero-based day an interval falls into.
pub fn day_of(interval: usize) -> usize {
    interval / INTERVALS_PER_DAY
}

/// Wall-clock label (`HH:MM`) of an interval's start.
pub fn time_of_day_label(interval: usize) -> String {
    let minute = (interval % INTERVALS_PER_HOUR) * (60 / INTERVALS_PER_HOUR);
    format!("{:02}:{:02}", hour_of_day(interval), minute)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick() {
        let mut clock = Clock::new(2);
        assert_eq!(clock.tick(), Some(0));
        assert_eq!(clock.tick(), Some(1));
        assert_eq!(clock.tick(), None);
    }

    #[test]
    fn test_empty_clock() {
        let mut clock = Clock::new(0);
        assert_eq!(clock.tick(), None);
        assert_eq!(clock.tick(), None);
    }

    #[test]
    fn year_clock_runs_every_interval() {
        let mut clock = Clock::year();
        assert_eq!(clock.total(), 35_040);
        let mut count = 0;
        while clock.tick().is_some() {
            count += 1;
        }
        assert_eq!(count, 35_040);
    }

    #[test]
    fn hour_wraps_daily() {
        assert_eq!(hour_of_day(0), 0);
        assert_eq!(hour_of_day(3), 0);
        assert_eq!(hour_of_day(4), 1);
        assert_eq!(hour_of_day(95), 23);
        assert_eq!(hour_of_day(96), 0);
        assert_eq!(hour_of_day(96 * 200 + 70), 17);
    }

    #[test]
    fn day_and_label() {
        assert_eq!(day_of(95), 0);
        assert_eq!(day_of(96), 1);
        assert_eq!(time_of_day_label(0), "00:00");
        assert_eq!(time_of_day_label(1), "00:15");
        assert_eq!(time_of_day_label(71), "17:45");
        assert_eq!(time_of_day_label(96 + 4), "01:00");
    }
}
