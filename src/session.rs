use log::debug;

/// Aggregated race state, built up from whichever packets the feed has
/// delivered so far.
///
/// Both fields start out unknown: the game only sends a session packet every
/// couple of seconds, so a client attaching mid-race may see many lap data
/// packets before it learns the total lap count.
#[derive(Debug, Default)]
pub struct RaceState {
    total_laps: Option<u8>,
    current_lap: Option<u8>,
}

impl RaceState {
    pub fn new() -> RaceState {
        RaceState::default()
    }

    /// The number of laps the session is configured for, once a session
    /// packet has been seen.
    pub fn total_laps(&self) -> Option<u8> {
        self.total_laps
    }

    /// The lap the player's car is currently on, once a lap data packet has
    /// been seen.
    pub fn current_lap(&self) -> Option<u8> {
        self.current_lap
    }

    /// Laps left for the player, once both packet kinds have been seen.
    pub fn remaining_laps(&self) -> Option<u8> {
        match (self.total_laps, self.current_lap) {
            (Some(total), Some(current)) => Some(total.saturating_sub(current)),
            _ => None,
        }
    }

    pub(crate) fn set_total_laps(&mut self, total: u8) {
        if self.total_laps != Some(total) {
            debug!("Session configured for {} laps", total);
        }
        self.total_laps = Some(total);
    }

    pub(crate) fn set_current_lap(&mut self, lap: u8) {
        if let Some(previous) = self.current_lap {
            if lap > previous {
                debug!("Player started lap {}", lap);
            }
        }
        self.current_lap = Some(lap);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unknown() {
        let state = RaceState::new();
        assert!(state.total_laps().is_none());
        assert!(state.current_lap().is_none());
        assert!(state.remaining_laps().is_none());
    }

    #[test]
    fn remaining_laps_needs_both_inputs() {
        let mut state = RaceState::new();

        state.set_total_laps(52);
        assert_eq!(state.total_laps(), Some(52));
        assert!(state.remaining_laps().is_none());

        state.set_current_lap(3);
        assert_eq!(state.current_lap(), Some(3));
        assert_eq!(state.remaining_laps(), Some(49));
    }

    #[test]
    fn updates_overwrite_previous_values() {
        let mut state = RaceState::new();

        state.set_current_lap(3);
        state.set_current_lap(4);
        assert_eq!(state.current_lap(), Some(4));

        // A red flag can shorten the race mid-session
        state.set_total_laps(52);
        state.set_total_laps(30);
        assert_eq!(state.total_laps(), Some(30));
    }

    #[test]
    fn remaining_laps_saturates() {
        let mut state = RaceState::new();

        // An in-lap after the chequered flag can exceed the configured total
        state.set_total_laps(5);
        state.set_current_lap(6);
        assert_eq!(state.remaining_laps(), Some(0));
    }
}
