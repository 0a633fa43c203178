//! Debounced event counting.
//!
//! A [`HysteresisCounter`] turns a noisy per-frame active/inactive signal into
//! a count of completed events. The latch rises after `min_on` consecutive
//! active frames and falls after `min_off` inactive ones; the event is counted
//! on the falling edge, so one full press-and-release is exactly one event.
//! After each event a cooldown blocks the latch from rising again.

use crate::constants::{BROW_EXTRA_COOLDOWN, BROW_EXTRA_MIN_OFF, BROW_EXTRA_MIN_ON, OFF_STREAK_SENTINEL};
use serde::{Deserialize, Serialize};

/// Debounce parameters for one counter, in frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HysteresisParams {
    /// Consecutive active frames needed to latch on
    pub min_on: u32,
    /// Consecutive inactive frames needed to release
    pub min_off: u32,
    /// Frames after a completed event during which the latch cannot rise
    pub cooldown: u32,
}

impl HysteresisParams {
    #[must_use]
    pub const fn new(min_on: u32, min_off: u32, cooldown: u32) -> Self {
        Self {
            min_on,
            min_off,
            cooldown,
        }
    }

    /// Stricter variant used for the noisier brow signal
    #[must_use]
    pub fn stricter(&self) -> Self {
        Self {
            min_on: self.min_on.saturating_add(BROW_EXTRA_MIN_ON),
            min_off: self.min_off.saturating_add(BROW_EXTRA_MIN_OFF),
            cooldown: self.cooldown.saturating_add(BROW_EXTRA_COOLDOWN),
        }
    }
}

/// Latch and counters for one expression
///
/// Only one of `on_streak` and `off_streak` is ever non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterState {
    pub is_on: bool,
    pub on_streak: u32,
    pub off_streak: u32,
    pub cooldown_remaining: u32,
    pub completed_count: u64,
}

impl Default for CounterState {
    fn default() -> Self {
        Self {
            is_on: false,
            on_streak: 0,
            off_streak: OFF_STREAK_SENTINEL,
            cooldown_remaining: 0,
            completed_count: 0,
        }
    }
}

/// Debounced latch that counts completed activation cycles
#[derive(Debug, Clone, Default)]
pub struct HysteresisCounter {
    state: CounterState,
}

impl HysteresisCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one frame
    ///
    /// Returns `true` when this frame completed an event.
    pub fn update(&mut self, is_active: bool, params: &HysteresisParams) -> bool {
        let state = &mut self.state;

        if state.cooldown_remaining > 0 {
            state.cooldown_remaining -= 1;
        }

        if is_active {
            state.on_streak = state.on_streak.saturating_add(1);
            state.off_streak = 0;
            if !state.is_on && state.on_streak >= params.min_on && state.cooldown_remaining == 0 {
                state.is_on = true;
            }
            false
        } else {
            state.off_streak = state.off_streak.saturating_add(1);
            state.on_streak = 0;
            if state.is_on && state.off_streak >= params.min_off {
                state.is_on = false;
                state.completed_count += 1;
                state.cooldown_remaining = params.cooldown;
                return true;
            }
            false
        }
    }

    /// Return to the initial state, clearing the count
    pub fn reset(&mut self) {
        self.state = CounterState::default();
    }

    #[must_use]
    pub fn state(&self) -> &CounterState {
        &self.state
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.state.completed_count
    }

    #[must_use]
    pub fn is_on(&self) -> bool {
        self.state.is_on
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PARAMS: HysteresisParams = HysteresisParams::new(3, 2, 8);

    fn feed(counter: &mut HysteresisCounter, signal: &[bool], params: &HysteresisParams) -> u32 {
        signal.iter().filter(|&&active| counter.update(active, params)).count() as u32
    }

    #[test]
    fn test_initial_state() {
        let counter = HysteresisCounter::new();
        assert_eq!(
            *counter.state(),
            CounterState {
                is_on: false,
                on_streak: 0,
                off_streak: 99,
                cooldown_remaining: 0,
                completed_count: 0,
            }
        );
    }

    #[test]
    fn test_single_cycle_counts_once() {
        let mut counter = HysteresisCounter::new();
        let signal = [true, true, true, false, false];
        assert_eq!(feed(&mut counter, &signal, &PARAMS), 1);
        assert_eq!(counter.count(), 1);
        assert_eq!(counter.state().cooldown_remaining, 8);
        assert!(!counter.is_on());
    }

    #[test]
    fn test_rising_edge_does_not_count() {
        let mut counter = HysteresisCounter::new();
        feed(&mut counter, &[true; 20], &PARAMS);
        assert!(counter.is_on());
        assert_eq!(counter.count(), 0);
        assert_eq!(counter.state().on_streak, 20);
    }

    #[test]
    fn test_short_activation_ignored() {
        let mut counter = HysteresisCounter::new();
        feed(&mut counter, &[true, true, false, false, false], &PARAMS);
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn test_short_release_keeps_latch() {
        let mut counter = HysteresisCounter::new();
        feed(&mut counter, &[true, true, true, false, true, false, true], &PARAMS);
        assert!(counter.is_on());
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn test_cooldown_suppresses_retrigger() {
        let mut counter = HysteresisCounter::new();
        feed(&mut counter, &[true, true, true, false, false], &PARAMS);
        assert_eq!(counter.count(), 1);

        // Re-activate straight away: min_on and min_off are met but the latch is blocked.
        feed(&mut counter, &[true, true, true, false, false], &PARAMS);
        assert_eq!(counter.count(), 1);
        assert_eq!(counter.state().cooldown_remaining, 3);
    }

    #[test]
    fn test_counts_again_after_cooldown() {
        let mut counter = HysteresisCounter::new();
        feed(&mut counter, &[true, true, true, false, false], &PARAMS);
        feed(&mut counter, &[false; 8], &PARAMS);
        assert_eq!(counter.state().cooldown_remaining, 0);
        feed(&mut counter, &[true, true, true, false, false], &PARAMS);
        assert_eq!(counter.count(), 2);
    }

    #[test]
    fn test_held_activation_latches_once_cooldown_expires() {
        let mut counter = HysteresisCounter::new();
        feed(&mut counter, &[true, true, true, false, false], &PARAMS);
        // Active through the whole cooldown; latch rises on the frame it reaches zero.
        feed(&mut counter, &[true; 7], &PARAMS);
        assert!(!counter.is_on());
        feed(&mut counter, &[true], &PARAMS);
        assert!(counter.is_on());
    }

    #[test]
    fn test_stricter_params() {
        assert_eq!(PARAMS.stricter(), HysteresisParams::new(4, 3, 10));

        let mut counter = HysteresisCounter::new();
        let strict = PARAMS.stricter();
        feed(&mut counter, &[true, true, true, false, false], &strict);
        assert_eq!(counter.count(), 0);
        feed(&mut counter, &[true, true, true, true, false, false, false], &strict);
        assert_eq!(counter.count(), 1);
        assert_eq!(counter.state().cooldown_remaining, 10);
    }

    #[test]
    fn test_reset() {
        let mut counter = HysteresisCounter::new();
        feed(&mut counter, &[true, true, true, false, false, true], &PARAMS);
        counter.reset();
        assert_eq!(*counter.state(), CounterState::default());
    }

    proptest! {
        #[test]
        fn prop_count_is_monotonic(signal in proptest::collection::vec(any::<bool>(), 0..400),
                                   min_on in 0u32..6, min_off in 0u32..6, cooldown in 0u32..12) {
            let params = HysteresisParams::new(min_on, min_off, cooldown);
            let mut counter = HysteresisCounter::new();
            let mut last = 0;
            for active in signal {
                counter.update(active, &params);
                prop_assert!(counter.count() >= last);
                last = counter.count();
            }
        }

        #[test]
        fn prop_streaks_are_exclusive(signal in proptest::collection::vec(any::<bool>(), 1..400)) {
            let mut counter = HysteresisCounter::new();
            for active in signal {
                counter.update(active, &PARAMS);
                let state = counter.state();
                prop_assert!(state.on_streak == 0 || state.off_streak == 0);
                prop_assert!(state.cooldown_remaining <= PARAMS.cooldown);
            }
        }
    }
}
