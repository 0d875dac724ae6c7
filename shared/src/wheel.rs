use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{BASE_SPIN_DEGREES, SECTOR_DEGREES};
use crate::fate::FatePath;

/// Where the wheel came to rest.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct WheelOutcome {
    pub angle_degrees: u32,
    pub sector: u8,
}

impl WheelOutcome {
    /// Reads the sector under the pointer from the accumulated rotation.
    pub fn from_rotation(total_rotation: u64) -> Self {
        let turned = (total_rotation % 360) as u32;
        let angle_degrees = (360 - turned) % 360;
        let sector = (angle_degrees / SECTOR_DEGREES) as u8;
        Self { angle_degrees, sector }
    }

    /// Even sectors send the device to the quiz, odd ones to payment.
    pub fn path(&self) -> FatePath {
        if self.sector % 2 == 0 {
            FatePath::Quiz
        } else {
            FatePath::Payment
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelPhase {
    Idle,
    Spinning,
    Settled(WheelOutcome),
}

/// Tracks the wheel's rotation across spins and allows one spin in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelEngine {
    rotation: u64,
    phase: WheelPhase,
}

impl Default for WheelEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl WheelEngine {
    pub fn new() -> Self {
        Self {
            rotation: 0,
            phase: WheelPhase::Idle,
        }
    }

    pub fn rotation(&self) -> u64 {
        self.rotation
    }

    pub fn phase(&self) -> WheelPhase {
        self.phase
    }

    pub fn is_spinning(&self) -> bool {
        self.phase == WheelPhase::Spinning
    }

    pub fn outcome(&self) -> Option<WheelOutcome> {
        match self.phase {
            WheelPhase::Settled(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Starts a spin with `extra` degrees on top of the fixed magnitude and
    /// returns the new total rotation, or `None` while a spin is in flight.
    pub fn start_spin(&mut self, extra: u32) -> Option<u64> {
        if self.is_spinning() {
            return None;
        }
        self.rotation += BASE_SPIN_DEGREES + u64::from(extra % 360);
        self.phase = WheelPhase::Spinning;
        Some(self.rotation)
    }

    pub fn start_random_spin<R: Rng>(&mut self, rng: &mut R) -> Option<u64> {
        let extra = rng.gen_range(0..360);
        self.start_spin(extra)
    }

    /// Ends the spin in flight and reports the outcome.
    pub fn complete_spin(&mut self) -> Option<WheelOutcome> {
        if !self.is_spinning() {
            return None;
        }
        let outcome = WheelOutcome::from_rotation(self.rotation);
        self.phase = WheelPhase::Settled(outcome);
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sector_always_in_range_and_parity_picks_path() {
        for total in (0u64..20_000).step_by(7) {
            let outcome = WheelOutcome::from_rotation(total);
            assert!(outcome.sector < 6, "total {} gave sector {}", total, outcome.sector);
            assert!(outcome.angle_degrees < 360);
            let expect_quiz = outcome.sector % 2 == 0;
            assert_eq!(outcome.path() == FatePath::Quiz, expect_quiz);
        }
    }

    #[test]
    fn test_spin_of_1810_lands_on_payment() {
        let mut wheel = WheelEngine::new();
        assert_eq!(wheel.start_spin(10), Some(1810));
        let outcome = wheel.complete_spin().unwrap();
        assert_eq!(outcome.angle_degrees, 350);
        assert_eq!(outcome.sector, 5);
        assert_eq!(outcome.path(), FatePath::Payment);
    }

    #[test]
    fn test_exact_turns_land_on_sector_zero() {
        let outcome = WheelOutcome::from_rotation(1800);
        assert_eq!(outcome.angle_degrees, 0);
        assert_eq!(outcome.sector, 0);
        assert_eq!(outcome.path(), FatePath::Quiz);
    }

    #[test]
    fn test_second_spin_rejected_while_in_flight() {
        let mut wheel = WheelEngine::new();
        assert!(wheel.start_spin(42).is_some());
        assert_eq!(wheel.start_spin(10), None);
        assert_eq!(wheel.rotation(), 1842);
        assert!(wheel.complete_spin().is_some());
        assert_eq!(wheel.complete_spin(), None);
    }

    #[test]
    fn test_settled_phase_carries_outcome() {
        let mut wheel = WheelEngine::new();
        assert_eq!(wheel.outcome(), None);
        wheel.start_spin(0);
        assert_eq!(wheel.outcome(), None);
        let outcome = wheel.complete_spin().unwrap();
        assert_eq!(wheel.phase(), WheelPhase::Settled(outcome));
        assert_eq!(wheel.outcome(), Some(outcome));
        assert!(!wheel.is_spinning());
    }

    #[test]
    fn test_rotation_accumulates_across_spins() {
        let mut wheel = WheelEngine::new();
        let mut rng = StdRng::seed_from_u64(7);
        let first = wheel.start_random_spin(&mut rng).unwrap();
        wheel.complete_spin();
        let second = wheel.start_random_spin(&mut rng).unwrap();
        assert!(first >= 1800 && first < 2160);
        assert!(second - first >= 1800 && second - first < 2160);
        let outcome = wheel.complete_spin().unwrap();
        assert_eq!(outcome, WheelOutcome::from_rotation(second));
    }
}
