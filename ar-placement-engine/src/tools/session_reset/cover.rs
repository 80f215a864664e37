use bevy::prelude::*;

/// Proof that a caller asked for the cover to be shown.
///
/// Not `Clone`: each lease is released exactly once by handing it back.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a dropped lease keeps the cover up forever"]
pub struct CoverLease(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverTransition {
    /// Fade-in finished; the screen is fully black.
    Opaque,
    /// Fade-out finished; the scene is visible again.
    Hidden,
}

/// Opaque full-screen cover shared by everything that needs to hide a
/// re-initialising camera feed.
///
/// The cover is up while at least one lease is held, so a second show while
/// already shown only adds a lease.
#[derive(Debug)]
pub struct TransitionCover {
    fade_secs: f32,
    opacity: f32,
    leases: Vec<u64>,
    next_lease: u64,
}

impl TransitionCover {
    pub fn new(fade_secs: f32) -> Self {
        Self {
            fade_secs: fade_secs.max(0.0),
            opacity: 0.0,
            leases: Vec::new(),
            next_lease: 0,
        }
    }

    pub fn acquire(&mut self) -> CoverLease {
        let id = self.next_lease;
        self.next_lease += 1;
        if self.leases.is_empty() {
            debug!("Transition cover requested");
        }
        self.leases.push(id);
        CoverLease(id)
    }

    pub fn release(&mut self, lease: CoverLease) {
        self.leases.retain(|id| *id != lease.0);
        if self.leases.is_empty() {
            debug!("Transition cover released");
        }
    }

    pub fn is_requested(&self) -> bool {
        !self.leases.is_empty()
    }

    pub fn is_opaque(&self) -> bool {
        self.opacity >= 1.0
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Advance the fade by `dt` seconds, reporting a finished transition.
    pub fn tick(&mut self, dt: f32) -> Option<CoverTransition> {
        let goal = if self.is_requested() { 1.0 } else { 0.0 };
        if self.opacity == goal {
            return None;
        }

        let step = if self.fade_secs > 0.0 {
            dt.max(0.0) / self.fade_secs
        } else {
            1.0
        };
        self.opacity = if goal > self.opacity {
            (self.opacity + step).min(1.0)
        } else {
            (self.opacity - step).max(0.0)
        };

        match self.opacity {
            o if o >= 1.0 => Some(CoverTransition::Opaque),
            o if o <= 0.0 => Some(CoverTransition::Hidden),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fades_in_over_configured_duration() {
        let mut cover = TransitionCover::new(0.3);
        let lease = cover.acquire();

        assert_eq!(cover.tick(0.1), None);
        assert!(cover.is_visible());
        assert!(!cover.is_opaque());
        assert_eq!(cover.tick(0.1), None);
        assert_eq!(cover.tick(0.15), Some(CoverTransition::Opaque));
        assert_eq!(cover.tick(0.1), None);

        cover.release(lease);
        assert_eq!(cover.tick(1.0), Some(CoverTransition::Hidden));
        assert!(!cover.is_visible());
    }

    #[test]
    fn second_show_is_a_no_op_until_all_leases_return() {
        let mut cover = TransitionCover::new(0.0);
        let first = cover.acquire();
        assert_eq!(cover.tick(0.016), Some(CoverTransition::Opaque));

        let second = cover.acquire();
        assert_eq!(cover.tick(0.016), None);

        cover.release(first);
        assert_eq!(cover.tick(0.016), None);
        assert!(cover.is_opaque());

        cover.release(second);
        assert_eq!(cover.tick(0.016), Some(CoverTransition::Hidden));
    }

    #[test]
    fn release_mid_fade_reverses_from_current_opacity() {
        let mut cover = TransitionCover::new(1.0);
        let lease = cover.acquire();
        cover.tick(0.5);
        cover.release(lease);

        cover.tick(0.25);
        assert!((cover.opacity() - 0.25).abs() < 1e-6);
    }
}
