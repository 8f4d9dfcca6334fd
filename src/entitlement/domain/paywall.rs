//! Edge-triggered paywall gate.

/// Completed-task count at which the paywall first appears.
pub const PAYWALL_TRIGGER_COUNT: usize = 3;

/// Change in paywall visibility after an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaywallSignal {
    /// The paywall just became visible.
    Show,
    /// The paywall just went away.
    Hide,
    /// Visibility did not change.
    Unchanged,
}

/// Decides when the paywall shows.
///
/// The gate fires when the completed count reaches the threshold and has
/// grown since the previous observation. Observing the same count again
/// never fires, however often it happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaywallGate {
    threshold: usize,
    last_count: usize,
    shown: bool,
}

impl PaywallGate {
    /// Creates a gate that fires at `threshold` completed tasks.
    #[must_use]
    pub const fn new(threshold: usize) -> Self {
        Self {
            threshold,
            last_count: 0,
            shown: false,
        }
    }

    /// Returns the trigger threshold.
    #[must_use]
    pub const fn threshold(&self) -> usize {
        self.threshold
    }

    /// Returns whether the paywall is visible.
    #[must_use]
    pub const fn is_shown(&self) -> bool {
        self.shown
    }

    /// Feeds the current completed count and entitlement.
    pub const fn observe(&mut self, completed_count: usize, entitled: bool) -> PaywallSignal {
        let grew = completed_count > self.last_count;
        self.last_count = completed_count;
        if entitled {
            return self.hide();
        }
        if grew && completed_count >= self.threshold && !self.shown {
            self.shown = true;
            return PaywallSignal::Show;
        }
        PaywallSignal::Unchanged
    }

    /// Hides the paywall, for example after a purchase or restore.
    pub const fn hide(&mut self) -> PaywallSignal {
        if self.shown {
            self.shown = false;
            return PaywallSignal::Hide;
        }
        PaywallSignal::Unchanged
    }
}

impl Default for PaywallGate {
    fn default() -> Self {
        Self::new(PAYWALL_TRIGGER_COUNT)
    }
}
