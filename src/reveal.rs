// One-shot scroll reveal: a section is marked revealed the first time it
// becomes visible and stays that way. The browser side feeds it from an
// IntersectionObserver (see `web::ScrollReveal`).

pub const DEFAULT_THRESHOLD: f64 = 0.1;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealState {
    // No target to watch yet, or it was absent at setup
    Unarmed,
    Armed,
    Revealed,
    Detached,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VisibilityEntry {
    pub is_intersecting: bool,
    // Visible fraction of the target, 0.0 to 1.0
    pub ratio: f64,
}

#[derive(Debug)]
pub struct RevealTrigger {
    threshold: f64,
    state: RevealState,
    revealed: bool,
}

impl RevealTrigger {
    pub fn new(threshold: f64) -> Self {
        RevealTrigger {
            threshold: threshold.max(0.0).min(1.0),
            state: RevealState::Unarmed,
            revealed: false,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    // Arms the trigger if there is something to observe. An absent target
    // leaves it unarmed for good; that is not an error.
    pub fn arm(&mut self, target_present: bool) -> bool {
        if target_present && self.state == RevealState::Unarmed {
            self.state = RevealState::Armed;
        }
        self.state == RevealState::Armed
    }

    // Returns true only for the entry that reveals the region.
    pub fn on_visibility(&mut self, entry: VisibilityEntry) -> bool {
        if self.state != RevealState::Armed {
            return false;
        }
        if entry.is_intersecting || (entry.ratio > 0.0 && entry.ratio >= self.threshold) {
            self.state = RevealState::Revealed;
            self.revealed = true;
            return true;
        }
        false
    }

    // Stops observing. The revealed flag is kept.
    pub fn detach(&mut self) {
        self.state = RevealState::Detached;
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }
}

impl Default for RevealTrigger {
    fn default() -> Self {
        RevealTrigger::new(DEFAULT_THRESHOLD)
    }
}
