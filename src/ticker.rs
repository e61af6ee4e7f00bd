// Frame scheduling. The animator asks for the next frame at the end of every
// tick and cancels on teardown; what "next frame" means is up to the ticker
// (requestAnimationFrame in the browser, a counter in tests).

pub trait Ticker {
    fn schedule(&mut self);
    fn cancel(&mut self);
}

// Ticker driven by hand: records requests and cancellations so a test can
// step the animator one frame at a time.
#[derive(Default, Debug)]
pub struct ManualTicker {
    pub pending: bool,
    pub scheduled: u32,
    pub cancelled: u32,
}

impl ManualTicker {
    pub fn new() -> Self {
        ManualTicker::default()
    }

    // Consumes the pending frame request, if there is one
    pub fn fire(&mut self) -> bool {
        std::mem::replace(&mut self.pending, false)
    }
}

impl Ticker for ManualTicker {
    fn schedule(&mut self) {
        self.pending = true;
        self.scheduled += 1;
    }

    fn cancel(&mut self) {
        self.pending = false;
        self.cancelled += 1;
    }
}
