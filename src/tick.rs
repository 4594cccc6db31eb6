//! One-shot tick scheduling and the per-game tick driver.
//!
//! A driver arms a single tick, runs one update when it fires, then re-arms
//! itself. Reset cancels the armed tick before arming a fresh one, so a game
//! never has two tick streams.

use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;

use crate::games::Game;

/// Identifies one armed tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickHandle(u64);

pub trait Scheduler {
    /// Arm a one-shot tick `delay` from now.
    fn schedule(&mut self, delay: Duration) -> TickHandle;
    /// Disarm a tick. Unknown or already fired handles are ignored.
    fn cancel(&mut self, handle: TickHandle);
    /// Remove and return the earliest tick whose deadline has passed.
    fn poll_due(&mut self) -> Option<TickHandle>;
    /// Time until the earliest armed tick, `None` when nothing is armed.
    fn until_next(&self) -> Option<Duration>;
}

/// Wall-clock scheduler used by the terminal app.
#[derive(Debug, Default)]
pub struct RealtimeScheduler {
    next_id: u64,
    pending: Vec<(TickHandle, Instant)>,
}

impl RealtimeScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for RealtimeScheduler {
    fn schedule(&mut self, delay: Duration) -> TickHandle {
        let handle = TickHandle(self.next_id);
        self.next_id += 1;
        self.pending.push((handle, Instant::now() + delay));
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.pending.retain(|(h, _)| *h != handle);
    }

    fn poll_due(&mut self) -> Option<TickHandle> {
        let now = Instant::now();
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, (_, deadline))| *deadline <= now)
            .min_by_key(|(_, (_, deadline))| *deadline)
            .map(|(i, _)| i)?;
        Some(self.pending.remove(idx).0)
    }

    fn until_next(&self) -> Option<Duration> {
        let now = Instant::now();
        self.pending
            .iter()
            .map(|(_, deadline)| deadline.saturating_duration_since(now))
            .min()
    }
}

/// Virtual-clock scheduler: time only moves when `advance` is called.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    pending: Vec<(TickHandle, Duration)>,
}

#[cfg(test)]
impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    pub fn armed(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration) -> TickHandle {
        let handle = TickHandle(self.next_id);
        self.next_id += 1;
        self.pending.push((handle, self.now + delay));
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.pending.retain(|(h, _)| *h != handle);
    }

    fn poll_due(&mut self) -> Option<TickHandle> {
        let now = self.now;
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, (_, deadline))| *deadline <= now)
            .min_by_key(|(_, (_, deadline))| *deadline)
            .map(|(i, _)| i)?;
        Some(self.pending.remove(idx).0)
    }

    fn until_next(&self) -> Option<Duration> {
        self.pending
            .iter()
            .map(|(_, deadline)| deadline.saturating_sub(self.now))
            .min()
    }
}

/// Owns one game session and keeps exactly one tick armed for it while the
/// game is live.
pub struct TickDriver<G, S> {
    game: G,
    scheduler: S,
    delay: Duration,
    pending: Option<TickHandle>,
    ticks: u64,
}

impl<G: Game, S: Scheduler> TickDriver<G, S> {
    pub fn new(game: G, scheduler: S, delay: Duration) -> Self {
        Self {
            game,
            scheduler,
            delay,
            pending: None,
            ticks: 0,
        }
    }

    /// Arm the first tick. Any tick already armed is cancelled first.
    pub fn start(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
        self.pending = Some(self.scheduler.schedule(self.delay));
        log::info!("{}: tick loop started ({:?} per tick)", self.game.name(), self.delay);
    }

    /// Fire every tick that has come due. Returns true if the game advanced.
    pub fn pump(&mut self) -> bool {
        let mut fired = false;
        while let Some(handle) = self.scheduler.poll_due() {
            if self.pending != Some(handle) {
                log::trace!("{}: dropping stale tick {:?}", self.game.name(), handle);
                continue;
            }
            self.pending = None;
            self.fire();
            fired = true;
        }
        fired
    }

    fn fire(&mut self) {
        self.game.update();
        self.ticks += 1;
        if self.game.is_game_over() {
            log::info!(
                "{}: terminal state after {} ticks, loop stopped",
                self.game.name(),
                self.ticks
            );
        } else {
            self.pending = Some(self.scheduler.schedule(self.delay));
        }
    }

    /// Cancel the armed tick, restore the initial state and start over.
    pub fn reset(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
        self.game.reset();
        self.ticks = 0;
        log::info!("{}: reset", self.game.name());
        self.start();
    }

    pub fn handle_input(&mut self, key: KeyEvent) {
        self.game.handle_input(key);
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    #[cfg(test)]
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Whether a tick is currently armed.
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    pub fn until_next(&self) -> Option<Duration> {
        self.pending.and(self.scheduler.until_next())
    }
}

#[cfg(test)]
impl<G: Game> TickDriver<G, ManualScheduler> {
    /// Advance virtual time by one delay and fire what came due.
    pub fn step(&mut self) -> bool {
        self.scheduler.advance(self.delay);
        self.pump()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::snake::Snake;
    use crate::games::whack::Whack;

    fn whack_driver() -> TickDriver<Whack, ManualScheduler> {
        let mut driver = TickDriver::new(Whack::new(), ManualScheduler::new(), Duration::from_millis(1));
        driver.start();
        driver
    }

    #[test]
    fn test_start_arms_exactly_one_tick() {
        let mut driver = whack_driver();
        assert!(driver.is_armed());
        assert_eq!(driver.scheduler_mut().armed(), 1);
        driver.start();
        assert_eq!(driver.scheduler_mut().armed(), 1);
    }

    #[test]
    fn test_nothing_fires_before_deadline() {
        let mut driver = whack_driver();
        driver.scheduler_mut().advance(Duration::from_micros(500));
        assert!(!driver.pump());
        assert_eq!(driver.ticks(), 0);
    }

    #[test]
    fn test_one_update_per_firing() {
        let mut driver = whack_driver();
        for _ in 0..10 {
            assert!(driver.step());
        }
        assert_eq!(driver.ticks(), 10);
        assert_eq!(driver.game().bar().value(), 20);
        assert_eq!(driver.scheduler_mut().armed(), 1);
    }

    #[test]
    fn test_self_rescheduling_does_not_catch_up() {
        let mut driver = whack_driver();
        driver.scheduler_mut().advance(Duration::from_millis(50));
        driver.pump();
        assert_eq!(driver.ticks(), 1);
    }

    #[test]
    fn test_reset_leaves_single_loop() {
        let mut driver = whack_driver();
        for _ in 0..5 {
            driver.step();
        }
        driver.reset();
        driver.reset();
        assert_eq!(driver.scheduler_mut().armed(), 1);
        assert_eq!(driver.ticks(), 0);
        assert_eq!(driver.game().bar().value(), 0);
        // One tick per delay, not one per reset
        driver.step();
        assert_eq!(driver.ticks(), 1);
    }

    #[test]
    fn test_stale_handle_is_ignored() {
        let mut driver = whack_driver();
        let stray = driver.scheduler_mut().schedule(Duration::ZERO);
        driver.scheduler_mut().cancel(stray);
        let stray = driver.scheduler_mut().schedule(Duration::ZERO);
        assert_ne!(Some(stray), driver.pending);
        assert!(!driver.pump());
        assert_eq!(driver.ticks(), 0);
    }

    #[test]
    fn test_terminal_game_stops_rescheduling() {
        let mut driver = TickDriver::new(Snake::with_seed(3), ManualScheduler::new(), Duration::from_millis(75));
        driver.start();
        // Head starts at x=100 heading right on a 500 wide board
        for _ in 0..16 {
            driver.step();
        }
        assert!(driver.game().is_game_over());
        assert!(!driver.is_armed());
        assert_eq!(driver.scheduler_mut().armed(), 0);
        let ticks = driver.ticks();
        let body: Vec<_> = driver.game().body().collect();
        for _ in 0..5 {
            assert!(!driver.step());
        }
        assert_eq!(driver.ticks(), ticks);
        assert_eq!(driver.game().body().collect::<Vec<_>>(), body);

        driver.reset();
        assert!(driver.is_armed());
        assert!(!driver.game().is_game_over());
    }

    #[test]
    fn test_until_next_tracks_deadline() {
        let mut driver = TickDriver::new(Whack::new(), ManualScheduler::new(), Duration::from_millis(10));
        assert_eq!(driver.until_next(), None);
        driver.start();
        driver.scheduler_mut().advance(Duration::from_millis(4));
        assert_eq!(driver.until_next(), Some(Duration::from_millis(6)));
    }

    #[test]
    fn test_realtime_scheduler_fires_after_deadline() {
        let mut scheduler = RealtimeScheduler::new();
        let handle = scheduler.schedule(Duration::ZERO);
        let later = scheduler.schedule(Duration::from_secs(3600));
        assert_eq!(scheduler.poll_due(), Some(handle));
        assert_eq!(scheduler.poll_due(), None);
        assert!(scheduler.until_next().is_some());
        scheduler.cancel(later);
        assert_eq!(scheduler.until_next(), None);
    }
}
