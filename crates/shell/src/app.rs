use std::time::Duration;

use flappy_game_protocol::GameHandle;
use serde_derive::{Deserialize, Serialize};
use tracing::{debug, info};

/// Opaque platform-provided state blob. Absent on a first launch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SavedState(Vec<u8>);

impl SavedState {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The narrow surface of the application framework a launcher needs: the
/// base creation hook and the game handoff. Split out as a trait so launch
/// sequences can be exercised against a recording shell in tests.
pub trait ShellControl {
    /// Base creation hook of the application framework. A lifecycle
    /// implementation must call this first, unconditionally, on every
    /// creation callback.
    fn create(&mut self, saved_state: Option<&SavedState>);

    /// Hands a game object to the framework, wiring it into the frame loop.
    fn initialize(&mut self, game: GameHandle);

    fn was_created(&self) -> bool;

    fn has_game(&self) -> bool;
}

/// Inbound platform lifecycle boundary. The host invokes this exactly once,
/// when the platform delivers its application-created event.
///
/// The callback returns nothing and must not panic: failures are expected to
/// be absorbed and logged by the implementation.
pub trait Lifecycle {
    fn on_create(&mut self, shell: &mut AppShell, saved_state: Option<&SavedState>);
}

/// The application framework singleton.
///
/// Created once per process, handed to the [`Lifecycle`] callback, then
/// driven by the host: [`AppShell::tick`] per frame, [`AppShell::resize`] on
/// surface changes, [`AppShell::pause`]/[`AppShell::resume`] across
/// background transitions.
pub struct AppShell {
    title: String,
    created: bool,
    saved_state: Option<SavedState>,
    game: Option<GameHandle>,
    game_created: bool,
    surface_size: Option<(u32, u32)>,
}

impl AppShell {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            created: false,
            saved_state: None,
            game: None,
            game_created: false,
            surface_size: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn saved_state(&self) -> Option<&SavedState> {
        self.saved_state.as_ref()
    }

    /// Advances the installed game by one frame. The first tick after a
    /// handoff runs `create` (and `resize`, if a surface size is known)
    /// before the first `render`. Without a game this is a no-op: the shell
    /// stays up, blank.
    pub fn tick(&mut self, dt: Duration) {
        let Some(game) = &mut self.game else {
            return;
        };

        if !self.game_created {
            game.create();
            self.game_created = true;

            if let Some((width, height)) = self.surface_size {
                game.resize(width, height);
            }
        }

        game.render(dt);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface_size = Some((width, height));

        if let Some(game) = &mut self.game {
            if self.game_created {
                game.resize(width, height);
            }
        }
    }

    pub fn pause(&mut self) {
        if let Some(game) = &mut self.game {
            if self.game_created {
                game.pause();
            }
        }
    }

    pub fn resume(&mut self) {
        if let Some(game) = &mut self.game {
            if self.game_created {
                game.resume();
            }
        }
    }

    /// Tears down the installed game, disposing it if it was ever created.
    pub fn shutdown(&mut self) {
        if let Some(mut game) = self.game.take() {
            if self.game_created {
                game.dispose();
            }

            self.game_created = false;
            info!("game removed from application shell");
        }
    }
}

impl ShellControl for AppShell {
    fn create(&mut self, saved_state: Option<&SavedState>) {
        if self.created {
            debug!("application shell re-created");
        }

        self.created = true;
        self.saved_state = saved_state.cloned();
        info!(restored = saved_state.is_some(), "application shell created");
    }

    fn initialize(&mut self, game: GameHandle) {
        if self.game.is_some() {
            debug!("replacing previously installed game");
        }

        self.game = Some(game);
        self.game_created = false;
        info!("game installed into application shell");
    }

    fn was_created(&self) -> bool {
        self.created
    }

    fn has_game(&self) -> bool {
        self.game.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicU32, Ordering},
        Arc,
    };

    use flappy_game_protocol::Game;

    use super::*;

    #[derive(Clone, Default)]
    struct Counters {
        creates: Arc<AtomicU32>,
        resizes: Arc<AtomicU32>,
        renders: Arc<AtomicU32>,
        pauses: Arc<AtomicU32>,
        disposes: Arc<AtomicU32>,
    }

    struct ProbeGame(Counters);

    impl Game for ProbeGame {
        fn create(&mut self) {
            self.0.creates.fetch_add(1, Ordering::SeqCst);
        }

        fn resize(&mut self, _width: u32, _height: u32) {
            self.0.resizes.fetch_add(1, Ordering::SeqCst);
        }

        fn render(&mut self, _dt: Duration) {
            self.0.renders.fetch_add(1, Ordering::SeqCst);
        }

        fn pause(&mut self) {
            self.0.pauses.fetch_add(1, Ordering::SeqCst);
        }

        fn dispose(&mut self) {
            self.0.disposes.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn create_records_saved_state() {
        let mut shell = AppShell::new("test");
        let state = SavedState::new(vec![1, 2, 3]);

        shell.create(Some(&state));

        assert!(shell.was_created());
        assert_eq!(shell.saved_state(), Some(&state));
    }

    #[test]
    fn create_without_saved_state() {
        let mut shell = AppShell::new("test");

        shell.create(None);

        assert!(shell.was_created());
        assert!(shell.saved_state().is_none());
    }

    #[test]
    fn tick_without_game_is_a_noop() {
        let mut shell = AppShell::new("test");
        shell.create(None);

        shell.tick(Duration::from_millis(16));
    }

    #[test]
    fn first_tick_creates_then_renders() {
        let counters = Counters::default();
        let mut shell = AppShell::new("test");
        shell.create(None);
        shell.initialize(Box::new(ProbeGame(counters.clone())));

        assert_eq!(counters.creates.load(Ordering::SeqCst), 0);

        shell.tick(Duration::from_millis(16));
        shell.tick(Duration::from_millis(16));

        assert_eq!(counters.creates.load(Ordering::SeqCst), 1);
        assert_eq!(counters.renders.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn known_surface_size_is_forwarded_on_create() {
        let counters = Counters::default();
        let mut shell = AppShell::new("test");
        shell.create(None);
        shell.resize(480, 800);
        shell.initialize(Box::new(ProbeGame(counters.clone())));

        shell.tick(Duration::from_millis(16));

        assert_eq!(counters.resizes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn pause_is_not_forwarded_before_first_tick() {
        let counters = Counters::default();
        let mut shell = AppShell::new("test");
        shell.create(None);
        shell.initialize(Box::new(ProbeGame(counters.clone())));

        shell.pause();
        assert_eq!(counters.pauses.load(Ordering::SeqCst), 0);

        shell.tick(Duration::from_millis(16));
        shell.pause();
        assert_eq!(counters.pauses.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn shutdown_disposes_a_created_game_once() {
        let counters = Counters::default();
        let mut shell = AppShell::new("test");
        shell.create(None);
        shell.initialize(Box::new(ProbeGame(counters.clone())));
        shell.tick(Duration::from_millis(16));

        shell.shutdown();
        shell.shutdown();

        assert_eq!(counters.disposes.load(Ordering::SeqCst), 1);
        assert!(!shell.has_game());
    }

    #[test]
    fn shutdown_skips_dispose_for_an_uncreated_game() {
        let counters = Counters::default();
        let mut shell = AppShell::new("test");
        shell.create(None);
        shell.initialize(Box::new(ProbeGame(counters.clone())));

        shell.shutdown();

        assert_eq!(counters.disposes.load(Ordering::SeqCst), 0);
    }
}
