use std::{fmt, sync::Arc, time::Duration};

/// Root interface of a launchable game object.
///
/// The application shell owns the object after handoff and calls these in
/// platform order: [`Game::create`] once when the surface is ready, then
/// [`Game::render`] every frame until shutdown.
pub trait Game: Send {
    /// Called once when the game is wired into a live application shell.
    fn create(&mut self);

    /// Called whenever the shell surface changes size, and once right after
    /// [`Game::create`] if a size is already known.
    fn resize(&mut self, width: u32, height: u32) {
        let _ = (width, height);
    }

    /// Called every frame with the time elapsed since the previous frame.
    fn render(&mut self, dt: Duration);

    /// Called when the platform backgrounds the application.
    fn pause(&mut self) {}

    /// Called when the platform foregrounds the application again.
    fn resume(&mut self) {}

    /// Called once when the shell shuts down a created game.
    fn dispose(&mut self) {}
}

/// Owned reference to the root game object, relinquished to the shell on
/// `initialize`.
pub type GameHandle = Box<dyn Game>;

/// Provider for game objects, stored in a module's global binding.
///
/// Modules publish a `GameFactory` rather than a live game object so that
/// every launch gets a fresh instance. Being a concrete type, it is also the
/// downcast target when the launcher coerces a binding value to the game
/// interface.
#[derive(Clone)]
pub struct GameFactory {
    constructor: Arc<dyn Fn() -> GameHandle + Send + Sync>,
}

impl GameFactory {
    pub fn new<F>(constructor: F) -> Self
    where
        F: Fn() -> GameHandle + Send + Sync + 'static,
    {
        Self {
            constructor: Arc::new(constructor),
        }
    }

    /// Constructs a new game object.
    pub fn instantiate(&self) -> GameHandle {
        (self.constructor)()
    }
}

impl fmt::Debug for GameFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameFactory").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{AtomicU32, Ordering},
        time::Duration,
    };

    use super::*;

    #[derive(Default)]
    struct NullGame;

    impl Game for NullGame {
        fn create(&mut self) {}

        fn render(&mut self, _dt: Duration) {}
    }

    #[test]
    fn factory_constructs_a_game_per_call() {
        static INSTANTIATIONS: AtomicU32 = AtomicU32::new(0);

        let factory = GameFactory::new(|| {
            INSTANTIATIONS.fetch_add(1, Ordering::SeqCst);
            Box::new(NullGame)
        });

        let mut first = factory.instantiate();
        first.create();
        first.render(Duration::ZERO);
        let _second = factory.instantiate();

        assert_eq!(INSTANTIATIONS.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn factory_is_a_downcast_target() {
        use std::any::Any;

        let factory = GameFactory::new(|| Box::new(NullGame::default()));
        let value: std::sync::Arc<dyn Any + Send + Sync> = std::sync::Arc::new(factory);

        assert!(value.downcast_ref::<GameFactory>().is_some());
        assert!(value.downcast_ref::<u32>().is_none());
    }
}
