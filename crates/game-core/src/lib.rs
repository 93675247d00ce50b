//! The bundled `flappy-bird.core` module. Its namespace exports a single
//! global binding, `flappy-bird-game`, holding the provider for the root
//! game object.

use std::time::Duration;

use flappy_game_protocol::{Game, GameFactory};
use flappy_runtime::Runtime;
use tracing::{debug, info};

/// Name this module is registered under.
pub const MODULE: &str = "flappy-bird.core";

/// Name of the global binding holding the game provider.
pub const GAME_BINDING: &str = "flappy-bird-game";

/// Registers the module with the runtime. Loading is deferred until the
/// launcher requires it.
pub fn install(runtime: &Runtime) {
    runtime.register(MODULE, |ns| {
        ns.define(
            GAME_BINDING,
            GameFactory::new(|| Box::new(FlappyBirdGame::default())),
        );

        Ok(())
    });
}

#[derive(Debug, Default)]
pub struct FlappyBirdGame {
    frames: u64,
    viewport: (u32, u32),
    paused: bool,
}

impl Game for FlappyBirdGame {
    fn create(&mut self) {
        info!("flappy-bird game created");
    }

    fn resize(&mut self, width: u32, height: u32) {
        debug!(width, height, "viewport resized");
        self.viewport = (width, height);
    }

    fn render(&mut self, _dt: Duration) {
        if self.paused {
            return;
        }

        self.frames += 1;
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn resume(&mut self) {
        self.paused = false;
    }

    fn dispose(&mut self) {
        info!(frames = self.frames, "flappy-bird game disposed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_exposes_a_game_factory() {
        let runtime = Runtime::new();
        install(&runtime);

        runtime.require(MODULE).expect("module should load");
        let var = runtime.var(MODULE, GAME_BINDING).expect("binding exists");
        let value = var.deref();

        let factory = value
            .downcast_ref::<GameFactory>()
            .expect("binding should hold a game factory");
        let mut game = factory.instantiate();
        game.create();
        game.render(Duration::from_millis(16));
    }

    #[test]
    fn render_is_suspended_while_paused() {
        let mut game = FlappyBirdGame::default();
        game.create();
        game.render(Duration::from_millis(16));
        assert_eq!(game.frames, 1);

        game.pause();
        game.render(Duration::from_millis(16));
        assert_eq!(game.frames, 1);

        game.resume();
        game.render(Duration::from_millis(16));
        assert_eq!(game.frames, 2);
    }
}
