use flappy_game_protocol::{profile::LaunchTarget, GameFactory, GameHandle};
use flappy_runtime::{Runtime, RuntimeError};
use flappy_shell::{AppShell, Lifecycle, SavedState, ShellControl};
use thiserror::Error;
use tracing::{error, info};

/// Failure reasons for the module-to-game resolution step.
#[derive(Debug, Error)]
pub enum InitError {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("binding \"{binding}\" in module \"{module}\" does not hold a game provider")]
    InterfaceMismatch { module: String, binding: String },
}

/// Bridges the platform creation callback to a dynamically resolved game
/// object.
///
/// On creation: run the framework's base hook, require the target module,
/// dereference the game binding, coerce it to a provider, and hand a fresh
/// game object to the shell. Any failure along the way is logged and
/// absorbed; the shell then stays up with no game installed.
pub struct GameBootstrap {
    runtime: Runtime,
    target: LaunchTarget,
}

impl GameBootstrap {
    pub fn new(runtime: Runtime, target: LaunchTarget) -> Self {
        Self { runtime, target }
    }

    /// require → binding lookup → interface coercion → instantiation.
    fn resolve(&self) -> Result<GameHandle, InitError> {
        let LaunchTarget {
            module, binding, ..
        } = &self.target;

        self.runtime.require(module)?;

        let var = self.runtime.var(module, binding)?;
        let value = var.deref();

        let factory =
            value
                .downcast_ref::<GameFactory>()
                .ok_or_else(|| InitError::InterfaceMismatch {
                    module: module.clone(),
                    binding: binding.clone(),
                })?;

        Ok(factory.instantiate())
    }

    /// Runs the full creation sequence against `shell`. Never fails: a
    /// bootstrap error leaves the shell created but empty.
    pub fn bootstrap<S: ShellControl>(&mut self, shell: &mut S, saved_state: Option<&SavedState>) {
        shell.create(saved_state);

        match self.resolve() {
            Ok(game) => {
                info!(module = %self.target.module, "game resolved, handing off to shell");
                shell.initialize(game);
            }
            Err(error) => {
                error!(
                    %error,
                    module = %self.target.module,
                    binding = %self.target.binding,
                    "game bootstrap failed, shell left without a game"
                );
            }
        }
    }
}

impl Lifecycle for GameBootstrap {
    fn on_create(&mut self, shell: &mut AppShell, saved_state: Option<&SavedState>) {
        self.bootstrap(shell, saved_state);
    }
}
