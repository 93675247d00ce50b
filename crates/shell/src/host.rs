use std::time::Instant;

use thiserror::Error;
use tracing::{debug, error, info};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes},
};

use crate::app::{AppShell, Lifecycle, SavedState};

#[derive(Debug, Error)]
pub enum HostError {
    #[error("event loop creation failed")]
    EventLoopCreation(#[source] winit::error::EventLoopError),

    #[error("event loop terminated abnormally")]
    EventLoopExecution(#[source] winit::error::EventLoopError),
}

/// Drives the [`AppShell`] from the OS event loop.
///
/// The platform creation callback is dispatched exactly once, on the first
/// `resumed` event, before the window exists; afterwards window events are
/// forwarded to the shell. Everything runs on the main thread.
pub struct ShellHost<L: Lifecycle> {
    shell: AppShell,
    listener: L,
    saved_state: Option<SavedState>,
    window: Option<Window>,
    dispatched: bool,
    last_frame: Option<Instant>,
}

impl<L: Lifecycle> ShellHost<L> {
    pub fn new(shell: AppShell, listener: L, saved_state: Option<SavedState>) -> Self {
        Self {
            shell,
            listener,
            saved_state,
            window: None,
            dispatched: false,
            last_frame: None,
        }
    }

    /// Runs the event loop until the window is closed.
    pub fn run(mut self) -> Result<(), HostError> {
        let event_loop = EventLoop::new().map_err(HostError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(HostError::EventLoopExecution)
    }
}

impl<L: Lifecycle> ApplicationHandler for ShellHost<L> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if !self.dispatched {
            self.dispatched = true;

            let saved_state = self.saved_state.take();
            self.listener.on_create(&mut self.shell, saved_state.as_ref());
        }

        if self.window.is_some() {
            debug!("window already exists, resuming");
            self.shell.resume();
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.shell.title())
            .with_inner_size(LogicalSize::new(480, 800));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    width = window.inner_size().width,
                    height = window.inner_size().height,
                    "window created"
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(error) => {
                error!(%error, "window creation failed");
                event_loop.exit();
            }
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        debug!("application suspended");
        self.shell.pause();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("window close requested");
                self.shell.shutdown();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                self.shell.resize(size.width, size.height);
            }

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = self
                    .last_frame
                    .map(|last| now.duration_since(last))
                    .unwrap_or_default();
                self.last_frame = Some(now);

                self.shell.tick(dt);

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}
