//! App: configuration, shared state, and the three cooperative loops.
//!
//! [`AppState`] is everything the loops share: screens, key bindings,
//! focus/hover, the renderer, the theme and the queues of pending edits and
//! commands. It is synchronous and can be driven directly (the headless
//! [`Pilot`](crate::testing::Pilot) does exactly that).
//!
//! [`App::run`] puts the terminal into app mode and runs, inside one task:
//!
//! - **input**: waits for the next input event (bounded by
//!   `input_timeout`), routes it;
//! - **update**: ticks widgets and hooks on `tick_rate`, processes commands;
//! - **render**: waits until something changed, applies queued edits at the
//!   safe point, renders, writes the bytes.
//!
//! Stopping (via [`AppHandle::stop`], a `Quit` command, or a fatal error)
//! makes all three loops exit at their next wait; the terminal is restored
//! once all of them have returned.

use std::collections::VecDeque;
use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::{mpsc, watch, Mutex, Notify};
use tokio::time::{interval, sleep_until, timeout, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::dom::node::Node;
use crate::dom::ops::TreeOp;
use crate::dom::tree::{Dom, TreeError};
use crate::event::binding::KeyBindingRegistry;
use crate::event::input::InputEvent;
use crate::event::message::Command;
use crate::event::router::{InteractionState, RouteOutcome, Router};
use crate::event::source::{CrosstermSource, InputSource};
use crate::render::frame::Frame;
use crate::render::renderer::{RenderError, Renderer};
use crate::render::terminal::{CrosstermTerminal, TerminalGuard, TerminalMode};
use crate::screen::{ScreenEntry, ScreenError, ScreenRegistry};
use crate::theme::Theme;
use crate::widget::context::EventCtx;

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Optional app title.
    pub title: Option<String>,
    /// Upper bound on render passes per second.
    pub fps: u32,
    /// Update-loop cadence.
    pub tick_rate: Duration,
    /// Bound on a single input wait. Also how long a lone ESC is held back.
    pub input_timeout: Duration,
    /// Built-in theme name.
    pub theme: String,
    /// Enable mouse capture.
    pub mouse: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: None,
            fps: 60,
            tick_rate: Duration::from_millis(100),
            input_timeout: Duration::from_millis(50),
            theme: "dark".to_owned(),
            mouse: true,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn with_input_timeout(mut self, input_timeout: Duration) -> Self {
        self.input_timeout = input_timeout;
        self
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    pub fn with_mouse(mut self, mouse: bool) -> Self {
        self.mouse = mouse;
        self
    }

    /// Minimum time between two render passes.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}

// ---------------------------------------------------------------------------
// AppError
// ---------------------------------------------------------------------------

/// Errors that end [`App::run`].
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Screen(#[from] ScreenError),
    #[error("widget tree corrupted: {0}")]
    Tree(#[from] TreeError),
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// Per-tick hook over the active screen's tree.
pub type UpdateHook = Box<dyn FnMut(&mut Dom, &mut EventCtx) + Send>;
/// Hook for `Custom` commands, called with the command name.
pub type CommandHook = Box<dyn FnMut(&str, &mut Dom, &mut EventCtx) + Send>;

/// State shared by the app loops.
pub struct AppState {
    pub screens: ScreenRegistry,
    pub bindings: KeyBindingRegistry,
    pub interaction: InteractionState,
    renderer: Renderer,
    theme: Theme,
    pending_ops: Vec<TreeOp>,
    pending_commands: VecDeque<Command>,
    running: bool,
    dirty: bool,
    app_title: Option<String>,
    title_changed: bool,
    on_update: Option<UpdateHook>,
    on_command: Option<CommandHook>,
}

impl AppState {
    /// Fresh state with the default key bindings and the configured theme.
    ///
    /// The renderer starts at 0x0; call [`resize`](Self::resize) once the
    /// terminal size is known.
    pub fn new(config: &AppConfig) -> Self {
        let theme = Theme::builtin(&config.theme).unwrap_or_else(|| {
            warn!(theme = %config.theme, "unknown theme; using the default");
            Theme::default()
        });
        Self {
            screens: ScreenRegistry::new(),
            bindings: KeyBindingRegistry::with_defaults(),
            interaction: InteractionState::new(),
            renderer: Renderer::new(0, 0),
            theme,
            pending_ops: Vec::new(),
            pending_commands: VecDeque::new(),
            running: true,
            dirty: true,
            app_title: config.title.clone(),
            title_changed: false,
            on_update: None,
            on_command: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether a render pass is wanted.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn request_redraw(&mut self) {
        self.dirty = true;
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Switch theme. Takes effect on the next pass.
    pub fn set_theme(&mut self, theme: Theme) {
        info!(theme = %theme.name, "theme changed");
        self.theme = theme;
        self.dirty = true;
    }

    /// The frame as of the last render pass.
    pub fn frame(&self) -> &Frame {
        self.renderer.previous()
    }

    pub fn size(&self) -> (u16, u16) {
        self.renderer.size()
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        debug!(width, height, "resize");
        self.renderer.resize(width, height);
        self.dirty = true;
    }

    pub fn set_on_update(&mut self, hook: impl FnMut(&mut Dom, &mut EventCtx) + Send + 'static) {
        self.on_update = Some(Box::new(hook));
    }

    pub fn set_on_command(&mut self, hook: impl FnMut(&str, &mut Dom, &mut EventCtx) + Send + 'static) {
        self.on_command = Some(Box::new(hook));
    }

    /// Queue a command for [`process_commands`](Self::process_commands).
    pub fn post(&mut self, command: Command) {
        self.pending_commands.push_back(command);
    }

    pub fn has_pending_commands(&self) -> bool {
        !self.pending_commands.is_empty()
    }

    /// Request a screen switch, applied at the next safe point.
    pub fn show_screen(&mut self, name: &str) -> Result<(), ScreenError> {
        self.screens.request(name)?;
        self.dirty = true;
        Ok(())
    }

    /// Activate the first screen (if none is) and build the focus chain.
    pub fn start(&mut self) -> Result<(), ScreenError> {
        self.screens.ensure_active()?;
        if let Some(screen) = self.screens.active() {
            self.interaction.sync(&screen.dom);
        }
        self.dirty = true;
        self.title_changed = true;
        Ok(())
    }

    /// The window title: app title and active screen title, joined with
    /// `" - "` when both are set.
    pub fn window_title(&self) -> Option<String> {
        let screen = self.screens.active().and_then(|s| s.title.as_deref());
        match (self.app_title.as_deref(), screen) {
            (Some(app), Some(screen)) => Some(format!("{app} - {screen}")),
            (app, screen) => app.or(screen).map(str::to_owned),
        }
    }

    /// The window title if it may have changed since the last call.
    pub fn take_title_change(&mut self) -> Option<String> {
        if !std::mem::take(&mut self.title_changed) {
            return None;
        }
        self.window_title()
    }

    fn absorb(&mut self, mut ctx: EventCtx) {
        if ctx.needs_redraw() {
            self.dirty = true;
        }
        self.pending_ops.extend(ctx.take_ops());
        self.pending_commands.extend(ctx.take_commands());
    }

    /// Route one input event against the active screen.
    pub fn handle_input(&mut self, event: InputEvent) {
        let Some(screen) = self.screens.active_mut() else {
            debug!(?event, "no active screen; event dropped");
            return;
        };
        let mut ctx = EventCtx::new();
        let outcome = Router {
            dom: &mut screen.dom,
            spatial: &screen.spatial,
            bindings: &self.bindings,
            state: &mut self.interaction,
        }
        .route(&event, &mut ctx);
        if let RouteOutcome::Resized { width, height } = outcome {
            self.resize(width, height);
        }
        self.absorb(ctx);
    }

    /// One update tick: every shown widget's `on_tick`, then the update hook.
    pub fn tick(&mut self) {
        let Some(screen) = self.screens.active_mut() else {
            return;
        };
        let mut ctx = EventCtx::new();
        if let Some(root) = screen.dom.root() {
            for id in screen.dom.walk_depth_first(root) {
                if !screen.dom.is_shown(id) {
                    continue;
                }
                if let Some(data) = screen.dom.get_mut(id) {
                    ctx.set_node(Some(id));
                    data.widget.on_tick(&mut ctx);
                }
            }
            ctx.set_node(None);
        }
        if let Some(hook) = self.on_update.as_mut() {
            hook(&mut screen.dom, &mut ctx);
        }
        self.absorb(ctx);
    }

    /// Handle every queued command, including ones posted while handling.
    pub fn process_commands(&mut self) {
        while let Some(command) = self.pending_commands.pop_front() {
            debug!(command = command.name(), "command");
            match command {
                Command::Quit => {
                    info!("quit requested");
                    self.running = false;
                }
                Command::ShowScreen(name) => {
                    if let Err(err) = self.show_screen(&name) {
                        warn!(error = %err, "ignoring screen switch");
                    }
                }
                Command::FocusNext => {
                    self.interaction.focus.focus_next();
                    self.dirty = true;
                }
                Command::FocusPrevious => {
                    self.interaction.focus.focus_previous();
                    self.dirty = true;
                }
                Command::Refresh => {
                    self.renderer.invalidate();
                    self.dirty = true;
                }
                Command::Custom(name) => self.run_command_hook(&name),
            }
        }
    }

    fn run_command_hook(&mut self, name: &str) {
        let (Some(hook), Some(screen)) = (self.on_command.as_mut(), self.screens.active_mut()) else {
            debug!(command = name, "no command hook; command dropped");
            return;
        };
        let mut ctx = EventCtx::new();
        hook(name, &mut screen.dom, &mut ctx);
        self.absorb(ctx);
    }

    /// The safe point: apply queued tree edits and a pending screen switch.
    ///
    /// Edits naming nodes that no longer exist are dropped with a warning; a
    /// cycle is structural corruption and is returned as an error.
    pub fn settle(&mut self) -> Result<(), AppError> {
        let ops = std::mem::take(&mut self.pending_ops);
        let mut changed = !ops.is_empty();
        if let Some(screen) = self.screens.active_mut() {
            for op in ops {
                match screen.dom.apply(op) {
                    Ok(()) => {}
                    Err(err @ TreeError::Cycle { .. }) => return Err(err.into()),
                    Err(err) => warn!(error = %err, "dropping tree edit"),
                }
            }
        }
        match self.screens.apply_pending() {
            Ok(true) => {
                self.interaction.reset();
                self.title_changed = true;
                changed = true;
            }
            Ok(false) => {}
            Err(err) => warn!(error = %err, "screen switch failed"),
        }
        if changed {
            if let Some(screen) = self.screens.active() {
                self.interaction.sync(&screen.dom);
            }
            self.dirty = true;
        }
        Ok(())
    }

    /// Render the active screen if anything changed.
    ///
    /// Returns the bytes to write, or `None` when no pass ran or the pass
    /// was abandoned on a layout error (the terminal keeps the last frame).
    pub fn render(&mut self) -> Result<Option<Vec<u8>>, AppError> {
        if !self.dirty {
            return Ok(None);
        }
        self.dirty = false;
        let Some(screen) = self.screens.active_mut() else {
            return Ok(None);
        };
        match self.renderer.render(screen, &self.theme, &self.interaction) {
            Ok(rendered) => Ok(Some(rendered.bytes)),
            Err(RenderError::Layout(_)) => Ok(None),
            Err(RenderError::Io(err)) => Err(err.into()),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("screens", &self.screens)
            .field("active", &self.screens.active_name())
            .field("size", &self.renderer.size())
            .field("running", &self.running)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// AppHandle
// ---------------------------------------------------------------------------

/// Cloneable remote control for a running app.
#[derive(Debug, Clone)]
pub struct AppHandle {
    shutdown: Arc<watch::Sender<bool>>,
    commands: mpsc::UnboundedSender<Command>,
    render: Arc<Notify>,
    update: Arc<Notify>,
}

impl AppHandle {
    fn new() -> (Self, mpsc::UnboundedReceiver<Command>) {
        let (shutdown, _) = watch::channel(false);
        let (commands, rx) = mpsc::unbounded_channel();
        let handle = Self {
            shutdown: Arc::new(shutdown),
            commands,
            render: Arc::new(Notify::new()),
            update: Arc::new(Notify::new()),
        };
        (handle, rx)
    }

    /// Ask every loop to exit at its next wait.
    pub fn stop(&self) {
        if !self.shutdown.send_replace(true) {
            info!("app stopping");
        }
    }

    pub fn is_stopped(&self) -> bool {
        *self.shutdown.borrow()
    }

    /// Send a command to the update loop.
    pub fn post(&self, command: Command) {
        if self.commands.send(command).is_err() {
            debug!("app gone; command dropped");
        }
    }

    pub fn show_screen(&self, name: impl Into<String>) {
        self.post(Command::ShowScreen(name.into()));
    }

    /// Wake the render loop.
    pub fn request_render(&self) {
        self.render.notify_one();
    }

    fn wake_update(&self) {
        self.update.notify_one();
    }

    /// Resolves once [`stop`](Self::stop) has been called.
    async fn stopped(&self) {
        let mut rx = self.shutdown.subscribe();
        // The sender lives as long as `self`, so this only ends on stop.
        let _ = rx.wait_for(|stopped| *stopped).await;
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// The application: configuration plus state, until [`run`](Self::run).
pub struct App {
    config: AppConfig,
    state: AppState,
    handle: AppHandle,
    commands: mpsc::UnboundedReceiver<Command>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let state = AppState::new(&config);
        let (handle, commands) = AppHandle::new();
        Self { config, state, handle, commands }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Register a screen. The first one registered is shown at startup.
    pub fn screen<F>(&mut self, name: impl Into<String>, factory: F) -> &mut ScreenEntry
    where
        F: Fn() -> Node + Send + 'static,
    {
        self.state.screens.register(name, factory)
    }

    pub fn bindings_mut(&mut self) -> &mut KeyBindingRegistry {
        &mut self.state.bindings
    }

    pub fn on_update(&mut self, hook: impl FnMut(&mut Dom, &mut EventCtx) + Send + 'static) -> &mut Self {
        self.state.set_on_update(hook);
        self
    }

    pub fn on_command(&mut self, hook: impl FnMut(&str, &mut Dom, &mut EventCtx) + Send + 'static) -> &mut Self {
        self.state.set_on_command(hook);
        self
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn handle(&self) -> AppHandle {
        self.handle.clone()
    }

    /// Run on the real terminal: crossterm events in, stdout out.
    pub async fn run_terminal(self) -> Result<(), AppError> {
        self.run(CrosstermSource::new(), tokio::io::stdout(), CrosstermTerminal::new()).await
    }

    /// Run until stopped.
    ///
    /// The terminal is put into app mode first and restored exactly once
    /// before this returns, whether the app quit normally or failed. The
    /// first loop error, if any, is returned.
    pub async fn run<I, W, T>(self, mut input: I, mut output: W, terminal: T) -> Result<(), AppError>
    where
        I: InputSource,
        W: AsyncWrite + Unpin + Send,
        T: TerminalMode,
    {
        let App { config, mut state, handle, mut commands } = self;
        let mut guard = TerminalGuard::acquire(terminal, config.mouse)?;
        info!(title = ?config.title, "app starting");

        let result: Result<(), AppError> = async {
            let (width, height) = guard.size()?;
            state.resize(width, height);
            state.start()?;

            let state = Mutex::new(state);
            let shared = Shared { state: &state, handle: &handle, config: &config };
            let (input_res, update_res, render_res) = tokio::join!(
                shared.guarded("input", shared.input_loop(&mut input)),
                shared.guarded("update", shared.update_loop(&mut commands)),
                shared.guarded("render", shared.render_loop(&mut output, &mut guard)),
            );
            input_res.and(update_res).and(render_res)
        }
        .await;

        let released = guard.release();
        info!(ok = result.is_ok(), "app stopped");
        result?;
        released?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Loops
// ---------------------------------------------------------------------------

struct Shared<'a> {
    state: &'a Mutex<AppState>,
    handle: &'a AppHandle,
    config: &'a AppConfig,
}

enum UpdateTrigger {
    Tick,
    Command(Command),
    Wake,
}

impl Shared<'_> {
    /// Stop every loop when one of them fails.
    async fn guarded(&self, name: &str, run: impl Future<Output = Result<(), AppError>>) -> Result<(), AppError> {
        let result = run.await;
        match &result {
            Ok(()) => debug!(loop_name = name, "loop exited"),
            Err(err) => {
                error!(loop_name = name, error = %err, "loop failed");
                self.handle.stop();
            }
        }
        result
    }

    async fn input_loop<I: InputSource>(&self, input: &mut I) -> Result<(), AppError> {
        loop {
            let waited = tokio::select! {
                _ = self.handle.stopped() => return Ok(()),
                waited = timeout(self.config.input_timeout, input.next_event()) => waited,
            };
            let events = match waited {
                Ok(Ok(Some(event))) => vec![event],
                Ok(Ok(None)) => {
                    return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input stream closed").into());
                }
                Ok(Err(err)) => return Err(err.into()),
                Err(_elapsed) => input.flush_pending(),
            };
            if events.is_empty() {
                continue;
            }

            let mut state = self.state.lock().await;
            for event in events {
                state.handle_input(event);
            }
            let (commands, dirty) = (state.has_pending_commands(), state.is_dirty());
            drop(state);
            if commands {
                self.handle.wake_update();
            }
            if dirty {
                self.handle.request_render();
            }
        }
    }

    async fn update_loop(&self, commands: &mut mpsc::UnboundedReceiver<Command>) -> Result<(), AppError> {
        let mut ticker = interval(self.config.tick_rate);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            let trigger = tokio::select! {
                _ = self.handle.stopped() => return Ok(()),
                _ = ticker.tick() => UpdateTrigger::Tick,
                Some(command) = commands.recv() => UpdateTrigger::Command(command),
                _ = self.handle.update.notified() => UpdateTrigger::Wake,
            };

            let mut state = self.state.lock().await;
            match trigger {
                UpdateTrigger::Tick => state.tick(),
                UpdateTrigger::Command(command) => state.post(command),
                UpdateTrigger::Wake => {}
            }
            state.process_commands();
            let (running, dirty) = (state.is_running(), state.is_dirty());
            drop(state);

            if !running {
                self.handle.stop();
                return Ok(());
            }
            if dirty {
                self.handle.request_render();
            }
        }
    }

    async fn render_loop<W, T>(&self, output: &mut W, guard: &mut TerminalGuard<T>) -> Result<(), AppError>
    where
        W: AsyncWrite + Unpin,
        T: TerminalMode,
    {
        let frame_interval = self.config.frame_interval();
        loop {
            let (bytes, title) = {
                let mut state = self.state.lock().await;
                state.settle()?;
                (state.render()?, state.take_title_change())
            };
            if let Some(title) = title {
                debug!(%title, "window title");
                guard.set_title(&title)?;
            }
            let rendered_at = Instant::now();
            if let Some(bytes) = bytes.filter(|b| !b.is_empty()) {
                output.write_all(&bytes).await?;
                output.flush().await?;
            }

            tokio::select! {
                _ = self.handle.stopped() => return Ok(()),
                _ = self.handle.render.notified() => {}
            }
            tokio::select! {
                _ = self.handle.stopped() => return Ok(()),
                _ = sleep_until(rendered_at + frame_interval) => {}
            }
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::input::Key;
    use crate::testing::HeadlessTerminal;
    use crate::widgets::{Button, Container, Label};

    fn state() -> AppState {
        let mut state = AppState::new(&AppConfig::default());
        state.screens.register("main", || {
            Node::new(Container::new())
                .child(Node::new(Button::new("One").action("one")).id("one"))
                .child(Node::new(Button::new("Two")).id("two"))
        });
        state.screens.register("other", || Node::new(Label::new("other")));
        state.resize(20, 4);
        state.start().unwrap();
        state
    }

    fn focused_id(state: &AppState) -> Option<String> {
        let screen = state.screens.active()?;
        let id = state.interaction.focused()?;
        screen.dom.get(id)?.id.clone()
    }

    #[test]
    fn config_defaults_and_builder() {
        let config = AppConfig::new();
        assert_eq!(config.fps, 60);
        assert_eq!(config.tick_rate, Duration::from_millis(100));
        assert_eq!(config.input_timeout, Duration::from_millis(50));
        assert_eq!(config.theme, "dark");
        assert!(config.mouse);

        let config = AppConfig::new().with_title("t").with_fps(0).with_theme("dracula").with_mouse(false);
        assert_eq!(config.title.as_deref(), Some("t"));
        assert_eq!(config.frame_interval(), Duration::from_secs(1));
        assert!(!config.mouse);
    }

    #[test]
    fn unknown_theme_falls_back() {
        let state = AppState::new(&AppConfig::new().with_theme("no-such-theme"));
        assert_eq!(state.theme().name, "dark");
    }

    #[test]
    fn quit_binding_stops() {
        let mut state = state();
        state.handle_input(InputEvent::key(Key::Char('q')));
        assert!(state.is_running());
        state.process_commands();
        assert!(!state.is_running());
    }

    #[test]
    fn tab_cycles_focus() {
        let mut state = state();
        state.handle_input(InputEvent::key(Key::Tab));
        state.process_commands();
        assert_eq!(focused_id(&state).as_deref(), Some("one"));
        state.handle_input(InputEvent::key(Key::Tab));
        state.process_commands();
        assert_eq!(focused_id(&state).as_deref(), Some("two"));
        state.handle_input(InputEvent::key(Key::Tab));
        state.process_commands();
        assert_eq!(focused_id(&state).as_deref(), Some("one"));
    }

    #[test]
    fn custom_commands_reach_the_hook() {
        let mut state = state();
        state.set_on_command(|name, _dom, ctx| {
            if name == "one" {
                ctx.queue(TreeOp::SetDisabled("two".into(), true));
            }
        });
        state.render().unwrap();
        // Click the first button (top half of the 20x4 area).
        state.handle_input(InputEvent::mouse(
            crate::event::input::MouseAction::Down(crate::event::input::MouseBtn::Left),
            1,
            0,
        ));
        state.process_commands();
        state.settle().unwrap();
        let dom = &state.screens.active().unwrap().dom;
        assert!(dom.get(dom.query_by_id("two").unwrap()).unwrap().disabled);
    }

    #[test]
    fn screen_switch_waits_for_settle() {
        let mut state = state();
        state.handle_input(InputEvent::key(Key::Tab));
        state.post(Command::ShowScreen("other".into()));
        state.process_commands();
        assert_eq!(state.screens.active_name(), Some("main"));
        state.settle().unwrap();
        assert_eq!(state.screens.active_name(), Some("other"));
        assert!(state.interaction.focused().is_none());
    }

    #[test]
    fn unknown_screen_command_is_ignored() {
        let mut state = state();
        state.post(Command::ShowScreen("nope".into()));
        state.process_commands();
        state.settle().unwrap();
        assert_eq!(state.screens.active_name(), Some("main"));
        assert!(state.is_running());
    }

    #[test]
    fn render_only_when_dirty() {
        let mut state = state();
        assert!(state.render().unwrap().is_some());
        assert!(state.render().unwrap().is_none());
        state.post(Command::Refresh);
        state.process_commands();
        let bytes = state.render().unwrap().unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn update_hook_runs_each_tick() {
        let mut state = state();
        state.set_on_update(|dom, ctx| {
            if let Some(button) = dom.widget_mut::<Button>("one") {
                button.set_label("tick");
                ctx.request_redraw();
            }
        });
        state.render().unwrap();
        state.tick();
        assert!(state.is_dirty());
        assert_eq!(state.screens.active().unwrap().dom.widget::<Button>("one").unwrap().label(), "tick");
    }

    #[test]
    fn window_title_follows_screen_switches() {
        let mut state = AppState::new(&AppConfig::new().with_title("demo"));
        state.screens.register("main", || Node::new(Label::new("main")));
        state.screens.register("help", || Node::new(Label::new("help"))).title("Help");
        state.start().unwrap();
        assert_eq!(state.take_title_change().as_deref(), Some("demo"));
        assert_eq!(state.take_title_change(), None);

        state.show_screen("help").unwrap();
        state.settle().unwrap();
        assert_eq!(state.take_title_change().as_deref(), Some("demo - Help"));

        let mut untitled = AppState::new(&AppConfig::new());
        untitled.screens.register("help", || Node::new(Label::new("help"))).title("Help");
        untitled.start().unwrap();
        assert_eq!(untitled.window_title().as_deref(), Some("Help"));
    }

    #[tokio::test]
    async fn run_sets_the_window_title() {
        let term = HeadlessTerminal::new(20, 4);
        let (_tx, input) = crate::event::source::ChannelSource::channel();
        let mut app = App::new(AppConfig::new().with_title("demo"));
        app.screen("main", || Node::new(Label::new("hello"))).title("Main");
        let handle = app.handle();

        let (result, ()) = tokio::join!(app.run(input, tokio::io::sink(), term.clone()), async {
            tokio::time::sleep(Duration::from_millis(30)).await;
            handle.stop();
        });
        result.unwrap();
        assert_eq!(term.titles(), vec!["demo - Main".to_owned()]);
    }

    #[tokio::test]
    async fn stop_restores_terminal_once() {
        let term = HeadlessTerminal::new(20, 4);
        let (_tx, input) = crate::event::source::ChannelSource::channel();
        let mut app = App::new(AppConfig::default());
        app.screen("main", || Node::new(Label::new("hello")));
        let handle = app.handle();
        let mut out = Vec::new();

        let (result, ()) = tokio::join!(app.run(input, &mut out, term.clone()), async {
            tokio::time::sleep(Duration::from_millis(30)).await;
            handle.stop();
            handle.stop();
        });
        result.unwrap();
        assert_eq!((term.enters(), term.leaves()), (1, 1));
        assert!(String::from_utf8_lossy(&out).contains("hello"));
    }

    #[tokio::test]
    async fn run_without_screens_fails_and_restores() {
        let term = HeadlessTerminal::new(20, 4);
        let (_tx, input) = crate::event::source::ChannelSource::channel();
        let err = App::new(AppConfig::default()).run(input, tokio::io::sink(), term.clone()).await.unwrap_err();
        assert!(matches!(err, AppError::Screen(ScreenError::NoScreens)));
        assert_eq!(term.leaves(), 1);
    }
}
