use std::fmt;
use terrainview_common::FrameTime;

/// Boxed error returned by component hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Lifecycle stage that can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    LoadResources,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => f.write_str("init"),
            Self::LoadResources => f.write_str("load resources"),
        }
    }
}

/// Errors from driving the game loop.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("component `{component}` failed to {stage}: {source}")]
    Component {
        component: String,
        stage: Stage,
        #[source]
        source: BoxError,
    },
    #[error("game loop is not running")]
    NotRunning,
    #[error("game loop has already started")]
    AlreadyStarted,
}

/// A component driven by [`GameLoop`].
///
/// `C` is the shared context the application hands to every hook (GPU
/// handles, camera, input, statistics).
pub trait Renderable<C> {
    fn name(&self) -> &str;

    /// One-time setup before any resources are loaded.
    fn init(&mut self, _ctx: &mut C) -> Result<(), BoxError> {
        Ok(())
    }

    /// Load assets and create GPU resources.
    fn load_resources(&mut self, _ctx: &mut C) -> Result<(), BoxError> {
        Ok(())
    }

    fn update(&mut self, _ctx: &mut C, _time: FrameTime) {}

    fn draw(&mut self, _ctx: &mut C, _time: FrameTime) {}

    /// Release resources. Called at most once.
    fn unload(&mut self, _ctx: &mut C) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    Idle,
    Running,
    Stopped,
}

/// Explicit driver for a set of [`Renderable`] components.
///
/// Components run in registration order for `init`, `load_resources`,
/// `update` and `draw`, and in reverse order for `unload`.
pub struct GameLoop<C> {
    components: Vec<Box<dyn Renderable<C>>>,
    state: LoopState,
    initialized: usize,
    frames: u64,
}

impl<C> Default for GameLoop<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> GameLoop<C> {
    pub fn new() -> Self {
        Self {
            components: Vec::new(),
            state: LoopState::Idle,
            initialized: 0,
            frames: 0,
        }
    }

    /// Register a component. Only allowed before [`GameLoop::start`].
    pub fn add(&mut self, component: impl Renderable<C> + 'static) -> Result<(), LifecycleError> {
        if self.state != LoopState::Idle {
            return Err(LifecycleError::AlreadyStarted);
        }
        self.components.push(Box::new(component));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Frames run since [`GameLoop::start`].
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Initialize then load every component. On the first failure, components
    /// already initialized are unloaded and the loop stops.
    pub fn start(&mut self, ctx: &mut C) -> Result<(), LifecycleError> {
        if self.state != LoopState::Idle {
            return Err(LifecycleError::AlreadyStarted);
        }

        let result = self.run_startup(ctx);
        match result {
            Ok(()) => {
                self.state = LoopState::Running;
                tracing::info!("game loop started with {} components", self.components.len());
                Ok(())
            }
            Err(e) => {
                tracing::error!("{e}");
                self.state = LoopState::Running;
                self.shutdown(ctx);
                Err(e)
            }
        }
    }

    fn run_startup(&mut self, ctx: &mut C) -> Result<(), LifecycleError> {
        for component in &mut self.components {
            tracing::debug!("init {}", component.name());
            component
                .init(ctx)
                .map_err(|source| LifecycleError::Component {
                    component: component.name().to_string(),
                    stage: Stage::Init,
                    source,
                })?;
            self.initialized += 1;
        }
        for component in &mut self.components {
            tracing::debug!("load resources for {}", component.name());
            component
                .load_resources(ctx)
                .map_err(|source| LifecycleError::Component {
                    component: component.name().to_string(),
                    stage: Stage::LoadResources,
                    source,
                })?;
        }
        Ok(())
    }

    /// Run one frame: every `update`, then every `draw`.
    pub fn frame(&mut self, ctx: &mut C, time: FrameTime) -> Result<(), LifecycleError> {
        if self.state != LoopState::Running {
            return Err(LifecycleError::NotRunning);
        }
        for component in &mut self.components {
            component.update(ctx, time);
        }
        for component in &mut self.components {
            component.draw(ctx, time);
        }
        self.frames += 1;
        Ok(())
    }

    /// Unload initialized components in reverse order. Later calls do nothing.
    pub fn shutdown(&mut self, ctx: &mut C) {
        if self.state != LoopState::Running {
            return;
        }
        for component in self.components[..self.initialized].iter_mut().rev() {
            tracing::debug!("unload {}", component.name());
            component.unload(ctx);
        }
        self.initialized = 0;
        self.state = LoopState::Stopped;
        tracing::info!("game loop stopped after {} frames", self.frames);
    }
}
