use std::sync::Arc;

use crate::config::AppConfig;
use crate::document::{CommandRunner, LatexLessonGenerator, LatexRenderEngine, SystemRunner};
use crate::lesson::LessonValidator;

/// Read-only state shared by all workers.
pub struct AppState {
    pub config: AppConfig,
    pub validator: LessonValidator,
    pub generator: LatexLessonGenerator,
    pub engine: LatexRenderEngine,
}

impl AppState {
    /// State that runs real compiler processes.
    pub fn new(config: AppConfig) -> Self {
        Self::with_runner(config, Arc::new(SystemRunner))
    }

    pub fn with_runner(config: AppConfig, runner: Arc<dyn CommandRunner>) -> Self {
        let engine = LatexRenderEngine::new(config.compilers.clone(), runner)
            .with_timeouts(config.probe_timeout, config.run_timeout);

        Self {
            validator: LessonValidator::new(config.max_exercises),
            generator: LatexLessonGenerator::new(),
            engine,
            config,
        }
    }
}
