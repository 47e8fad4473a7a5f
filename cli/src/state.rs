use discfx_core::{DiscEffects, EngineError, ItemRegistry, Settings, SimHost, TickReport};
use tokio::task::JoinHandle;

/// Engine plus the simulated server it reconciles against
pub struct AppState {
    pub settings: Settings,
    pub engine: DiscEffects,
    pub host: SimHost,
    /// Background `run` task; yields the number of passes it made
    pub runner: Option<JoinHandle<u64>>,
}

impl AppState {
    pub fn new(settings: Settings) -> Result<Self, EngineError> {
        let host = SimHost::new();
        let engine = DiscEffects::start(&settings, host.all_items())?;
        Ok(Self {
            settings,
            engine,
            host,
            runner: None,
        })
    }

    /// One scheduler pass, then let one interval of game time elapse
    pub fn pass(&mut self) -> TickReport {
        let report = self.engine.tick(&mut self.host);
        self.host.advance(self.engine.timing().tick_interval);
        // Nobody inspects the call journal in the REPL
        self.host.take_calls();
        report
    }

    pub fn is_running(&self) -> bool {
        self.runner.as_ref().is_some_and(|h| !h.is_finished())
    }
}
