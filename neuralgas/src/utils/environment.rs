use crate::utils::{DefaultRandom, Random};
use std::sync::Arc;

/// A logger type which is called with a message to be written somewhere.
pub type InfoLogger = Arc<dyn Fn(&str) + Send + Sync>;

/// Keeps track of environment specific information which influences simulation behavior.
#[derive(Clone)]
pub struct Environment {
    /// A wrapper on random generator.
    pub random: Arc<dyn Random + Send + Sync>,

    /// An information logger.
    pub logger: InfoLogger,
}

impl Environment {
    /// Creates an instance of `Environment`.
    pub fn new(random: Arc<dyn Random + Send + Sync>, logger: InfoLogger) -> Self {
        Self { random, logger }
    }

    /// Creates an instance of `Environment` with given random and a logger which ignores all messages.
    pub fn new_silent(random: Arc<dyn Random + Send + Sync>) -> Self {
        Self { random, logger: Arc::new(|_| {}) }
    }

    /// Writes a message using the logger.
    pub fn log(&self, message: &str) {
        (self.logger)(message)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new(Arc::new(DefaultRandom::default()), Arc::new(|msg| println!("{msg}")))
    }
}
