pub mod random;

use crate::utils::{DefaultRandom, Environment, Random};
use std::sync::Arc;

pub fn create_test_random() -> Arc<dyn Random + Send + Sync> {
    Arc::new(DefaultRandom::new_repeatable(42))
}

pub fn create_test_environment() -> Environment {
    Environment::new_silent(create_test_random())
}
