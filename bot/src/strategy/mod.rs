pub mod default;
pub mod random;

pub use default::DefaultStrategy;
pub use random::RandomStrategy;
