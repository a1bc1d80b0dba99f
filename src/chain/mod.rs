pub mod builder;
pub mod locator;
pub mod resolver;
pub mod segment_chain;
