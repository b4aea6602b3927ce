pub mod spring;

pub use spring::{natural_period, restoring_force, stability_limit};
