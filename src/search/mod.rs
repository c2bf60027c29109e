pub mod hill_climb;

pub use hill_climb::{FnObjective, Objective, evolve, mutate};
