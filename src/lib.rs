//! city-discussion: city news headlines and summarized Reddit discussion, hexagonal layout.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
