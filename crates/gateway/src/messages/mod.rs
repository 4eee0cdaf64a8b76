//! Wire message types

pub mod update;
