mod bar;
mod position;

pub use bar::Bar;
pub use position::PositionSnapshot;
