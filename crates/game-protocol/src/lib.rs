pub mod game;
pub mod profile;

pub use game::{Game, GameFactory, GameHandle};
