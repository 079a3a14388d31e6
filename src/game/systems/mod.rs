pub mod explosion;
pub mod monster_ai;
pub mod movement;
pub mod rules;

pub use explosion::*;
pub use monster_ai::*;
pub use movement::*;
pub use rules::*;
