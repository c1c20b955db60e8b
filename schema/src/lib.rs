// Pokemon Battle Engine Schema - Shared type definitions
// Plain data types shared by the engine and its static data tables.

pub use battle_data::*;
pub use move_types::*;
pub use pokemon_types::*;
pub use species_data::*;

pub mod battle_data;
pub mod move_types;
pub mod pokemon_types;
pub mod species_data;
