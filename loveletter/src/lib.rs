pub use belief::*;
pub use cards::*;
pub use deck::*;
pub use diagnostics::*;
pub use errors::*;
pub use player_state::*;
pub use protocol::*;
pub use table::*;

#[cfg(test)]
mod arbitrary;
mod belief;
mod cards;
mod deck;
mod diagnostics;
mod errors;
mod player_state;
mod protocol;
mod table;
mod turn;
