//! Built-in selection and replacement strategies: tournament and roulette
//! `SelectOne`/`SelectTwo` cursors, a `Counted` decorator that bounds an
//! otherwise-infinite cursor to a fixed number of picks per phase, and the
//! steady-state engine's one-at-a-time `Replace` policy.

pub mod counted;
pub mod roulette;
pub mod steady_state;
pub mod tournament;

pub use counted::Counted;
pub use roulette::{RouletteSelectOne, RouletteSelectTwo};
pub use steady_state::SteadyStateReplace;
pub use tournament::{TournamentSelectOne, TournamentSelectTwo};
