//! Counter with favorite primes, built from composed reducers
//!
//! Three screens share one `AppState`: the counter, the "is this prime?"
//! modal, and the favorites list. Each has its own reducer over a view of the
//! state; `reducer::app_reducer` pulls them back and combines them.

pub mod action;
pub mod api;
pub mod command;
pub mod effect;
pub mod prime;
pub mod reducer;
pub mod state;
pub mod view;
