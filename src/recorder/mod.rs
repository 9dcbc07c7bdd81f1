pub mod classifier;
pub mod clock;
pub mod input_event;
pub mod ledger;
pub mod pipeline;
pub mod selection;
pub mod session;
pub mod state;
pub mod types;
