pub mod american_odds;
pub mod margins;
pub mod model;

pub use american_odds::prob_to_american;
pub use model::{calculate_odds, ModelParams};
