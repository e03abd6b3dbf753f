pub mod snapshot;
pub mod trajectory;
