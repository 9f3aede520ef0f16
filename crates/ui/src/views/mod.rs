mod egzaminator;
mod home;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use egzaminator::EgzaminatorView;
pub use home::SelectorView;
pub use state::{view_state_from_resource, ViewState};
