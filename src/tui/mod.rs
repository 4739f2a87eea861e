pub mod draw;
pub mod events;
pub mod input;
pub mod layout;
pub mod run;
pub mod state;
pub mod views;

pub use draw::*;
pub use input::*;
pub use layout::*;
pub use run::run;
pub use state::*;
