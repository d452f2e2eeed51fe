pub mod clock;
pub mod countdown;
pub mod enums;
pub mod history;
pub mod shopping;
pub mod status;

pub use clock::{Clock, SystemClock};
pub use countdown::Countdown;
pub use enums::{Signal, Tab, UiMode};
pub use history::History;
pub use shopping::{ShoppingItem, ShoppingList};
pub use status::{CountdownStatus, DurationParts};
