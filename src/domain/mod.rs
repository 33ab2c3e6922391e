//! Business domain types. Pure data structures with no actor-specific concerns.

pub mod cart;
pub mod menu;
pub mod notification;
pub mod order;
pub mod profile;

pub use cart::*;
pub use menu::*;
pub use notification::*;
pub use order::*;
pub use profile::*;
