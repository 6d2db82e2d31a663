#![doc = include_str!("../readme.md")]
//
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::if_same_then_else)]

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod event {
    //!
    //! Event-handler traits and Keybindings.
    //!
    //! See [rat-event](https://docs.rs/rat-event/latest/rat_event/)
    //!
    pub use rat_event::*;

    pub use crate::picker::event::PickerOutcome;
    pub use crate::time::event::TimeOutcome;
}

/// Module for focus-handling functionality.
/// See [rat-focus](https://docs.rs/rat-focus)
pub mod focus {
    pub use rat_focus::{Focus, FocusBuilder, FocusFlag, HasFocus};
}

/// Trait for relocatable widgets.
/// See also [rat-reloc](https://docs.rs/rat-reloc/latest/rat_reloc/)
pub mod reloc {
    pub use rat_reloc::{relocate_area, relocate_areas, RelocatableState};
}

pub mod adapter;
pub mod constraint;
pub mod debounce;
pub mod grid;
pub mod locale;
pub mod picker;
pub mod selection;
pub mod time;
pub mod util;
pub mod view;

/// Errors of the date adapters.
///
/// None of these reach the widgets. The picker states ignore
/// unparseable input and keep their current value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PickerError {
    /// The format pattern contains something that can't be used.
    InvalidPattern(String),
    /// Text doesn't match the format pattern.
    InvalidInput(String),
    /// The fields don't make up a valid date in the calendar.
    InvalidDate(i32, u32, u32),
    /// Year outside the supported range of the calendar.
    OutOfRange(i32),
}

impl Display for PickerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Error for PickerError {}

mod _private {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct NonExhaustive;
}
