//! Loading and saving armies

pub mod army_file;

pub use army_file::{parse_army, read_army, render_army, write_army};
