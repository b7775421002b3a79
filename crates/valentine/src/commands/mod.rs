pub mod config;
pub mod defaults;
pub mod link;
pub mod no_button;
pub mod validate;
pub mod view;

mod input;
