#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
pub mod configs;
pub mod descriptor;
pub mod document;
pub mod downloads;
pub mod launch;
pub mod launcher;
pub mod manifest;
pub mod repository;
pub mod resolver;

pub mod error;
pub mod utils;

pub mod fs;
pub mod game_paths;
pub mod http;
pub mod identity;
pub mod platform;

pub mod consts;

pub use consts::*;
pub use error::Error;
pub use launcher::Launcher;
