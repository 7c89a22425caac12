//! different utility modules used throughout the project
/// installs terminal and file loggers
pub mod logger;
/// draws a plot description into a png file
pub mod plots;
/// solver and request settings read from toml
pub mod settings;
