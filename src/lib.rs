// src/lib.rs
// #![allow(dead_code)]
// #![allow(unused)]

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;
pub mod engine;

pub mod csv;
pub mod file;
pub mod progress;
pub mod report;
pub mod runner;
pub mod source;
pub mod store;
