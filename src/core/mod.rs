// src/core/mod.rs

pub mod calendar;
pub mod levels;
pub mod sanitize;
pub mod skills;

pub use calendar::{Age, SeasonWeek};
pub use skills::{Skill, SkillMap};
