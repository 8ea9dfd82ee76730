// src/config/consts.rs

// Game calendar
pub const WEEKS_PER_SEASON: u32 = 15;
pub const ORIGIN_AGE_YEAR: u32 = 16; // youngest recruitable age
pub const ORIGIN_AGE_WEEK: u32 = 0;

// Skill scale
pub const N_SKILLS: usize = 7;
pub const BAND_WIDTH: i32 = 1000;
pub const SUBLEVEL_MAX: i32 = BAND_WIDTH - 1; // also the "not yet bounded" sentinel

// Rating consistency check
pub const FIXED_FLOOR: i32 = 25;
pub const TOLERANCE: f64 = 0.15;

// Diminishing returns near the skill cap
pub const TAPER_THRESHOLD: i32 = 10_000;
pub const TAPER_MULTIPLIER: f64 = 0.85;

// Local store
pub const LOG_FILE: &str = ".store/tracker.log";
pub const CONFIG_FILE: &str = "skill_tracker.cfg";
pub const DEFAULT_ARCHIVE: &str = "data/archive.csv";
pub const DEFAULT_YIELDS: &str = "data/training_db.csv";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const ESTIMATES_STEM: &str = "estimates";
pub const LEDGER_STEM: &str = "ledger";

// Concurrency
pub const WORKERS: usize = 4;
