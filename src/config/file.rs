// src/config/file.rs
//
// Plain `key=value` config file. Unknown keys and unparsable values are
// ignored so a stale file never blocks a run; CLI flags override it.
use std::{fs, io, path::Path};

use super::options::{AppOptions, EntitySelector, ExportFormat};
use crate::engine::types::FacilityTier;

fn parse_bool(val: &str) -> Option<bool> {
    match val {
        "1" => Some(true),
        "0" => Some(false),
        v if v.eq_ignore_ascii_case("true") => Some(true),
        v if v.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

fn set<T: std::str::FromStr>(slot: &mut T, val: &str) {
    match val.parse::<T>() {
        Ok(v) => *slot = v,
        Err(_) => logw!("Config: ignoring bad value '{val}'"),
    }
}

pub fn load(path: &Path) -> AppOptions {
    if !path.exists() {
        return AppOptions::default();
    }
    let text = match fs::read_to_string(path) { Ok(t) => t, Err(_) => return AppOptions::default() };
    let opts = parse(&text);
    logf!("Config: loaded {}", path.display());
    opts
}

pub fn parse(text: &str) -> AppOptions {
    let mut cfg = AppOptions::default();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { continue; }
        let Some(eq) = line.find('=') else { continue };
        let key = line[..eq].trim();
        let val = line[eq + 1..].trim();
        let engine = &mut cfg.engine;
        match key {
            "weeks_per_season" => set(&mut engine.weeks_per_season, val),
            "band_width" => set(&mut engine.band_width, val),
            "fixed_floor" => set(&mut engine.fixed_floor, val),
            "tolerance" => set(&mut engine.tolerance, val),
            "taper_threshold" => set(&mut engine.taper_threshold, val),
            "taper_multiplier" => set(&mut engine.taper_multiplier, val),
            "origin_age_year" => set(&mut engine.origin_age_year, val),
            "origin_age_week" => set(&mut engine.origin_age_week, val),
            "adapt_tier" => if let Some(b) = parse_bool(val) { engine.adapt_tier = b },
            "archive" => cfg.select.archive = val.into(),
            "yields" => cfg.select.yields = val.into(),
            "tier" => match FacilityTier::parse(val) {
                Some(t) => cfg.select.tier = t,
                None => logw!("Config: unknown tier '{val}'"),
            },
            "workers" => set(&mut cfg.select.workers, val),
            "players" => {
                let ids: Vec<u64> = val.split(',')
                    .filter_map(|s| s.trim().parse::<u64>().ok())
                    .collect();
                cfg.select.entities = if ids.is_empty() { EntitySelector::All } else { EntitySelector::Ids(ids) };
            }
            "format" => if let Some(f) = ExportFormat::parse(val) { cfg.export.format = f },
            "out_dir" => cfg.export.out_dir = val.into(),
            "include_headers" => if let Some(b) = parse_bool(val) { cfg.export.include_headers = b },
            "ledger" => if let Some(b) = parse_bool(val) { cfg.export.ledger = b },
            _ => logd!("Config: unknown key '{key}'"),
        }
    }
    cfg
}

pub fn save(path: &Path, cfg: &AppOptions) -> io::Result<()> {
    let e = &cfg.engine;
    let mut s = s!();
    s.push_str(&format!("weeks_per_season={}\n", e.weeks_per_season));
    s.push_str(&format!("band_width={}\n", e.band_width));
    s.push_str(&format!("fixed_floor={}\n", e.fixed_floor));
    s.push_str(&format!("tolerance={}\n", e.tolerance));
    s.push_str(&format!("taper_threshold={}\n", e.taper_threshold));
    s.push_str(&format!("taper_multiplier={}\n", e.taper_multiplier));
    s.push_str(&format!("origin_age_year={}\n", e.origin_age_year));
    s.push_str(&format!("origin_age_week={}\n", e.origin_age_week));
    s.push_str(&format!("adapt_tier={}\n", if e.adapt_tier {1}else{0}));
    s.push_str(&format!("archive={}\n", cfg.select.archive.display()));
    s.push_str(&format!("yields={}\n", cfg.select.yields.display()));
    s.push_str(&format!("tier={}\n", cfg.select.tier.label()));
    s.push_str(&format!("workers={}\n", cfg.select.workers));
    if let EntitySelector::Ids(ids) = &cfg.select.entities {
        let list = ids.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(",");
        s.push_str(&format!("players={}\n", list));
    }
    s.push_str(&format!("format={}\n", cfg.export.format.ext()));
    s.push_str(&format!("out_dir={}\n", cfg.export.out_dir.display()));
    s.push_str(&format!("include_headers={}\n", if cfg.export.include_headers {1}else{0}));
    s.push_str(&format!("ledger={}\n", if cfg.export.ledger {1}else{0}));
    fs::write(path, s)
}
