use anyhow::{Context, Result, anyhow};
use directories::UserDirs;
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    env, fs,
    path::{Path, PathBuf},
};

use crate::actions::Action;
use crate::error::GestureError;
use crate::fingers::ThumbSide;
use crate::gestures::Gesture;

pub const CONFIG_DIR_ENV: &str = "GESTURECTL_CONFIG_DIR";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meta {
    pub name: Option<String>,
    #[serde(default)]
    pub allow_commands: bool,
}

/// Per-gesture debounce overrides, in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Cooldowns {
    pub clap: Option<f64>,
    pub thumbs_up: Option<f64>,
    pub wave: Option<f64>,
}

impl Cooldowns {
    pub fn get(&self, g: Gesture) -> Option<f64> {
        match g {
            Gesture::Clap => self.clap,
            Gesture::ThumbsUp => self.thumbs_up,
            Gesture::Wave => self.wave,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Pixels; a past inter-palm distance above this counts as "apart".
    pub far_threshold: f32,
    /// Pixels; the current distance must be below this to count as contact.
    pub close_threshold: f32,
    pub history_capacity: usize,
    pub wave_window_seconds: f64,
    pub wave_min_travel_px: f32,
    pub debounce_seconds: f64,
    pub thumb_outward: ThumbSide,
    pub cooldowns: Cooldowns,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            far_threshold: 200.0,
            close_threshold: 120.0,
            history_capacity: 10,
            wave_window_seconds: 1.0,
            wave_min_travel_px: 60.0,
            debounce_seconds: 0.5,
            thumb_outward: ThumbSide::Left,
            cooldowns: Cooldowns::default(),
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> std::result::Result<(), GestureError> {
        let bad = |msg: String| Err(GestureError::InvalidConfig(msg));

        if !(self.close_threshold.is_finite() && self.close_threshold > 0.0) {
            return bad(format!(
                "close_threshold must be positive, got {}",
                self.close_threshold
            ));
        }
        if !(self.far_threshold.is_finite() && self.far_threshold > self.close_threshold) {
            return bad(format!(
                "far_threshold ({}) must exceed close_threshold ({})",
                self.far_threshold, self.close_threshold
            ));
        }
        // one sample older than the two newest is needed for a clap
        if self.history_capacity < 3 {
            return bad(format!(
                "history_capacity must be at least 3, got {}",
                self.history_capacity
            ));
        }
        if !(self.wave_window_seconds.is_finite() && self.wave_window_seconds > 0.0) {
            return bad("wave_window_seconds must be positive".into());
        }
        if !(self.wave_min_travel_px.is_finite() && self.wave_min_travel_px > 0.0) {
            return bad("wave_min_travel_px must be positive".into());
        }
        for g in Gesture::ALL {
            let secs = self.cooldowns.get(g).unwrap_or(self.debounce_seconds);
            if !(secs.is_finite() && secs >= 0.0) {
                return bad(format!(
                    "cooldown for {g} must be a non-negative number, got {secs}"
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub meta: Meta,
    #[serde(default)]
    pub thresholds: Thresholds,
    /// Gesture name -> action string, e.g. `clap = "emit:circle"`.
    #[serde(default)]
    pub bindings: HashMap<String, String>,
}

impl Profile {
    pub fn from_toml_str(txt: &str) -> Result<Self> {
        let profile: Profile = toml::from_str(txt)?;
        validate_profile(&profile)?;
        Ok(profile)
    }

    pub fn action_for(&self, g: Gesture) -> Action {
        self.bindings
            .get(g.as_str())
            .and_then(|s| Action::parse(s).ok())
            .unwrap_or(Action::None)
    }
}

#[derive(Debug, Clone)]
pub struct ConfigState {
    pub active_name: String,
    pub profile: Profile,
    pub config_dir: PathBuf,
    pub profiles_dir: PathBuf,
    pub active_ptr: PathBuf,
}

fn config_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    let home = UserDirs::new()
        .ok_or_else(|| anyhow!("cannot locate home directory; set {CONFIG_DIR_ENV}"))?
        .home_dir()
        .to_path_buf();
    Ok(home.join(".config").join("gesturectl"))
}

fn default_profile_text() -> &'static str {
    include_str!("../profiles/default.toml")
}

impl ConfigState {
    pub fn load_or_install_default() -> Result<Self> {
        Self::open(&config_dir()?)
    }

    pub fn open(cfgdir: &Path) -> Result<Self> {
        let profdir = cfgdir.join("profiles");
        fs::create_dir_all(&profdir)
            .with_context(|| format!("failed to create {}", profdir.display()))?;

        let def_path = profdir.join("default.toml");
        if !def_path.exists() {
            fs::write(&def_path, default_profile_text())?;
            info!("installed default profile at {}", def_path.display());
        }

        let active_ptr = cfgdir.join("active");
        if !active_ptr.exists() {
            fs::write(&active_ptr, b"default")?;
        }

        let active_name = fs::read_to_string(&active_ptr)?.trim().to_string();
        let profile = load_profile(&profdir, &active_name)?;

        Ok(Self {
            active_name,
            profile,
            config_dir: cfgdir.to_path_buf(),
            profiles_dir: profdir,
            active_ptr,
        })
    }

    /// Load `name` for this session without touching the active pointer.
    pub fn select(&mut self, name: &str) -> Result<()> {
        self.profile = load_profile(&self.profiles_dir, name)?;
        self.active_name = name.to_string();
        Ok(())
    }

    pub fn set_active(&mut self, name: &str) -> Result<()> {
        let p = self.profiles_dir.join(format!("{name}.toml"));
        if !p.exists() {
            return Err(anyhow!("profile not found: {}", p.display()));
        }
        // validate before switching the pointer
        let profile = load_profile(&self.profiles_dir, name)?;
        fs::write(&self.active_ptr, name.as_bytes())?;
        self.active_name = name.to_string();
        self.profile = profile;
        Ok(())
    }

    pub fn list_profiles(&self) -> Vec<String> {
        let mut v = Vec::new();
        if let Ok(rd) = fs::read_dir(&self.profiles_dir) {
            for e in rd.flatten() {
                let path = e.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                        v.push(stem.to_string());
                    }
                }
            }
        }
        v.sort();
        v
    }

    pub fn report(&self) -> serde_json::Value {
        let bindings: serde_json::Map<_, _> = Gesture::ALL
            .iter()
            .map(|g| (g.to_string(), serde_json::json!(self.profile.action_for(*g).to_string())))
            .collect();
        serde_json::json!({
            "config_dir": self.config_dir,
            "active_profile": self.active_name,
            "allow_commands": self.profile.meta.allow_commands,
            "thresholds": self.profile.thresholds,
            "bindings": bindings,
        })
    }
}

fn load_profile(profiles_dir: &Path, name: &str) -> Result<Profile> {
    let path = profiles_dir.join(format!("{name}.toml"));
    let txt = fs::read_to_string(&path)
        .map_err(|e| anyhow!("failed to read {}: {e}", path.display()))?;
    Profile::from_toml_str(&txt).map_err(|e| anyhow!("failed to parse {}: {e}", path.display()))
}

fn validate_profile(p: &Profile) -> Result<()> {
    p.thresholds.validate()?;

    for (k, v) in &p.bindings {
        if Gesture::from_name(k).is_none() {
            return Err(anyhow!("unknown gesture in bindings: '{k}'"));
        }
        let action = Action::parse(v).map_err(|e| anyhow!("binding '{k}': {e}"))?;
        if matches!(action, Action::Command(_)) && !p.meta.allow_commands {
            return Err(anyhow!("binding '{k}' uses cmd: but allow_commands=false"));
        }
    }
    Ok(())
}
