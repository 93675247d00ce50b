use std::{
    fs::File,
    io::{self, Read},
    path::Path,
};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Module the launcher requires when no profile overrides it.
pub const DEFAULT_MODULE: &str = "flappy-bird.core";

/// Global binding the launcher dereferences when no profile overrides it.
pub const DEFAULT_BINDING: &str = "flappy-bird-game";

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
#[serde(tag = "profileVersion")]
pub enum LaunchProfile {
    #[serde(rename = "v1")]
    V1(LaunchProfileV1),
}

impl Default for LaunchProfile {
    fn default() -> Self {
        LaunchProfile::V1(LaunchProfileV1::default())
    }
}

impl LaunchProfile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, io::Error> {
        let path = path.as_ref();
        let mut file = File::open(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => {
                let mut file_contents = String::new();
                let _ = file.read_to_string(&mut file_contents)?;

                toml::from_str(&file_contents).map_err(io::Error::other)
            }
            Some("json") => serde_json::from_reader(file).map_err(io::Error::other),
            ext => Err(io::Error::other(format!(
                "\"{}\" is unsupported",
                ext.unwrap_or("no file extension")
            ))),
        }
    }

    pub fn module(&self) -> Option<&str> {
        match self {
            LaunchProfile::V1(v1) => v1.module.as_deref(),
        }
    }

    pub fn binding(&self) -> Option<&str> {
        match self {
            LaunchProfile::V1(v1) => v1.binding.as_deref(),
        }
    }

    pub fn window_title(&self) -> Option<&str> {
        match self {
            LaunchProfile::V1(v1) => v1.window_title.as_deref(),
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
pub struct LaunchProfileV1 {
    /// Module whose namespace exports the game binding.
    #[serde(default)]
    pub module: Option<String>,

    /// Name of the global binding holding the game provider.
    #[serde(default)]
    pub binding: Option<String>,

    /// Title for the application shell window.
    #[serde(default)]
    pub window_title: Option<String>,
}

/// Fully resolved launch target: profile fields folded over the hardcoded
/// defaults, later profiles overriding earlier ones field-by-field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaunchTarget {
    pub module: String,
    pub binding: String,
    pub window_title: Option<String>,
}

impl Default for LaunchTarget {
    fn default() -> Self {
        Self {
            module: DEFAULT_MODULE.to_owned(),
            binding: DEFAULT_BINDING.to_owned(),
            window_title: None,
        }
    }
}

impl LaunchTarget {
    pub fn from_profiles(profiles: &[LaunchProfile]) -> Self {
        profiles.iter().fold(Self::default(), |mut target, profile| {
            if let Some(module) = profile.module() {
                target.module = module.to_owned();
            }

            if let Some(binding) = profile.binding() {
                target.binding = binding.to_owned();
            }

            if let Some(title) = profile.window_title() {
                target.window_title = Some(title.to_owned());
            }

            target
        })
    }
}
