//! Config providers.

use figment::{
    Error, Metadata, Profile, Provider,
    providers::{Env, Format, Toml},
    value::{Dict, Map, Value},
};
use std::path::{Path, PathBuf};

/// A convenience provider to retrieve a profile-nested toml file.
///
/// This will return an error if the env var is set but the file does not exist.
pub(crate) struct TomlFileProvider {
    pub env_var: Option<&'static str>,
    pub default: PathBuf,
    pub cache: Option<Result<Map<Profile, Dict>, Error>>,
}

impl TomlFileProvider {
    pub(crate) fn new(env_var: Option<&'static str>, default: impl Into<PathBuf>) -> Self {
        Self { env_var, default: default.into(), cache: None }
    }

    fn env_val(&self) -> Option<String> {
        self.env_var.and_then(Env::var)
    }

    fn file(&self) -> PathBuf {
        self.env_val().map(PathBuf::from).unwrap_or_else(|| self.default.clone())
    }

    fn is_missing(&self) -> bool {
        self.env_val().is_some_and(|file| !Path::new(&file).exists())
    }

    pub(crate) fn cached(mut self) -> Self {
        self.cache = Some(self.read());
        self
    }

    fn read(&self) -> Result<Map<Profile, Dict>, Error> {
        use serde::de::Error as _;
        if let (Some(file), Some(var)) = (self.env_val(), self.env_var)
            && !Path::new(&file).exists()
        {
            return Err(Error::custom(format!(
                "Config file `{file}` set in env var `{var}` does not exist"
            )));
        }
        let nested = Toml::file(self.file()).nested().data()?;
        Ok(unwrap_profiles(nested))
    }
}

impl Provider for TomlFileProvider {
    fn metadata(&self) -> Metadata {
        if self.is_missing() {
            Metadata::named("TOML file provider")
        } else {
            Toml::file(self.file()).nested().metadata()
        }
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        if let Some(cache) = self.cache.as_ref() { cache.clone() } else { self.read() }
    }
}

/// Turns
///
/// ```toml
/// [profile.ci]
/// network = "testnet"
/// ```
///
/// into a `ci` profile. Top-level tables other than `profile` are ignored.
fn unwrap_profiles(mut nested: Map<Profile, Dict>) -> Map<Profile, Dict> {
    let mut profiles = Map::new();
    let Some(root) = nested.remove(&Profile::const_new("profile")) else {
        return profiles;
    };
    for (name, value) in root {
        if let Value::Dict(_, dict) = value {
            profiles.insert(Profile::new(&name), dict);
        } else {
            warn!(profile = %name, "ignoring non-table profile entry");
        }
    }
    profiles
}
