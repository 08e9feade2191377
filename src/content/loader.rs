//! Loader for RON content files at startup.

use ron::Options;
use std::fs;
use std::path::Path;

use super::data::*;
use super::registry::CharacterRegistry;
use super::validation::validate_characters;

pub const CHARACTERS_FILE: &str = "characters.ron";

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse the contents of a RON file containing a DataFile<T> wrapper.
pub fn parse_data_file<T>(file_name: &str, contents: &str) -> Result<Vec<T>, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let data: DataFile<T> = ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file_name.to_string(),
            message: format!("Parse error: {}", e),
        })?;

    Ok(data.items)
}

/// Load a RON file containing a DataFile<T> wrapper.
fn load_data_file<T>(path: &Path) -> Result<Vec<T>, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_data_file(&file_name, &contents)
}

/// Validate parsed characters and build the registry.
pub fn build_registry(
    file_name: &str,
    characters: Vec<CharacterDef>,
) -> Result<CharacterRegistry, Vec<ContentLoadError>> {
    let errors: Vec<ContentLoadError> = validate_characters(&characters)
        .into_iter()
        .map(|e| ContentLoadError {
            file: file_name.to_string(),
            message: e.to_string(),
        })
        .collect();
    if !errors.is_empty() {
        return Err(errors);
    }

    let mut registry = CharacterRegistry::default();
    for character in characters {
        registry.insert(character);
    }
    Ok(registry)
}

/// Load assets/data/characters.ron into a CharacterRegistry.
/// Returns every error found; a registry is only produced from a fully valid file.
pub fn load_characters(base_path: &Path) -> Result<CharacterRegistry, Vec<ContentLoadError>> {
    let path = base_path.join(CHARACTERS_FILE);
    let characters = load_data_file::<CharacterDef>(&path).map_err(|e| vec![e])?;
    build_registry(&path.display().to_string(), characters)
}
