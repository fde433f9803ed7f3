use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::fs;
use anyhow::{Context, Result};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub input: InputConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub page: PageConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    pub data_csv: PathBuf,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MapConfig {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: u8,
    pub width: u32,  // pixels
    pub height: u32, // pixels
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            center_lat: 4.2105,
            center_lon: 101.9758,
            zoom: 6,
            width: 800,
            height: 600,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PageConfig {
    pub title: String,
    pub heading: String,
    pub description: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        PageConfig {
            title: "Malaysia Tourist Attractions".to_string(),
            heading: "Malaysia Tourist Attractions Map".to_string(),
            description: "Explore tourist attractions across Malaysia. Use the layer control to filter by type.".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OutputConfig {
    pub html: PathBuf,
    pub geojson: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            html: PathBuf::from("attractions_map.html"),
            geojson: PathBuf::from("attractions.geojson"),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig { port: 8501 }
    }
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)
            .with_context(|| "Failed to parse TOML configuration")?;
        Ok(config)
    }

    /// Config pointing at `data_csv` with every other section defaulted.
    pub fn for_data(data_csv: impl Into<PathBuf>) -> Self {
        AppConfig {
            input: InputConfig { data_csv: data_csv.into() },
            map: MapConfig::default(),
            page: PageConfig::default(),
            output: OutputConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = AppConfig::from_toml("[input]\ndata_csv = \"spots.csv\"\n").unwrap();
        assert_eq!(config.input.data_csv, PathBuf::from("spots.csv"));
        assert_eq!(config.map, MapConfig::default());
        assert_eq!(config.map.zoom, 6);
        assert_eq!(config.server.port, 8501);
        assert_eq!(config.page.title, "Malaysia Tourist Attractions");
    }

    #[test]
    fn test_partial_sections_override() {
        let toml = r#"
            [input]
            data_csv = "spots.csv"

            [map]
            zoom = 9

            [server]
            port = 3000
        "#;
        let config = AppConfig::from_toml(toml).unwrap();
        assert_eq!(config.map.zoom, 9);
        assert_eq!(config.map.center_lat, 4.2105);
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_missing_input_is_rejected() {
        assert!(AppConfig::from_toml("[map]\nzoom = 4\n").is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let err = AppConfig::load_from_file(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
