use std::fs;
use std::collections::HashMap;
use std::env;

use tracing::{info, warn};

use super::direction::Direction;
use super::error::ConfigError;
use crate::modules::scheduling::StrategyKind;

const CONFIG_FILE_PATH: &str = "config.json";
const FALLBACK_CONFIG_FILE_PATH: &str = "_config.json";

const DEFAULT_NUM_ELEVATORS: u32 = 2;
const DEFAULT_NUM_FLOORS: u32 = 10;
const DEFAULT_STEPS: u32 = 8;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub struct SimulationSection {
    pub strategy: String,
    pub steps: u32,
}

/// One request replayed by the simulation driver before stepping.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ScriptedRequest {
    Hall { elevator: usize, floor: u32, direction: Direction },
    Cab { elevator: usize, floor: u32 },
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub struct ConfigFile {
    pub building: HashMap<String, u32>,
    pub simulation: SimulationSection,
    #[serde(default)]
    pub requests: Vec<ScriptedRequest>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        ConfigFile {
            building: HashMap::from([
                (String::from("num_elevators"), DEFAULT_NUM_ELEVATORS),
                (String::from("num_floors"), DEFAULT_NUM_FLOORS),
            ]),
            simulation: SimulationSection {
                strategy: String::from("scan"),
                steps: DEFAULT_STEPS,
            },
            requests: vec![
                ScriptedRequest::Hall { elevator: 0, floor: 3, direction: Direction::Up },
                ScriptedRequest::Hall { elevator: 1, floor: 7, direction: Direction::Down },
                ScriptedRequest::Cab { elevator: 0, floor: 5 },
                ScriptedRequest::Cab { elevator: 1, floor: 2 },
            ],
        }
    }
}

#[derive(Debug, Clone)]
pub struct BuildingConfig {
    pub num_elevators: usize,
    pub num_floors: u32,
}

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub strategy: StrategyKind,
    pub steps: u32,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub building: BuildingConfig,
    pub simulation: SimulationConfig,
    pub requests: Vec<ScriptedRequest>,
}

/// Overrides given as `--flag value` pairs on the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvArgs {
    pub config_path: Option<String>,
    pub elevators: Option<usize>,
    pub strategy: Option<String>,
    pub steps: Option<u32>,
}

impl Config {
    pub fn get() -> Result<Self, ConfigError> {
        let args: Vec<String> = env::args().collect();
        let env_args = parse_env_args(&args);
        let config_file = read_config_file(env_args.config_path.as_deref())?;
        Self::from_parts(config_file, &env_args)
    }

    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let config_file: ConfigFile = serde_json::from_str(contents)?;
        Self::from_parts(config_file, &EnvArgs::default())
    }

    fn from_parts(config_file: ConfigFile, env_args: &EnvArgs) -> Result<Self, ConfigError> {
        let strategy_name = env_args.strategy.clone().unwrap_or(config_file.simulation.strategy);
        let num_elevators = config_file.building.get("num_elevators").copied().unwrap_or(DEFAULT_NUM_ELEVATORS);
        let num_floors = config_file.building.get("num_floors").copied().unwrap_or(DEFAULT_NUM_FLOORS);

        Ok(Config {
            building: BuildingConfig {
                num_elevators: env_args.elevators.unwrap_or(num_elevators as usize),
                num_floors: num_floors,
            },
            simulation: SimulationConfig {
                strategy: strategy_name.parse()?,
                steps: env_args.steps.unwrap_or(config_file.simulation.steps),
            },
            requests: config_file.requests,
        })
    }
}

fn read_file(path: &str) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.to_string(), source })
}

fn read_config_file(explicit_path: Option<&str>) -> Result<ConfigFile, ConfigError> {
    let config_contents = match explicit_path {
        Some(path) => read_file(path)?,
        None => match fs::read_to_string(CONFIG_FILE_PATH) {
            Ok(content) => content,
            Err(_) => match fs::read_to_string(FALLBACK_CONFIG_FILE_PATH) {
                Ok(content) => {
                    info!("No configuration file provided, using {}...", FALLBACK_CONFIG_FILE_PATH);
                    content
                },
                Err(_) => {
                    info!("No configuration file found, using built-in settings...");
                    return Ok(ConfigFile::default())
                },
            },
        },
    };
    Ok(serde_json::from_str(&config_contents)?)
}

pub fn parse_env_args(args: &[String]) -> EnvArgs {
    let mut env_args = EnvArgs::default();

    for arg_pair in args.rchunks_exact(2) {
        match arg_pair[0].as_str() {
            "--config" => {
                env_args.config_path = Some(arg_pair[1].clone());
            },
            "--elevators" => {
                match arg_pair[1].parse::<usize>() {
                    Ok(num) => env_args.elevators = Some(num),
                    Err(_) => warn!("elevators {} is not a number, skipping...", arg_pair[1]),
                };
            },
            "--strategy" => {
                env_args.strategy = Some(arg_pair[1].clone());
            },
            "--steps" => {
                match arg_pair[1].parse::<u32>() {
                    Ok(num) => env_args.steps = Some(num),
                    Err(_) => warn!("steps {} is not a number, skipping...", arg_pair[1]),
                };
            },
            _ => warn!("illegal argument {}, skipping...", arg_pair[0]),
        }
    }
    env_args
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn parses_flag_pairs_after_program_name() {
        let parsed = parse_env_args(&args(&["elevator_dispatch", "--strategy", "fifo", "--steps", "3"]));
        assert_eq!(parsed.strategy.as_deref(), Some("fifo"));
        assert_eq!(parsed.steps, Some(3));
        assert_eq!(parsed.elevators, None);
    }

    #[test]
    fn skips_malformed_numbers() {
        let parsed = parse_env_args(&args(&["elevator_dispatch", "--elevators", "many"]));
        assert_eq!(parsed, EnvArgs::default());
    }

    #[test]
    fn reads_json_configuration() {
        let config = Config::from_json(r#"{
            "building": { "num_elevators": 3, "num_floors": 12 },
            "simulation": { "strategy": "fifo", "steps": 5 },
            "requests": [
                { "kind": "hall", "elevator": 2, "floor": 9, "direction": "down" },
                { "kind": "cab", "elevator": 0, "floor": 4 }
            ]
        }"#).unwrap();

        assert_eq!(config.building.num_elevators, 3);
        assert_eq!(config.building.num_floors, 12);
        assert_eq!(config.simulation.strategy, StrategyKind::Fifo);
        assert_eq!(config.simulation.steps, 5);
        assert_eq!(config.requests[0], ScriptedRequest::Hall { elevator: 2, floor: 9, direction: Direction::Down });
        assert_eq!(config.requests[1], ScriptedRequest::Cab { elevator: 0, floor: 4 });
    }

    #[test]
    fn unknown_strategy_is_reported() {
        let result = Config::from_json(r#"{
            "building": {},
            "simulation": { "strategy": "random", "steps": 1 }
        }"#);
        assert!(matches!(result, Err(ConfigError::UnknownStrategy(name)) if name == "random"));
    }

    #[test]
    fn missing_building_keys_use_defaults() {
        let config = Config::from_json(r#"{
            "building": {},
            "simulation": { "strategy": "scan", "steps": 2 }
        }"#).unwrap();
        assert_eq!(config.building.num_elevators, DEFAULT_NUM_ELEVATORS as usize);
        assert!(config.requests.is_empty());
    }
}
