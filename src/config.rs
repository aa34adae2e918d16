use std::io::ErrorKind;
use std::path::PathBuf;
use std::{env, fs, io};

use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Paths {
    /// Candidate posts directories, probed in order. The environment
    /// override (see [Content::posts_dir_env]) is checked before any of
    /// these.
    pub posts_dirs: Vec<PathBuf>,
    pub public_dir: PathBuf,
}

#[derive(Deserialize, Debug)]
pub struct Content {
    pub posts_dir_env: Option<String>,
    pub cache_enabled: bool,
}

impl Content {
    pub fn posts_dir_env_name(&self) -> String {
        self.posts_dir_env
            .clone()
            .unwrap_or_else(|| "BLOG_POSTS_DIR".to_string())
    }
}

#[derive(Deserialize, Debug)]
pub struct Server {
    pub address: String,
    pub port: u16,
    /// Shared secret for the refresh endpoint. Unset means the endpoint
    /// always rejects.
    pub refresh_secret: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug)]
pub struct Config {
    pub paths: Paths,
    pub content: Content,
    pub server: Server,
    pub log: Option<Log>,
}

fn parse_path(path: PathBuf) -> PathBuf {
    if path.starts_with("${exe_dir}") {
        let cur_exe = env::current_exe().unwrap();
        let exe_dir = cur_exe.parent().unwrap().to_str().unwrap();
        let str_path = path.to_str().unwrap();
        PathBuf::from(str_path.replace("${exe_dir}", exe_dir))
    } else {
        path
    }
}

pub fn read_config(cfg_path: &PathBuf) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => {
            return Err(io::Error::new(
                e.kind(),
                format!(
                    "Error opening configuration file {}: {}",
                    cfg_path.display(),
                    e
                ),
            ))
        }
    };

    let mut cfg: Config = match toml::from_str::<Config>(cfg_content.as_str()) {
        Ok(cfg) => cfg,
        Err(e) => {
            return Err(io::Error::new(
                ErrorKind::InvalidData,
                format!("Error parsing configuration file: {}", e),
            ))
        }
    };

    cfg.paths = Paths {
        posts_dirs: cfg.paths.posts_dirs.into_iter().map(parse_path).collect(),
        public_dir: parse_path(cfg.paths.public_dir),
    };

    Ok(cfg)
}
