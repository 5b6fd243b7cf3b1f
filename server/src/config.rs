use std::path::PathBuf;

pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const DEFAULT_ROSTER_PATH: &str = "data/tier_list.json";
pub const DEFAULT_IMAGES_DIR: &str = "data/images";
pub const DEFAULT_DIST_DIR: &str = "client/dist";

pub const ROSTER_CACHE_CONTROL: &str = "public, max-age=300";
pub const IMAGE_CACHE_CONTROL: &str = "public, max-age=86400";

pub fn server_port() -> u16 {
    std::env::var("MEMORIA_PORT")
        .ok()
        .and_then(|value| value.trim().parse::<u16>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_SERVER_PORT)
}

pub fn roster_path() -> PathBuf {
    path_from_env("ROSTER_PATH", DEFAULT_ROSTER_PATH)
}

pub fn images_dir() -> PathBuf {
    path_from_env("IMAGES_DIR", DEFAULT_IMAGES_DIR)
}

pub fn dist_dir() -> PathBuf {
    path_from_env("DIST_DIR", DEFAULT_DIST_DIR)
}

fn path_from_env(key: &str, default: &str) -> PathBuf {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}
