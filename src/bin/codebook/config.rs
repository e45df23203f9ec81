use std::env;
use std::path::PathBuf;

use codebook::config::{read_config, Config};

use crate::config_data::write_sample_cfg;
use crate::CFG_FILE_NAME;

fn get_config_path() -> Option<PathBuf> {
    let mut candidates = vec![];

    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.push(exe_dir.join(CFG_FILE_NAME));
        }
    }
    if let Ok(cur_dir) = env::current_dir() {
        candidates.push(cur_dir.join(CFG_FILE_NAME));
    }
    if let Some(cfg_dir) = dirs::config_dir() {
        candidates.push(cfg_dir.join(CFG_FILE_NAME));
    }

    candidates.into_iter().find(|p| p.exists())
}

pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config, String> {
    let config_path = match cfg_path.or_else(get_config_path) {
        None => return Err("Could not find CodeBook configuration".to_string()),
        Some(x) => x,
    };

    read_config(&config_path).map_err(|e| e.to_string())
}

pub(crate) fn generate_cfg(config_path: Option<PathBuf>) -> Result<PathBuf, String> {
    let path = match config_path {
        Some(path) => path,
        None => match dirs::config_dir() {
            Some(cfg_dir) => cfg_dir.join(CFG_FILE_NAME),
            None => return Err("Could not find user config dir".to_string()),
        },
    };

    write_sample_cfg(&path).map_err(|e| format!("Error writing {}: {}", path.display(), e))?;
    Ok(path)
}
