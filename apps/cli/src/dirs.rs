use std::path::{Path, PathBuf};

const DATA_DIR_ENV: &str = "WATER_BILLING_DATA_DIR";
const DB_FILE_NAME: &str = "water-billing.sqlite";

#[derive(Debug, Clone)]
pub struct DataDirResolution {
    pub dir: PathBuf,
    pub matched_existing: bool,
}

pub fn db_path(dir: &Path) -> PathBuf {
    dir.join(DB_FILE_NAME)
}

pub fn resolve_data_dir() -> Result<DataDirResolution, String> {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        let dir = PathBuf::from(dir);
        let matched_existing = db_path(&dir).exists();
        return Ok(DataDirResolution {
            dir,
            matched_existing,
        });
    }

    let home = std::env::var("HOME").map_err(|err| format!("resolve HOME: {}", err))?;
    let home = PathBuf::from(home);

    let candidates = [
        home.join(".local").join("share").join("water-billing"),
        home.join(".water-billing"),
    ];

    for candidate in candidates {
        if db_path(&candidate).exists() {
            return Ok(DataDirResolution {
                dir: candidate,
                matched_existing: true,
            });
        }
    }

    Ok(DataDirResolution {
        dir: home.join(".local").join("share").join("water-billing"),
        matched_existing: false,
    })
}
