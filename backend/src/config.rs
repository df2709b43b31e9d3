use log::info;
use std::env;
use std::fmt::Display;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

/// Runtime configuration, read from the environment with logged defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// SQLite database holding the member and loan documents.
    pub db_path: PathBuf,
    /// Where uploaded document photos and notice attachments land; served
    /// back at `/uploads`.
    pub uploads_dir: PathBuf,
    /// Composed notices are written here, one JSON file each. An external
    /// SMTP relay picks them up.
    pub outbox_dir: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        Self {
            host: try_load("SOCIETY_HOST", "127.0.0.1"),
            port: try_load("SOCIETY_PORT", "8080"),
            db_path: PathBuf::from(try_load::<String>("SOCIETY_DB", "society.sqlite")),
            uploads_dir: PathBuf::from(try_load::<String>("SOCIETY_UPLOADS_DIR", "uploads")),
            outbox_dir: PathBuf::from(try_load::<String>("SOCIETY_OUTBOX_DIR", "outbox")),
        }
    }

    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.uploads_dir)?;
        fs::create_dir_all(&self.outbox_dir)?;
        Ok(())
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    let raw = match env::var(key) {
        Ok(v) => v,
        Err(_) => {
            info!("{key} not set, using default: {default}");
            default.to_string()
        }
    };
    match raw.parse() {
        Ok(v) => v,
        Err(e) => panic!("invalid {key} value {raw:?}: {e}"),
    }
}

#[cfg(test)]
impl Config {
    /// Config rooted in a temp directory so tests never touch real state.
    pub(crate) fn for_tests(dir: &std::path::Path) -> Self {
        let cfg = Self {
            host: "127.0.0.1".into(),
            port: 0,
            db_path: dir.join("society-test.sqlite"),
            uploads_dir: dir.join("uploads"),
            outbox_dir: dir.join("outbox"),
        };
        cfg.ensure_dirs().unwrap();
        cfg
    }
}
