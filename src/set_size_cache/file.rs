use crate::error::FileError;
use crate::helpers::write_file_atomic;
use crate::types::{AppId, ServerTime};
use std::collections::BTreeMap;
use std::path::Path;
use serde::{Serialize, Deserialize};

/// The persisted contents of a set size cache.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetSizeFile {
    /// The name of the bot sets are shipped from.
    #[serde(default)]
    pub shipping_bot: Option<String>,
    /// Cards per set keyed by game.
    #[serde(default)]
    pub set_sizes: BTreeMap<AppId, u32>,
    /// When the file was last written.
    #[serde(default)]
    #[serde(with = "chrono::serde::ts_seconds_option")]
    pub updated_at: Option<ServerTime>,
}

pub async fn load_set_sizes(
    filepath: &Path,
) -> Result<SetSizeFile, FileError> {
    let data = async_fs::read_to_string(filepath).await?;
    let file = serde_json::from_str::<SetSizeFile>(&data)?;
    
    Ok(file)
}

pub async fn save_set_sizes(
    filepath: &Path,
    file: &SetSizeFile,
) -> Result<(), FileError> {
    let data = serde_json::to_vec_pretty(file)?;
    
    write_file_atomic(filepath, &data).await?;
    
    Ok(())
}
