use anyhow::{Context, Result};
use std::path::PathBuf;

/// Get the Driftsync application data root directory.
///
/// 获取 Driftsync 应用数据根目录。
///
/// # Platform-specific Paths / 平台特定路径
/// - macOS: ~/Library/Application Support/Driftsync
/// - Windows: %APPDATA%\Driftsync
/// - Linux: $XDG_DATA_HOME/Driftsync or ~/.local/share/Driftsync
///
/// This function does not create the directory; the caller decides
/// when to create it.
pub fn app_data_dir() -> Result<PathBuf> {
    let base_dir =
        get_platform_data_dir().context("Failed to get platform-specific data directory")?;

    Ok(base_dir.join("Driftsync"))
}

/// 获取默认资料库所在目录
pub fn default_worktree_dir() -> Result<PathBuf> {
    Ok(app_data_dir()?.join("libraries"))
}

/// 根据平台获取基础数据目录
fn get_platform_data_dir() -> Result<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        if let Some(xdg_data_home) = std::env::var_os("XDG_DATA_HOME") {
            Ok(PathBuf::from(xdg_data_home))
        } else {
            dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Unable to get Linux data directory"))
        }
    }

    #[cfg(not(target_os = "linux"))]
    {
        dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Unable to get platform data directory"))
    }
}
