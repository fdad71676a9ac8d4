//! Repository descriptors exchanged with the server and the local sync daemon.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ids::RepoId;

/// A repository the local sync daemon has fully materialized on disk.
///
/// The daemon only reports a repository once its clone has completed,
/// so holding a `LocalRepo` implies validity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalRepo {
    pub id: RepoId,
    pub name: String,
    /// Local filesystem path where the repository's files live.
    pub worktree: PathBuf,
}

/// Transport and crypto parameters required to clone a repository,
/// as returned by the download-repo-info request.
///
/// 下载仓库所需的中转与加密参数。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoDownloadInfo {
    pub repo_id: RepoId,
    pub repo_name: String,
    pub relay_id: String,
    pub relay_addr: String,
    pub relay_port: u16,
    pub token: String,
    pub magic: String,
    pub random_key: String,
    pub enc_version: i32,
    pub email: String,
}

/// Full argument set for the daemon's clone command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneRequest {
    pub repo_id: RepoId,
    pub relay_id: String,
    pub repo_name: String,
    pub dest_path: PathBuf,
    pub token: String,
    pub password: Option<String>,
    pub magic: String,
    pub relay_addr: String,
    pub relay_port: u16,
    pub email: String,
    pub random_key: String,
    pub enc_version: i32,
}

impl CloneRequest {
    /// Build the clone command for a download-info payload, targeting
    /// `dest_path` as the new worktree. The default library carries no
    /// user password.
    pub fn from_download_info(info: &RepoDownloadInfo, dest_path: PathBuf) -> Self {
        Self {
            repo_id: info.repo_id.clone(),
            relay_id: info.relay_id.clone(),
            repo_name: info.repo_name.clone(),
            dest_path,
            token: info.token.clone(),
            password: None,
            magic: info.magic.clone(),
            relay_addr: info.relay_addr.clone(),
            relay_port: info.relay_port,
            email: info.email.clone(),
            random_key: info.random_key.clone(),
            enc_version: info.enc_version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_request_carries_all_download_info_fields() {
        let info = RepoDownloadInfo {
            repo_id: RepoId::from("repo-1"),
            repo_name: "My Library".to_string(),
            relay_id: "relay-9".to_string(),
            relay_addr: "relay.example.com".to_string(),
            relay_port: 10001,
            token: "tok".to_string(),
            magic: "magic".to_string(),
            random_key: "rk".to_string(),
            enc_version: 2,
            email: "user@example.com".to_string(),
        };

        let request = CloneRequest::from_download_info(&info, PathBuf::from("/data/My Library"));

        assert_eq!(request.repo_id, RepoId::from("repo-1"));
        assert_eq!(request.relay_addr, "relay.example.com");
        assert_eq!(request.relay_port, 10001);
        assert_eq!(request.dest_path, PathBuf::from("/data/My Library"));
        assert_eq!(request.password, None);
        assert_eq!(request.enc_version, 2);
    }
}
