//! Default-library setup state machine.
//!
//! Defines a pure state transition function for the first-run
//! provisioning flow. Side effects are returned as actions and executed
//! by the orchestrator in `ds-app`.

use std::path::PathBuf;

use crate::ids::RepoId;
use crate::repo::{LocalRepo, RepoDownloadInfo};
use crate::setup::SetupFailure;

/// Provisioning flow state.
///
/// 首次配置流程状态。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupState {
    /// Dialog shown, waiting for the user to confirm.
    Idle,
    /// Create-default-repo request outstanding.
    CreatingDefaultRepo,
    /// Local-presence check right after creation succeeded. Not a
    /// suspension point: the orchestrator feeds the query result back
    /// within the same turn.
    CheckingLocalPresence { repo_id: RepoId },
    /// Download-repo-info request outstanding.
    DownloadingRepoInfo { repo_id: RepoId },
    /// Destination folder creation plus the synchronous clone command.
    Cloning { repo_id: RepoId },
    /// Periodic local-repository validity checks while the clone
    /// downloads in the background.
    PollingDownload { repo_id: RepoId },
    /// Local repository confirmed valid.
    Succeeded,
    /// A step reported a fatal error.
    Failed { failure: SetupFailure },
    /// User aborted the flow.
    Cancelled,
}

impl SetupState {
    /// Terminal states swallow every further event, including stale
    /// network completions that arrive after cancellation.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SetupState::Succeeded | SetupState::Failed { .. } | SetupState::Cancelled
        )
    }
}

/// Events that drive the provisioning flow.
///
/// 驱动配置流程的事件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupEvent {
    /// User confirmed the dialog.
    Start,
    /// Create-default-repo completed (network callback).
    CreateRepoSucceeded { repo_id: RepoId },
    /// Create-default-repo failed with a server code.
    CreateRepoFailed { code: i32 },
    /// The daemon already holds a valid copy of the repository.
    LocalRepoFound { repo: LocalRepo },
    /// The daemon has no valid copy yet.
    LocalRepoMissing,
    /// Download-repo-info completed (network callback).
    DownloadInfoSucceeded { info: RepoDownloadInfo },
    /// Download-repo-info failed with a server code.
    DownloadInfoFailed { code: i32 },
    /// The destination folder could not be created.
    CloneDirFailed { path: PathBuf },
    /// The daemon rejected the clone command.
    CloneFailed { error: String },
    /// The daemon accepted the clone command.
    CloneStarted,
    /// A poll tick observed the repository valid on disk.
    PollObservedRepo { repo: LocalRepo },
    /// User aborted.
    Cancel,
}

/// Side-effects produced by state transitions.
///
/// 状态迁移产生的副作用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupAction {
    /// Issue the async create-default-repo request.
    CreateDefaultRepo,
    /// Query the local daemon for the repository (synchronous).
    QueryLocalRepo { repo_id: RepoId },
    /// Issue the async download-repo-info request.
    FetchDownloadInfo { repo_id: RepoId },
    /// Create the destination folder and issue the clone command.
    CloneRepo { info: RepoDownloadInfo },
    /// Start the recurring download-progress check.
    StartPollTimer { repo_id: RepoId },
    /// Stop the recurring download-progress check.
    StopPollTimer,
    /// Record the worktree as the virtual drive root.
    SetVirtualDrive { worktree: PathBuf },
    /// Best-effort copy of the bundled getting-started document.
    CopyWelcomeDoc { worktree: PathBuf },
    /// Persist the setup-done flag.
    MarkSetupDone,
    /// Report the terminal outcome to the UI shell.
    EmitResult {
        success: bool,
        failure: Option<SetupFailure>,
    },
    /// Report cancellation to the UI shell.
    EmitCancelled,
}

/// Pure setup state machine.
///
/// 纯状态机：不包含副作用。
pub struct SetupStateMachine;

impl SetupStateMachine {
    pub fn transition(state: SetupState, event: SetupEvent) -> (SetupState, Vec<SetupAction>) {
        match (state, event) {
            (SetupState::Idle, SetupEvent::Start) => (
                SetupState::CreatingDefaultRepo,
                vec![SetupAction::CreateDefaultRepo],
            ),
            (SetupState::CreatingDefaultRepo, SetupEvent::CreateRepoSucceeded { repo_id }) => (
                SetupState::CheckingLocalPresence {
                    repo_id: repo_id.clone(),
                },
                vec![SetupAction::QueryLocalRepo { repo_id }],
            ),
            (SetupState::CreatingDefaultRepo, SetupEvent::CreateRepoFailed { code }) => {
                let failure = if code == 404 {
                    SetupFailure::ServerTooOld
                } else {
                    SetupFailure::CreateRepo { code }
                };
                Self::fail(failure)
            }
            // A previous run may have already cloned the default
            // library; skip the download entirely.
            (SetupState::CheckingLocalPresence { .. }, SetupEvent::LocalRepoFound { repo }) => (
                SetupState::Succeeded,
                vec![
                    SetupAction::SetVirtualDrive {
                        worktree: repo.worktree,
                    },
                    SetupAction::MarkSetupDone,
                    SetupAction::EmitResult {
                        success: true,
                        failure: None,
                    },
                ],
            ),
            (SetupState::CheckingLocalPresence { repo_id }, SetupEvent::LocalRepoMissing) => (
                SetupState::DownloadingRepoInfo {
                    repo_id: repo_id.clone(),
                },
                vec![SetupAction::FetchDownloadInfo { repo_id }],
            ),
            (
                SetupState::DownloadingRepoInfo { repo_id },
                SetupEvent::DownloadInfoSucceeded { info },
            ) => (
                SetupState::Cloning { repo_id },
                vec![SetupAction::CloneRepo { info }],
            ),
            (SetupState::DownloadingRepoInfo { .. }, SetupEvent::DownloadInfoFailed { code }) => {
                Self::fail(SetupFailure::DownloadInfo { code })
            }
            (SetupState::Cloning { .. }, SetupEvent::CloneDirFailed { path }) => {
                Self::fail(SetupFailure::CreateFolder { path })
            }
            (SetupState::Cloning { .. }, SetupEvent::CloneFailed { error }) => {
                Self::fail(SetupFailure::Clone { error })
            }
            (SetupState::Cloning { repo_id }, SetupEvent::CloneStarted) => (
                SetupState::PollingDownload {
                    repo_id: repo_id.clone(),
                },
                vec![SetupAction::StartPollTimer { repo_id }],
            ),
            (SetupState::PollingDownload { .. }, SetupEvent::PollObservedRepo { repo }) => (
                SetupState::Succeeded,
                vec![
                    SetupAction::StopPollTimer,
                    SetupAction::SetVirtualDrive {
                        worktree: repo.worktree.clone(),
                    },
                    SetupAction::MarkSetupDone,
                    SetupAction::CopyWelcomeDoc {
                        worktree: repo.worktree,
                    },
                    SetupAction::EmitResult {
                        success: true,
                        failure: None,
                    },
                ],
            ),
            (SetupState::PollingDownload { .. }, SetupEvent::Cancel) => (
                SetupState::Cancelled,
                vec![
                    SetupAction::StopPollTimer,
                    SetupAction::MarkSetupDone,
                    SetupAction::EmitCancelled,
                ],
            ),
            // Cancellation from any other non-terminal state still
            // persists the flag so the user is not re-prompted.
            (state, SetupEvent::Cancel) if !state.is_terminal() => (
                SetupState::Cancelled,
                vec![SetupAction::MarkSetupDone, SetupAction::EmitCancelled],
            ),
            // Stale completions after a terminal state, duplicate
            // starts and out-of-order callbacks are all no-ops.
            (state, _event) => (state, Vec::new()),
        }
    }

    fn fail(failure: SetupFailure) -> (SetupState, Vec<SetupAction>) {
        (
            SetupState::Failed {
                failure: failure.clone(),
            },
            vec![SetupAction::EmitResult {
                success: false,
                failure: Some(failure),
            }],
        )
    }
}
