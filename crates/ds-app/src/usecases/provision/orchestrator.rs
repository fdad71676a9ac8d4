//! Default-library provisioning orchestrator
//!
//! 这个模块负责编排首次配置状态机,将网络完成、守护进程查询和定时器事件转换为
//! 状态机事件,并执行状态机返回的动作。
//!
//! # Architecture / 架构
//!
//! ```text
//! Network/Daemon/Timer completions
//!   ↓
//! ProvisionOrchestrator (converts completions)
//!   ↓
//! SetupStateMachine (pure state transitions)
//!   ↓
//! SetupActions (executed by orchestrator)
//!   ↓
//! Daemon/Settings/Filesystem side effects
//! ```

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::{mpsc, Mutex};
use tokio::task::AbortHandle;
use tracing::{info_span, Instrument};

use ds_core::ports::{
    ConfiguratorPort, RepoServicePort, SetupStatusPort, SyncDaemonPort, WelcomeDocPort,
};
use ds_core::setup::{SetupAction, SetupEvent, SetupState, SetupStateMachine, SetupStatus};
use ds_core::{Account, CloneRequest};

use super::events::ProvisionEvent;

const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;

/// 配置编排器配置
#[derive(Debug, Clone)]
pub struct ProvisionConfig {
    /// Interval between local-repository validity checks while the
    /// clone downloads.
    pub poll_interval: Duration,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

/// 配置编排器
///
/// Drives the one-time default-library setup flow to completion,
/// failure or cancellation. One instance per dialog; `start` fires the
/// workflow, `cancel` aborts it, and every asynchronous completion is
/// funneled through the state machine so stale callbacks after a
/// terminal state degrade to no-ops.
#[derive(Clone)]
pub struct ProvisionOrchestrator {
    /// 配置
    config: ProvisionConfig,
    /// 账户上下文
    account: Account,
    /// 服务器请求端口
    repo_service: Arc<dyn RepoServicePort>,
    /// 本地同步守护进程端口
    daemon: Arc<dyn SyncDaemonPort>,
    /// 客户端配置端口
    configurator: Arc<dyn ConfiguratorPort>,
    /// 持久化设置端口
    setup_status: Arc<dyn SetupStatusPort>,
    /// 入门文档端口
    welcome_doc: Arc<dyn WelcomeDocPort>,
    /// 当前状态
    state: Arc<Mutex<SetupState>>,
    /// 轮询定时器句柄
    poll_timer: Arc<Mutex<Option<AbortHandle>>>,
    /// 事件发送器
    event_tx: mpsc::Sender<ProvisionEvent>,
}

impl ProvisionOrchestrator {
    /// 创建新的配置编排器
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: ProvisionConfig,
        account: Account,
        repo_service: Arc<dyn RepoServicePort>,
        daemon: Arc<dyn SyncDaemonPort>,
        configurator: Arc<dyn ConfiguratorPort>,
        setup_status: Arc<dyn SetupStatusPort>,
        welcome_doc: Arc<dyn WelcomeDocPort>,
    ) -> (Self, mpsc::Receiver<ProvisionEvent>) {
        let (event_tx, event_rx) = mpsc::channel(100);

        let orchestrator = Self {
            config,
            account,
            repo_service,
            daemon,
            configurator,
            setup_status,
            welcome_doc,
            state: Arc::new(Mutex::new(SetupState::Idle)),
            poll_timer: Arc::new(Mutex::new(None)),
            event_tx,
        };

        (orchestrator, event_rx)
    }

    /// 启动配置流程
    ///
    /// A second call while the flow is running is a no-op; the state
    /// machine only accepts `Start` from `Idle`.
    pub async fn start(&self) -> Result<()> {
        let span = info_span!(
            "provision.start",
            server = %self.account.server_url
        );
        self.apply(SetupEvent::Start).instrument(span).await
    }

    /// 取消配置流程
    ///
    /// Still persists the setup-done flag so the user is not prompted
    /// again on the next launch.
    pub async fn cancel(&self) -> Result<()> {
        let span = info_span!("provision.cancel");
        self.apply(SetupEvent::Cancel).instrument(span).await
    }

    /// 当前状态快照
    pub async fn state(&self) -> SetupState {
        self.state.lock().await.clone()
    }

    /// 将事件送入状态机并执行返回的动作
    ///
    /// Actions that produce an immediate follow-up event (the local
    /// presence check, the clone command) are processed through an
    /// explicit queue instead of recursing.
    fn apply(&self, event: SetupEvent) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            let mut queue = VecDeque::from([event]);

            while let Some(event) = queue.pop_front() {
                let actions = {
                    let mut state = self.state.lock().await;
                    let (next, actions) = SetupStateMachine::transition(state.clone(), event);
                    tracing::debug!(
                        new_state = ?next,
                        num_actions = actions.len(),
                        "setup transition applied"
                    );
                    *state = next;
                    actions
                };

                for action in actions {
                    if let Some(follow_up) = self.execute(action).await? {
                        queue.push_back(follow_up);
                    }
                }
            }

            Ok(())
        })
    }

    /// 执行单个动作
    async fn execute(&self, action: SetupAction) -> Result<Option<SetupEvent>> {
        match action {
            SetupAction::CreateDefaultRepo => {
                self.emit_status("Checking your default library...").await;
                let orchestrator = self.clone();
                let future: Pin<Box<dyn Future<Output = ()> + Send>> = Box::pin(async move {
                    let event = match orchestrator
                        .repo_service
                        .create_default_repo(&orchestrator.account)
                        .await
                    {
                        Ok(repo_id) => SetupEvent::CreateRepoSucceeded { repo_id },
                        Err(error) => SetupEvent::CreateRepoFailed { code: error.code },
                    };
                    if let Err(error) = orchestrator.apply(event).await {
                        tracing::error!(
                            error = ?error,
                            "create-default-repo completion handling failed"
                        );
                    }
                });
                tokio::spawn(future);
                Ok(None)
            }
            SetupAction::QueryLocalRepo { repo_id } => {
                Ok(Some(match self.daemon.get_local_repo(&repo_id) {
                    Some(repo) => {
                        tracing::debug!(repo_id = %repo_id, "default repo is already downloaded");
                        SetupEvent::LocalRepoFound { repo }
                    }
                    None => SetupEvent::LocalRepoMissing,
                }))
            }
            SetupAction::FetchDownloadInfo { repo_id } => {
                let orchestrator = self.clone();
                let future: Pin<Box<dyn Future<Output = ()> + Send>> = Box::pin(async move {
                    let event = match orchestrator
                        .repo_service
                        .get_repo_download_info(&orchestrator.account, &repo_id)
                        .await
                    {
                        Ok(info) => SetupEvent::DownloadInfoSucceeded { info },
                        Err(error) => SetupEvent::DownloadInfoFailed { code: error.code },
                    };
                    if let Err(error) = orchestrator.apply(event).await {
                        tracing::error!(
                            error = ?error,
                            "download-repo-info completion handling failed"
                        );
                    }
                });
                tokio::spawn(future);
                Ok(None)
            }
            SetupAction::CloneRepo { info } => {
                let dest_path = self.configurator.worktree_dir().join(&info.repo_name);
                if let Err(error) = std::fs::create_dir_all(&dest_path) {
                    tracing::warn!(
                        path = %dest_path.display(),
                        error = %error,
                        "failed to create worktree folder"
                    );
                    return Ok(Some(SetupEvent::CloneDirFailed { path: dest_path }));
                }

                let request = CloneRequest::from_download_info(&info, dest_path);
                Ok(Some(match self.daemon.clone_repo(&request) {
                    Ok(()) => SetupEvent::CloneStarted,
                    Err(error) => SetupEvent::CloneFailed {
                        error: error.message,
                    },
                }))
            }
            SetupAction::StartPollTimer { repo_id } => {
                self.emit_status("Downloading default library...").await;
                let orchestrator = self.clone();
                let interval = self.config.poll_interval;
                // The loop only observes; the completion is handled in a
                // fresh task so stopping the timer never aborts the
                // handling mid-flight.
                let future: Pin<Box<dyn Future<Output = ()> + Send>> = Box::pin(async move {
                    loop {
                        tokio::time::sleep(interval).await;
                        if let Some(repo) = orchestrator.daemon.get_local_repo(&repo_id) {
                            let orchestrator = orchestrator.clone();
                            let completion: Pin<Box<dyn Future<Output = ()> + Send>> =
                                Box::pin(async move {
                                    if let Err(error) = orchestrator
                                        .apply(SetupEvent::PollObservedRepo { repo })
                                        .await
                                    {
                                        tracing::error!(
                                            error = ?error,
                                            "download-progress completion handling failed"
                                        );
                                    }
                                });
                            tokio::spawn(completion);
                            break;
                        }
                    }
                });
                let handle = tokio::spawn(future).abort_handle();

                // Cancellation may have raced ahead while the status
                // text was being emitted; a timer must never outlive
                // the flow, so re-check under the state lock before
                // installing the handle.
                let state = self.state.lock().await;
                if matches!(*state, SetupState::PollingDownload { .. }) {
                    let mut timer = self.poll_timer.lock().await;
                    if let Some(previous) = timer.replace(handle) {
                        previous.abort();
                    }
                } else {
                    handle.abort();
                }
                Ok(None)
            }
            SetupAction::StopPollTimer => {
                if let Some(handle) = self.poll_timer.lock().await.take() {
                    handle.abort();
                }
                Ok(None)
            }
            SetupAction::SetVirtualDrive { worktree } => {
                self.emit_status("Updating default library...").await;
                self.configurator.set_virtual_drive(&worktree).await?;
                Ok(None)
            }
            SetupAction::MarkSetupDone => {
                self.setup_status
                    .set_status(&SetupStatus {
                        default_library_configured: true,
                    })
                    .await?;
                Ok(None)
            }
            SetupAction::CopyWelcomeDoc { worktree } => {
                if let Err(error) = self.welcome_doc.copy_into(&worktree).await {
                    tracing::warn!(
                        error = ?error,
                        worktree = %worktree.display(),
                        "failed to copy getting-started document"
                    );
                }
                Ok(None)
            }
            SetupAction::EmitResult { success, failure } => {
                if success {
                    self.emit_status("The default library has been setup. Please click the \"Finish\" button")
                        .await;
                    self.emit(ProvisionEvent::Succeeded).await;
                } else {
                    let message = failure
                        .map(|failure| failure.to_string())
                        .unwrap_or_else(|| "Failed to set up default library".to_string());
                    self.emit(ProvisionEvent::Failed { message }).await;
                }
                Ok(None)
            }
            SetupAction::EmitCancelled => {
                self.emit(ProvisionEvent::Cancelled).await;
                Ok(None)
            }
        }
    }

    async fn emit_status(&self, message: &str) {
        self.emit(ProvisionEvent::StatusChanged {
            message: message.to_string(),
        })
        .await;
    }

    async fn emit(&self, event: ProvisionEvent) {
        if self.event_tx.send(event).await.is_err() {
            tracing::debug!("provision event receiver dropped");
        }
    }
}
