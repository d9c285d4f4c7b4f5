#[derive(Debug, Clone)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskCreated(String),
    TaskUpdated(String),
    TaskDeleted(String),
    TaskCompleted(String),
    TaskReopened(String),
    TaskNotFoundWithId(String),
    TaskCreateFailed(String),
    TaskUpdateFailed(String),
    TaskDeleteFailed(String),
    TaskToggleFailed(String),
    TasksNotFound,
    TasksNoMatch(usize),
    TasksShown(usize, usize),
    ConfirmDeleteTask(String),
    NoChangesDetected,
    ValidationFailed(String),
    InvalidDate(String),

    // === TAG MESSAGES ===
    TagsHeader,
    NoTagsFound,

    // === STATS MESSAGES ===
    StatsHeader,

    // === STORE MESSAGES ===
    StoreListFailed(String),
    StoreCreateFailed(String),
    StoreUpdateFailed(String, String),
    StoreDeleteFailed(String, String),
    StoreToggleFailed(String, String),
    StoreTagsFailed(String),
    RefreshFailed,
    RemoteStoreNotConfigured,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigModuleRemote,
    ConfigModuleLocal,
    BackendRemote,
    BackendLocal,
    PromptSelectBackend,
    PromptApiUrl,
    PromptApiKey,
    PromptTimeout,
    PromptDbFile,

    // === GENERIC MESSAGES ===
    OperationCancelled,
}
