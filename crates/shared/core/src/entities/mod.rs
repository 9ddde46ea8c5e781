mod bot;
mod bot_category;
mod configuration;
mod operation;
mod operation_kind;
mod operation_result;
mod operation_status;
mod target_module;

pub use bot::{Bot, MAX_OPERATION_INTERVAL_SECS};
pub use bot_category::BotCategory;
pub use configuration::{BotConfiguration, ConfigPatch, RiskTolerance, default_credit_categories};
pub use operation::{Operation, OperationId};
pub use operation_kind::OperationKind;
pub use operation_result::{OperationDetails, OperationResult};
pub use operation_status::{LifecycleError, OperationStatus};
pub use target_module::TargetModule;
