pub mod app_config;
pub mod apply;
pub mod config;
pub mod error;
pub mod intake;
pub mod key;
pub mod matrix;
pub mod product;
pub mod reconcile;
pub mod returns;

pub use app_config::{AppConfig, Environment};
pub use apply::{apply_operations, ApplyError, VariantWriter};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, VariantError};
pub use intake::{validate_intake, IntakeEntry, IntakeLine};
pub use key::{
    discover_cups, infer_mode, merged_cups, normalize, BaseSize, VariantKey, VariantMode,
    DEFAULT_CUP_SIZES,
};
pub use matrix::{parse_quantity, VariantMatrix};
pub use product::{PersistedSize, Product, ProductKind, SizeLabel};
pub use reconcile::{diff, ReconciliationOperation};
pub use returns::{check_cross_total, plan_return, validate_return, ReturnLine, ReturnPlan, ReturnSummary};
