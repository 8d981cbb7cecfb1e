mod error;
mod operations;
mod requests;
mod types;

pub use error::PackageError;
pub use operations::{generate_tracking_id, validate_tracking_id, MAX_TRACKING_ID_LEN};
pub use requests::{CreatePackageRequest, ReplacePackageRequest, UpdatePackageRequest};
pub use types::Package;
