mod error;
mod exit_code;
mod traits;

pub use error::{RepositoryError, Result};
pub use exit_code::repository_error_to_exit_code;
pub use traits::UserRepository;
