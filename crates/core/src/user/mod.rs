mod types;

pub use types::{User, USER_ENTITY};
