pub mod error;
pub mod i18n;

pub use error::{ApiError, ApiResult};
pub use i18n::{Locale, normalize_locale};
