pub mod clock;
pub mod currency;
pub mod error;
pub mod numeric;

pub use clock::{Clock, FixedClock, SystemClock};
pub use currency::Currency;
pub use error::{AppError, Result};
pub use numeric::{DecimalBounds, NumericInput, COMPUTED, MONEY, RATE};
