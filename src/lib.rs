pub mod binding;
pub mod config;
pub mod constants;
pub mod error;
pub mod filter;
pub mod modulation;
pub mod plots;
pub mod recording;
pub mod types;
pub mod upfirlerp;
pub mod util;

pub use binding::{DynUfl, UflDouble, UflFloat};
pub use error::{UflError, UflResult};
pub use types::{ArrayMut, ArrayRef, DType, Precision, Sample};
pub use upfirlerp::UpfirLerp;
