pub mod conversion;
pub mod definition;
pub mod target;
pub mod wire;

pub use conversion::*;
pub use definition::*;
pub use target::*;
pub use wire::*;
