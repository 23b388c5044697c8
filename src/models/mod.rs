pub mod category;
pub mod chat;
pub mod completion;
pub mod range;
pub mod record;

pub use category::*;
pub use completion::*;
pub use range::*;
pub use record::*;
