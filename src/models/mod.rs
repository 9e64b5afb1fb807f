pub mod income;
pub mod loan;
pub mod result;

pub use income::*;
pub use loan::*;
pub use result::*;
