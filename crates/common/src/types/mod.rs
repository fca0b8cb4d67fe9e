mod analysis_type;
mod output;
mod request;
mod result;

pub use analysis_type::*;
pub use output::*;
pub use request::*;
pub use result::*;
