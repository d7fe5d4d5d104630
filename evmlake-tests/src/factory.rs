mod abis;
mod apis;
mod contracts;
mod logs;

pub use abis::*;
pub use apis::*;
pub use contracts::*;
pub use logs::*;
