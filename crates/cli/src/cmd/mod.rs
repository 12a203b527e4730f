mod info;
mod load;
mod resolve;

pub use info::cmd_info;
pub use load::cmd_load;
pub use resolve::cmd_resolve;
