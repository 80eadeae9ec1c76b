mod init;
mod macros;
mod run_id;

pub use init::init_logger;
pub use macros::run_span;
pub use run_id::RunId;
