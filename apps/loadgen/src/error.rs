pub type Result<T, E = Error> = std::result::Result<T, E>;
pub type Error = color_eyre::eyre::Report;

pub use color_eyre::eyre::WrapErr;
