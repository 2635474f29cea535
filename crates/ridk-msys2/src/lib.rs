pub mod arch;
pub mod env;
pub mod installation;

pub use arch::Arch;
pub use env::EnvDelta;
pub use installation::Msys2Installation;
