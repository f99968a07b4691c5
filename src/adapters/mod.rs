// Adapters layer: implementations of the domain ports (filesystem, processes, PATH lookup).

pub mod process;
pub mod toolchain;
pub mod workspace;

pub use process::SystemRunner;
pub use toolchain::PathToolLocator;
pub use workspace::LocalWorkspace;
