//! Store commands: lifecycle of the document store itself

mod init;

pub use init::InitStore;
