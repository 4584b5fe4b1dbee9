pub mod command;
pub mod df;
pub mod fsck;
pub mod mounts;
