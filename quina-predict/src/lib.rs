pub mod candidates;
pub mod display;
pub mod ensemble;
pub mod oracle;
