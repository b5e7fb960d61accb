pub mod config;
pub mod logging;

pub mod dispatch;
pub mod input;
pub mod proxy;
pub mod report;
pub mod resolve;
